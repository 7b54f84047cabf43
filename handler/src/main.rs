use anyhow::Context;

use formapp::telemetry;

use handler::connector::Connector;
use handler::runtime::{self, RuntimeClient};
use handler::settings::{self, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = telemetry::create_subscriber("info", std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    let settings = Settings::load().context("Failed to load settings")?;

    let connector = Connector::new(
        settings.database.with_db(),
        settings.database.connect_timeout(),
    );
    let client = RuntimeClient::new(settings::runtime_api_url()?)?;

    runtime::run(&client, &connector)
        .await
        .context("Runtime API loop failed")
}
