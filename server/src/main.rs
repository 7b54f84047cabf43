use std::net::TcpListener;

use anyhow::Context;

use sqlx::postgres::PgPoolOptions;

use formapp::telemetry;

use server::app;
use server::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = telemetry::create_subscriber("info", std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    let settings = Settings::load().context("Failed to load settings")?;

    // Connect lazily so the process comes up (and reports unhealthy) while the database is down
    let pool = PgPoolOptions::new()
        .acquire_timeout(settings.database.connect_timeout())
        .connect_lazy_with(settings.database.with_db());

    let listener = TcpListener::bind(settings.app.addr())?;
    tracing::info!("Server running on {}", listener.local_addr()?);

    app::run(listener, pool, settings.cors, settings.app.request_logging())?
        .await
        .context("Failed to run app")
}
