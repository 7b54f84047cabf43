use std::env;

use anyhow::Context;

use config::{Config, Environment};

use serde::Deserialize;

use url::Url;

use formapp::settings::DatabaseSettings;

/// Environment variable holding the `host:port` of the gateway runtime API
pub const RUNTIME_API_VAR: &str = "AWS_LAMBDA_RUNTIME_API";

/// Handler settings, taken from the environment only
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
}

impl Settings {
    /// Load settings from `APP_<settings category>__<setting name>` variables
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Environment::with_prefix("app"))
    }

    pub fn load_from(source: Environment) -> anyhow::Result<Self> {
        Config::builder()
            .add_source(source.prefix_separator("_").separator("__"))
            .build()?
            .try_deserialize()
            .context("Failed to load/deserialize settings")
    }
}

/// Base URL of the gateway runtime API
pub fn runtime_api_url() -> anyhow::Result<Url> {
    let api = env::var(RUNTIME_API_VAR).with_context(|| format!("{} is not set", RUNTIME_API_VAR))?;
    parse_runtime_api(&api)
}

fn parse_runtime_api(api: &str) -> anyhow::Result<Url> {
    Url::parse(&format!("http://{}/", api))
        .with_context(|| format!("Invalid runtime API address: {}", api))
}
