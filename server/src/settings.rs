use std::env;
use std::path::Path;

use anyhow::Context;

use config::{Config, Environment, File};

use serde::Deserialize;
use serde_aux::prelude::*;

use formapp::settings::DatabaseSettings;

use crate::cors::CorsSettings;

/// Runtime environment, either `Dev` for local development, or `Prod` for release
#[derive(Debug)]
pub enum Runtime {
    Dev,
    Prod,
}

impl Runtime {
    pub fn as_str(&self) -> &str {
        match self {
            Runtime::Dev => "dev",
            Runtime::Prod => "prod",
        }
    }
}

impl TryFrom<String> for Runtime {
    type Error = anyhow::Error;

    fn try_from(s: String) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => anyhow::bail!("{} is not a valid runtime environment", other),
        }
    }
}

/// Server settings wrapper
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cors: CorsSettings,
}

impl Settings {
    /// Load server settings from the settings directory
    pub fn load() -> anyhow::Result<Self> {
        let path = env::current_dir()?.join("settings");
        // Runtime comes from `APP_ENV`, defaulting to `Dev`
        let runtime: Runtime = env::var("APP_ENV")
            .unwrap_or_else(|_| "dev".into())
            .try_into()?;

        Self::load_from(runtime, &path)
    }

    /// Load server settings from a specified path and runtime
    pub fn load_from(runtime: Runtime, base_path: &Path) -> anyhow::Result<Self> {
        Config::builder()
            .add_source(File::from(base_path.join("base")).required(true))
            .add_source(File::from(base_path.join(runtime.as_str())).required(false))
            // Overrides take the form `APP_<settings category>__<setting name>`
            .add_source(
                Environment::with_prefix("app")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .context("Failed to load/deserialize settings")
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,
    #[serde(default, deserialize_with = "deserialize_bool_from_anything")]
    request_logging: bool,
}

impl ApplicationSettings {
    /// The application address to bind to
    pub fn addr(&self) -> (&str, u16) {
        (&self.host, self.port)
    }

    /// Whether every request is logged
    pub fn request_logging(&self) -> bool {
        self.request_logging
    }
}
