use std::time::Duration;

use secrecy::Secret;

use serde::Deserialize;
use serde_aux::prelude::*;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

fn default_connect_timeout() -> u64 {
    60_000
}

/// Connection settings for the submissions database, shared by every deployment target
#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,
    host: String,
    name: String,
    username: String,
    password: Secret<String>,
    #[serde(default, deserialize_with = "deserialize_bool_from_anything")]
    require_ssl: bool,
    #[serde(
        default = "default_connect_timeout",
        deserialize_with = "deserialize_number_from_string"
    )]
    connect_timeout_milliseconds: u64,
}

impl DatabaseSettings {
    /// The database connection options, without specifying the database name
    pub fn without_db(&self) -> PgConnectOptions {
        use secrecy::ExposeSecret;

        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };

        PgConnectOptions::new()
            .port(self.port)
            .host(&self.host)
            .ssl_mode(ssl_mode)
            .username(&self.username)
            .password(self.password.expose_secret())
    }

    /// The database connection options, with the database name
    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db().database(&self.name)
    }

    /// How long to wait for a connection before giving up
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_milliseconds)
    }
}
