use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;

use formapp::error::{Error, Result};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Opens a fresh database connection for each unit of work, with no reuse between them
#[derive(Debug, Clone)]
pub struct Connector {
    options: PgConnectOptions,
    timeout: Duration,
}

impl Connector {
    pub fn new(options: PgConnectOptions, timeout: Duration) -> Self {
        Self { options, timeout }
    }

    #[tracing::instrument(name = "Open database connection", skip(self))]
    pub async fn connect(&self) -> Result<PgConnection> {
        match tokio::time::timeout(self.timeout, PgConnection::connect_with(&self.options)).await {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(error)) => {
                tracing::error!(error.cause_chain = ?error, "Database connection error");
                Err(Error::ConnectionFailed(error.to_string()))
            }
            Err(_) => {
                tracing::error!("Database connection timed out after {:?}", self.timeout);
                Err(Error::ConnectionFailed(format!(
                    "timed out after {:?}",
                    self.timeout
                )))
            }
        }
    }

    /// Run `work` on its own connection, closing the connection afterwards whatever the outcome
    pub async fn with_connection<T, F>(&self, work: F) -> Result<T>
    where
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T>>,
    {
        let mut conn = self.connect().await?;

        let result = work(&mut conn).await;

        if let Err(error) = conn.close().await {
            tracing::warn!(error.cause_chain = ?error, "Failed to close database connection");
        }

        result
    }
}
