use actix_web::{get, web, HttpResponse};

use chrono::{DateTime, Utc};

use serde::Serialize;

use sqlx::{Connection, PgPool};

#[derive(Debug, Serialize)]
pub struct HealthReport {
    status: &'static str,
    database: &'static str,
    timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'static str>,
}

impl HealthReport {
    fn healthy() -> Self {
        Self {
            status: "healthy",
            database: "connected",
            timestamp: Utc::now(),
            version: Some(env!("CARGO_PKG_VERSION")),
        }
    }

    fn unhealthy() -> Self {
        Self {
            status: "unhealthy",
            database: "disconnected",
            timestamp: Utc::now(),
            version: None,
        }
    }
}

/// Readiness probe, round-trips the database on every call
#[tracing::instrument(name = "Health check", skip(pool))]
#[get("/health")]
pub async fn health(pool: web::Data<PgPool>) -> HttpResponse {
    match ping(pool.get_ref()).await {
        Ok(()) => HttpResponse::Ok().json(HealthReport::healthy()),
        Err(error) => {
            tracing::error!(error.cause_chain = ?error, "Database health check failed");
            HttpResponse::ServiceUnavailable().json(HealthReport::unhealthy())
        }
    }
}

async fn ping(pool: &PgPool) -> sqlx::Result<()> {
    let mut conn = pool.acquire().await?;
    conn.ping().await
}
