use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::middleware::Condition;
use actix_web::{web, App, HttpServer};

use sqlx::PgPool;

use tracing_actix_web::TracingLogger;

use crate::controller::{health, submissions};
use crate::cors::{self, CorsSettings};

/// Run the application on a specified TCP listener
pub fn run(
    listener: TcpListener,
    pool: PgPool,
    cors: CorsSettings,
    request_logging: bool,
) -> anyhow::Result<Server> {
    let cors_headers = cors.headers()?;
    // The pool is owned by the server and shared by every worker
    let pool = web::Data::new(pool);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors::middleware(&cors_headers))
            .wrap(Condition::new(request_logging, TracingLogger::default()))
            .app_data(pool.clone())
            // Registered first so preflight requests never reach a scope
            .service(cors::preflight_service())
            .service(health::health)
            .service(web::scope("/api").service(submissions::scope()))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
