use std::net::TcpListener;
use std::time::Duration;

use reqwest::{Client, Method, Response};

use serde_json::{json, Value};

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use formapp::telemetry;

use server::app;
use server::cors::CorsSettings;

lazy_static::lazy_static! {
    static ref TRACING: () = {
        let filter = "debug";
        // Set `TEST_LOG` to see logs from the app under test
        if std::env::var("TEST_LOG").is_ok() {
            let subscriber = telemetry::create_subscriber(filter, std::io::stdout);
            telemetry::set_subscriber(subscriber).expect("Failed to set subscriber");
        } else {
            let subscriber = telemetry::create_subscriber(filter, std::io::sink);
            telemetry::set_subscriber(subscriber).expect("Failed to set subscriber");
        }
    };
}

pub struct TestApp {
    addr: String,

    pub client: Client,
}

impl TestApp {
    pub async fn spawn(pool: &PgPool) -> Self {
        Self::spawn_with(pool.clone(), CorsSettings::default()).await
    }

    /// Spawn an app whose database can never be reached
    pub async fn spawn_without_database() -> Self {
        Self::spawn_with(unreachable_pool(), CorsSettings::default()).await
    }

    pub async fn spawn_with(pool: PgPool, cors: CorsSettings) -> Self {
        lazy_static::initialize(&TRACING);

        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to listen on random port");
        let port = listener.local_addr().unwrap().port();

        let addr = format!("http://127.0.0.1:{}", port);

        let server = app::run(listener, pool, cors, true).expect("Failed to spawn app instance");
        let _ = tokio::spawn(server);

        let client = Client::new();

        Self { addr, client }
    }

    pub fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", &self.addr, url);
        self.client.request(method, url)
    }

    pub async fn health_check(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "health").send().await
    }

    pub async fn submission_list(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "api/submissions").send().await
    }

    pub async fn submission_fetch(&self, id: &str) -> reqwest::Result<Response> {
        self.request(Method::GET, &format!("api/submissions/{}", id))
            .send()
            .await
    }

    pub async fn submission_create(&self, payload: &Value) -> reqwest::Result<Response> {
        self.request(Method::POST, "api/submissions")
            .json(payload)
            .send()
            .await
    }

    pub async fn submission_create_raw(&self, body: &'static str) -> reqwest::Result<Response> {
        self.request(Method::POST, "api/submissions")
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
    }

    pub async fn submission_delete(&self, id: &str) -> reqwest::Result<Response> {
        self.request(Method::DELETE, &format!("api/submissions/{}", id))
            .send()
            .await
    }
}

/// A pool pointing at a closed local port, failing fast on every acquire
pub fn unreachable_pool() -> PgPool {
    let options = PgConnectOptions::new()
        .host("127.0.0.1")
        .port(1)
        .username("nobody")
        .database("nowhere");

    PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .connect_lazy_with(options)
}

/// The smallest payload that passes validation
pub fn valid_payload() -> Value {
    json!({
        "firstName": "A",
        "lastName": "B",
        "email": "a@b.com",
        "interests": "x",
        "subscription": "y",
    })
}

pub async fn count_submissions(pool: &PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("select count(*) from submissions")
        .fetch_one(pool)
        .await
        .expect("Failed to count submissions");
    count
}
