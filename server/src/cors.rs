use actix_web::http::header::{self, HeaderName, HeaderValue};
use actix_web::middleware::DefaultHeaders;
use actix_web::{dev::HttpServiceFactory, guard, web, HttpResponse};

use anyhow::Context;

use serde::Deserialize;
use serde_aux::prelude::*;

/// CORS headers attached to every response
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsSettings {
    pub allowed_origin: String,
    pub allowed_methods: String,
    #[serde(deserialize_with = "deserialize_bool_from_anything")]
    pub allow_credentials: bool,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origin: "*".into(),
            allowed_methods: "GET,POST,PUT,DELETE,OPTIONS".into(),
            allow_credentials: false,
        }
    }
}

impl CorsSettings {
    /// Validate the configured values into response headers
    pub fn headers(&self) -> anyhow::Result<Vec<(HeaderName, HeaderValue)>> {
        let origin = HeaderValue::from_str(&self.allowed_origin)
            .with_context(|| format!("Invalid CORS origin: {}", self.allowed_origin))?;
        let methods = HeaderValue::from_str(&self.allowed_methods)
            .with_context(|| format!("Invalid CORS methods: {}", self.allowed_methods))?;

        let mut headers = vec![
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, origin),
            (header::ACCESS_CONTROL_ALLOW_METHODS, methods),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("Content-Type"),
            ),
        ];
        if self.allow_credentials {
            headers.push((
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            ));
        }

        Ok(headers)
    }
}

/// Middleware adding `headers` to every response that does not already set them
pub fn middleware(headers: &[(HeaderName, HeaderValue)]) -> DefaultHeaders {
    headers
        .iter()
        .cloned()
        .fold(DefaultHeaders::new(), |default_headers, pair| {
            default_headers.add(pair)
        })
}

async fn preflight() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Answers `OPTIONS` on any path; other methods fall through to the routes registered after it
pub fn preflight_service() -> impl HttpServiceFactory {
    web::resource("/{tail:.*}")
        .guard(guard::Options())
        .to(preflight)
}
