use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// HTTP request as forwarded by the gateway
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    #[serde(default)]
    pub http_method: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

impl GatewayEvent {
    /// A non-empty path parameter extracted by the gateway
    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters
            .as_ref()?
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Structured response handed back to the gateway, `body` is serialized JSON
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl GatewayResponse {
    pub fn json<T: Serialize>(status_code: u16, body: &T) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => Self {
                status_code,
                headers: cors_headers(),
                body,
            },
            Err(error) => {
                tracing::error!(error.cause_chain = ?error, "Failed to serialize response body");
                Self {
                    status_code: 500,
                    headers: cors_headers(),
                    body: r#"{"error":"Internal server error"}"#.into(),
                }
            }
        }
    }

    /// Decode the JSON body
    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

/// Permissive CORS headers attached to every response
pub fn cors_headers() -> BTreeMap<String, String> {
    [
        ("Access-Control-Allow-Origin", "*"),
        (
            "Access-Control-Allow-Headers",
            "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token",
        ),
        ("Access-Control-Allow-Methods", "GET,POST,DELETE,OPTIONS"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect()
}
