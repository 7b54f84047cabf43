use anyhow::Context;

use reqwest::Client;

use serde::Serialize;

use url::Url;

use crate::connector::Connector;
use crate::dispatch;
use crate::event::{GatewayEvent, GatewayResponse};

const API_VERSION: &str = "2018-06-01";
const REQUEST_ID_HEADER: &str = "Lambda-Runtime-Aws-Request-Id";

/// Client for the runtime API the gateway uses to hand out events and collect responses
#[derive(Debug)]
pub struct RuntimeClient {
    client: Client,
    invocation_url: Url,
}

/// One pending event, identified by the request id the response must be posted under
#[derive(Debug)]
pub struct Invocation {
    pub request_id: String,
    pub payload: Vec<u8>,
}

/// Error report for an invocation whose response could not be delivered
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InvocationError {
    error_message: String,
    error_type: &'static str,
}

impl Invocation {
    pub fn event(&self) -> serde_json::Result<GatewayEvent> {
        serde_json::from_slice(&self.payload)
    }
}

impl RuntimeClient {
    pub fn new(api_base_url: Url) -> anyhow::Result<Self> {
        // No request timeout, `next` blocks until an event arrives
        let client = Client::builder().build()?;

        let invocation_url = api_base_url.join(&format!("{}/runtime/invocation/", API_VERSION))?;

        Ok(Self {
            client,
            invocation_url,
        })
    }

    #[tracing::instrument(name = "Wait for the next invocation", skip(self))]
    pub async fn next_invocation(&self) -> anyhow::Result<Invocation> {
        let res = self
            .client
            .get(self.invocation_url.join("next")?)
            .send()
            .await?
            .error_for_status()?;

        let request_id = res
            .headers()
            .get(REQUEST_ID_HEADER)
            .context("Invocation is missing its request id")?
            .to_str()
            .context("Invocation request id is not valid text")?
            .to_string();
        let payload = res.bytes().await?.to_vec();

        Ok(Invocation {
            request_id,
            payload,
        })
    }

    #[tracing::instrument(name = "Send an invocation response", skip(self, response))]
    pub async fn send_response(
        &self,
        request_id: &str,
        response: &GatewayResponse,
    ) -> anyhow::Result<()> {
        let url = self
            .invocation_url
            .join(&format!("{}/response", request_id))?;

        self.client
            .post(url)
            .json(response)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    #[tracing::instrument(name = "Report an invocation error", skip(self, error))]
    pub async fn send_error(&self, request_id: &str, error: &anyhow::Error) -> anyhow::Result<()> {
        let url = self.invocation_url.join(&format!("{}/error", request_id))?;
        let report = InvocationError {
            error_message: format!("{:#}", error),
            error_type: "Runtime.ResponseRejected",
        };

        self.client
            .post(url)
            .json(&report)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Dispatch one invocation. Undecodable events and panics during dispatch become a generic 500.
pub async fn invoke(invocation: &Invocation, connector: &Connector) -> GatewayResponse {
    let event = match invocation.event() {
        Ok(event) => event,
        Err(error) => return dispatch::internal_error(&error),
    };

    let connector = connector.clone();
    let task = tokio::spawn(async move { dispatch::handle(&event, &connector).await });

    match task.await {
        Ok(response) => response,
        Err(error) => dispatch::internal_error(&error),
    }
}

/// Fetch, handle and answer a single invocation.
/// A rejected response is reported on the invocation's error endpoint instead.
pub async fn serve_one(client: &RuntimeClient, connector: &Connector) -> anyhow::Result<()> {
    let invocation = client.next_invocation().await?;
    let response = invoke(&invocation, connector).await;

    tracing::info!(
        request_id = %invocation.request_id,
        status = response.status_code,
        "Invocation handled"
    );

    if let Err(error) = client.send_response(&invocation.request_id, &response).await {
        tracing::error!(
            error.cause_chain = ?error,
            request_id = %invocation.request_id,
            "Runtime rejected invocation response"
        );
        client.send_error(&invocation.request_id, &error).await?;
    }

    Ok(())
}

/// Serve invocations until the runtime API itself fails
pub async fn run(client: &RuntimeClient, connector: &Connector) -> anyhow::Result<()> {
    loop {
        serve_one(client, connector).await?;
    }
}
