use std::fmt;

use serde::Serialize;

use formapp::body::{ErrorBody, MessageBody, Operation};
use formapp::error::{Error, Result};
use formapp::model::{parse_submission_id, NewSubmission, Submission, SubmissionPayload};
use formapp::repo::SubmissionRepo;

use crate::connector::Connector;
use crate::event::{GatewayEvent, GatewayResponse};

const COLLECTION_PATH: &str = "/submissions";
const ITEM_PATH_PREFIX: &str = "/submissions/";

/// What a single gateway event asks for
#[derive(Debug, PartialEq, Eq)]
pub enum Route<'e> {
    Preflight,
    List,
    Fetch(&'e str),
    Create(Option<&'e str>),
    Delete(&'e str),
    NotFound,
}

impl<'e> Route<'e> {
    pub fn resolve(event: &'e GatewayEvent) -> Self {
        let id = event
            .path
            .starts_with(ITEM_PATH_PREFIX)
            .then(|| event.path_parameter("id"))
            .flatten();

        match (event.http_method.as_str(), event.path.as_str(), id) {
            ("OPTIONS", _, _) => Self::Preflight,
            ("GET", COLLECTION_PATH, _) => Self::List,
            ("GET", _, Some(id)) => Self::Fetch(id),
            ("POST", COLLECTION_PATH, _) => Self::Create(event.body.as_deref()),
            ("DELETE", _, Some(id)) => Self::Delete(id),
            _ => Self::NotFound,
        }
    }
}

/// Handle one gateway event. Each matched operation opens and closes its own connection.
#[tracing::instrument(
    name = "Handle gateway event",
    skip_all,
    fields(method = %event.http_method, path = %event.path)
)]
pub async fn handle(event: &GatewayEvent, connector: &Connector) -> GatewayResponse {
    tracing::debug!(?event, "Received event");

    match Route::resolve(event) {
        Route::Preflight => GatewayResponse::json(200, &MessageBody::new("CORS preflight")),
        Route::List => respond(Operation::List, 200, list(connector).await),
        Route::Fetch(id) => respond(Operation::Fetch, 200, fetch(connector, id).await),
        Route::Create(body) => respond(Operation::Create, 201, create(connector, body).await),
        Route::Delete(id) => respond(Operation::Delete, 200, delete(connector, id).await),
        Route::NotFound => GatewayResponse::json(404, &ErrorBody::new("Route not found")),
    }
}

/// Generic 500 for failures that escaped dispatch
pub fn internal_error(error: &dyn fmt::Display) -> GatewayResponse {
    tracing::error!("Handler error: {}", error);
    GatewayResponse::json(
        500,
        &ErrorBody::new("Internal server error").with_message(error.to_string()),
    )
}

fn respond<T: Serialize>(operation: Operation, status: u16, result: Result<T>) -> GatewayResponse {
    match result {
        Ok(body) => GatewayResponse::json(status, &body),
        Err(error) => {
            let status = error.status_code();
            if status >= 500 {
                tracing::error!(error.cause_chain = ?error, "{}", operation.failure());
            } else {
                tracing::warn!(error = %error, "Rejected submissions request");
            }
            GatewayResponse::json(status, &ErrorBody::from_error(operation, &error))
        }
    }
}

async fn list(connector: &Connector) -> Result<Vec<Submission>> {
    connector
        .with_connection(|conn| {
            Box::pin(async move { SubmissionRepo::fetch_all(conn).await.map_err(Error::from) })
        })
        .await
}

async fn fetch(connector: &Connector, id: &str) -> Result<Submission> {
    let id = parse_submission_id(id)?;

    connector
        .with_connection(|conn| {
            Box::pin(async move {
                SubmissionRepo::fetch_by_id(conn, id)
                    .await
                    .map_err(Error::from)
                    .and_then(|submission| submission.ok_or(Error::NotFound))
            })
        })
        .await
}

async fn create(connector: &Connector, body: Option<&str>) -> Result<Submission> {
    // Client errors are settled before a connection is opened
    let payload = SubmissionPayload::from_json(body.unwrap_or_default())?;
    let new_submission = NewSubmission::try_from(payload)?;

    let submission = connector
        .with_connection(|conn| {
            Box::pin(async move {
                SubmissionRepo::insert(conn, &new_submission)
                    .await
                    .map_err(Error::from)
            })
        })
        .await?;

    tracing::info!(submission.id = %submission.id, "Created submission");
    Ok(submission)
}

async fn delete(connector: &Connector, id: &str) -> Result<MessageBody> {
    let id = parse_submission_id(id)?;

    let deleted = connector
        .with_connection(|conn| {
            Box::pin(async move {
                SubmissionRepo::delete_by_id(conn, id)
                    .await
                    .map_err(Error::from)
            })
        })
        .await?;

    if !deleted {
        return Err(Error::NotFound);
    }

    tracing::info!(submission.id = %id, "Deleted submission");
    Ok(MessageBody::deleted())
}
