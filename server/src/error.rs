use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use thiserror::Error;

use formapp::body::{ErrorBody, Operation};
use formapp::error::Error;

pub type RestResult<T> = Result<T, RestError>;

/// Failure of a submissions endpoint, rendered as a JSON error body
#[derive(Debug, Error)]
#[error("{}: {source}", .operation.failure())]
pub struct RestError {
    operation: Operation,
    #[source]
    source: Error,
}

impl RestError {
    pub fn new(operation: Operation, source: impl Into<Error>) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }

    /// Error for a request body the JSON extractor could not decode
    pub fn malformed_body(e: JsonPayloadError) -> Self {
        Self::new(Operation::Create, Error::MalformedBody(e.to_string()))
    }
}

impl ResponseError for RestError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.source.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error.cause_chain = ?self.source, "{}", self.operation.failure());
        } else {
            tracing::warn!(error = %self.source, "Rejected submissions request");
        }

        HttpResponse::build(status).json(ErrorBody::from_error(self.operation, &self.source))
    }
}
