use serde::Serialize;

use crate::error::{Error, REQUIRED_FIELDS};

/// Submission operation an error was raised from, used to word storage failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Fetch,
    Create,
    Delete,
}

impl Operation {
    pub fn failure(&self) -> &'static str {
        match self {
            Self::List => "Failed to fetch submissions",
            Self::Fetch => "Failed to fetch submission",
            Self::Create => "Failed to create submission",
            Self::Delete => "Failed to delete submission",
        }
    }
}

/// JSON body of every error response
#[derive(Debug, PartialEq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<&'static str>>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            required: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Render an error raised while performing `operation`.
    /// Storage errors pass the underlying error text through as `message`.
    pub fn from_error(operation: Operation, error: &Error) -> Self {
        match error {
            Error::MissingFields(_) => Self {
                required: Some(REQUIRED_FIELDS.to_vec()),
                ..Self::new(error.to_string())
            },
            Error::InvalidEmail | Error::MalformedBody(_) | Error::NotFound => {
                Self::new(error.to_string())
            }
            Error::ConnectionFailed(_) | Error::DatabaseError(_) => {
                Self::new(operation.failure()).with_message(error.to_string())
            }
        }
    }
}

/// JSON body of plain acknowledgements
#[derive(Debug, PartialEq, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn deleted() -> Self {
        Self::new("Submission deleted successfully")
    }
}
