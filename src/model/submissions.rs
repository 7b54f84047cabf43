use chrono::{DateTime, Utc};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use sqlx::types::Json;

use uuid::Uuid;

use crate::domain::{as_text, trimmed, EmailAddress, Interests, RequiredText};
use crate::error::{Error, Result};

/// Delivery frequency used when a submission does not name one
pub const DEFAULT_FREQUENCY: &str = "weekly";

/// Submission payload as posted by a client, before validation.
/// Fields are raw JSON values; non-string scalars are accepted and stored in their JSON form.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub first_name: Option<Value>,
    pub last_name: Option<Value>,
    pub email: Option<Value>,
    pub phone: Option<Value>,
    pub interests: Option<Value>,
    pub subscription: Option<Value>,
    pub frequency: Option<Value>,
    pub comments: Option<Value>,
    pub terms_accepted: Option<Value>,
}

impl SubmissionPayload {
    /// Decode a raw request body
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| Error::MalformedBody(e.to_string()))
    }
}

/// Validated submission, ready to be stored
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub first_name: RequiredText,
    pub last_name: RequiredText,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub interests: Interests,
    pub subscription: RequiredText,
    pub frequency: String,
    pub comments: Option<String>,
    pub terms_accepted: bool,
}

impl TryFrom<SubmissionPayload> for NewSubmission {
    type Error = Error;

    fn try_from(payload: SubmissionPayload) -> Result<Self> {
        let first_name = RequiredText::parse(as_text(payload.first_name));
        let last_name = RequiredText::parse(as_text(payload.last_name));
        let interests = Interests::parse(payload.interests);
        let subscription = RequiredText::parse(as_text(payload.subscription));

        // The pattern runs on the raw address, so padding is rejected rather than trimmed
        let raw_email = as_text(payload.email);
        let email = raw_email.as_deref().filter(|e| !e.trim().is_empty());

        match (first_name, last_name, email, interests, subscription) {
            (Some(first_name), Some(last_name), Some(email), Some(interests), Some(subscription)) => {
                Ok(Self {
                    first_name,
                    last_name,
                    email: email.parse()?,
                    phone: trimmed(as_text(payload.phone)),
                    interests,
                    subscription,
                    frequency: as_text(payload.frequency)
                        .filter(|f| !f.is_empty())
                        .unwrap_or_else(|| DEFAULT_FREQUENCY.into()),
                    comments: trimmed(as_text(payload.comments)),
                    terms_accepted: matches!(payload.terms_accepted, Some(Value::Bool(true))),
                })
            }
            (first_name, last_name, email, interests, subscription) => {
                let missing = [
                    ("firstName", first_name.is_none()),
                    ("lastName", last_name.is_none()),
                    ("email", email.is_none()),
                    ("interests", interests.is_none()),
                    ("subscription", subscription.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, missing)| missing.then_some(field))
                .collect();

                Err(Error::MissingFields(missing))
            }
        }
    }
}

/// Stored submission record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub interests: Json<Value>,
    pub subscription: String,
    pub frequency: String,
    pub comments: Option<String>,
    pub terms_accepted: bool,
    /// Set once, when the submission is stored
    pub submitted_at: DateTime<Utc>,
}

/// Parse a submission ID taken from a request path.
/// Malformed IDs can never match a stored submission, so they are reported as not found.
pub fn parse_submission_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| Error::NotFound)
}
