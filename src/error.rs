pub type Result<T> = std::result::Result<T, Error>;

/// Payload fields that every new submission must carry
pub const REQUIRED_FIELDS: [&str; 5] = [
    "firstName",
    "lastName",
    "email",
    "interests",
    "subscription",
];

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Client errors
    #[error("Required fields are missing")]
    MissingFields(Vec<&'static str>),
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Invalid JSON format")]
    MalformedBody(String),
    // Lookup errors
    #[error("Submission not found")]
    NotFound,
    // Database errors
    #[error("Database connection failed")]
    ConnectionFailed(String),
    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),
}

impl Error {
    /// HTTP status code this error is reported with
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingFields(_) | Self::InvalidEmail | Self::MalformedBody(_) => 400,
            Self::NotFound => 404,
            Self::ConnectionFailed(_) | Self::DatabaseError(_) => 500,
        }
    }
}
