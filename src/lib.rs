/// Response bodies shared by every deployment target
pub mod body;
/// Domain objects
pub mod domain;
/// Error types
pub mod error;
/// Submission payloads and records
pub mod model;
/// Repositories
pub mod repo;
/// Database settings
pub mod settings;
/// Application telemetry for tracing and logging
pub mod telemetry;
