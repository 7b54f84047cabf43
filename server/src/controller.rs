/// Health/readiness probe
pub mod health;
/// Submission CRUD endpoints
pub mod submissions;
