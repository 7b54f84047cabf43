/// Basic application code
pub mod app;
/// Controllers for REST endpoints
pub mod controller;
/// Cross-origin resource sharing headers
pub mod cors;
/// Error enums
pub mod error;
/// Application settings
pub mod settings;
