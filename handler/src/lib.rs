/// Per-invocation database connections
pub mod connector;
/// Method and path dispatch for a single event
pub mod dispatch;
/// Gateway event and response shapes
pub mod event;
/// Client for the gateway runtime API
pub mod runtime;
/// Handler settings
pub mod settings;
