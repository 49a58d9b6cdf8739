/// Audit logging for record lifecycle and service events.
pub mod audit;
/// Configuration management for the service.
pub mod config;
/// HTTP server startup and shutdown.
pub mod server;
/// Telemetry setup for logging.
pub mod telemetry;
