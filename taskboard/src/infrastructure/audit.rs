use serde::Serialize;
use tracing::{info, info_span};

/// Domain event for audit logging.
/// Structured for JSON serialization to enable machine-readable audit trails.
#[derive(Debug, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum AuditEvent {
    /// The service finished starting.
    ServiceStartup {
        /// Address the server bound to.
        address: String,
    },
    /// The service is shutting down.
    ServiceShutdown {
        /// Why it stopped.
        reason: String,
    },
    /// A record was written for the first time.
    RecordCreated {
        /// Entity kind.
        entity: String,
        /// Assigned id.
        id: i64,
    },
    /// A record was removed.
    RecordDeleted {
        /// Entity kind.
        entity: String,
        /// Removed id.
        id: i64,
    },
}

/// Logs an audit event to the dedicated audit channel as structured JSON.
/// This uses a specific `target` which can be filtered by the subscriber to redirect to a separate sink.
pub fn log_audit(event: &AuditEvent) {
    let span = info_span!(target: "audit", "audit_event");
    let _enter = span.enter();

    let json = serde_json::to_string(event).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"));
    info!(target: "audit", audit_json = %json, "Audit Event");
}
