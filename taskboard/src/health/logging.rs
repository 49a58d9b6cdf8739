//! Severity-driven logging of health reports.
//!
//! A healthy report produces no record at all. A degraded report produces one
//! WARN record listing the degraded checks; an unhealthy report produces one
//! ERROR record listing the unhealthy checks. Checks in other states are not
//! listed.

use serde::Serialize;
use tracing::{Level, error, warn};

use super::{HealthEntry, HealthReport, HealthStatus};

/// The record a report calls for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthLogRecord {
    /// Severity the record is emitted at.
    #[serde(serialize_with = "serialize_level")]
    pub level: Level,
    /// Aggregate status of the report.
    pub status: HealthStatus,
    /// Checks sharing the aggregate status.
    pub checks: Vec<HealthEntry>,
}

fn serialize_level<S: serde::Serializer>(level: &Level, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(level.as_str())
}

impl HealthLogRecord {
    /// Decides what, if anything, to log for `report`.
    #[must_use]
    pub fn for_report(report: &HealthReport) -> Option<Self> {
        let level = match report.status {
            HealthStatus::Healthy => return None,
            HealthStatus::Degraded => Level::WARN,
            HealthStatus::Unhealthy => Level::ERROR,
        };
        Some(Self {
            level,
            status: report.status,
            checks: report.entries_with(report.status).cloned().collect(),
        })
    }

    /// Comma-separated names of the listed checks.
    #[must_use]
    pub fn check_names(&self) -> String {
        self.checks
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn emit(&self) {
        let details = serde_json::to_string(&self.checks)
            .unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"));
        let checks = self.check_names();

        if self.level == Level::ERROR {
            error!(status = %self.status, checks = %checks, details = %details, "Health check failed");
        } else {
            warn!(status = %self.status, checks = %checks, details = %details, "Health check degraded");
        }
    }
}

/// Logs `report` according to its aggregate status and returns the record
/// that was written, if any.
pub fn log_report(report: &HealthReport) -> Option<HealthLogRecord> {
    let record = HealthLogRecord::for_report(report)?;
    record.emit();
    Some(record)
}
