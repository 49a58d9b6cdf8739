//! Health checks, aggregation and the health log policy.
//!
//! A [`HealthRegistry`] runs independent [`HealthCheck`]s concurrently and
//! folds their results into a [`HealthReport`] whose status is the most
//! severe individual status. A check that errors or panics is reported as
//! [`HealthStatus::Unhealthy`] with the failure captured in the entry; it never
//! stops the other checks.

pub mod checks;
pub mod logging;

pub use checks::{DatabaseCheck, SelfCheck};
pub use logging::{HealthLogRecord, log_report};

use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use futures_util::FutureExt;
use futures_util::future::join_all;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Tag for checks that gate whether traffic should be routed here.
pub const READINESS: &str = "readiness";
/// Tag for checks that gate whether the process should be restarted.
///
/// Liveness checks must not depend on external systems.
pub const LIVENESS: &str = "liveness";

/// Result state of a check, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HealthStatus {
    /// Working normally.
    Healthy,
    /// Working, but worth a warning.
    Degraded,
    /// Not working.
    Unhealthy,
}

impl HealthStatus {
    /// Most severe of `statuses`; `Healthy` when there are none.
    pub fn aggregate(statuses: impl IntoIterator<Item = Self>) -> Self {
        statuses.into_iter().max().unwrap_or(Self::Healthy)
    }

    /// Whether the instance should keep receiving traffic. Only `Unhealthy`
    /// fails the probe.
    #[must_use]
    pub const fn is_serving(self) -> bool {
        !matches!(self, Self::Unhealthy)
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Healthy => "Healthy",
            Self::Degraded => "Degraded",
            Self::Unhealthy => "Unhealthy",
        };
        f.write_str(s)
    }
}

/// What a single check observed.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    /// Observed state.
    pub status: HealthStatus,
    /// Short explanation.
    pub description: Option<String>,
    /// Extra key/value detail.
    pub data: BTreeMap<String, Value>,
    /// Failure detail, for checks that hit an error.
    pub error: Option<String>,
}

impl CheckResult {
    fn with_status(status: HealthStatus, description: impl Into<String>) -> Self {
        Self {
            status,
            description: Some(description.into()),
            data: BTreeMap::new(),
            error: None,
        }
    }

    /// A healthy result.
    pub fn healthy(description: impl Into<String>) -> Self {
        Self::with_status(HealthStatus::Healthy, description)
    }

    /// A degraded result.
    pub fn degraded(description: impl Into<String>) -> Self {
        Self::with_status(HealthStatus::Degraded, description)
    }

    /// An unhealthy result.
    pub fn unhealthy(description: impl Into<String>) -> Self {
        Self::with_status(HealthStatus::Unhealthy, description)
    }

    /// Attaches a data entry.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Attaches failure detail.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// An independently runnable health check.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Unique name reported in entries.
    fn name(&self) -> &str;

    /// Tags used to select the check for an endpoint.
    fn tags(&self) -> &[&'static str];

    /// Runs the check. An `Err` is reported as `Unhealthy`.
    async fn check(&self) -> anyhow::Result<CheckResult>;
}

/// Which registered checks to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckFilter {
    /// Every check.
    All,
    /// Checks carrying this tag.
    Tagged(&'static str),
}

impl CheckFilter {
    fn matches(self, check: &dyn HealthCheck) -> bool {
        match self {
            Self::All => true,
            Self::Tagged(tag) => check.tags().contains(&tag),
        }
    }
}

/// One check's outcome within a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthEntry {
    /// Check name.
    pub name: String,
    /// Observed state.
    pub status: HealthStatus,
    /// Short explanation.
    pub description: Option<String>,
    /// Time the check took.
    #[serde(rename = "durationMs", serialize_with = "serialize_millis")]
    pub duration: Duration,
    /// Check tags.
    pub tags: Vec<String>,
    /// Extra key/value detail.
    pub data: BTreeMap<String, Value>,
    /// Failure detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregated outcome of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// Most severe entry status.
    pub status: HealthStatus,
    /// Wall time of the whole run.
    #[serde(rename = "totalDurationMs", serialize_with = "serialize_millis")]
    pub total_duration: Duration,
    /// Per-check entries in registration order.
    pub entries: Vec<HealthEntry>,
}

impl HealthReport {
    /// Builds a report, deriving the aggregate status from `entries`.
    #[must_use]
    pub fn new(entries: Vec<HealthEntry>, total_duration: Duration) -> Self {
        Self {
            status: HealthStatus::aggregate(entries.iter().map(|e| e.status)),
            total_duration,
            entries,
        }
    }

    /// Entries in exactly this state.
    pub fn entries_with(&self, status: HealthStatus) -> impl Iterator<Item = &HealthEntry> {
        self.entries.iter().filter(move |e| e.status == status)
    }
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
}

/// Registered checks.
#[derive(Default, Clone)]
pub struct HealthRegistry {
    checks: Vec<Arc<dyn HealthCheck>>,
}

impl std::fmt::Debug for HealthRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.checks.iter().map(|c| c.name()).collect();
        f.debug_struct("HealthRegistry")
            .field("checks", &names)
            .finish()
    }
}

impl HealthRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a check.
    #[must_use]
    pub fn with_check(mut self, check: impl HealthCheck + 'static) -> Self {
        self.checks.push(Arc::new(check));
        self
    }

    /// Number of registered checks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether no checks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Runs the checks selected by `filter` concurrently and aggregates them.
    pub async fn run(&self, filter: CheckFilter) -> HealthReport {
        let started = Instant::now();
        let selected = self
            .checks
            .iter()
            .filter(|check| filter.matches(check.as_ref()));
        let entries = join_all(selected.map(|check| run_isolated(check.as_ref()))).await;
        HealthReport::new(entries, started.elapsed())
    }
}

async fn run_isolated(check: &dyn HealthCheck) -> HealthEntry {
    let started = Instant::now();
    let outcome = AssertUnwindSafe(check.check()).catch_unwind().await;
    let duration = started.elapsed();

    let result = match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => CheckResult::unhealthy(err.to_string()).with_error(format!("{err:#}")),
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(ToString::to_string)
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            CheckResult::unhealthy("Health check panicked.").with_error(message)
        }
    };

    HealthEntry {
        name: check.name().to_string(),
        status: result.status,
        description: result.description,
        duration,
        tags: check.tags().iter().map(ToString::to_string).collect(),
        data: result.data,
        error: result.error,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Scripted checks for registry and logging tests.

    use super::*;

    /// Behaviour of a [`Scripted`] check.
    pub enum Script {
        Report(HealthStatus),
        Fail(&'static str),
        Panic,
    }

    /// A check that does whatever its script says.
    pub struct Scripted {
        pub name: &'static str,
        pub tags: &'static [&'static str],
        pub script: Script,
    }

    impl Scripted {
        pub fn reporting(name: &'static str, status: HealthStatus) -> Self {
            Self {
                name,
                tags: &[],
                script: Script::Report(status),
            }
        }
    }

    #[async_trait]
    impl HealthCheck for Scripted {
        fn name(&self) -> &str {
            self.name
        }

        fn tags(&self) -> &[&'static str] {
            self.tags
        }

        async fn check(&self) -> anyhow::Result<CheckResult> {
            match self.script {
                Script::Report(status) => Ok(CheckResult {
                    status,
                    description: Some(format!("{} is {status}", self.name)),
                    data: BTreeMap::new(),
                    error: None,
                }),
                Script::Fail(message) => Err(anyhow::anyhow!(message)),
                Script::Panic => panic!("check exploded"),
            }
        }
    }

    pub fn entry(name: &str, status: HealthStatus) -> HealthEntry {
        HealthEntry {
            name: name.to_string(),
            status,
            description: Some(format!("{name} is {status}")),
            duration: Duration::from_millis(3),
            tags: Vec::new(),
            data: BTreeMap::new(),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{Script, Scripted};
    use super::*;
    use rstest::rstest;
    use HealthStatus::{Degraded, Healthy, Unhealthy};

    #[rstest]
    #[case::all_healthy(&[Healthy, Healthy], Healthy)]
    #[case::one_degraded(&[Healthy, Degraded], Degraded)]
    #[case::unhealthy_wins(&[Degraded, Unhealthy], Unhealthy)]
    #[case::order_irrelevant(&[Unhealthy, Healthy, Degraded], Unhealthy)]
    #[case::empty(&[], Healthy)]
    fn test_aggregate_is_most_severe(#[case] statuses: &[HealthStatus], #[case] expected: HealthStatus) {
        assert_eq!(HealthStatus::aggregate(statuses.iter().copied()), expected);
    }

    #[test]
    fn test_only_unhealthy_stops_serving() {
        assert!(Healthy.is_serving());
        assert!(Degraded.is_serving());
        assert!(!Unhealthy.is_serving());
    }

    #[tokio::test]
    async fn test_run_reports_every_check() {
        let registry = HealthRegistry::new()
            .with_check(Scripted::reporting("a", Healthy))
            .with_check(Scripted::reporting("b", Degraded));

        let report = registry.run(CheckFilter::All).await;

        assert_eq!(report.status, Degraded);
        let names: Vec<_> = report.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_failing_check_is_isolated() {
        let registry = HealthRegistry::new()
            .with_check(Scripted {
                name: "broken",
                tags: &[],
                script: Script::Fail("connection refused"),
            })
            .with_check(Scripted {
                name: "exploding",
                tags: &[],
                script: Script::Panic,
            })
            .with_check(Scripted::reporting("fine", Healthy));

        let report = registry.run(CheckFilter::All).await;

        assert_eq!(report.status, Unhealthy);
        assert_eq!(report.entries.len(), 3);

        let broken = &report.entries[0];
        assert_eq!(broken.status, Unhealthy);
        assert_eq!(broken.error.as_deref(), Some("connection refused"));

        let exploding = &report.entries[1];
        assert_eq!(exploding.status, Unhealthy);
        assert_eq!(exploding.error.as_deref(), Some("check exploded"));

        assert_eq!(report.entries[2].status, Healthy);
    }

    #[tokio::test]
    async fn test_tag_filter_selects_subset() {
        let registry = HealthRegistry::new()
            .with_check(Scripted {
                name: "db",
                tags: &[READINESS],
                script: Script::Report(Unhealthy),
            })
            .with_check(Scripted {
                name: "self",
                tags: &[LIVENESS],
                script: Script::Report(Healthy),
            });

        let live = registry.run(CheckFilter::Tagged(LIVENESS)).await;
        assert_eq!(live.status, Healthy);
        assert_eq!(live.entries.len(), 1);
        assert_eq!(live.entries[0].tags, vec!["liveness"]);

        let ready = registry.run(CheckFilter::Tagged(READINESS)).await;
        assert_eq!(ready.status, Unhealthy);

        let unknown = registry.run(CheckFilter::Tagged("startup")).await;
        assert!(unknown.entries.is_empty());
        assert_eq!(unknown.status, Healthy);
    }

    #[test]
    fn test_report_json_shape() {
        let report = HealthReport::new(
            vec![test_support::entry("db", Degraded)],
            Duration::from_millis(12),
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "Degraded");
        assert!((json["totalDurationMs"].as_f64().unwrap() - 12.0).abs() < 1e-9);
        assert_eq!(json["entries"][0]["name"], "db");
        assert_eq!(json["entries"][0]["status"], "Degraded");
        assert!(json["entries"][0]["durationMs"].is_number());
        assert!(json["entries"][0].get("error").is_none());
    }
}
