use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{MetricsSnapshot, ReportingPeriod};

use super::MetricsSource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/data".to_owned(),
            timeout_ms: 10_000,
        }
    }
}

impl ProviderConfig {
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// Resolves a period to a snapshot and never fails.
///
/// Unsupported periods skip the source entirely; fetch and parse failures are
/// logged and replaced by a zero-filled snapshot for the requested period.
pub struct DataProvider<S: MetricsSource> {
    source: S,
    clock: fn() -> DateTime<Utc>,
}

impl<S: MetricsSource> DataProvider<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            clock: Utc::now,
        }
    }

    /// Replaces the clock used to stamp fallback snapshots.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub fn resolve(&self, period: ReportingPeriod) -> MetricsSnapshot {
        if !period.is_supported() {
            debug!(days = period.days(), "unsupported reporting period, using zero-filled snapshot");
            return MetricsSnapshot::zeroed(period, (self.clock)());
        }

        let resolved = self
            .source
            .fetch(period)
            .and_then(|raw| MetricsSnapshot::from_json_str(&raw));
        match resolved {
            Ok(snapshot) => {
                if snapshot.reporting_period != period {
                    warn!(
                        requested = %period,
                        payload = %snapshot.reporting_period,
                        "metrics payload reports a different period"
                    );
                }
                debug!(
                    period = %period,
                    patients = snapshot.patient_count,
                    "resolved metrics snapshot"
                );
                snapshot
            }
            Err(err) => {
                warn!(
                    period = %period,
                    error = %err,
                    "metrics unavailable, using zero-filled snapshot"
                );
                MetricsSnapshot::zeroed(period, (self.clock)())
            }
        }
    }

    #[must_use]
    pub fn resolve_days(&self, days: u32) -> MetricsSnapshot {
        self.resolve(ReportingPeriod::from_days(days))
    }
}
