use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::ReportingPeriod;
use crate::error::{DashboardError, DashboardResult};

const LAST_UPDATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";
const DATE_RANGE_FORMAT: &str = "%b %d, %Y";

/// Percentages of readings below, inside and above the target band.
///
/// The three values are expected to sum to 100 but nothing relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeInRange {
    pub below_range: f64,
    pub in_range: f64,
    pub above_range: f64,
}

impl TimeInRange {
    #[must_use]
    pub const fn new(below_range: f64, in_range: f64, above_range: f64) -> Self {
        Self {
            below_range,
            in_range,
            above_range,
        }
    }

    #[must_use]
    pub fn total(self) -> f64 {
        self.below_range + self.in_range + self.above_range
    }

    /// Values in stacking order, bottom band first.
    #[must_use]
    pub fn values(self) -> [f64; 3] {
        [self.below_range, self.in_range, self.above_range]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GmiDistribution {
    pub optimal: f64,
    pub suboptimal: f64,
    pub poor: f64,
}

impl GmiDistribution {
    #[must_use]
    pub const fn new(optimal: f64, suboptimal: f64, poor: f64) -> Self {
        Self {
            optimal,
            suboptimal,
            poor,
        }
    }

    #[must_use]
    pub fn total(self) -> f64 {
        self.optimal + self.suboptimal + self.poor
    }

    /// Values in rendering order.
    #[must_use]
    pub fn values(self) -> [f64; 3] {
        [self.optimal, self.suboptimal, self.poor]
    }
}

/// Glucose Management Indicator summary.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Gmi {
    pub average: f64,
    pub distribution: GmiDistribution,
}

/// One reporting period's pre-aggregated results.
///
/// Built once per data resolution and shared read-only with every chart of
/// that render cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub patient_count: u32,
    pub reporting_period: ReportingPeriod,
    pub date_range: String,
    pub last_updated: String,
    pub time_in_range: TimeInRange,
    pub gmi: Gmi,
}

impl MetricsSnapshot {
    /// Zero-filled snapshot stamped with `period` and `now`.
    ///
    /// This is what the dashboard shows when the real payload is unavailable.
    #[must_use]
    pub fn zeroed(period: ReportingPeriod, now: DateTime<Utc>) -> Self {
        let start = now - Duration::days(i64::from(period.days()));
        Self {
            patient_count: 0,
            reporting_period: period,
            date_range: format!(
                "{} - {}",
                start.format(DATE_RANGE_FORMAT),
                now.format(DATE_RANGE_FORMAT)
            ),
            last_updated: now.format(LAST_UPDATED_FORMAT).to_string(),
            time_in_range: TimeInRange::default(),
            gmi: Gmi::default(),
        }
    }

    pub fn from_json_str(input: &str) -> DashboardResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| DashboardError::Parse(format!("failed to parse metrics snapshot: {e}")))
    }

    /// True when every numeric field is zero, as in [`MetricsSnapshot::zeroed`].
    #[must_use]
    pub fn is_zeroed(&self) -> bool {
        self.patient_count == 0
            && self.time_in_range == TimeInRange::default()
            && self.gmi == Gmi::default()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::MetricsSnapshot;
    use crate::core::ReportingPeriod;

    #[test]
    fn zeroed_snapshot_is_stamped_with_period_and_clock() {
        let now = Utc.with_ymd_and_hms(2026, 3, 31, 14, 5, 9).single().expect("valid time");
        let snapshot = MetricsSnapshot::zeroed(ReportingPeriod::DAYS_60, now);

        assert!(snapshot.is_zeroed());
        assert_eq!(snapshot.reporting_period.label(), "60 days");
        assert_eq!(snapshot.last_updated, "2026-03-31 14:05:09 UTC");
        assert_eq!(snapshot.date_range, "Jan 30, 2026 - Mar 31, 2026");
    }

    #[test]
    fn parses_camel_case_payload() {
        let raw = r#"{
            "patientCount": 412,
            "reportingPeriod": "30 days",
            "dateRange": "Sep 19, 2026 - Oct 19, 2026",
            "lastUpdated": "2026-10-19 08:00",
            "timeInRange": { "belowRange": 2, "inRange": 82, "aboveRange": 15 },
            "gmi": { "average": 6.9, "distribution": { "optimal": 72, "suboptimal": 23, "poor": 5 } }
        }"#;
        let snapshot = MetricsSnapshot::from_json_str(raw).expect("parse");
        assert_eq!(snapshot.patient_count, 412);
        assert_eq!(snapshot.reporting_period, ReportingPeriod::DAYS_30);
        assert_eq!(snapshot.time_in_range.in_range, 82.0);
        assert_eq!(snapshot.gmi.distribution.total(), 100.0);
        assert!(!snapshot.is_zeroed());
    }

    #[test]
    fn rejects_truncated_payload() {
        assert!(MetricsSnapshot::from_json_str(r#"{"patientCount": 3"#).is_err());
    }
}
