use std::cell::Cell;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use clinic_outcomes::core::ReportingPeriod;
use clinic_outcomes::data::{DataProvider, FileMetricsSource, MetricsSource, resource_name};
use clinic_outcomes::error::{DashboardError, DashboardResult};

fn fixed_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0)
        .single()
        .expect("valid time")
}

#[derive(Default)]
struct FailingSource {
    calls: Cell<usize>,
}

impl MetricsSource for FailingSource {
    fn fetch(&self, _period: ReportingPeriod) -> DashboardResult<String> {
        self.calls.set(self.calls.get() + 1);
        Err(DashboardError::Fetch("connection refused".to_owned()))
    }
}

struct StaticSource(&'static str);

impl MetricsSource for StaticSource {
    fn fetch(&self, _period: ReportingPeriod) -> DashboardResult<String> {
        Ok(self.0.to_owned())
    }
}

fn sample_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[test]
fn fetch_failure_resolves_to_zeroed_snapshot_for_requested_period() {
    let provider = DataProvider::new(FailingSource::default()).with_clock(fixed_clock);
    let snapshot = provider.resolve_days(60);

    assert!(snapshot.is_zeroed());
    assert_eq!(snapshot.patient_count, 0);
    assert_eq!(snapshot.time_in_range.total(), 0.0);
    assert_eq!(snapshot.gmi.average, 0.0);
    assert_eq!(snapshot.gmi.distribution.total(), 0.0);
    assert_eq!(snapshot.reporting_period.label(), "60 days");
    assert_eq!(snapshot.last_updated, "2026-10-19 08:30:00 UTC");
    assert_eq!(provider.source().calls.get(), 1);
}

#[test]
fn unsupported_period_never_reaches_the_source() {
    let provider = DataProvider::new(FailingSource::default()).with_clock(fixed_clock);
    let snapshot = provider.resolve_days(45);

    assert!(snapshot.is_zeroed());
    assert_eq!(snapshot.reporting_period, ReportingPeriod::from_days(45));
    assert_eq!(provider.source().calls.get(), 0);
}

#[test]
fn malformed_payload_falls_back() {
    let provider = DataProvider::new(StaticSource("<html>502 Bad Gateway</html>")).with_clock(fixed_clock);
    let snapshot = provider.resolve(ReportingPeriod::DAYS_90);
    assert!(snapshot.is_zeroed());
    assert_eq!(snapshot.reporting_period, ReportingPeriod::DAYS_90);
}

#[test]
fn bundled_payloads_resolve_for_every_selectable_period() {
    let provider = DataProvider::new(FileMetricsSource::new(sample_data_dir()));
    for period in ReportingPeriod::SELECTABLE {
        let snapshot = provider.resolve(period);
        assert!(!snapshot.is_zeroed(), "{period} payload should load");
        assert_eq!(snapshot.reporting_period, period);
    }
}

#[test]
fn file_source_reads_period_keyed_resource() {
    let dir = tempfile::tempdir().expect("tempdir");
    let payload = r#"{
        "patientCount": 7,
        "reportingPeriod": "30 days",
        "dateRange": "Sep 19, 2026 - Oct 19, 2026",
        "lastUpdated": "2026-10-19 06:00:00 UTC",
        "timeInRange": { "belowRange": 1, "inRange": 90, "aboveRange": 9 },
        "gmi": { "average": 6.5, "distribution": { "optimal": 80, "suboptimal": 15, "poor": 5 } }
    }"#;
    fs::write(dir.path().join(resource_name(ReportingPeriod::DAYS_30)), payload).expect("write");

    let provider = DataProvider::new(FileMetricsSource::new(dir.path())).with_clock(fixed_clock);
    let snapshot = provider.resolve(ReportingPeriod::DAYS_30);
    assert_eq!(snapshot.patient_count, 7);
    assert_eq!(snapshot.time_in_range.in_range, 90.0);

    let missing = provider.resolve(ReportingPeriod::DAYS_60);
    assert!(missing.is_zeroed());
}
