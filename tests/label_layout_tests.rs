use std::f64::consts::FRAC_PI_2;

use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use clinic_outcomes::core::{
    ChartKind, DrawArea, GmiDistribution, MetricsSnapshot, ReportingPeriod, TimeInRange,
};
use clinic_outcomes::layout::{
    LayoutConfig, PieLabelConfig, StackedLabelConfig, compute_labels, compute_overlay, pie_geometry,
    pie_labels, stacked_labels,
};

fn snapshot_with(time_in_range: TimeInRange, distribution: GmiDistribution) -> MetricsSnapshot {
    let now = Utc
        .with_ymd_and_hms(2026, 10, 19, 6, 0, 0)
        .single()
        .expect("valid time");
    let mut snapshot = MetricsSnapshot::zeroed(ReportingPeriod::DAYS_30, now);
    snapshot.patient_count = 412;
    snapshot.time_in_range = time_in_range;
    snapshot.gmi.distribution = distribution;
    snapshot
}

#[test]
fn stacked_labels_follow_segment_centers_bottom_to_top() {
    let config = StackedLabelConfig::default();
    let area = DrawArea::new(16.0, 12.0, 150.0, 200.0);
    let labels = stacked_labels(TimeInRange::new(2.0, 82.0, 15.0), area, &config);

    assert_eq!(labels.len(), 4);
    let offsets: Vec<f64> = labels
        .iter()
        .map(|label| area.bottom() - label.anchor.y)
        .collect();

    assert_relative_eq!(offsets[0], 2.0, epsilon = 1e-9);
    assert_relative_eq!(offsets[1], 86.0, epsilon = 1e-9);
    assert_relative_eq!(offsets[2], 183.0, epsilon = 1e-9);
    assert_relative_eq!(labels[3].anchor.y, area.top + config.top_pin_margin_px);
    assert!(offsets.windows(2).all(|pair| pair[0] < pair[1]));

    let texts: Vec<&str> = labels.iter().map(|label| label.text.as_str()).collect();
    assert_eq!(texts, vec!["2%", "82%", "15%", "<1%"]);
}

#[test]
fn pie_labels_use_fixed_anchors_regardless_of_rotation() {
    let area = DrawArea::new(80.0, 24.0, 160.0, 168.0);
    let distribution = GmiDistribution::new(72.0, 23.0, 5.0);
    let (center, radius) = pie_geometry(area);

    let mut previous = None;
    for rotation_rad in [0.0, FRAC_PI_2, 1.234, -2.5] {
        let config = PieLabelConfig {
            rotation_rad,
            ..PieLabelConfig::default()
        };
        let labels = pie_labels(distribution, area, &config);

        assert_eq!(labels.len(), 3);
        let texts: Vec<&str> = labels.iter().map(|label| label.text.as_str()).collect();
        assert_eq!(texts, vec!["72%", "23%", "5%"]);
        for (label, relative) in labels.iter().zip(config.anchors) {
            assert_relative_eq!(label.anchor.x, center.x + relative.dx_radius * radius);
            assert_relative_eq!(label.anchor.y, center.y + relative.dy_radius * radius);
            assert!(label.background.is_some());
        }

        let anchors: Vec<_> = labels.iter().map(|label| label.anchor).collect();
        if let Some(previous) = &previous {
            assert_eq!(previous, &anchors);
        }
        previous = Some(anchors);
    }
}

#[test]
fn default_pie_anchors_sit_left_right_and_lower_right() {
    let area = DrawArea::new(80.0, 24.0, 160.0, 168.0);
    let labels = pie_labels(
        GmiDistribution::new(72.0, 23.0, 5.0),
        area,
        &PieLabelConfig::default(),
    );
    let center = area.center();

    assert!(labels[0].anchor.x < center.x);
    assert!(labels[1].anchor.x > center.x);
    assert!(labels[2].anchor.x > center.x && labels[2].anchor.y > center.y);
}

#[test]
fn pie_with_zero_total_places_labels_at_fallback_anchors() {
    let area = DrawArea::new(80.0, 24.0, 160.0, 168.0);
    let config = PieLabelConfig::default();
    let labels = pie_labels(GmiDistribution::default(), area, &config);
    let (center, radius) = pie_geometry(area);

    assert_eq!(labels.len(), 3);
    for (label, relative) in labels.iter().zip(config.anchors) {
        assert!(label.is_finite());
        assert_eq!(label.text, "0%");
        assert_relative_eq!(label.anchor.x, center.x + relative.dx_radius * radius);
        let connector = label.connector.as_ref().expect("connector");
        assert!(connector.iter().all(|point| *point == label.anchor));
    }
}

#[test]
fn bar_charts_have_no_overlay() {
    let snapshot = snapshot_with(
        TimeInRange::new(2.0, 82.0, 15.0),
        GmiDistribution::new(72.0, 23.0, 5.0),
    );
    let area = DrawArea::new(0.0, 0.0, 400.0, 40.0);
    let config = LayoutConfig::default();
    for kind in [ChartKind::TimeInRangeBar, ChartKind::GmiDistributionBar] {
        assert!(compute_overlay(kind, &snapshot, area, &config).is_empty());
    }
}

#[test]
fn scale_overlay_ignores_snapshot_values() {
    let area = DrawArea::new(16.0, 8.0, 448.0, 36.0);
    let config = LayoutConfig::default();
    let a = snapshot_with(TimeInRange::new(1.0, 2.0, 3.0), GmiDistribution::default());
    let b = snapshot_with(
        TimeInRange::new(30.0, 40.0, 30.0),
        GmiDistribution::new(1.0, 1.0, 1.0),
    );
    assert_eq!(
        compute_overlay(ChartKind::GlucoseScale, &a, area, &config),
        compute_overlay(ChartKind::GlucoseScale, &b, area, &config)
    );
}

#[test]
fn layout_is_idempotent_for_every_chart() {
    let snapshot = snapshot_with(
        TimeInRange::new(4.5, 70.25, 25.25),
        GmiDistribution::new(60.0, 30.0, 10.0),
    );
    let area = DrawArea::new(12.0, 12.0, 300.0, 180.0);
    let config = LayoutConfig::default();
    for kind in ChartKind::ALL {
        let first = compute_labels(kind, &snapshot, area, &config);
        let second = compute_labels(kind, &snapshot, area, &config);
        assert_eq!(first, second, "{kind} layout must be deterministic");
    }
}

#[test]
fn layout_does_not_mutate_the_snapshot() {
    let snapshot = snapshot_with(
        TimeInRange::new(2.0, 82.0, 15.0),
        GmiDistribution::new(72.0, 23.0, 5.0),
    );
    let before = snapshot.clone();
    let area = DrawArea::new(0.0, 0.0, 200.0, 200.0);
    for kind in ChartKind::ALL {
        let _ = compute_overlay(kind, &snapshot, area, &LayoutConfig::default());
    }
    assert_eq!(snapshot, before);
}
