#![cfg(feature = "cairo-backend")]

use chrono::{TimeZone, Utc};
use clinic_outcomes::charts::{DashboardStyle, build_chart_frame};
use clinic_outcomes::core::{ChartKind, GmiDistribution, MetricsSnapshot, ReportingPeriod, TimeInRange, Viewport};
use clinic_outcomes::export::{CairoCapture, CaptureMethod};
use clinic_outcomes::layout::LayoutConfig;
use clinic_outcomes::render::{CairoRenderer, Renderer};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn snapshot() -> MetricsSnapshot {
    let now = Utc
        .with_ymd_and_hms(2026, 10, 19, 6, 0, 0)
        .single()
        .expect("valid time");
    let mut snapshot = MetricsSnapshot::zeroed(ReportingPeriod::DAYS_30, now);
    snapshot.time_in_range = TimeInRange::new(2.0, 82.0, 15.0);
    snapshot.gmi.distribution = GmiDistribution::new(72.0, 23.0, 5.0);
    snapshot
}

#[test]
fn cairo_renderer_draws_every_chart() {
    let snapshot = snapshot();
    for kind in ChartKind::ALL {
        let frame = build_chart_frame(
            kind,
            &snapshot,
            Viewport::new(360, 280),
            &LayoutConfig::default(),
            &DashboardStyle::default(),
        )
        .expect("frame");
        let mut renderer = CairoRenderer::new(360, 280).expect("renderer");
        renderer.render(&frame).expect("render");
        assert_eq!(renderer.last_stats().texts_drawn, frame.texts.len());
    }
}

#[test]
fn composite_capture_encodes_png() {
    let snapshot = snapshot();
    let frames: Vec<_> = ChartKind::ALL
        .into_iter()
        .map(|kind| {
            build_chart_frame(
                kind,
                &snapshot,
                Viewport::new(300, 200),
                &LayoutConfig::default(),
                &DashboardStyle::default(),
            )
            .expect("frame")
        })
        .collect();
    let refs: Vec<_> = frames.iter().collect();

    let png = CairoCapture::new(1.0, 8).capture(&refs).expect("capture");
    assert!(png.starts_with(&PNG_SIGNATURE));
}

#[test]
fn non_positive_scale_fails_capture() {
    let frame = build_chart_frame(
        ChartKind::GlucoseScale,
        &snapshot(),
        Viewport::new(300, 60),
        &LayoutConfig::default(),
        &DashboardStyle::default(),
    )
    .expect("frame");
    assert!(CairoCapture::new(0.0, 8).capture(&[&frame]).is_err());
}
