//! Chart scenes: the body of each chart plus its label overlay.

mod overlay;
mod style;

pub use overlay::append_overlay;
pub use style::DashboardStyle;

use crate::core::{ChartKind, DrawArea, MetricsSnapshot, Viewport};
use crate::error::DashboardResult;
use crate::layout::{
    LayoutConfig, bar_segments, compute_overlay, pie_geometry, pie_slices, scale_segments,
    stacked_segments,
};
use crate::render::{ArcPrimitive, Color, RectPrimitive, RenderFrame};

/// Builds the complete frame for one chart surface.
pub fn build_chart_frame(
    kind: ChartKind,
    snapshot: &MetricsSnapshot,
    viewport: Viewport,
    layout: &LayoutConfig,
    style: &DashboardStyle,
) -> DashboardResult<RenderFrame> {
    viewport.ensure_valid()?;
    let area = DrawArea::from_viewport(viewport, layout.padding_for(kind));
    let mut frame = RenderFrame::new(viewport);

    match kind {
        ChartKind::TimeInRangeStack => {
            let bar_width = layout.stacked.bar_width_px.min(area.width);
            let segments = stacked_segments(snapshot.time_in_range, area);
            for (segment, color) in segments.iter().zip(style.time_in_range_colors) {
                frame.rects.push(RectPrimitive::new(
                    area.left,
                    area.bottom() - segment.top_offset_px(),
                    bar_width,
                    segment.height_px,
                    color,
                ));
            }
        }
        ChartKind::GlucoseScale => {
            for (band, color) in scale_segments(area).iter().zip(style.scale_colors) {
                frame.rects.push(RectPrimitive::new(
                    band.start_px,
                    area.top,
                    band.extent_px,
                    area.height,
                    color,
                ));
            }
        }
        ChartKind::TimeInRangeBar => push_horizontal_bar(
            &mut frame,
            area,
            &snapshot.time_in_range.values(),
            &style.time_in_range_colors,
        ),
        ChartKind::GmiPie => {
            let (center, radius) = pie_geometry(area);
            match pie_slices(snapshot.gmi.distribution.values(), layout.pie.rotation_rad) {
                Some(slices) => {
                    for (slice, color) in slices.iter().zip(style.gmi_colors) {
                        frame.arcs.push(ArcPrimitive::wedge(
                            center.x,
                            center.y,
                            radius,
                            slice.start_angle,
                            slice.end_angle,
                            color,
                        ));
                    }
                }
                None => frame.arcs.push(ArcPrimitive::disc(
                    center.x,
                    center.y,
                    radius,
                    style.empty_color,
                )),
            }
        }
        ChartKind::GmiDistributionBar => push_horizontal_bar(
            &mut frame,
            area,
            &snapshot.gmi.distribution.values(),
            &style.gmi_colors,
        ),
    }

    let overlay = compute_overlay(kind, snapshot, area, layout);
    append_overlay(&mut frame, &overlay, style);
    Ok(frame)
}

fn push_horizontal_bar(frame: &mut RenderFrame, area: DrawArea, values: &[f64], colors: &[Color]) {
    frame.rects.push(RectPrimitive::new(
        area.left,
        area.top,
        area.width,
        area.height,
        Color::rgba(0.0, 0.0, 0.0, 0.04),
    ));
    for (span, color) in bar_segments(values, area).iter().zip(colors) {
        frame.rects.push(RectPrimitive::new(
            span.start_px,
            area.top,
            span.extent_px,
            area.height,
            *color,
        ));
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{DashboardStyle, build_chart_frame};
    use crate::core::{ChartKind, GmiDistribution, MetricsSnapshot, ReportingPeriod, TimeInRange, Viewport};
    use crate::layout::LayoutConfig;

    fn sample_snapshot() -> MetricsSnapshot {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).single().expect("time");
        let mut snapshot = MetricsSnapshot::zeroed(ReportingPeriod::DAYS_30, now);
        snapshot.patient_count = 120;
        snapshot.time_in_range = TimeInRange::new(2.0, 82.0, 15.0);
        snapshot.gmi.average = 6.9;
        snapshot.gmi.distribution = GmiDistribution::new(72.0, 23.0, 5.0);
        snapshot
    }

    #[test]
    fn every_chart_builds_a_valid_frame() {
        let snapshot = sample_snapshot();
        for kind in ChartKind::ALL {
            let frame = build_chart_frame(
                kind,
                &snapshot,
                Viewport::new(320, 240),
                &LayoutConfig::default(),
                &DashboardStyle::default(),
            )
            .expect("frame");
            frame.validate().expect("valid frame");
            assert!(!frame.is_empty());
        }
    }

    #[test]
    fn zeroed_pie_draws_placeholder_disc_and_three_labels() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).single().expect("time");
        let snapshot = MetricsSnapshot::zeroed(ReportingPeriod::DAYS_90, now);
        let frame = build_chart_frame(
            ChartKind::GmiPie,
            &snapshot,
            Viewport::new(320, 240),
            &LayoutConfig::default(),
            &DashboardStyle::default(),
        )
        .expect("frame");
        assert_eq!(frame.arcs.len(), 1);
        assert!(frame.arcs[0].is_full_turn());
        assert_eq!(frame.texts.len(), 3);
        assert!(frame.lines.is_empty());
    }

    #[test]
    fn invalid_viewport_is_rejected() {
        let result = build_chart_frame(
            ChartKind::GlucoseScale,
            &sample_snapshot(),
            Viewport::new(0, 40),
            &LayoutConfig::default(),
            &DashboardStyle::default(),
        );
        assert!(result.is_err());
    }
}
