use std::f64::consts::TAU;

use smallvec::smallvec;

use crate::core::{DrawArea, GmiDistribution, Point};
use crate::render::TextHAlign;

use super::{LabelBackground, LabelSpec, PieLabelConfig, format_percent, sanitize_percent};

/// Angular extent of one slice, clockwise in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSlice {
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSlice {
    #[must_use]
    pub fn mid_angle(self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

/// Center and radius of the pie inside `area`.
#[must_use]
pub fn pie_geometry(area: DrawArea) -> (Point, f64) {
    (area.center(), area.width.min(area.height).max(0.0) / 2.0)
}

/// Slice angles for `values`, or `None` when they sum to zero.
#[must_use]
pub fn pie_slices(values: [f64; 3], rotation_rad: f64) -> Option<[PieSlice; 3]> {
    let values = values.map(sanitize_percent);
    let total: f64 = values.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return None;
    }

    let mut start_angle = rotation_rad;
    Some(values.map(|value| {
        let end_angle = start_angle + value / total * TAU;
        let slice = PieSlice {
            value,
            start_angle,
            end_angle,
        };
        start_angle = end_angle;
        slice
    }))
}

fn on_circle(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// External labels for the GMI pie.
///
/// Anchors are fixed per slice so uneven slices never push labels onto each
/// other. Connectors run from the slice edge at its true mid angle through one
/// elbow to the anchor. With a zero total there are no angles, so every
/// connector collapses onto its anchor.
#[must_use]
pub fn pie_labels(
    distribution: GmiDistribution,
    area: DrawArea,
    config: &PieLabelConfig,
) -> Vec<LabelSpec> {
    let (center, radius) = pie_geometry(area);
    let slices = pie_slices(distribution.values(), config.rotation_rad);
    let background = LabelBackground {
        radius_px: config.label_disc_radius_px,
    };

    distribution
        .values()
        .into_iter()
        .zip(config.anchors)
        .enumerate()
        .map(|(index, (value, relative))| {
            let anchor = Point::new(
                center.x + relative.dx_radius * radius,
                center.y + relative.dy_radius * radius,
            );
            let connector = match slices {
                Some(slices) => {
                    let mid = slices[index].mid_angle();
                    smallvec![
                        on_circle(center, radius, mid),
                        on_circle(center, radius * config.elbow_radius_ratio, mid),
                        anchor,
                    ]
                }
                None => smallvec![anchor, anchor],
            };
            LabelSpec::new(format_percent(value), anchor, TextHAlign::Center)
                .with_connector(connector)
                .with_background(background)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, TAU};

    use approx::assert_relative_eq;

    use super::{pie_geometry, pie_labels, pie_slices};
    use crate::core::{DrawArea, GmiDistribution};
    use crate::layout::PieLabelConfig;

    #[test]
    fn slices_cover_a_full_turn_from_rotation() {
        let slices = pie_slices([50.0, 25.0, 25.0], FRAC_PI_2).expect("non-zero total");
        assert_relative_eq!(slices[0].start_angle, FRAC_PI_2);
        assert_relative_eq!(slices[0].end_angle, FRAC_PI_2 + TAU / 2.0);
        assert_relative_eq!(slices[2].end_angle, FRAC_PI_2 + TAU, epsilon = 1e-12);
    }

    #[test]
    fn zero_total_has_no_slices() {
        assert!(pie_slices([0.0, 0.0, 0.0], 0.0).is_none());
        assert!(pie_slices([f64::NAN, 0.0, -1.0], 0.0).is_none());
    }

    #[test]
    fn connector_starts_on_the_pie_edge() {
        let area = DrawArea::new(80.0, 24.0, 160.0, 160.0);
        let labels = pie_labels(
            GmiDistribution::new(72.0, 23.0, 5.0),
            area,
            &PieLabelConfig::default(),
        );
        let (center, radius) = pie_geometry(area);
        for label in &labels {
            let connector = label.connector.as_ref().expect("connector");
            assert_eq!(connector.len(), 3);
            let edge = connector[0];
            assert_relative_eq!(
                (edge.x - center.x).hypot(edge.y - center.y),
                radius,
                epsilon = 1e-9
            );
            assert_eq!(connector[2], label.anchor);
        }
    }
}
