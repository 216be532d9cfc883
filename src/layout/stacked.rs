use crate::core::{DrawArea, Point, TimeInRange};
use crate::render::TextHAlign;

use super::{LabelSpec, StackedLabelConfig, format_percent, geometry_share, sanitize_percent};

/// Backing value of the top "very high" band.
///
/// The band is a fixed display element, not a measured share, which is why its
/// label is pinned instead of centered.
pub const VERY_HIGH_SENTINEL: f64 = 1.0;

/// Pixel span of one stacked segment, measured upward from the area bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackedSegment {
    pub value: f64,
    pub bottom_offset_px: f64,
    pub height_px: f64,
}

impl StackedSegment {
    #[must_use]
    pub fn center_offset_px(self) -> f64 {
        self.bottom_offset_px + self.height_px / 2.0
    }

    #[must_use]
    pub fn top_offset_px(self) -> f64 {
        self.bottom_offset_px + self.height_px
    }
}

/// Stacks `[below, in, above, very_high]` bottom-up over the area height.
///
/// A single value above 100 is drawn as 100 so heights stay finite.
#[must_use]
pub fn stacked_segments(time_in_range: TimeInRange, area: DrawArea) -> [StackedSegment; 4] {
    let [below, inside, above] = time_in_range.values();
    let values = [below, inside, above, VERY_HIGH_SENTINEL].map(sanitize_percent);
    let mut cumulative = 0.0;
    values.map(|value| {
        let height_px = geometry_share(value) / 100.0 * area.height;
        let segment = StackedSegment {
            value,
            bottom_offset_px: cumulative,
            height_px,
        };
        cumulative += height_px;
        segment
    })
}

/// Labels for the vertical time-in-range bar, ordered bottom to top.
#[must_use]
pub fn stacked_labels(
    time_in_range: TimeInRange,
    area: DrawArea,
    config: &StackedLabelConfig,
) -> Vec<LabelSpec> {
    let segments = stacked_segments(time_in_range, area);
    let x = area.left + config.bar_width_px.min(area.width) + config.label_margin_px;

    let mut labels: Vec<LabelSpec> = segments[..3]
        .iter()
        .map(|segment| {
            LabelSpec::new(
                format_percent(segment.value),
                Point::new(x, area.bottom() - segment.center_offset_px()),
                TextHAlign::Left,
            )
        })
        .collect();
    labels.push(LabelSpec::new(
        config.very_high_text.clone(),
        Point::new(x, area.top + config.top_pin_margin_px),
        TextHAlign::Left,
    ));
    labels
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{VERY_HIGH_SENTINEL, stacked_labels, stacked_segments};
    use crate::core::{DrawArea, TimeInRange};
    use crate::layout::StackedLabelConfig;

    #[test]
    fn segments_stack_in_fixed_order() {
        let area = DrawArea::new(0.0, 0.0, 100.0, 200.0);
        let segments = stacked_segments(TimeInRange::new(10.0, 70.0, 20.0), area);

        assert_relative_eq!(segments[0].height_px, 20.0);
        assert_relative_eq!(segments[1].bottom_offset_px, 20.0);
        assert_relative_eq!(segments[2].bottom_offset_px, 160.0);
        assert_relative_eq!(segments[3].bottom_offset_px, 200.0);
        assert_relative_eq!(segments[3].value, VERY_HIGH_SENTINEL);
    }

    #[test]
    fn all_zero_input_collapses_to_baseline() {
        let area = DrawArea::new(10.0, 20.0, 100.0, 200.0);
        let labels = stacked_labels(
            TimeInRange::default(),
            area,
            &StackedLabelConfig::default(),
        );
        for label in &labels[..3] {
            assert_relative_eq!(label.anchor.y, area.bottom());
            assert_eq!(label.text, "0%");
        }
    }

    #[test]
    fn anchors_sit_right_of_the_bar() {
        let config = StackedLabelConfig::default();
        let area = DrawArea::new(16.0, 12.0, 120.0, 200.0);
        let labels = stacked_labels(TimeInRange::new(5.0, 90.0, 5.0), area, &config);
        for label in labels {
            assert_relative_eq!(
                label.anchor.x,
                area.left + config.bar_width_px + config.label_margin_px
            );
        }
    }
}
