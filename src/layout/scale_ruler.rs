use crate::core::{DrawArea, Point};
use crate::render::TextHAlign;

use super::{BarSpan, GuideLine, LabelRole, LabelSpec, OverlayLayout, ScaleRulerConfig};

/// Glucose thresholds printed under the ruler, left to right.
pub const SCALE_TICKS_MG_DL: [u32; 6] = [40, 54, 70, 180, 240, 400];

/// Relative widths of the five bands between consecutive ticks.
pub const SCALE_SEGMENT_WIDTHS: [f64; 5] = [14.0, 16.0, 110.0, 60.0, 160.0];

/// Dividers are drawn after these (1-based) bands only.
pub const SCALE_DIVIDER_AFTER_SEGMENTS: [usize; 3] = [1, 3, 5];

fn total_units() -> f64 {
    SCALE_SEGMENT_WIDTHS.iter().sum()
}

/// Pixel x of every tick; tick `i` sits after the first `i` bands.
#[must_use]
pub fn scale_tick_positions(area: DrawArea) -> [f64; 6] {
    let total = total_units();
    let mut positions = [area.left; 6];
    let mut cumulative = 0.0;
    for (index, width) in SCALE_SEGMENT_WIDTHS.iter().enumerate() {
        cumulative += width;
        positions[index + 1] = area.left + cumulative / total * area.width;
    }
    positions
}

/// The five colored bands of the ruler.
#[must_use]
pub fn scale_segments(area: DrawArea) -> [BarSpan; 5] {
    let ticks = scale_tick_positions(area);
    let total = total_units();
    std::array::from_fn(|index| BarSpan {
        value: SCALE_SEGMENT_WIDTHS[index] / total * 100.0,
        start_px: ticks[index],
        extent_px: ticks[index + 1] - ticks[index],
    })
}

#[must_use]
pub fn scale_overlay(area: DrawArea, config: &ScaleRulerConfig) -> OverlayLayout {
    let ticks = scale_tick_positions(area);
    let label_y = area.bottom() + config.tick_label_gap_px;
    let last = ticks.len() - 1;

    let labels = ticks
        .iter()
        .zip(SCALE_TICKS_MG_DL)
        .enumerate()
        .map(|(index, (&x, value))| {
            let h_align = match index {
                0 => TextHAlign::Left,
                i if i == last => TextHAlign::Right,
                _ => TextHAlign::Center,
            };
            LabelSpec::new(value.to_string(), Point::new(x, label_y), h_align)
                .with_role(LabelRole::Tick)
        })
        .collect();

    let guides = SCALE_DIVIDER_AFTER_SEGMENTS
        .iter()
        .map(|&after| {
            let x = ticks[after];
            GuideLine {
                from: Point::new(x, area.top),
                to: Point::new(x, area.bottom()),
            }
        })
        .collect();

    OverlayLayout { labels, guides }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{scale_overlay, scale_segments, scale_tick_positions};
    use crate::core::DrawArea;
    use crate::layout::{LabelRole, ScaleRulerConfig};

    #[test]
    fn ticks_follow_cumulative_band_widths() {
        let ticks = scale_tick_positions(DrawArea::new(0.0, 0.0, 360.0, 20.0));
        for (actual, expected) in ticks.iter().zip([0.0, 14.0, 30.0, 140.0, 200.0, 360.0]) {
            assert_relative_eq!(*actual, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn dividers_only_after_first_third_and_fifth_band() {
        let area = DrawArea::new(10.0, 5.0, 720.0, 20.0);
        let overlay = scale_overlay(area, &ScaleRulerConfig::default());
        let xs: Vec<f64> = overlay.guides.iter().map(|g| g.from.x).collect();
        assert_eq!(xs.len(), 3);
        for (actual, expected) in xs.iter().zip([38.0, 290.0, 730.0]) {
            assert_relative_eq!(*actual, expected, epsilon = 1e-9);
        }
        assert_eq!(overlay.labels.len(), 6);
        assert_eq!(overlay.labels[3].text, "180");
        assert!(overlay.labels.iter().all(|label| label.role == LabelRole::Tick));
    }

    #[test]
    fn bands_cover_the_full_width() {
        let area = DrawArea::new(0.0, 0.0, 500.0, 20.0);
        let total: f64 = scale_segments(area).iter().map(|s| s.extent_px).sum();
        assert_relative_eq!(total, 500.0, epsilon = 1e-9);
    }
}
