use crate::core::DrawArea;

use super::{geometry_share, sanitize_percent};

/// Horizontal span of one proportional bar segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSpan {
    pub value: f64,
    pub start_px: f64,
    pub extent_px: f64,
}

impl BarSpan {
    #[must_use]
    pub fn end_px(self) -> f64 {
        self.start_px + self.extent_px
    }
}

/// Maps percentages to consecutive widths, left to right.
///
/// Widths are relative to 100, not to the sum, so a short total leaves the
/// bar partly empty and an oversized one overflows the area.
#[must_use]
pub fn bar_segments(values: &[f64], area: DrawArea) -> Vec<BarSpan> {
    let mut start_px = area.left;
    values
        .iter()
        .map(|&raw| {
            let value = sanitize_percent(raw);
            let extent_px = geometry_share(value) / 100.0 * area.width;
            let span = BarSpan {
                value,
                start_px,
                extent_px,
            };
            start_px += extent_px;
            span
        })
        .collect()
}
