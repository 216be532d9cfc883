use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::core::{ChartKind, Padding};
use crate::error::{DashboardError, DashboardResult};

/// Label anchor expressed relative to the pie center, in radius units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeAnchor {
    pub dx_radius: f64,
    pub dy_radius: f64,
}

impl RelativeAnchor {
    #[must_use]
    pub const fn new(dx_radius: f64, dy_radius: f64) -> Self {
        Self {
            dx_radius,
            dy_radius,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackedLabelConfig {
    pub padding: Padding,
    pub bar_width_px: f64,
    /// Gap between the bar's right edge and the label anchors.
    pub label_margin_px: f64,
    /// Distance from the draw-area top to the pinned very-high label.
    pub top_pin_margin_px: f64,
    pub very_high_text: String,
}

impl Default for StackedLabelConfig {
    fn default() -> Self {
        Self {
            padding: Padding::new(12.0, 72.0, 12.0, 16.0),
            bar_width_px: 56.0,
            label_margin_px: 12.0,
            top_pin_margin_px: 8.0,
            very_high_text: "<1%".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleRulerConfig {
    pub padding: Padding,
    pub tick_label_gap_px: f64,
}

impl Default for ScaleRulerConfig {
    fn default() -> Self {
        Self {
            padding: Padding::new(8.0, 16.0, 28.0, 16.0),
            tick_label_gap_px: 14.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieLabelConfig {
    pub padding: Padding,
    /// Start angle of the first slice, clockwise from 3 o'clock.
    pub rotation_rad: f64,
    /// Fixed anchors for optimal, suboptimal and poor, in that order.
    pub anchors: [RelativeAnchor; 3],
    pub elbow_radius_ratio: f64,
    pub label_disc_radius_px: f64,
}

impl Default for PieLabelConfig {
    fn default() -> Self {
        Self {
            padding: Padding::new(24.0, 80.0, 48.0, 80.0),
            rotation_rad: FRAC_PI_2,
            anchors: [
                RelativeAnchor::new(-1.45, -0.35),
                RelativeAnchor::new(1.45, -0.2),
                RelativeAnchor::new(1.05, 1.05),
            ],
            elbow_radius_ratio: 1.18,
            label_disc_radius_px: 16.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    pub padding: Padding,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            padding: Padding::new(8.0, 16.0, 8.0, 16.0),
        }
    }
}

/// Named layout constants for every chart variant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub stacked: StackedLabelConfig,
    pub scale: ScaleRulerConfig,
    pub time_in_range_bar: BarConfig,
    pub pie: PieLabelConfig,
    pub gmi_bar: BarConfig,
}

impl LayoutConfig {
    #[must_use]
    pub fn padding_for(&self, kind: ChartKind) -> Padding {
        match kind {
            ChartKind::TimeInRangeStack => self.stacked.padding,
            ChartKind::GlucoseScale => self.scale.padding,
            ChartKind::TimeInRangeBar => self.time_in_range_bar.padding,
            ChartKind::GmiPie => self.pie.padding,
            ChartKind::GmiDistributionBar => self.gmi_bar.padding,
        }
    }

    #[must_use]
    pub fn with_pie_rotation(mut self, rotation_rad: f64) -> Self {
        self.pie.rotation_rad = rotation_rad;
        self
    }

    pub fn validate(&self) -> DashboardResult<()> {
        let finite_non_negative = [
            ("stacked.bar_width_px", self.stacked.bar_width_px),
            ("stacked.label_margin_px", self.stacked.label_margin_px),
            ("stacked.top_pin_margin_px", self.stacked.top_pin_margin_px),
            ("scale.tick_label_gap_px", self.scale.tick_label_gap_px),
            ("pie.elbow_radius_ratio", self.pie.elbow_radius_ratio),
            ("pie.label_disc_radius_px", self.pie.label_disc_radius_px),
        ];
        for (name, value) in finite_non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(DashboardError::InvalidData(format!(
                    "layout constant `{name}` must be finite and >= 0"
                )));
            }
        }
        if !self.pie.rotation_rad.is_finite() {
            return Err(DashboardError::InvalidData(
                "pie rotation must be finite".to_owned(),
            ));
        }
        if self
            .pie
            .anchors
            .iter()
            .any(|a| !a.dx_radius.is_finite() || !a.dy_radius.is_finite())
        {
            return Err(DashboardError::InvalidData(
                "pie anchors must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}
