//! Deterministic label layout for the dashboard charts.
//!
//! Every function here is pure: the same snapshot, draw area and config
//! always produce the same `LabelSpec` sequence, so overlays can be recomputed
//! on each redraw and tested without a drawing surface.

mod bars;
mod config;
mod pie;
mod scale_ruler;
mod stacked;

pub use bars::{BarSpan, bar_segments};
pub use config::{
    BarConfig, LayoutConfig, PieLabelConfig, RelativeAnchor, ScaleRulerConfig, StackedLabelConfig,
};
pub use pie::{PieSlice, pie_geometry, pie_labels, pie_slices};
pub use scale_ruler::{
    SCALE_DIVIDER_AFTER_SEGMENTS, SCALE_SEGMENT_WIDTHS, SCALE_TICKS_MG_DL, scale_overlay,
    scale_segments, scale_tick_positions,
};
pub use stacked::{StackedSegment, VERY_HIGH_SENTINEL, stacked_labels, stacked_segments};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ChartKind, DrawArea, MetricsSnapshot, Point};
use crate::render::TextHAlign;

/// Waypoints from a segment edge to its label anchor.
pub type Connector = SmallVec<[Point; 3]>;

/// Filled disc drawn behind a label before its text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelBackground {
    pub radius_px: f64,
}

/// What a label annotates; picks its type size when drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelRole {
    /// A percentage value next to its segment or slice.
    #[default]
    Value,
    /// A scale tick value.
    Tick,
}

/// One computed overlay label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelSpec {
    pub text: String,
    pub anchor: Point,
    pub h_align: TextHAlign,
    #[serde(default)]
    pub role: LabelRole,
    pub connector: Option<Connector>,
    pub background: Option<LabelBackground>,
}

impl LabelSpec {
    #[must_use]
    pub fn new(text: impl Into<String>, anchor: Point, h_align: TextHAlign) -> Self {
        Self {
            text: text.into(),
            anchor,
            h_align,
            role: LabelRole::Value,
            connector: None,
            background: None,
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: LabelRole) -> Self {
        self.role = role;
        self
    }

    #[must_use]
    pub fn with_connector(mut self, connector: Connector) -> Self {
        self.connector = Some(connector);
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: LabelBackground) -> Self {
        self.background = Some(background);
        self
    }

    /// True when the anchor and every connector waypoint are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.anchor.is_finite()
            && self
                .connector
                .as_ref()
                .is_none_or(|points| points.iter().all(|p| p.is_finite()))
    }
}

/// Static guide line drawn with the overlay (scale dividers).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideLine {
    pub from: Point,
    pub to: Point,
}

/// Everything a chart draws on top of its body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OverlayLayout {
    pub labels: Vec<LabelSpec>,
    pub guides: Vec<GuideLine>,
}

impl OverlayLayout {
    #[must_use]
    pub fn from_labels(labels: Vec<LabelSpec>) -> Self {
        Self {
            labels,
            guides: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.guides.is_empty()
    }
}

/// Computes the overlay for `kind` from the snapshot slice that chart shows.
#[must_use]
pub fn compute_overlay(
    kind: ChartKind,
    snapshot: &MetricsSnapshot,
    area: DrawArea,
    config: &LayoutConfig,
) -> OverlayLayout {
    match kind {
        ChartKind::TimeInRangeStack => OverlayLayout::from_labels(stacked_labels(
            snapshot.time_in_range,
            area,
            &config.stacked,
        )),
        ChartKind::GlucoseScale => scale_overlay(area, &config.scale),
        ChartKind::GmiPie => {
            OverlayLayout::from_labels(pie_labels(snapshot.gmi.distribution, area, &config.pie))
        }
        // Plain proportional bars, nothing drawn on top.
        ChartKind::TimeInRangeBar | ChartKind::GmiDistributionBar => OverlayLayout::default(),
    }
}

#[must_use]
pub fn compute_labels(
    kind: ChartKind,
    snapshot: &MetricsSnapshot,
    area: DrawArea,
    config: &LayoutConfig,
) -> Vec<LabelSpec> {
    compute_overlay(kind, snapshot, area, config).labels
}

/// Formats a percentage the way the dashboard prints it (`82%`, `12.5%`).
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{}%", sanitize_percent(value))
}

/// Share used for geometry: a sanitized percentage capped at 100.
pub(crate) fn geometry_share(value: f64) -> f64 {
    sanitize_percent(value).min(100.0)
}

/// Non-finite and negative inputs count as zero.
pub(crate) fn sanitize_percent(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
