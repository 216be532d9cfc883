use std::fmt;

use serde::{Deserialize, Serialize};

/// The five charts of the dashboard, one per drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChartKind {
    /// Vertical stacked time-in-range bar with side labels.
    TimeInRangeStack,
    /// Static glucose-range ruler (mg/dL).
    GlucoseScale,
    /// Horizontal time-in-range bar.
    TimeInRangeBar,
    /// GMI distribution pie with external labels.
    GmiPie,
    /// Horizontal GMI distribution bar.
    GmiDistributionBar,
}

impl ChartKind {
    /// Construction order used by the lifecycle manager.
    pub const ALL: [Self; 5] = [
        Self::TimeInRangeStack,
        Self::GlucoseScale,
        Self::TimeInRangeBar,
        Self::GmiPie,
        Self::GmiDistributionBar,
    ];

    /// Identifier of the drawing surface the hosting layout must provide.
    #[must_use]
    pub const fn surface_id(self) -> &'static str {
        match self {
            Self::TimeInRangeStack => "tirStackedChart",
            Self::GlucoseScale => "glucoseScaleChart",
            Self::TimeInRangeBar => "tirBarChart",
            Self::GmiPie => "gmiPieChart",
            Self::GmiDistributionBar => "gmiBarChart",
        }
    }

    #[must_use]
    pub fn from_surface_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.surface_id() == id)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.surface_id())
    }
}
