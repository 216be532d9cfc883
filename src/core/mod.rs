pub mod chart_kind;
pub mod metrics;
pub mod period;
pub mod types;

pub use chart_kind::ChartKind;
pub use metrics::{Gmi, GmiDistribution, MetricsSnapshot, TimeInRange};
pub use period::ReportingPeriod;
pub use types::{DrawArea, Padding, Point, Viewport};
