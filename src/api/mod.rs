mod chart_handle;
mod config;
mod dashboard;
mod lifecycle;
mod surfaces;

pub use chart_handle::{ChartHandle, HandleId};
pub use config::{ChartOptions, DashboardConfig};
pub use dashboard::Dashboard;
pub use lifecycle::{ChartLifecycleManager, LifecycleConfig, LifecycleState};
pub use surfaces::{MountedSurfaces, Surface, SurfaceHost};
