//! clinic-outcomes: headless clinical outcomes dashboard.
//!
//! Resolves a reporting period to pre-aggregated glucose-control metrics,
//! builds the five dashboard charts with deterministic label overlays, keeps
//! the live chart instances under an explicit lifecycle, and exports the
//! rendered dashboard as a PNG.

pub mod api;
pub mod charts;
pub mod core;
pub mod data;
pub mod error;
pub mod export;
pub mod layout;
pub mod render;
pub mod telemetry;

pub use api::{Dashboard, DashboardConfig};
pub use error::{DashboardError, DashboardResult};
