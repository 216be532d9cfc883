//! Metrics data provider.

mod provider;
mod source;

pub use provider::{DataProvider, ProviderConfig};
pub use source::{FileMetricsSource, MetricsSource, resource_name};

#[cfg(feature = "http-source")]
pub use source::HttpMetricsSource;
