use std::fs;
use std::path::PathBuf;

use crate::core::ReportingPeriod;
use crate::error::{DashboardError, DashboardResult};

/// Static resource name for one period's payload.
#[must_use]
pub fn resource_name(period: ReportingPeriod) -> String {
    format!("outcomes_{}d.json", period.days())
}

/// Where raw metrics payloads come from.
pub trait MetricsSource {
    /// Returns the raw JSON document for `period`.
    fn fetch(&self, period: ReportingPeriod) -> DashboardResult<String>;
}

impl<S: MetricsSource + ?Sized> MetricsSource for Box<S> {
    fn fetch(&self, period: ReportingPeriod) -> DashboardResult<String> {
        (**self).fetch(period)
    }
}

impl<S: MetricsSource + ?Sized> MetricsSource for &S {
    fn fetch(&self, period: ReportingPeriod) -> DashboardResult<String> {
        (**self).fetch(period)
    }
}

/// Reads payloads from a directory of static JSON files.
#[derive(Debug, Clone)]
pub struct FileMetricsSource {
    root: PathBuf,
}

impl FileMetricsSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn path_for(&self, period: ReportingPeriod) -> PathBuf {
        self.root.join(resource_name(period))
    }
}

impl MetricsSource for FileMetricsSource {
    fn fetch(&self, period: ReportingPeriod) -> DashboardResult<String> {
        let path = self.path_for(period);
        fs::read_to_string(&path)
            .map_err(|err| DashboardError::Fetch(format!("failed to read `{}`: {err}", path.display())))
    }
}

#[cfg(feature = "http-source")]
mod http {
    use std::time::Duration;

    use tracing::trace;

    use super::{MetricsSource, resource_name};
    use crate::core::ReportingPeriod;
    use crate::data::ProviderConfig;
    use crate::error::{DashboardError, DashboardResult};

    /// `GET <base_url>/outcomes_<n>d.json` over blocking HTTP.
    #[derive(Debug, Clone)]
    pub struct HttpMetricsSource {
        client: reqwest::blocking::Client,
        base_url: String,
    }

    impl HttpMetricsSource {
        pub fn new(config: &ProviderConfig) -> DashboardResult<Self> {
            let client = reqwest::blocking::Client::builder()
                .timeout(Duration::from_millis(config.timeout_ms))
                .build()
                .map_err(|e| DashboardError::Fetch(format!("http client error: {e}")))?;
            Ok(Self {
                client,
                base_url: config.base_url.trim_end_matches('/').to_owned(),
            })
        }

        #[must_use]
        pub fn url_for(&self, period: ReportingPeriod) -> String {
            format!("{}/{}", self.base_url, resource_name(period))
        }
    }

    impl MetricsSource for HttpMetricsSource {
        fn fetch(&self, period: ReportingPeriod) -> DashboardResult<String> {
            let url = self.url_for(period);
            trace!(%url, "fetch metrics");
            self.client
                .get(&url)
                .send()
                .and_then(|response| response.error_for_status())
                .and_then(|response| response.text())
                .map_err(|e| DashboardError::Fetch(format!("request to `{url}` failed: {e}")))
        }
    }
}

#[cfg(feature = "http-source")]
pub use http::HttpMetricsSource;

#[cfg(test)]
mod tests {
    use super::{FileMetricsSource, MetricsSource, resource_name};
    use crate::core::ReportingPeriod;
    use crate::error::DashboardError;

    #[test]
    fn resource_name_is_keyed_by_days() {
        assert_eq!(resource_name(ReportingPeriod::DAYS_90), "outcomes_90d.json");
    }

    #[test]
    fn missing_file_is_a_fetch_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = FileMetricsSource::new(dir.path());
        let err = source.fetch(ReportingPeriod::DAYS_30).expect_err("missing file");
        assert!(matches!(err, DashboardError::Fetch(_)));
    }
}
