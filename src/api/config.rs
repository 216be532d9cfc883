use serde::{Deserialize, Serialize};

use crate::charts::DashboardStyle;
use crate::data::ProviderConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::export::ExportConfig;
use crate::layout::LayoutConfig;

use super::LifecycleConfig;

/// Per-render-cycle options shared by every chart handle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartOptions {
    pub layout: LayoutConfig,
    pub style: DashboardStyle,
    /// Read by the host's hover handling; chart frames do not depend on it.
    pub tooltips_enabled: bool,
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub provider: ProviderConfig,
    pub lifecycle: LifecycleConfig,
    pub layout: LayoutConfig,
    pub style: DashboardStyle,
    pub export: ExportConfig,
    pub tooltips_enabled: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            lifecycle: LifecycleConfig::default(),
            layout: LayoutConfig::default(),
            style: DashboardStyle::default(),
            export: ExportConfig::default(),
            tooltips_enabled: true,
        }
    }
}

impl DashboardConfig {
    /// Parses a JSON config document; absent fields keep their defaults.
    pub fn from_json_str(input: &str) -> DashboardResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| DashboardError::Parse(format!("failed to parse dashboard config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DashboardResult<()> {
        self.layout.validate()?;
        self.style.validate()
    }

    #[must_use]
    pub fn with_lifecycle(mut self, lifecycle: LifecycleConfig) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    #[must_use]
    pub fn with_export(mut self, export: ExportConfig) -> Self {
        self.export = export;
        self
    }

    #[must_use]
    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            layout: self.layout.clone(),
            style: self.style,
            tooltips_enabled: self.tooltips_enabled,
        }
    }
}
