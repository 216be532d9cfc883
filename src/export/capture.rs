use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{DashboardError, DashboardResult};
use crate::render::RenderFrame;

use super::export_filename;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    /// Device scale of the primary capture.
    pub primary_scale: f64,
    /// Device scale of the lower-fidelity fallback capture.
    pub fallback_scale: f64,
    pub tile_gap_px: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            primary_scale: 2.0,
            fallback_scale: 1.0,
            tile_gap_px: 16,
        }
    }
}

impl ExportConfig {
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }
}

/// Rasterizes already rendered chart frames into one encoded image.
pub trait CaptureMethod {
    fn name(&self) -> &str;
    fn capture(&mut self, frames: &[&RenderFrame]) -> DashboardResult<Vec<u8>>;
}

/// Capture method used when no raster backend is compiled in.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableCapture;

impl CaptureMethod for UnavailableCapture {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn capture(&mut self, _frames: &[&RenderFrame]) -> DashboardResult<Vec<u8>> {
        Err(DashboardError::Capture(
            "no raster backend available (enable `cairo-backend`)".to_owned(),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved { path: PathBuf, method: String },
    /// Terminal state: the user is told the export did not happen.
    Notified { message: String },
}

impl ExportOutcome {
    #[must_use]
    pub fn saved_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Saved { path, .. } => Some(path),
            Self::Notified { .. } => None,
        }
    }
}

/// Primary capture, then fallback capture, then a user notification.
pub struct Exporter {
    primary: Box<dyn CaptureMethod>,
    fallback: Box<dyn CaptureMethod>,
    config: ExportConfig,
}

impl Exporter {
    #[must_use]
    pub fn new(
        primary: Box<dyn CaptureMethod>,
        fallback: Box<dyn CaptureMethod>,
        config: ExportConfig,
    ) -> Self {
        Self {
            primary,
            fallback,
            config,
        }
    }

    /// Cairo captures at the configured scales when available.
    #[must_use]
    pub fn from_config(config: ExportConfig) -> Self {
        #[cfg(feature = "cairo-backend")]
        {
            let primary = super::CairoCapture::new(config.primary_scale, config.tile_gap_px);
            let fallback = super::CairoCapture::new(config.fallback_scale, config.tile_gap_px);
            return Self::new(Box::new(primary), Box::new(fallback), config);
        }

        #[cfg(not(feature = "cairo-backend"))]
        {
            Self::new(
                Box::new(UnavailableCapture),
                Box::new(UnavailableCapture),
                config,
            )
        }
    }

    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Never fails: every failure ends in `ExportOutcome::Notified`.
    pub fn export(&mut self, frames: &[&RenderFrame], at: DateTime<Utc>) -> ExportOutcome {
        if frames.is_empty() {
            return ExportOutcome::Notified {
                message: "Nothing to export yet: no charts are rendered.".to_owned(),
            };
        }

        let captured = match self.primary.capture(frames) {
            Ok(bytes) => Ok((self.primary.name().to_owned(), bytes)),
            Err(primary_err) => {
                warn!(
                    method = self.primary.name(),
                    error = %primary_err,
                    "primary capture failed, trying fallback"
                );
                self.fallback
                    .capture(frames)
                    .map(|bytes| (self.fallback.name().to_owned(), bytes))
            }
        };

        let (method, bytes) = match captured {
            Ok(captured) => captured,
            Err(err) => {
                warn!(error = %err, "dashboard capture failed");
                return ExportOutcome::Notified {
                    message: format!("Export failed: {err}"),
                };
            }
        };

        let path = self.config.output_dir.join(export_filename(at));
        match fs::write(&path, &bytes) {
            Ok(()) => {
                debug!(path = %path.display(), %method, bytes = bytes.len(), "dashboard exported");
                ExportOutcome::Saved { path, method }
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to save export");
                ExportOutcome::Notified {
                    message: format!("Export failed: could not save `{}`: {err}", path.display()),
                }
            }
        }
    }
}
