//! Dashboard export: capture the rendered charts and save them as a PNG.

mod capture;
mod composition;
mod filename;

pub use capture::{CaptureMethod, ExportConfig, ExportOutcome, Exporter, UnavailableCapture};
pub use composition::{Tile, TileLayout, compose_tiles};
pub use filename::{EXPORT_FILE_PREFIX, export_filename};

#[cfg(feature = "cairo-backend")]
mod cairo_capture;
#[cfg(feature = "cairo-backend")]
pub use cairo_capture::CairoCapture;
