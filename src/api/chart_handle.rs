use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::charts::build_chart_frame;
use crate::core::{ChartKind, MetricsSnapshot};
use crate::error::DashboardResult;
use crate::render::{RenderFrame, Renderer};

use super::{ChartOptions, Surface};

/// Identity of one chart instance; never reused within a manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(u64);

impl HandleId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chart#{}", self.0)
    }
}

/// A live chart bound to one drawing surface and one snapshot.
///
/// The handle owns its surface for as long as it lives; `destroy` is the
/// only way to get the surface back.
pub struct ChartHandle<R: Renderer> {
    id: HandleId,
    kind: ChartKind,
    surface: Surface<R>,
    snapshot: Arc<MetricsSnapshot>,
    options: Arc<ChartOptions>,
    last_frame: Option<RenderFrame>,
}

impl<R: Renderer> ChartHandle<R> {
    #[must_use]
    pub fn new(
        id: HandleId,
        kind: ChartKind,
        surface: Surface<R>,
        snapshot: Arc<MetricsSnapshot>,
        options: Arc<ChartOptions>,
    ) -> Self {
        trace!(%id, surface = kind.surface_id(), "chart constructed");
        Self {
            id,
            kind,
            surface,
            snapshot,
            options,
            last_frame: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> HandleId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub fn snapshot(&self) -> &MetricsSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.surface.renderer
    }

    /// Frame produced by the most recent successful draw.
    #[must_use]
    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }

    /// Rebuilds the scene (body then overlay) and renders it.
    pub fn draw(&mut self) -> DashboardResult<&RenderFrame> {
        let frame = build_chart_frame(
            self.kind,
            &self.snapshot,
            self.surface.viewport,
            &self.options.layout,
            &self.options.style,
        )?;
        self.surface.renderer.render(&frame)?;
        Ok(&*self.last_frame.insert(frame))
    }

    /// Destroys the chart and returns its surface to the caller.
    #[must_use = "the surface must be released back to its host"]
    pub fn destroy(self) -> Surface<R> {
        trace!(id = %self.id, surface = self.kind.surface_id(), "chart destroyed");
        self.surface
    }
}

impl<R: Renderer> fmt::Debug for ChartHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartHandle")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("viewport", &self.surface.viewport)
            .field("period", &self.snapshot.reporting_period)
            .field("drawn", &self.last_frame.is_some())
            .finish()
    }
}
