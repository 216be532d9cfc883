use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{ChartKind, MetricsSnapshot};
use crate::error::{DashboardError, DashboardResult};
use crate::render::{RenderFrame, Renderer};

use super::{ChartHandle, ChartOptions, HandleId, SurfaceHost};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    Empty,
    Rendering,
    Live,
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Delay between teardown and construction so the host layout can settle.
    pub settle_delay_ms: u64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 100,
        }
    }
}

impl LifecycleConfig {
    #[must_use]
    pub fn with_settle_delay_ms(mut self, settle_delay_ms: u64) -> Self {
        self.settle_delay_ms = settle_delay_ms;
        self
    }

    #[must_use]
    pub fn settle_delay(self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// Owns every live chart of the dashboard.
///
/// Old handles are always destroyed and their surfaces released before new
/// ones are built, so a surface is never bound to two charts.
#[derive(Debug)]
pub struct ChartLifecycleManager<R: Renderer> {
    state: LifecycleState,
    handles: IndexMap<ChartKind, ChartHandle<R>>,
    next_handle_id: u64,
    config: LifecycleConfig,
}

impl<R: Renderer> ChartLifecycleManager<R> {
    #[must_use]
    pub fn new(config: LifecycleConfig) -> Self {
        Self {
            state: LifecycleState::Empty,
            handles: IndexMap::new(),
            next_handle_id: 1,
            config,
        }
    }

    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn handle(&self, kind: ChartKind) -> Option<&ChartHandle<R>> {
        self.handles.get(&kind)
    }

    pub fn handles(&self) -> impl Iterator<Item = &ChartHandle<R>> {
        self.handles.values()
    }

    #[must_use]
    pub fn handle_ids(&self) -> Vec<HandleId> {
        self.handles.values().map(ChartHandle::id).collect()
    }

    /// Last rendered frame of every live chart, in construction order.
    #[must_use]
    pub fn rendered_frames(&self) -> Vec<&RenderFrame> {
        self.handles
            .values()
            .filter_map(ChartHandle::last_frame)
            .collect()
    }

    /// Replaces every chart with new ones bound to `snapshot`.
    ///
    /// Surfaces the host cannot provide are skipped, as are charts whose first
    /// draw fails. Returns the number of live charts.
    pub fn refresh<H>(
        &mut self,
        host: &mut H,
        snapshot: Arc<MetricsSnapshot>,
        options: Arc<ChartOptions>,
    ) -> DashboardResult<usize>
    where
        H: SurfaceHost<Renderer = R>,
    {
        if self.state == LifecycleState::Destroyed {
            return Err(DashboardError::LifecycleClosed);
        }

        self.release_all(host);
        self.state = LifecycleState::Rendering;
        host.await_layout(self.config.settle_delay());

        for kind in ChartKind::ALL {
            let Some(surface) = host.acquire(kind) else {
                debug!(surface = kind.surface_id(), "drawing surface not mounted, skipping chart");
                continue;
            };
            let id = HandleId::new(self.next_handle_id);
            self.next_handle_id += 1;

            let mut handle = ChartHandle::new(
                id,
                kind,
                surface,
                Arc::clone(&snapshot),
                Arc::clone(&options),
            );
            match handle.draw().map(|_| ()) {
                Ok(()) => {
                    self.handles.insert(kind, handle);
                }
                Err(err) => {
                    warn!(
                        surface = kind.surface_id(),
                        error = %err,
                        "chart draw failed, skipping chart"
                    );
                    host.release(kind, handle.destroy());
                }
            }
        }

        self.state = LifecycleState::Live;
        debug!(
            period = %snapshot.reporting_period,
            live = self.handles.len(),
            "charts rebuilt"
        );
        Ok(self.handles.len())
    }

    /// Redraws every live chart against its current snapshot.
    ///
    /// A chart whose draw fails keeps its handle and previous frame; the
    /// remaining charts are still drawn. Returns the number of failed draws.
    pub fn redraw_all(&mut self) -> usize {
        let mut failed = 0;
        for (kind, handle) in &mut self.handles {
            if let Err(err) = handle.draw() {
                warn!(
                    surface = kind.surface_id(),
                    error = %err,
                    "chart redraw failed, keeping previous frame"
                );
                failed += 1;
            }
        }
        failed
    }

    /// Destroys every chart unconditionally; further refreshes are rejected.
    pub fn teardown<H>(&mut self, host: &mut H)
    where
        H: SurfaceHost<Renderer = R>,
    {
        if self.state == LifecycleState::Destroyed {
            return;
        }
        self.release_all(host);
        self.state = LifecycleState::Destroyed;
        debug!("chart lifecycle torn down");
    }

    fn release_all<H>(&mut self, host: &mut H)
    where
        H: SurfaceHost<Renderer = R>,
    {
        let destroyed = self.handles.len();
        for (kind, handle) in self.handles.drain(..) {
            host.release(kind, handle.destroy());
        }
        if self.state != LifecycleState::Destroyed {
            self.state = LifecycleState::Empty;
        }
        if destroyed > 0 {
            debug!(destroyed, "released live charts");
        }
    }
}

impl<R: Renderer> Default for ChartLifecycleManager<R> {
    fn default() -> Self {
        Self::new(LifecycleConfig::default())
    }
}
