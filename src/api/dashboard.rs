use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::{MetricsSnapshot, ReportingPeriod};
use crate::data::{DataProvider, MetricsSource};
use crate::error::DashboardResult;
use crate::export::{ExportOutcome, Exporter};
use crate::render::RenderFrame;

use super::{ChartLifecycleManager, ChartOptions, DashboardConfig, LifecycleState, SurfaceHost};

/// The single-page dashboard: period selector, five charts and export.
pub struct Dashboard<S: MetricsSource, H: SurfaceHost> {
    provider: DataProvider<S>,
    host: H,
    charts: ChartLifecycleManager<H::Renderer>,
    options: Arc<ChartOptions>,
    snapshot: Option<Arc<MetricsSnapshot>>,
}

impl<S: MetricsSource, H: SurfaceHost> Dashboard<S, H> {
    pub fn new(provider: DataProvider<S>, host: H, config: &DashboardConfig) -> DashboardResult<Self> {
        config.validate()?;
        Ok(Self {
            provider,
            host,
            charts: ChartLifecycleManager::new(config.lifecycle),
            options: Arc::new(config.chart_options()),
            snapshot: None,
        })
    }

    /// Resolves `period` and rebuilds every chart from the new snapshot.
    ///
    /// Data failures never surface here; only a torn-down dashboard errors.
    pub fn select_period(&mut self, period: ReportingPeriod) -> DashboardResult<Arc<MetricsSnapshot>> {
        let snapshot = Arc::new(self.provider.resolve(period));
        let live = self
            .charts
            .refresh(&mut self.host, Arc::clone(&snapshot), Arc::clone(&self.options))?;
        debug!(period = %period, live, "period selected");
        self.snapshot = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    #[must_use]
    pub fn current_snapshot(&self) -> Option<&MetricsSnapshot> {
        self.snapshot.as_deref()
    }

    #[must_use]
    pub fn live_chart_count(&self) -> usize {
        self.charts.live_count()
    }

    #[must_use]
    pub fn charts(&self) -> &ChartLifecycleManager<H::Renderer> {
        &self.charts
    }

    #[must_use]
    pub fn tooltips_enabled(&self) -> bool {
        self.options.tooltips_enabled
    }

    /// Toggles tooltips; charts are rebuilt with the new options.
    ///
    /// The flag is host state only: tooltips are drawn by the host, so the
    /// rebuilt frames are identical.
    pub fn set_tooltips_enabled(&mut self, enabled: bool) -> DashboardResult<()> {
        if self.options.tooltips_enabled == enabled {
            return Ok(());
        }
        let mut options = (*self.options).clone();
        options.tooltips_enabled = enabled;
        self.options = Arc::new(options);

        if let Some(snapshot) = &self.snapshot {
            self.charts
                .refresh(&mut self.host, Arc::clone(snapshot), Arc::clone(&self.options))?;
        }
        Ok(())
    }

    /// Repaints every live chart from its current snapshot without refetching,
    /// e.g. after the host lost its surface contents.
    ///
    /// Returns the number of charts that failed to draw.
    pub fn redraw(&mut self) -> usize {
        self.charts.redraw_all()
    }

    #[must_use]
    pub fn rendered_frames(&self) -> Vec<&RenderFrame> {
        self.charts.rendered_frames()
    }

    /// Captures the charts as currently rendered.
    pub fn export(&self, exporter: &mut Exporter, at: DateTime<Utc>) -> ExportOutcome {
        exporter.export(&self.rendered_frames(), at)
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Host access for mounting or unmounting surfaces between refreshes.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Destroys every chart; the dashboard cannot be refreshed afterwards.
    pub fn shutdown(&mut self) {
        self.charts.teardown(&mut self.host);
        self.snapshot = None;
    }

    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.charts.state() == LifecycleState::Destroyed
    }
}

impl<S: MetricsSource, H: SurfaceHost> Drop for Dashboard<S, H> {
    fn drop(&mut self) {
        self.charts.teardown(&mut self.host);
    }
}
