use std::thread;
use std::time::Duration;

use indexmap::IndexMap;
use tracing::trace;

use crate::core::{ChartKind, Viewport};
use crate::render::Renderer;

/// One drawing surface: its renderer plus pixel size.
#[derive(Debug)]
pub struct Surface<R: Renderer> {
    pub renderer: R,
    pub viewport: Viewport,
}

impl<R: Renderer> Surface<R> {
    #[must_use]
    pub fn new(renderer: R, viewport: Viewport) -> Self {
        Self { renderer, viewport }
    }
}

/// The hosting layout that owns the named drawing surfaces.
///
/// A chart borrows a surface through `acquire` and must hand it back through
/// `release` before the surface can be bound again.
pub trait SurfaceHost {
    type Renderer: Renderer;

    /// Takes the surface for `kind`, or `None` when it is not mounted.
    fn acquire(&mut self, kind: ChartKind) -> Option<Surface<Self::Renderer>>;

    fn release(&mut self, kind: ChartKind, surface: Surface<Self::Renderer>);

    /// Gives the layout time to settle before charts are constructed.
    fn await_layout(&mut self, settle: Duration) {
        if !settle.is_zero() {
            thread::sleep(settle);
        }
    }
}

#[derive(Debug)]
enum Slot<R: Renderer> {
    Available(Surface<R>),
    Bound,
}

/// In-memory `SurfaceHost` keyed by chart kind.
#[derive(Debug)]
pub struct MountedSurfaces<R: Renderer> {
    slots: IndexMap<ChartKind, Slot<R>>,
}

impl<R: Renderer> Default for MountedSurfaces<R> {
    fn default() -> Self {
        Self {
            slots: IndexMap::new(),
        }
    }
}

impl<R: Renderer> MountedSurfaces<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts a surface for `kind`, replacing an unbound one.
    ///
    /// Returns `false` when the current surface is bound to a live chart.
    pub fn mount(&mut self, kind: ChartKind, renderer: R, viewport: Viewport) -> bool {
        if matches!(self.slots.get(&kind), Some(Slot::Bound)) {
            return false;
        }
        self.slots
            .insert(kind, Slot::Available(Surface::new(renderer, viewport)));
        true
    }

    /// Removes an unbound surface. Bound surfaces stay until released.
    pub fn unmount(&mut self, kind: ChartKind) -> Option<Surface<R>> {
        match self.slots.get(&kind) {
            Some(Slot::Available(_)) => match self.slots.shift_remove(&kind) {
                Some(Slot::Available(surface)) => Some(surface),
                _ => None,
            },
            _ => None,
        }
    }

    #[must_use]
    pub fn is_mounted(&self, kind: ChartKind) -> bool {
        self.slots.contains_key(&kind)
    }

    #[must_use]
    pub fn is_bound(&self, kind: ChartKind) -> bool {
        matches!(self.slots.get(&kind), Some(Slot::Bound))
    }

    #[must_use]
    pub fn mounted_count(&self) -> usize {
        self.slots.len()
    }

    /// Renderer of an unbound surface.
    #[must_use]
    pub fn renderer(&self, kind: ChartKind) -> Option<&R> {
        match self.slots.get(&kind) {
            Some(Slot::Available(surface)) => Some(&surface.renderer),
            _ => None,
        }
    }
}

impl<R: Renderer> SurfaceHost for MountedSurfaces<R> {
    type Renderer = R;

    fn acquire(&mut self, kind: ChartKind) -> Option<Surface<R>> {
        let slot = self.slots.get_mut(&kind)?;
        match std::mem::replace(slot, Slot::Bound) {
            Slot::Available(surface) => {
                trace!(surface = kind.surface_id(), "surface bound");
                Some(surface)
            }
            Slot::Bound => None,
        }
    }

    fn release(&mut self, kind: ChartKind, surface: Surface<R>) {
        trace!(surface = kind.surface_id(), "surface released");
        self.slots.insert(kind, Slot::Available(surface));
    }
}
