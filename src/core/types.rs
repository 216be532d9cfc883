use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

/// Pixel size of one drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn ensure_valid(self) -> DashboardResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(DashboardError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Pixel coordinate, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

/// Region of a surface where a chart body is drawn.
///
/// Label overlays may extend outside of it (into the padding).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DrawArea {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Insets the full viewport by `padding`, clamping the extent at zero.
    #[must_use]
    pub fn from_viewport(viewport: Viewport, padding: Padding) -> Self {
        let width = (f64::from(viewport.width) - padding.left - padding.right).max(0.0);
        let height = (f64::from(viewport.height) - padding.top - padding.bottom).max(0.0);
        Self::new(padding.left, padding.top, width, height)
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn center(self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawArea, Padding, Viewport};

    #[test]
    fn draw_area_insets_viewport() {
        let area = DrawArea::from_viewport(Viewport::new(300, 200), Padding::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(area, DrawArea::new(40.0, 10.0, 240.0, 160.0));
        assert_eq!(area.right(), 280.0);
        assert_eq!(area.bottom(), 170.0);
    }

    #[test]
    fn oversized_padding_collapses_to_empty_area() {
        let area = DrawArea::from_viewport(Viewport::new(20, 20), Padding::uniform(15.0));
        assert_eq!(area.width, 0.0);
        assert_eq!(area.height, 0.0);
    }
}
