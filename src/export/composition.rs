use crate::core::Viewport;

/// Placement of one chart frame on the export canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub x: f64,
    pub y: f64,
    pub viewport: Viewport,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileLayout {
    pub tiles: Vec<Tile>,
    pub width: u32,
    pub height: u32,
}

/// Stacks frames top to bottom, `gap_px` apart and around the edges.
#[must_use]
pub fn compose_tiles(viewports: &[Viewport], gap_px: u32) -> TileLayout {
    let mut tiles = Vec::with_capacity(viewports.len());
    let mut y = gap_px;
    let mut width = 0;
    for viewport in viewports {
        tiles.push(Tile {
            x: f64::from(gap_px),
            y: f64::from(y),
            viewport: *viewport,
        });
        y = y.saturating_add(viewport.height).saturating_add(gap_px);
        width = width.max(viewport.width);
    }
    TileLayout {
        tiles,
        width: width.saturating_add(gap_px.saturating_mul(2)),
        height: y,
    }
}

#[cfg(test)]
mod tests {
    use super::compose_tiles;
    use crate::core::Viewport;

    #[test]
    fn tiles_stack_vertically_with_gaps() {
        let layout = compose_tiles(&[Viewport::new(300, 200), Viewport::new(400, 50)], 10);
        assert_eq!(layout.tiles[0].y, 10.0);
        assert_eq!(layout.tiles[1].y, 220.0);
        assert_eq!(layout.width, 420);
        assert_eq!(layout.height, 280);
    }

    #[test]
    fn empty_input_is_only_margins() {
        let layout = compose_tiles(&[], 8);
        assert!(layout.tiles.is_empty());
        assert_eq!((layout.width, layout.height), (16, 8));
    }
}
