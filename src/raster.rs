use crate::grid::OccupancyGrid;
use crate::types::{CanvasSize, Point};

/// Binary occupancy grid of `canvas` with every listed point set to 1.
///
/// # Panics
/// A point outside `[0, width) × [0, height)` is a contract violation: the
/// canvas is sized to contain both shapes before this is called.
pub fn rasterize(points: &[Point], canvas: CanvasSize) -> OccupancyGrid {
    let mut grid = OccupancyGrid::with_canvas(canvas);
    for &p in points {
        assert!(
            canvas.contains(p),
            "point ({}, {}) outside {}x{} canvas",
            p.x,
            p.y,
            canvas.width,
            canvas.height
        );
        grid.set(p.x as usize, p.y as usize, 1);
    }
    grid
}
