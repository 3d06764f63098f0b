//! Discrepancy-weighted sample banks.
//!
//! A bank is a multiset of points in which a cell with discrepancy `v`
//! appears `v - NOISE_FLOOR` times, so a uniform draw from the bank favours
//! cells where the shapes disagree most. Cells at or below the floor are
//! treated as agreement and contribute nothing.
use crate::grid::DiscrepancyGrid;
use crate::image::ImageView;
use crate::types::Point;
use serde::Serialize;

/// Discrepancy values `<= NOISE_FLOOR` are ignored.
pub const NOISE_FLOOR: u32 = 2;

/// Immutable weighted point multiset built from one discrepancy grid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SampleBank {
    points: Vec<Point>,
}

impl SampleBank {
    /// Row-major expansion of `grid`: `v - 2` copies of `Point(col, row)`
    /// for every cell with `v > 2`.
    pub fn from_discrepancy(grid: &DiscrepancyGrid) -> Self {
        let capacity: usize = grid
            .data
            .iter()
            .map(|&v| v.saturating_sub(NOISE_FLOOR) as usize)
            .sum();
        let mut points = Vec::with_capacity(capacity);
        grid.for_each_pixel(|row, col, v| {
            let copies = v.saturating_sub(NOISE_FLOOR) as usize;
            let p = Point::new(col as i32, row as i32);
            points.extend(std::iter::repeat(p).take(copies));
        });
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
