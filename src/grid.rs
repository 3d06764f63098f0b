//! Owned row-major grids over the shared canvas.
//!
//! `OccupancyGrid` marks rasterized foreground cells with 1; `DiscrepancyGrid`
//! carries the directional mismatch magnitude per cell.
use crate::image::ImageView;
use crate::types::CanvasSize;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Grid<T> {
    /// Grid width in cells
    pub w: usize,
    /// Grid height in cells
    pub h: usize,
    /// Backing storage in row-major order (`stride == w`)
    pub data: Vec<T>,
}

pub type OccupancyGrid = Grid<u8>;
pub type DiscrepancyGrid = Grid<u32>;

impl<T: Copy + Default> Grid<T> {
    /// Construct a default-initialized grid of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![T::default(); w * h],
        }
    }

    pub fn with_canvas(canvas: CanvasSize) -> Self {
        Self::new(canvas.width, canvas.height)
    }
}

impl<T: Copy> Grid<T> {
    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    pub fn canvas(&self) -> CanvasSize {
        CanvasSize::new(self.w, self.h)
    }
}

impl OccupancyGrid {
    #[inline]
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.get(x, y) != 0
    }

    pub fn count_set(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}

impl DiscrepancyGrid {
    pub fn max_value(&self) -> u32 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.data.iter().map(|&v| v as u64).sum()
    }
}

impl<T: Copy> ImageView for Grid<T> {
    type Pixel = T;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[T] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}
