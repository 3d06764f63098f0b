use serde::{Deserialize, Serialize};

/// Integer point in image/grid coordinates (`x` = column, `y` = row).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Which of the two shapes a point array belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeRole {
    Source,
    Target,
}

impl std::fmt::Display for ShapeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeRole::Source => f.write_str("source"),
            ShapeRole::Target => f.write_str("target"),
        }
    }
}

/// Shared working extent for both shapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: usize,
    pub height: usize,
}

impl CanvasSize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Elementwise maximum of two sizes.
    pub fn union(self, other: CanvasSize) -> CanvasSize {
        CanvasSize {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    /// First point of `points` lying outside the canvas, if any.
    pub fn first_outside(&self, points: &[Point]) -> Option<Point> {
        points.iter().copied().find(|&p| !self.contains(p))
    }

    pub fn diagonal(&self) -> f64 {
        (self.width as f64).hypot(self.height as f64)
    }
}

/// Artifact handed to downstream warping/registration consumers.
///
/// `source_samples[i]` corresponds to `target_samples[i]`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrespondenceResult {
    pub source_points: Vec<Point>,
    pub target_points: Vec<Point>,
    pub canvas: CanvasSize,
    pub source_samples: Vec<Point>,
    pub target_samples: Vec<Point>,
}

impl CorrespondenceResult {
    pub fn pair_count(&self) -> usize {
        self.source_samples.len().min(self.target_samples.len())
    }

    pub fn pairs(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.source_samples
            .iter()
            .copied()
            .zip(self.target_samples.iter().copied())
    }
}
