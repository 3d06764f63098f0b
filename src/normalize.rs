//! Point list ↔ dense matrix conversion and the shared coordinate frame.
//!
//! Point sets travel through the alignment stage as 2×N matrices (row 0 = x,
//! row 1 = y). Before and after alignment both matrices are translated by the
//! same offset so that every coordinate is non-negative; the post-shift maxima
//! then size the common canvas.
use crate::error::{ComboError, Result};
use crate::types::{CanvasSize, Point, ShapeRole};
use nalgebra::{DMatrix, Matrix2};
use serde::Serialize;

/// Margin (cells) added to the post-shift maxima when sizing the canvas.
pub const CANVAS_MARGIN: f64 = 2.0;

const X: usize = 0;
const Y: usize = 1;

pub fn points_to_matrix(points: &[Point]) -> DMatrix<f64> {
    DMatrix::from_fn(2, points.len(), |r, c| {
        let p = points[c];
        if r == X {
            p.x as f64
        } else {
            p.y as f64
        }
    })
}

/// Inverse of [`points_to_matrix`]; coordinates are rounded to the nearest integer.
pub fn matrix_to_points(m: &DMatrix<f64>) -> Vec<Point> {
    debug_assert_eq!(m.nrows(), 2, "point matrices are 2xN");
    m.column_iter()
        .map(|c| Point::new(c[X].round() as i32, c[Y].round() as i32))
        .collect()
}

/// Per-axis bounds of a point cloud.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Extrema {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Extrema {
    /// Bounds over the union of both matrices. `None` when both are empty.
    pub fn of_pair(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Option<Self> {
        let mut min = [f64::INFINITY; 2];
        let mut max = [f64::NEG_INFINITY; 2];
        for col in a.column_iter().chain(b.column_iter()) {
            for axis in [X, Y] {
                min[axis] = min[axis].min(col[axis]);
                max[axis] = max[axis].max(col[axis]);
            }
        }
        min[X].is_finite().then_some(Self { min, max })
    }

    /// 2×2 matrix form: row = axis, column 0 = min, column 1 = max.
    pub fn to_matrix(&self) -> Matrix2<f64> {
        Matrix2::new(self.min[X], self.max[X], self.min[Y], self.max[Y])
    }
}

/// Translates `a` and `b` by the same per-axis offset so the combined cloud
/// has no negative coordinate, and returns the post-shift extrema.
///
/// Axes that are already non-negative are left untouched. Two empty matrices
/// yield all-zero extrema.
pub fn shift_to_positives(a: &mut DMatrix<f64>, b: &mut DMatrix<f64>) -> Extrema {
    let Some(before) = Extrema::of_pair(a, b) else {
        return Extrema {
            min: [0.0; 2],
            max: [0.0; 2],
        };
    };
    let offset = [(-before.min[X]).max(0.0), (-before.min[Y]).max(0.0)];
    for m in [&mut *a, &mut *b] {
        for axis in [X, Y] {
            if offset[axis] > 0.0 {
                m.row_mut(axis).add_scalar_mut(offset[axis]);
            }
        }
    }
    Extrema {
        min: [before.min[X] + offset[X], before.min[Y] + offset[Y]],
        max: [before.max[X] + offset[X], before.max[Y] + offset[Y]],
    }
}

/// Canvas large enough for the original images and the shifted geometry.
pub fn canvas_for(extrema: &Extrema, starting: CanvasSize) -> CanvasSize {
    let width = (extrema.max[X] + CANVAS_MARGIN).ceil().max(0.0) as usize;
    let height = (extrema.max[Y] + CANVAS_MARGIN).ceil().max(0.0) as usize;
    CanvasSize::new(width, height).union(starting)
}

/// Fails with [`ComboError::CanvasSizing`] when a point lies outside `canvas`.
pub fn ensure_contains(canvas: CanvasSize, role: ShapeRole, points: &[Point]) -> Result<()> {
    match canvas.first_outside(points) {
        Some(point) => Err(ComboError::CanvasSizing {
            role,
            canvas,
            point,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_round_trip_preserves_points() {
        let pts = vec![
            Point::new(0, 0),
            Point::new(-3, 7),
            Point::new(12, -5),
            Point::new(12, -5),
        ];
        let m = points_to_matrix(&pts);
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.ncols(), 4);
        assert_eq!(m[(0, 1)], -3.0);
        assert_eq!(m[(1, 1)], 7.0);
        assert_eq!(matrix_to_points(&m), pts);
    }

    #[test]
    fn matrix_to_points_rounds_to_nearest() {
        let m = DMatrix::from_row_slice(2, 2, &[1.49, 2.51, -0.4, 3.0]);
        assert_eq!(
            matrix_to_points(&m),
            vec![Point::new(1, 0), Point::new(3, 3)]
        );
    }

    #[test]
    fn shift_applies_common_offset_to_both() {
        let mut a = DMatrix::from_row_slice(2, 2, &[-4.0, 1.0, 2.0, 3.0]);
        let mut b = DMatrix::from_row_slice(2, 1, &[5.0, -1.5]);
        let ext = shift_to_positives(&mut a, &mut b);
        assert_eq!(a, DMatrix::from_row_slice(2, 2, &[0.0, 5.0, 3.5, 4.5]));
        assert_eq!(b, DMatrix::from_row_slice(2, 1, &[9.0, 0.0]));
        assert_eq!(ext.min, [0.0, 0.0]);
        assert_eq!(ext.max, [9.0, 4.5]);
        let m = ext.to_matrix();
        assert_eq!(m[(0, 1)], 9.0);
        assert_eq!(m[(1, 1)], 4.5);
    }

    #[test]
    fn shift_leaves_positive_clouds_in_place() {
        let mut a = DMatrix::from_row_slice(2, 1, &[3.0, 4.0]);
        let mut b = DMatrix::from_row_slice(2, 1, &[1.0, 8.0]);
        let ext = shift_to_positives(&mut a, &mut b);
        assert_eq!(a[(0, 0)], 3.0);
        assert_eq!(b[(1, 0)], 8.0);
        assert_eq!(ext.min, [1.0, 4.0]);
    }

    #[test]
    fn canvas_dominates_images_and_extrema() {
        let ext = Extrema {
            min: [0.0, 0.0],
            max: [40.2, 10.0],
        };
        let canvas = canvas_for(&ext, CanvasSize::new(20, 30));
        assert_eq!(canvas, CanvasSize::new(43, 30));
    }

    #[test]
    fn ensure_contains_reports_offending_point() {
        let err = ensure_contains(
            CanvasSize::new(5, 5),
            ShapeRole::Target,
            &[Point::new(1, 1), Point::new(1, 5)],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ComboError::CanvasSizing {
                role: ShapeRole::Target,
                point: Point { x: 1, y: 5 },
                ..
            }
        ));
    }
}
