//! Principal-axis alignment.
//!
//! Each cloud is reduced to its centroid, its two principal axes (eigenvectors
//! of the 2×2 covariance, strongest first) and the variances along them. The
//! target is then mapped into the source frame:
//!
//! `t' = R_s · diag(sqrt(λ_s / λ_t)) · R_tᵀ · (t − μ_t) + μ_s`
//!
//! Eigenvectors are only defined up to sign, so each axis is oriented towards
//! the heavier tail of the distribution (positive third moment). Symmetric
//! clouds fall back to a canonical sign so equal inputs give equal frames.
use super::Aligner;
use crate::error::{ComboError, Result};
use crate::types::ShapeRole;
use log::debug;
use nalgebra::{DMatrix, Matrix2, SymmetricEigen, Vector2};

/// Relative variance below which the minor axis is considered collapsed.
const COLLINEAR_RATIO: f64 = 1e-9;
/// Relative third moment below which an axis is treated as symmetric.
const SKEW_EPS: f64 = 1e-9;

/// Centroid, principal axes (matrix columns) and per-axis variances.
#[derive(Clone, Debug, PartialEq)]
pub struct PrincipalFrame {
    pub mean: Vector2<f64>,
    pub axes: Matrix2<f64>,
    pub variances: Vector2<f64>,
}

impl PrincipalFrame {
    pub fn from_matrix(m: &DMatrix<f64>, role: ShapeRole) -> Result<Self> {
        let degenerate = |reason: String| ComboError::DegenerateGeometry { role, reason };
        let n = m.ncols();
        if n < 2 {
            return Err(degenerate(format!("{n} point(s), need at least 2")));
        }
        let first = m.column(0);
        if m.column_iter().all(|c| c == first) {
            return Err(degenerate("all points coincide".to_string()));
        }

        let mean = Vector2::new(m.row(0).mean(), m.row(1).mean());
        let mut cov = Matrix2::zeros();
        for c in m.column_iter() {
            let d = Vector2::new(c[0], c[1]) - mean;
            cov += d * d.transpose();
        }
        cov /= n as f64;

        let eig = SymmetricEigen::new(cov);
        let (major, minor) = if eig.eigenvalues[0] >= eig.eigenvalues[1] {
            (0, 1)
        } else {
            (1, 0)
        };
        let l1 = eig.eigenvalues[major];
        let l2 = eig.eigenvalues[minor];
        if l2 <= l1 * COLLINEAR_RATIO {
            return Err(degenerate(format!(
                "collinear points (variances {l1:.3e}, {l2:.3e})"
            )));
        }

        let mut axes = Matrix2::from_columns(&[
            eig.eigenvectors.column(major).into_owned(),
            eig.eigenvectors.column(minor).into_owned(),
        ]);
        for (k, var) in [l1, l2].into_iter().enumerate() {
            let axis: Vector2<f64> = axes.column(k).into_owned();
            let flip = match third_moment(m, &mean, &axis) {
                s if s.abs() > SKEW_EPS * n as f64 * var.powf(1.5) => s < 0.0,
                _ => canonical_sign(&axis) < 0.0,
            };
            if flip {
                axes.set_column(k, &(-axis));
            }
        }

        Ok(Self {
            mean,
            axes,
            variances: Vector2::new(l1, l2),
        })
    }

    /// Orientation of the major axis in radians.
    pub fn angle(&self) -> f64 {
        self.axes[(1, 0)].atan2(self.axes[(0, 0)])
    }
}

fn third_moment(m: &DMatrix<f64>, mean: &Vector2<f64>, axis: &Vector2<f64>) -> f64 {
    m.column_iter()
        .map(|c| {
            let proj = (Vector2::new(c[0], c[1]) - mean).dot(axis);
            proj * proj * proj
        })
        .sum()
}

/// Sign of the largest-magnitude component.
fn canonical_sign(axis: &Vector2<f64>) -> f64 {
    if axis.x.abs() >= axis.y.abs() {
        axis.x.signum()
    } else {
        axis.y.signum()
    }
}

/// Aligns clouds by matching centroids, principal axes and per-axis spread.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcaAligner;

impl PcaAligner {
    /// Linear part mapping centred target coordinates into the source frame.
    pub fn transform(source: &PrincipalFrame, target: &PrincipalFrame) -> Matrix2<f64> {
        let scale = Matrix2::from_diagonal(&Vector2::new(
            (source.variances.x / target.variances.x).sqrt(),
            (source.variances.y / target.variances.y).sqrt(),
        ));
        source.axes * scale * target.axes.transpose()
    }
}

impl Aligner for PcaAligner {
    fn align(&self, source: &DMatrix<f64>, target: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        let src = PrincipalFrame::from_matrix(source, ShapeRole::Source)?;
        let tgt = PrincipalFrame::from_matrix(target, ShapeRole::Target)?;
        let linear = Self::transform(&src, &tgt);
        debug!(
            "PcaAligner: rotation {:.2} deg, scale [{:.3}, {:.3}]",
            (src.angle() - tgt.angle()).to_degrees(),
            (src.variances.x / tgt.variances.x).sqrt(),
            (src.variances.y / tgt.variances.y).sqrt()
        );

        let mut out = target.clone();
        for mut col in out.column_iter_mut() {
            let p = linear * (Vector2::new(col[0], col[1]) - tgt.mean) + src.mean;
            col[0] = p.x;
            col[1] = p.y;
        }
        Ok(out)
    }
}
