//! Global pre-alignment of the target cloud onto the source cloud.
//!
//! The pipeline only relies on the [`Aligner`] contract: given two 2×N point
//! matrices, return a new matrix holding the transformed target. The source
//! is never modified. [`PcaAligner`] is the stock implementation.
mod pca;

pub use pca::{PcaAligner, PrincipalFrame};

use crate::error::Result;
use nalgebra::DMatrix;

pub trait Aligner {
    /// Transform `target` so that it best superimposes onto `source`.
    ///
    /// Fails with [`ComboError::DegenerateGeometry`](crate::ComboError) when
    /// either cloud has no well-defined principal axes.
    fn align(&self, source: &DMatrix<f64>, target: &DMatrix<f64>) -> Result<DMatrix<f64>>;
}
