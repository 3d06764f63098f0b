//! Structural point correspondence via shape contexts.
//!
//! Overview
//! - Draws samples for both shapes through a [`SampleSelector`], which is
//!   where the discrepancy banks bias the search.
//! - Describes every sample by a log-polar histogram of the other samples.
//! - Solves a single-pass minimum-cost assignment on the χ² cost matrix.
//! - Optionally drops pairs whose cost exceeds a caller-supplied cutoff.
//!
//! Modules
//! - [`descriptor`] – histograms and the χ² cost.
//! - [`assignment`] – Hungarian solver with dummy padding.
pub mod assignment;
pub mod descriptor;

use crate::error::{ComboError, Result};
use crate::sampling::SampleSelector;
use crate::types::{CanvasSize, Point, ShapeRole};
use log::debug;
use serde::{Deserialize, Serialize};

pub use descriptor::{chi2_cost, compute_descriptors, cost_matrix, ShapeContexts};

/// Histogram layout and assignment knobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeContextParams {
    /// Number of log-spaced radial bins.
    pub radial_bins: usize,
    /// Number of uniform angular bins over `[0, 2π)`.
    pub angular_bins: usize,
    /// Inner radius (fraction of the mean pairwise distance).
    pub inner_radius: f64,
    /// Outer radius (fraction of the mean pairwise distance); farther points are ignored.
    pub outer_radius: f64,
    /// Cost of matching a sample to padding when sample counts differ.
    pub dummy_cost: f64,
    /// Count the matcher requests from the selector. `None` defers to the
    /// selector's own default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_count: Option<usize>,
}

impl Default for ShapeContextParams {
    fn default() -> Self {
        Self {
            radial_bins: 5,
            angular_bins: 12,
            inner_radius: 0.125,
            outer_radius: 2.0,
            dummy_cost: 0.25,
            sample_count: None,
        }
    }
}

impl ShapeContextParams {
    /// Rejects layouts that would yield meaningless histograms.
    pub fn validate(&self) -> Result<()> {
        let bad = |msg: String| Err(ComboError::Config(msg));
        if self.radial_bins == 0 || self.angular_bins == 0 {
            return bad(format!(
                "shape_context bins must be positive (radial {}, angular {})",
                self.radial_bins, self.angular_bins
            ));
        }
        if !(self.inner_radius.is_finite() && self.inner_radius > 0.0) {
            return bad(format!(
                "shape_context.inner_radius must be positive, got {}",
                self.inner_radius
            ));
        }
        if !(self.outer_radius.is_finite() && self.outer_radius > self.inner_radius) {
            return bad(format!(
                "shape_context.outer_radius {} must exceed inner_radius {}",
                self.outer_radius, self.inner_radius
            ));
        }
        if !(self.dummy_cost.is_finite() && self.dummy_cost >= 0.0) {
            return bad(format!(
                "shape_context.dummy_cost must be non-negative, got {}",
                self.dummy_cost
            ));
        }
        Ok(())
    }
}

/// Index-correlated sample pairs: `source_samples[i]` ↔ `target_samples[i]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Correspondence {
    pub source_samples: Vec<Point>,
    pub target_samples: Vec<Point>,
    /// χ² cost of each retained pair.
    pub costs: Vec<f64>,
    /// Assigned pairs removed by the cutoff.
    pub rejected: usize,
}

impl Correspondence {
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    pub fn mean_cost(&self) -> Option<f64> {
        (!self.costs.is_empty()).then(|| self.costs.iter().sum::<f64>() / self.costs.len() as f64)
    }
}

pub trait CorrespondenceMatcher {
    /// Sample both shapes through `selector` and pair the samples.
    ///
    /// `cutoff`, when set, discards pairs whose structural distance exceeds it.
    fn match_shapes(
        &self,
        source: &[Point],
        target: &[Point],
        canvas: CanvasSize,
        selector: &mut dyn SampleSelector,
        cutoff: Option<f64>,
    ) -> Result<Correspondence>;
}

/// Shape-context matcher with a standard (non-iterative) alignment pass.
#[derive(Clone, Debug, Default)]
pub struct ShapeContextMatcher {
    pub params: ShapeContextParams,
}

impl ShapeContextMatcher {
    pub fn new(params: ShapeContextParams) -> Self {
        Self { params }
    }

    fn draw(
        &self,
        selector: &mut dyn SampleSelector,
        role: ShapeRole,
        full: &[Point],
    ) -> Result<Vec<Point>> {
        let samples = selector.select(role, full, self.params.sample_count)?;
        if samples.is_empty() {
            return Err(ComboError::InsufficientSamples {
                role,
                pool_len: full.len(),
            });
        }
        Ok(samples)
    }
}

impl CorrespondenceMatcher for ShapeContextMatcher {
    fn match_shapes(
        &self,
        source: &[Point],
        target: &[Point],
        canvas: CanvasSize,
        selector: &mut dyn SampleSelector,
        cutoff: Option<f64>,
    ) -> Result<Correspondence> {
        let src = self.draw(selector, ShapeRole::Source, source)?;
        let tgt = self.draw(selector, ShapeRole::Target, target)?;

        let scale = canvas.diagonal();
        let src_sc = compute_descriptors(&src, &self.params, scale);
        let tgt_sc = compute_descriptors(&tgt, &self.params, scale);
        let cost = cost_matrix(&src_sc, &tgt_sc);
        let assignment = assignment::solve(&cost, self.params.dummy_cost);

        let mut out = Correspondence::default();
        for (i, j) in assignment.iter().enumerate() {
            let Some(j) = *j else { continue };
            let c = cost[(i, j)];
            if cutoff.is_some_and(|t| c > t) {
                out.rejected += 1;
                continue;
            }
            out.source_samples.push(src[i]);
            out.target_samples.push(tgt[j]);
            out.costs.push(c);
        }
        debug!(
            "ShapeContextMatcher: samples src={} tgt={} pairs={} rejected={} mean_cost={:.4}",
            src.len(),
            tgt.len(),
            out.len(),
            out.rejected,
            out.mean_cost().unwrap_or(0.0)
        );
        Ok(out)
    }
}
