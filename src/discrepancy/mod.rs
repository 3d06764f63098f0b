//! Directional disagreement between two rasterized shapes.
//!
//! A [`DiscrepancyMeasure`] scores, per cell, how badly the foreground of one
//! grid is explained by the other. The measure is directional: the pipeline
//! evaluates it once as "1-on-2" (`from = source`, `onto = target`) and once
//! as "2-on-1", and keeps the two grids apart.
mod edt;

pub use edt::{squared_distance_transform, HausdorffDiscrepancy};

use crate::grid::{DiscrepancyGrid, OccupancyGrid};

pub trait DiscrepancyMeasure {
    /// Mismatch of `from`'s foreground against `onto`. Both grids share a size.
    fn compute(&self, from: &OccupancyGrid, onto: &OccupancyGrid) -> DiscrepancyGrid;
}

/// The two directional grids produced by the discrepancy stage.
#[derive(Clone, Debug)]
pub struct DiscrepancyPair {
    /// Source foreground measured against the target ("1-on-2").
    pub source_on_target: DiscrepancyGrid,
    /// Target foreground measured against the source ("2-on-1").
    pub target_on_source: DiscrepancyGrid,
}

impl DiscrepancyPair {
    pub fn compute(
        measure: &dyn DiscrepancyMeasure,
        source: &OccupancyGrid,
        target: &OccupancyGrid,
    ) -> Self {
        assert_eq!(
            (source.w, source.h),
            (target.w, target.h),
            "occupancy grids must share the canvas"
        );
        Self {
            source_on_target: measure.compute(source, target),
            target_on_source: measure.compute(target, source),
        }
    }
}
