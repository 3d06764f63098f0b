use crate::diagnostics::TimingBreakdown;
use crate::normalize::Extrema;
use crate::sampling::SamplingPlan;
use crate::types::{CanvasSize, CorrespondenceResult};
use serde::Serialize;

/// Result produced by [`ComboPipeline::process_with_diagnostics`](crate::ComboPipeline).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboReport {
    pub result: CorrespondenceResult,
    pub trace: ComboTrace,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub source_extent: CanvasSize,
    pub target_extent: CanvasSize,
    pub source_points: usize,
    pub target_points: usize,
}

/// Stage-by-stage record of a single run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboTrace {
    pub input: InputDescriptor,
    /// Extrema after the provisional shift, before alignment.
    pub initial_extrema: Extrema,
    /// Extrema after alignment and the second shift; sizes the canvas.
    pub aligned_extrema: Extrema,
    pub canvas: CanvasSize,
    /// Foreground cells of the source / target occupancy grids.
    pub occupied_cells: [usize; 2],
    /// Peak value of the "1-on-2" and "2-on-1" discrepancy grids.
    pub discrepancy_peak: [u32; 2],
    pub source_bank_len: usize,
    pub target_bank_len: usize,
    /// Every sampling decision taken by the correspondence stage, in order.
    pub sampling: Vec<SamplingPlan>,
    /// Structural cost of each retained pair.
    pub pair_costs: Vec<f64>,
    /// Pairs removed by the distance cutoff.
    pub rejected_pairs: usize,
    pub timings: TimingBreakdown,
}
