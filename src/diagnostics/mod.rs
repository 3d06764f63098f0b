//! Diagnostics returned alongside the correspondence result.
//!
//! [`ComboReport`] is the entry point produced by
//! [`ComboPipeline::process_with_diagnostics`](crate::ComboPipeline): the
//! assembled [`CorrespondenceResult`](crate::CorrespondenceResult) plus a
//! [`ComboTrace`] describing what every stage saw and how long it took.

pub mod report;
pub mod timing;

pub use report::{ComboReport, ComboTrace, InputDescriptor};
pub use timing::{StageTiming, TimingBreakdown};
