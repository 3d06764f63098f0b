#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod params;
pub mod pipeline;
pub mod types;

// Stage building blocks – public so components can be swapped or tested in isolation.
pub mod align;
pub mod bank;
pub mod discrepancy;
pub mod extract;
pub mod grid;
pub mod normalize;
pub mod raster;
pub mod sampling;
pub mod shape_context;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{ComboError, Result};
pub use crate::params::ComboParams;
pub use crate::pipeline::{ComboPipeline, ShapeInput};
pub use crate::types::{CanvasSize, CorrespondenceResult, Point, ShapeRole};

pub use crate::diagnostics::{ComboReport, ComboTrace};

// Component seams.
pub use crate::align::{Aligner, PcaAligner};
pub use crate::discrepancy::{DiscrepancyMeasure, HausdorffDiscrepancy};
pub use crate::sampling::{BankSampler, SampleSelector, SamplingContext, SamplingPolicy};
pub use crate::shape_context::{CorrespondenceMatcher, ShapeContextMatcher};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use shape_combo::prelude::*;
///
/// # fn main() -> shape_combo::Result<()> {
/// let (w, h) = (64usize, 64usize);
/// let mut gray = vec![255u8; w * h];
/// for y in 8..40 {
///     for x in 8..(8 + y / 2) {
///         gray[y * w + x] = 0;
///     }
/// }
/// let img = ImageU8::packed(w, h, &gray);
///
/// let pipeline = ComboPipeline::new(ComboParams {
///     shape_context_samples: Some(50),
///     ..Default::default()
/// });
/// let shape = ShapeInput::from_image(&img, 128);
/// let result = pipeline.process(shape.clone(), shape)?;
/// println!("pairs={} canvas={:?}", result.pair_count(), result.canvas);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageU8;
    pub use crate::{ComboParams, ComboPipeline, CorrespondenceResult, Point, ShapeInput};
}
