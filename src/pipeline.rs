//! Combined matching pipeline.
//!
//! The [`ComboPipeline`] takes two foreground point sets and returns sample
//! pairs suitable for a later warp. Stages run strictly in sequence and the
//! first failure aborts the run:
//!
//! 1. Normalize – convert to 2×N matrices and shift into a non-negative frame.
//! 2. Align – map the target onto the source ([`Aligner`]).
//! 3. Normalize again – the aligned target may have left the frame; the
//!    post-shift maxima plus a 2-cell margin size the canvas, which is then
//!    checked against every rounded point.
//! 4. Rasterize – one binary occupancy grid per shape.
//! 5. Discrepancy – "1-on-2" and "2-on-1" grids ([`DiscrepancyMeasure`]).
//! 6. Banks – expand each grid into a weighted [`SampleBank`].
//! 7. Correspondence – sample through a [`BankSampler`] and pair the samples
//!    ([`CorrespondenceMatcher`]).
//! 8. Assemble the [`CorrespondenceResult`].
//!
//! Per-run state lives on the stack of [`ComboPipeline::process`], so one
//! pipeline can serve any number of independent runs.
//!
//! ```no_run
//! use shape_combo::{ComboParams, ComboPipeline, ShapeInput};
//! use shape_combo::image::ImageU8;
//!
//! # fn example(a: ImageU8, b: ImageU8) -> shape_combo::Result<()> {
//! let pipeline = ComboPipeline::new(ComboParams::default());
//! let source = ShapeInput::from_image(&a, pipeline.params().threshold);
//! let target = ShapeInput::from_image(&b, pipeline.params().threshold);
//! let result = pipeline.process(source, target)?;
//! println!("{} pairs on a {:?} canvas", result.pair_count(), result.canvas);
//! # Ok(())
//! # }
//! ```

use crate::align::{Aligner, PcaAligner};
use crate::bank::SampleBank;
use crate::diagnostics::{ComboReport, ComboTrace, InputDescriptor, TimingBreakdown};
use crate::discrepancy::{DiscrepancyMeasure, DiscrepancyPair, HausdorffDiscrepancy};
use crate::error::Result;
use crate::extract::{PointExtractor, ThresholdExtractor};
use crate::image::ImageU8;
use crate::normalize::{
    canvas_for, ensure_contains, matrix_to_points, points_to_matrix, shift_to_positives,
};
use crate::params::ComboParams;
use crate::raster::rasterize;
use crate::sampling::{BankSampler, SamplingContext};
use crate::shape_context::{CorrespondenceMatcher, ShapeContextMatcher};
use crate::types::{CanvasSize, CorrespondenceResult, Point, ShapeRole};
use log::debug;
use std::time::Instant;

/// One shape: its foreground points and the extent of the image they came from.
#[derive(Clone, Debug, Default)]
pub struct ShapeInput {
    pub points: Vec<Point>,
    pub extent: CanvasSize,
}

impl ShapeInput {
    pub fn new(points: Vec<Point>, extent: CanvasSize) -> Self {
        Self { points, extent }
    }

    /// Threshold extraction of dark foreground pixels.
    pub fn from_image(image: &ImageU8<'_>, threshold: u8) -> Self {
        Self::with_extractor(image, threshold, &ThresholdExtractor)
    }

    pub fn with_extractor(
        image: &ImageU8<'_>,
        threshold: u8,
        extractor: &dyn PointExtractor,
    ) -> Self {
        Self {
            points: extractor.extract(image, threshold),
            extent: CanvasSize::new(image.w, image.h),
        }
    }
}

type BoxedAligner = Box<dyn Aligner + Send + Sync>;
type BoxedDiscrepancy = Box<dyn DiscrepancyMeasure + Send + Sync>;
type BoxedMatcher = Box<dyn CorrespondenceMatcher + Send + Sync>;

/// Orchestrates alignment, discrepancy-biased sampling and shape-context
/// matching over a shared canvas.
pub struct ComboPipeline {
    params: ComboParams,
    aligner: BoxedAligner,
    discrepancy: BoxedDiscrepancy,
    matcher: BoxedMatcher,
}

impl ComboPipeline {
    /// Pipeline with the stock PCA, Hausdorff and shape-context components.
    pub fn new(params: ComboParams) -> Self {
        let matcher = ShapeContextMatcher::new(params.shape_context.clone());
        Self {
            params,
            aligner: Box::new(PcaAligner),
            discrepancy: Box::new(HausdorffDiscrepancy),
            matcher: Box::new(matcher),
        }
    }

    pub fn with_aligner(mut self, aligner: impl Aligner + Send + Sync + 'static) -> Self {
        self.aligner = Box::new(aligner);
        self
    }

    pub fn with_discrepancy(
        mut self,
        measure: impl DiscrepancyMeasure + Send + Sync + 'static,
    ) -> Self {
        self.discrepancy = Box::new(measure);
        self
    }

    pub fn with_matcher(
        mut self,
        matcher: impl CorrespondenceMatcher + Send + Sync + 'static,
    ) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    pub fn params(&self) -> &ComboParams {
        &self.params
    }

    /// Update the explicit sample count (`None` derives it from the banks).
    pub fn set_shape_context_samples(&mut self, samples: Option<usize>) {
        self.params.shape_context_samples = samples;
    }

    /// Update the structural-distance cutoff (`None` disables it).
    pub fn set_warp_distance_threshold(&mut self, threshold: Option<f64>) {
        self.params.warp_distance_threshold = threshold;
    }

    /// Update the seed used by every sample draw.
    pub fn set_seed(&mut self, seed: u64) {
        self.params.seed = seed;
    }

    /// Run the pipeline and return only the correspondence artifact.
    pub fn process(&self, source: ShapeInput, target: ShapeInput) -> Result<CorrespondenceResult> {
        self.process_with_diagnostics(source, target)
            .map(|report| report.result)
    }

    /// Run the pipeline and capture a stage-by-stage trace.
    pub fn process_with_diagnostics(
        &self,
        source: ShapeInput,
        target: ShapeInput,
    ) -> Result<ComboReport> {
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();
        let input = InputDescriptor {
            source_extent: source.extent,
            target_extent: target.extent,
            source_points: source.points.len(),
            target_points: target.points.len(),
        };
        let starting = source.extent.union(target.extent);

        // 1) Provisional non-negative frame
        let stage = Instant::now();
        let mut src_m = points_to_matrix(&source.points);
        let mut tgt_m = points_to_matrix(&target.points);
        let initial_extrema = shift_to_positives(&mut src_m, &mut tgt_m);
        timings.lap("normalize", stage);

        // 2) Global alignment of target onto source
        let stage = Instant::now();
        let mut tgt_m = self.aligner.align(&src_m, &tgt_m)?;
        timings.lap("align", stage);

        // 3) Shared frame after alignment + canvas sizing
        let stage = Instant::now();
        let aligned_extrema = shift_to_positives(&mut src_m, &mut tgt_m);
        let source_points = matrix_to_points(&src_m);
        let target_points = matrix_to_points(&tgt_m);
        let canvas = canvas_for(&aligned_extrema, starting);
        ensure_contains(canvas, ShapeRole::Source, &source_points)?;
        ensure_contains(canvas, ShapeRole::Target, &target_points)?;
        timings.lap("canvas", stage);
        debug!(
            "ComboPipeline::process canvas {}x{} (images {}x{}, extrema max [{:.2}, {:.2}])",
            canvas.width,
            canvas.height,
            starting.width,
            starting.height,
            aligned_extrema.max[0],
            aligned_extrema.max[1]
        );

        // 4) Occupancy grids
        let stage = Instant::now();
        let source_grid = rasterize(&source_points, canvas);
        let target_grid = rasterize(&target_points, canvas);
        timings.lap("rasterize", stage);

        // 5) Directional discrepancy
        let stage = Instant::now();
        let diffs = DiscrepancyPair::compute(self.discrepancy.as_ref(), &source_grid, &target_grid);
        timings.lap("discrepancy", stage);

        // 6) Weighted banks
        let stage = Instant::now();
        let ctx = SamplingContext::new(
            SampleBank::from_discrepancy(&diffs.source_on_target),
            SampleBank::from_discrepancy(&diffs.target_on_source),
        );
        timings.lap("banks", stage);
        debug!(
            "ComboPipeline::process banks source={} target={} default_count={}",
            ctx.source_bank.len(),
            ctx.target_bank.len(),
            ctx.default_count()
        );

        // 7) Bank-biased shape-context correspondence
        let stage = Instant::now();
        let mut sampler = BankSampler::new(&ctx, self.params.sampling_policy());
        let correspondence = self.matcher.match_shapes(
            &source_points,
            &target_points,
            canvas,
            &mut sampler,
            self.params.warp_cutoff(),
        )?;
        let sampling = sampler.into_history();
        timings.lap("correspondence", stage);

        timings.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "ComboPipeline::process pairs={} rejected={} total_ms={:.3}",
            correspondence.len(),
            correspondence.rejected,
            timings.total_ms
        );

        let trace = ComboTrace {
            input,
            initial_extrema,
            aligned_extrema,
            canvas,
            occupied_cells: [source_grid.count_set(), target_grid.count_set()],
            discrepancy_peak: [
                diffs.source_on_target.max_value(),
                diffs.target_on_source.max_value(),
            ],
            source_bank_len: ctx.source_bank.len(),
            target_bank_len: ctx.target_bank.len(),
            sampling,
            pair_costs: correspondence.costs,
            rejected_pairs: correspondence.rejected,
            timings,
        };

        // 8) Result artifact
        let result = CorrespondenceResult {
            source_points,
            target_points,
            canvas,
            source_samples: correspondence.source_samples,
            target_samples: correspondence.target_samples,
        };
        Ok(ComboReport { result, trace })
    }
}

impl Default for ComboPipeline {
    fn default() -> Self {
        Self::new(ComboParams::default())
    }
}
