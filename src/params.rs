//! Parameter types configuring the combined pipeline.
//!
//! Everything is deserializable with per-field defaults, so a config file only
//! needs to name the knobs it changes.

use crate::error::Result;
use crate::sampling::SamplingPolicy;
use crate::shape_context::ShapeContextParams;
use serde::{Deserialize, Serialize};

/// Pipeline-wide parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboParams {
    /// Gray level at or below which a pixel counts as foreground.
    pub threshold: u8,
    /// Explicit sample count used when the matcher does not request one.
    /// `None` derives the count from the bank sizes.
    pub shape_context_samples: Option<usize>,
    /// Maximum χ² cost of a retained pair. `None` disables the cutoff.
    pub warp_distance_threshold: Option<f64>,
    /// Samples drawn from the full point set when no other count applies.
    pub fallback_samples: usize,
    /// Seed for every sample draw of a run.
    pub seed: u64,
    /// Histogram layout and assignment knobs of the default matcher.
    pub shape_context: ShapeContextParams,
}

impl Default for ComboParams {
    fn default() -> Self {
        Self {
            threshold: 128,
            shape_context_samples: None,
            warp_distance_threshold: None,
            fallback_samples: 100,
            seed: 0x5eed,
            shape_context: ShapeContextParams::default(),
        }
    }
}

impl ComboParams {
    /// Cutoff passed to the matcher; non-positive or non-finite values disable it.
    pub fn warp_cutoff(&self) -> Option<f64> {
        self.warp_distance_threshold
            .filter(|t| t.is_finite() && *t > 0.0)
    }

    /// Checks knobs whose invalid values would silently corrupt a run.
    pub fn validate(&self) -> Result<()> {
        self.shape_context.validate()
    }

    pub fn sampling_policy(&self) -> SamplingPolicy {
        SamplingPolicy {
            explicit_count: self.shape_context_samples.filter(|&n| n > 0),
            fallback_count: self.fallback_samples,
            seed: self.seed,
        }
    }
}
