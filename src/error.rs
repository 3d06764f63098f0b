//! Error taxonomy for the combined matching pipeline.
//!
//! Every variant is fatal to the current run: the orchestrator returns the
//! first error it encounters and executes no further stages.

use crate::types::{CanvasSize, Point, ShapeRole};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComboError {
    /// Principal axes could not be determined (too few points, collinear input).
    #[error("degenerate {role} geometry: {reason}")]
    DegenerateGeometry { role: ShapeRole, reason: String },

    /// The computed canvas does not contain a shape. Programming defect.
    #[error("canvas {}x{} does not contain {role} point ({}, {})", canvas.width, canvas.height, point.x, point.y)]
    CanvasSizing {
        role: ShapeRole,
        canvas: CanvasSize,
        point: Point,
    },

    /// Sampling produced no points for one of the shapes.
    #[error("no {role} samples available (pool of {pool_len} points)")]
    InsufficientSamples { role: ShapeRole, pool_len: usize },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ComboError>;
