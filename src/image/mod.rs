//! Minimal raster views consumed by the point extractor and the grids.
//!
//! Decoding image files is left to the caller; the pipeline only needs a
//! borrowed 8-bit grayscale view and row access.
pub mod traits;
pub mod u8;

pub use self::traits::{ImageView, Rows};
pub use self::u8::ImageU8;
