//! Foreground point extraction from grayscale images.
//!
//! The pipeline treats extraction as an external collaborator behind the
//! [`PointExtractor`] trait. [`ThresholdExtractor`] is the stock
//! implementation: dark strokes on a light background, scanned row-major.
use crate::image::{ImageU8, ImageView};
use crate::types::Point;

pub trait PointExtractor {
    /// Returns the foreground points of `image` in insertion order.
    fn extract(&self, image: &ImageU8<'_>, threshold: u8) -> Vec<Point>;
}

/// Marks every pixel with intensity `<= threshold` as foreground.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThresholdExtractor;

impl PointExtractor for ThresholdExtractor {
    fn extract(&self, image: &ImageU8<'_>, threshold: u8) -> Vec<Point> {
        let mut points = Vec::new();
        image.for_each_pixel(|y, x, v| {
            if v <= threshold {
                points.push(Point::new(x as i32, y as i32));
            }
        });
        points
    }
}
