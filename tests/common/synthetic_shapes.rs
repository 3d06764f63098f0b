use shape_combo::{CanvasSize, Point};

pub const BAR: usize = 3;
pub const STEM: usize = 24;
pub const FOOT: usize = 14;

/// White image with a black "L": a `BAR`-wide stem of height `STEM` and a
/// foot of length `FOOT`, top-left corner at (`dx`, `dy`).
pub fn l_shape_u8(width: usize, height: usize, dx: usize, dy: usize) -> Vec<u8> {
    assert!(dx + FOOT <= width && dy + STEM <= height, "shape must fit");
    let mut img = vec![255u8; width * height];
    for y in dy..dy + STEM {
        for x in dx..dx + BAR {
            img[y * width + x] = 0;
        }
    }
    for y in dy + STEM - BAR..dy + STEM {
        for x in dx..dx + FOOT {
            img[y * width + x] = 0;
        }
    }
    img
}

/// Paints a filled black square of side `side` at (`x0`, `y0`).
pub fn add_square(img: &mut [u8], width: usize, x0: usize, y0: usize, side: usize) {
    for y in y0..y0 + side {
        for x in x0..x0 + side {
            img[y * width + x] = 0;
        }
    }
}

/// Filled right triangle as a point list, for tests that skip images.
pub fn triangle_points(dx: i32, dy: i32, size: i32) -> (Vec<Point>, CanvasSize) {
    let mut pts = Vec::new();
    for y in 0..size {
        for x in 0..=y {
            pts.push(Point::new(dx + x, dy + y));
        }
    }
    let extent = CanvasSize::new((dx + size + 1) as usize, (dy + size + 1) as usize);
    (pts, extent)
}
