//! Exact Euclidean distance transform and the Hausdorff-style discrepancy.
//!
//! The transform runs the separable lower-envelope-of-parabolas algorithm
//! (one 1-D pass down every column, then one along every row) and yields
//! squared distances to the nearest foreground cell.
//!
//! Complexity: O(W·H); memory: one f64 buffer plus per-line scratch.
use super::DiscrepancyMeasure;
use crate::grid::{DiscrepancyGrid, OccupancyGrid};
use crate::image::ImageView;

/// Stand-in for "no foreground": large but finite so the envelope math never
/// produces NaN.
const FAR: f64 = 1e20;

/// Squared distance from every cell to the nearest set cell of `grid`.
///
/// Cells of a grid without foreground keep the value `1e20`.
pub fn squared_distance_transform(grid: &OccupancyGrid) -> Vec<f64> {
    let (w, h) = (grid.w, grid.h);
    let mut dist: Vec<f64> = grid
        .data
        .iter()
        .map(|&v| if v != 0 { 0.0 } else { FAR })
        .collect();
    let n = w.max(h);
    let mut f = vec![0.0; n];
    let mut d = vec![0.0; n];
    let mut v = vec![0usize; n];
    let mut z = vec![0.0; n + 1];

    for x in 0..w {
        for y in 0..h {
            f[y] = dist[y * w + x];
        }
        lower_envelope(&f[..h], &mut d[..h], &mut v, &mut z);
        for y in 0..h {
            dist[y * w + x] = d[y];
        }
    }
    for y in 0..h {
        let row = &mut dist[y * w..(y + 1) * w];
        f[..w].copy_from_slice(row);
        lower_envelope(&f[..w], &mut d[..w], &mut v, &mut z);
        row.copy_from_slice(&d[..w]);
    }
    dist
}

fn lower_envelope(f: &[f64], d: &mut [f64], v: &mut [usize], z: &mut [f64]) {
    let n = f.len();
    if n == 0 {
        return;
    }
    let mut k = 0usize;
    v[0] = 0;
    z[0] = f64::NEG_INFINITY;
    z[1] = f64::INFINITY;
    for q in 1..n {
        let qf = q as f64;
        let mut s;
        loop {
            let p = v[k] as f64;
            s = ((f[q] + qf * qf) - (f[v[k]] + p * p)) / (2.0 * qf - 2.0 * p);
            if s <= z[k] {
                k -= 1;
            } else {
                break;
            }
        }
        k += 1;
        v[k] = q;
        z[k] = s;
        z[k + 1] = f64::INFINITY;
    }
    k = 0;
    for (q, out) in d.iter_mut().enumerate() {
        let qf = q as f64;
        while z[k + 1] < qf {
            k += 1;
        }
        let p = v[k] as f64;
        *out = (qf - p) * (qf - p) + f[v[k]];
    }
}

/// Directed Hausdorff-style map: each foreground cell of `from` holds its
/// rounded Euclidean distance to the nearest foreground cell of `onto`.
///
/// Cells outside `from`'s foreground are 0. When `onto` is empty every
/// distance is capped at the grid diagonal.
#[derive(Clone, Copy, Debug, Default)]
pub struct HausdorffDiscrepancy;

impl DiscrepancyMeasure for HausdorffDiscrepancy {
    fn compute(&self, from: &OccupancyGrid, onto: &OccupancyGrid) -> DiscrepancyGrid {
        let dist2 = squared_distance_transform(onto);
        let cap = from.canvas().diagonal().ceil();
        let mut out = DiscrepancyGrid::new(from.w, from.h);
        from.for_each_pixel(|y, x, v| {
            if v != 0 {
                let d = dist2[y * from.w + x].sqrt().min(cap).round();
                out.set(x, y, d as u32);
            }
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::rasterize;
    use crate::types::{CanvasSize, Point};

    #[test]
    fn transform_matches_brute_force() {
        let canvas = CanvasSize::new(13, 9);
        let seeds = [Point::new(2, 1), Point::new(10, 7), Point::new(6, 4)];
        let grid = rasterize(&seeds, canvas);
        let dist2 = squared_distance_transform(&grid);
        for y in 0..canvas.height {
            for x in 0..canvas.width {
                let expected = seeds
                    .iter()
                    .map(|p| {
                        let dx = p.x as f64 - x as f64;
                        let dy = p.y as f64 - y as f64;
                        dx * dx + dy * dy
                    })
                    .fold(f64::INFINITY, f64::min);
                assert_eq!(dist2[y * canvas.width + x], expected, "cell ({x}, {y})");
            }
        }
    }

    #[test]
    fn discrepancy_is_directional() {
        let canvas = CanvasSize::new(12, 3);
        // `a` has an extra point far from anything in `b`.
        let a = rasterize(&[Point::new(1, 1), Point::new(10, 1)], canvas);
        let b = rasterize(&[Point::new(1, 1)], canvas);
        let a_on_b = HausdorffDiscrepancy.compute(&a, &b);
        let b_on_a = HausdorffDiscrepancy.compute(&b, &a);
        assert_eq!(a_on_b.get(10, 1), 9);
        assert_eq!(a_on_b.get(1, 1), 0);
        assert_eq!(a_on_b.total(), 9);
        assert_eq!(b_on_a.total(), 0);
    }

    #[test]
    fn empty_onto_is_capped_at_diagonal() {
        let canvas = CanvasSize::new(3, 4);
        let a = rasterize(&[Point::new(0, 0)], canvas);
        let empty = rasterize(&[], canvas);
        let out = HausdorffDiscrepancy.compute(&a, &empty);
        assert_eq!(out.get(0, 0), 5);
    }
}
