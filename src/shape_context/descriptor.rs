//! Log-polar shape-context histograms and the χ² matching cost.
//!
//! For every sample point the relative positions of all other samples are
//! binned by log-radius (normalised by the mean pairwise distance) and by
//! angle. Histograms are normalised to unit mass.
use super::ShapeContextParams;
use crate::types::Point;
use nalgebra::DMatrix;
use std::f64::consts::TAU;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One normalised histogram per point, stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeContexts {
    bins: usize,
    data: Vec<f64>,
}

impl ShapeContexts {
    pub fn len(&self) -> usize {
        if self.bins == 0 {
            0
        } else {
            self.data.len() / self.bins
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn histogram(&self, i: usize) -> &[f64] {
        &self.data[i * self.bins..(i + 1) * self.bins]
    }
}

/// Radial bin edges, log-spaced from `inner_radius` to `outer_radius`.
fn radial_edges(params: &ShapeContextParams) -> Vec<f64> {
    let n = params.radial_bins.max(1);
    if n == 1 {
        return vec![params.outer_radius];
    }
    let ratio = params.outer_radius / params.inner_radius;
    (0..n)
        .map(|k| params.inner_radius * ratio.powf(k as f64 / (n - 1) as f64))
        .collect()
}

fn mean_pairwise_distance(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            sum += distance(points[i], points[j]);
        }
    }
    sum / (n * (n - 1) / 2) as f64
}

#[inline]
fn distance(a: Point, b: Point) -> f64 {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

fn histogram(
    i: usize,
    points: &[Point],
    edges: &[f64],
    scale: f64,
    angular_bins: usize,
) -> Vec<f64> {
    let mut hist = vec![0.0; edges.len() * angular_bins];
    let outer = edges[edges.len() - 1];
    let origin = points[i];
    let mut mass = 0.0;
    for (j, &p) in points.iter().enumerate() {
        if j == i {
            continue;
        }
        let r = distance(origin, p) / scale;
        if r >= outer {
            continue;
        }
        let r_bin = edges.iter().position(|&e| r < e).unwrap_or(edges.len() - 1);
        let theta = ((p.y - origin.y) as f64)
            .atan2((p.x - origin.x) as f64)
            .rem_euclid(TAU);
        let t_bin = ((theta / TAU * angular_bins as f64) as usize).min(angular_bins - 1);
        hist[r_bin * angular_bins + t_bin] += 1.0;
        mass += 1.0;
    }
    if mass > 0.0 {
        hist.iter_mut().for_each(|h| *h /= mass);
    }
    hist
}

/// Shape contexts of `points`. `fallback_scale` normalises radii when every
/// point coincides (mean pairwise distance of zero).
pub fn compute_descriptors(
    points: &[Point],
    params: &ShapeContextParams,
    fallback_scale: f64,
) -> ShapeContexts {
    let edges = radial_edges(params);
    let angular_bins = params.angular_bins.max(1);
    let mean = mean_pairwise_distance(points);
    let scale = if mean > 0.0 { mean } else { fallback_scale.max(1.0) };

    #[cfg(feature = "parallel")]
    let rows: Vec<Vec<f64>> = (0..points.len())
        .into_par_iter()
        .map(|i| histogram(i, points, &edges, scale, angular_bins))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let rows: Vec<Vec<f64>> = (0..points.len())
        .map(|i| histogram(i, points, &edges, scale, angular_bins))
        .collect();

    ShapeContexts {
        bins: edges.len() * angular_bins,
        data: rows.concat(),
    }
}

/// χ² distance between two normalised histograms, in `[0, 1]`.
pub fn chi2_cost(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .filter(|(x, y)| *x + *y > 0.0)
        .map(|(x, y)| (x - y) * (x - y) / (x + y))
        .sum::<f64>()
        * 0.5
}

/// `cost[(i, j)]` = χ² between source histogram `i` and target histogram `j`.
pub fn cost_matrix(source: &ShapeContexts, target: &ShapeContexts) -> DMatrix<f64> {
    DMatrix::from_fn(source.len(), target.len(), |i, j| {
        chi2_cost(source.histogram(i), target.histogram(j))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ShapeContextParams {
        ShapeContextParams::default()
    }

    #[test]
    fn histograms_have_unit_mass() {
        let pts = [
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(0, 3),
            Point::new(5, 5),
        ];
        let sc = compute_descriptors(&pts, &params(), 10.0);
        assert_eq!(sc.len(), 4);
        assert_eq!(sc.bins(), 60);
        for i in 0..sc.len() {
            let mass: f64 = sc.histogram(i).iter().sum();
            assert!((mass - 1.0).abs() < 1e-12, "point {i} mass {mass}");
        }
    }

    #[test]
    fn descriptors_are_translation_invariant() {
        let a = [Point::new(0, 0), Point::new(6, 1), Point::new(2, 7)];
        let b: Vec<Point> = a.iter().map(|p| Point::new(p.x + 40, p.y - 3)).collect();
        let sa = compute_descriptors(&a, &params(), 1.0);
        let sb = compute_descriptors(&b, &params(), 1.0);
        assert_eq!(sa, sb);
        let cost = cost_matrix(&sa, &sb);
        for i in 0..3 {
            assert_eq!(cost[(i, i)], 0.0);
        }
    }

    #[test]
    fn chi2_is_zero_for_equal_and_one_for_disjoint() {
        assert_eq!(chi2_cost(&[0.5, 0.5, 0.0], &[0.5, 0.5, 0.0]), 0.0);
        assert!((chi2_cost(&[1.0, 0.0], &[0.0, 1.0]) - 1.0).abs() < 1e-12);
    }
}
