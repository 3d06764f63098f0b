//! Minimum-cost bipartite assignment (Hungarian method with potentials).
//!
//! Rectangular inputs are padded to a square matrix with a constant dummy
//! cost; rows or columns matched to padding are reported as unassigned.
//!
//! Complexity: O(N³) for N = max(rows, cols).
use nalgebra::DMatrix;

/// For every row of `cost`, the column it is assigned to (if any).
pub fn solve(cost: &DMatrix<f64>, dummy_cost: f64) -> Vec<Option<usize>> {
    let (rows, cols) = cost.shape();
    let n = rows.max(cols);
    if n == 0 {
        return Vec::new();
    }
    let at = |i: usize, j: usize| {
        if i < rows && j < cols {
            cost[(i, j)]
        } else {
            dummy_cost
        }
    };

    // 1-based potentials; column 0 is the virtual start column.
    let mut u = vec![0.0; n + 1];
    let mut v = vec![0.0; n + 1];
    let mut owner = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];
    for i in 1..=n {
        owner[0] = i;
        let mut j0 = 0usize;
        let mut minv = vec![f64::INFINITY; n + 1];
        let mut used = vec![false; n + 1];
        loop {
            used[j0] = true;
            let i0 = owner[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0usize;
            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let cur = at(i0 - 1, j - 1) - u[i0] - v[j];
                if cur < minv[j] {
                    minv[j] = cur;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }
            for j in 0..=n {
                if used[j] {
                    u[owner[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }
            j0 = j1;
            if owner[j0] == 0 {
                break;
            }
        }
        loop {
            let j1 = way[j0];
            owner[j0] = owner[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut assignment = vec![None; rows];
    for j in 1..=n {
        let i = owner[j];
        if i >= 1 && i <= rows && j <= cols {
            assignment[i - 1] = Some(j - 1);
        }
    }
    assignment
}
