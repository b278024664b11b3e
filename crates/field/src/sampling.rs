//! Downsampling of a gridded surface into flat-coloured patches.
//!
//! A surface plot does not draw every grid cell. At most `rcount` x `ccount`
//! samples are kept per direction by slicing with a stride, the last row and
//! column are always kept, and each patch between consecutive kept indices is
//! one polygon along the perimeter of that block of grid points. The patch is
//! coloured by the mean height of its perimeter.

use crate::grid::Field2;
use crate::{FieldError, Result};

/// Slicing stride for `n` samples when at most `max_count` are wanted.
#[must_use]
pub fn stride(n: usize, max_count: usize) -> usize {
    n.div_ceil(max_count.max(1)).max(1)
}

/// Kept indices: `0, s, 2s, ... < n - 1` followed by `n - 1`.
#[must_use]
pub fn sample_indices(n: usize, max_count: usize) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    let step = stride(n, max_count);
    let mut indices: Vec<usize> = (0..n - 1).step_by(step).collect();
    indices.push(n - 1);
    indices
}

/// One polygon of the sampled surface.
#[derive(Debug, Clone)]
pub struct SurfacePatch {
    /// `(x, y, z)` points around the block, corners once, in winding order.
    pub perimeter: Vec<[f64; 3]>,
    /// Mean `z` over the perimeter.
    pub mean_z: f64,
}

impl SurfacePatch {
    /// Mean of the perimeter points, used as the fan centre when filling.
    #[must_use]
    pub fn centroid(&self) -> [f64; 3] {
        let n = self.perimeter.len().max(1) as f64;
        let mut c = [0.0; 3];
        for p in &self.perimeter {
            c[0] += p[0];
            c[1] += p[1];
            c[2] += p[2];
        }
        [c[0] / n, c[1] / n, c[2] / n]
    }
}

/// The surface as drawn.
#[derive(Debug, Clone)]
pub struct SurfaceSampling {
    pub row_indices: Vec<usize>,
    pub col_indices: Vec<usize>,
    pub patches: Vec<SurfacePatch>,
}

impl SurfaceSampling {
    /// # Errors
    ///
    /// Returns [`FieldError::ShapeMismatch`] if `x`, `y` and `z` differ in shape.
    pub fn new(x: &Field2, y: &Field2, z: &Field2, rcount: usize, ccount: usize) -> Result<Self> {
        for other in [y, z] {
            if other.shape() != x.shape() {
                return Err(FieldError::ShapeMismatch {
                    left: x.shape(),
                    right: other.shape(),
                });
            }
        }
        let (rows, cols) = x.shape();
        let row_indices = sample_indices(rows, rcount);
        let col_indices = sample_indices(cols, ccount);

        let mut patches = Vec::with_capacity(
            row_indices.len().saturating_sub(1) * col_indices.len().saturating_sub(1),
        );
        for rs in row_indices.windows(2) {
            for cs in col_indices.windows(2) {
                let perimeter: Vec<[f64; 3]> = block_perimeter(rs[0], rs[1], cs[0], cs[1])
                    .map(|(r, c)| [x[(r, c)], y[(r, c)], z[(r, c)]])
                    .collect();
                let mean_z =
                    perimeter.iter().map(|p| p[2]).sum::<f64>() / perimeter.len() as f64;
                patches.push(SurfacePatch { perimeter, mean_z });
            }
        }
        tracing::debug!(
            rows = row_indices.len(),
            cols = col_indices.len(),
            patches = patches.len(),
            "sampled surface"
        );
        Ok(Self {
            row_indices,
            col_indices,
            patches,
        })
    }

    pub fn means(&self) -> impl Iterator<Item = f64> + '_ {
        self.patches.iter().map(|p| p.mean_z)
    }
}

/// Grid positions around the block `[r0, r1] x [c0, c1]`.
///
/// Walks the first row forwards, the last column down, the last row
/// backwards and the first column up, visiting each corner exactly once.
fn block_perimeter(r0: usize, r1: usize, c0: usize, c1: usize) -> impl Iterator<Item = (usize, usize)> {
    let top = (c0..c1).map(move |c| (r0, c));
    let right = (r0..r1).map(move |r| (r, c1));
    let bottom = (c0 + 1..=c1).rev().map(move |c| (r1, c));
    let left = (r0 + 1..=r1).rev().map(move |r| (r, c0));
    top.chain(right).chain(bottom).chain(left)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perimeter_visits_corners_once() {
        let points: Vec<_> = block_perimeter(0, 2, 0, 2).collect();
        assert_eq!(
            points,
            vec![(0, 0), (0, 1), (0, 2), (1, 2), (2, 2), (2, 1), (2, 0), (1, 0)]
        );
    }

    #[test]
    fn single_row_has_no_patches() {
        let f = Field2::from_fn(1, 5, |_, c| c as f64);
        let s = SurfaceSampling::new(&f, &f, &f, 50, 50).unwrap();
        assert_eq!(s.row_indices, vec![0]);
        assert!(s.patches.is_empty());
    }
}
