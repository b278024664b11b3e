//! Sample grids and row-major 2D fields.

use std::ops::Index;

use crate::{FieldError, Result};

/// Evenly spaced values in `[start, stop)`.
///
/// The length is `ceil((stop - start) / step)` and element `i` is
/// `start + i * step`, so `arange(-1.0, 1.0, 0.01)` yields 200 values with an
/// exact `0.0` at index 100. An empty or inverted range yields no values.
///
/// # Errors
///
/// Returns [`FieldError::InvalidStep`] when `step` is not finite or not
/// strictly positive.
pub fn arange(start: f64, stop: f64, step: f64) -> Result<Vec<f64>> {
    if !step.is_finite() || step <= 0.0 {
        return Err(FieldError::InvalidStep(step));
    }
    let span = (stop - start) / step;
    if span.is_nan() || span <= 0.0 {
        return Ok(Vec::new());
    }
    let len = span.ceil() as usize;
    Ok((0..len).map(|i| start + i as f64 * step).collect())
}

/// Row-major 2D array of `f64` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Field2 {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Field2 {
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self { rows, cols, data }
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Sample at `(row, col)`, `None` when out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    /// Elementwise transform into a new field of the same shape.
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Elementwise combination of two fields.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ShapeMismatch`] if the shapes differ.
    pub fn zip_map(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Result<Self> {
        if self.shape() != other.shape() {
            return Err(FieldError::ShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// Smallest non-NaN sample.
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.iter().filter(|v| !v.is_nan()).reduce(f64::min)
    }

    /// Largest non-NaN sample.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.iter().filter(|v| !v.is_nan()).reduce(f64::max)
    }

    /// Position of the first largest non-NaN sample as `(row, col)`.
    #[must_use]
    pub fn argmax(&self) -> Option<(usize, usize)> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, v) in self.data.iter().copied().enumerate() {
            if v.is_nan() {
                continue;
            }
            match best {
                Some((_, b)) if v <= b => {}
                _ => best = Some((idx, v)),
            }
        }
        best.map(|(idx, _)| (idx / self.cols, idx % self.cols))
    }
}

impl Index<(usize, usize)> for Field2 {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(col < self.cols, "column {col} out of bounds for {} columns", self.cols);
        &self.data[row * self.cols + col]
    }
}

/// Coordinate grid built from two 1D axes.
///
/// Uses "xy" indexing: `x[(i, j)] == xs[j]` and `y[(i, j)] == ys[i]`, so
/// both fields have shape `(ys.len(), xs.len())`.
#[derive(Debug, Clone)]
pub struct Grid {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub x: Field2,
    pub y: Field2,
}

impl Grid {
    #[must_use]
    pub fn meshgrid(xs: Vec<f64>, ys: Vec<f64>) -> Self {
        let x = Field2::from_fn(ys.len(), xs.len(), |_, col| xs[col]);
        let y = Field2::from_fn(ys.len(), xs.len(), |row, _| ys[row]);
        Self { xs, ys, x, y }
    }

    /// Square grid with the same `arange` on both axes.
    ///
    /// # Errors
    ///
    /// Propagates [`arange`] errors.
    pub fn square(start: f64, stop: f64, step: f64) -> Result<Self> {
        let axis = arange(start, stop, step)?;
        Ok(Self::meshgrid(axis.clone(), axis))
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.x.shape()
    }

    /// Elementwise Euclidean norm of the coordinates.
    #[must_use]
    pub fn radius(&self) -> Field2 {
        Field2::from_fn(self.ys.len(), self.xs.len(), |row, col| {
            let x = self.xs[col];
            let y = self.ys[row];
            (x * x + y * y).sqrt()
        })
    }
}
