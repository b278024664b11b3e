//! The masked smoothstep bump.
//!
//! Height is `W = 1 - S(R)` inside the open unit disk and exactly zero on
//! and outside the unit circle, where `S` is one of the [`Smoothing`]
//! polynomials. The plotted profile is the quintic `6R^5 - 15R^4 + 10R^3`,
//! whose first and second derivatives vanish at both ends of `[0, 1]`, so
//! the bump meets the flat region without a crease.

use std::f64::consts::PI;

use crate::grid::{Field2, Grid};
use crate::{FieldError, Result};

/// Cubic smoothstep `3t^2 - 2t^3`; flat first derivative at both ends.
#[must_use]
pub fn smoothstep3(t: f64) -> f64 {
    t * t * (-2.0 * t + 3.0)
}

/// Fifth order smoothstep `6t^5 - 15t^4 + 10t^3` in Horner form.
///
/// `smoothstep5(0) == 0`, `smoothstep5(1) == 1`, and
/// `smoothstep5(t) == 1 - smoothstep5(1 - t)`.
#[must_use]
pub fn smoothstep5(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Seventh order smoothstep `-20t^7 + 70t^6 - 84t^5 + 35t^4`; derivatives
/// up to the third vanish at both ends.
#[must_use]
pub fn smoothstep7(t: f64) -> f64 {
    let t2 = t * t;
    t2 * t2 * (t * (t * (t * -20.0 + 70.0) - 84.0) + 35.0)
}

/// Half a sine period shifted onto `[0, 1]`.
#[must_use]
pub fn smoothstep_sin(t: f64) -> f64 {
    ((PI * (t - 0.5)).sin() + 1.0) / 2.0
}

/// Radial profile of the bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Smoothing {
    Cubic,
    #[default]
    Quintic,
    Septic,
    Sine,
}

impl Smoothing {
    pub const ALL: [Self; 4] = [Self::Cubic, Self::Quintic, Self::Septic, Self::Sine];

    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Cubic => smoothstep3(t),
            Self::Quintic => smoothstep5(t),
            Self::Septic => smoothstep7(t),
            Self::Sine => smoothstep_sin(t),
        }
    }

    /// Bump height at radius `r`; the mask is strict so `r == 1` gives zero.
    #[must_use]
    pub fn masked_height(self, r: f64) -> f64 {
        if r < 1.0 {
            1.0 - self.apply(r)
        } else {
            0.0
        }
    }
}

/// Quintic bump height at radius `r`.
#[must_use]
pub fn masked_height(r: f64) -> f64 {
    Smoothing::Quintic.masked_height(r)
}

/// The grid together with every derived field.
#[derive(Debug, Clone)]
pub struct BumpSurface {
    pub grid: Grid,
    /// `sqrt(X^2 + Y^2)`
    pub radius: Field2,
    /// Unmasked polynomial of the radius.
    pub height: Field2,
    /// Plotted height.
    pub masked: Field2,
    pub smoothing: Smoothing,
}

impl BumpSurface {
    /// Quintic bump over `grid`.
    #[must_use]
    pub fn evaluate(grid: Grid) -> Self {
        Self::evaluate_with(grid, Smoothing::Quintic)
    }

    #[must_use]
    pub fn evaluate_with(grid: Grid, smoothing: Smoothing) -> Self {
        let radius = grid.radius();
        let height = radius.map(|r| smoothing.apply(r));
        let masked = radius.map(|r| smoothing.masked_height(r));
        tracing::debug!(shape = ?grid.shape(), ?smoothing, "evaluated bump surface");
        Self {
            grid,
            radius,
            height,
            masked,
            smoothing,
        }
    }

    /// Square grid over `[start, stop)` at `step` on both axes.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidStep`] for a bad step.
    pub fn over_square(start: f64, stop: f64, step: f64) -> Result<Self> {
        Ok(Self::evaluate(Grid::square(start, stop, step)?))
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.grid.shape()
    }

    /// # Errors
    ///
    /// Returns [`FieldError::EmptyField`] when the grid has no samples.
    pub fn summary(&self) -> Result<FieldSummary> {
        let min = self.masked.min().ok_or(FieldError::EmptyField)?;
        let max = self.masked.max().ok_or(FieldError::EmptyField)?;
        let (row, col) = self.masked.argmax().ok_or(FieldError::EmptyField)?;
        let inside = self.radius.iter().filter(|&r| r < 1.0).count();
        Ok(FieldSummary {
            shape: self.shape(),
            min,
            max,
            argmax: (self.grid.xs[col], self.grid.ys[row]),
            inside_disk: inside,
        })
    }
}

/// Headline numbers for logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSummary {
    pub shape: (usize, usize),
    pub min: f64,
    pub max: f64,
    /// `(x, y)` of the peak.
    pub argmax: (f64, f64),
    /// Samples with `R < 1`.
    pub inside_disk: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn smoothstep_matches_expanded_polynomial() {
        for i in 0..=20 {
            let t = f64::from(i) / 20.0;
            let expanded = 6.0 * t.powi(5) - 15.0 * t.powi(4) + 10.0 * t.powi(3);
            assert!((smoothstep5(t) - expanded).abs() < EPS, "t = {t}");
        }
    }

    #[test]
    fn every_profile_pins_the_ends() {
        for smoothing in Smoothing::ALL {
            assert!(smoothing.apply(0.0).abs() < EPS, "{smoothing:?} at 0");
            assert!((smoothing.apply(1.0) - 1.0).abs() < EPS, "{smoothing:?} at 1");
        }
    }

    #[test]
    fn every_profile_is_point_symmetric() {
        for smoothing in Smoothing::ALL {
            for i in 0..=10 {
                let t = f64::from(i) / 10.0;
                let mirrored = 1.0 - smoothing.apply(1.0 - t);
                assert!((smoothing.apply(t) - mirrored).abs() < EPS, "{smoothing:?} at {t}");
            }
        }
    }

    #[test]
    fn septic_and_cubic_match_expanded_polynomials() {
        for i in 0..=20 {
            let t = f64::from(i) / 20.0;
            let cubic = 3.0 * t * t - 2.0 * t.powi(3);
            let septic = -20.0 * t.powi(7) + 70.0 * t.powi(6) - 84.0 * t.powi(5) + 35.0 * t.powi(4);
            assert!((smoothstep3(t) - cubic).abs() < EPS, "t = {t}");
            assert!((smoothstep7(t) - septic).abs() < EPS, "t = {t}");
        }
    }

    #[test]
    fn higher_orders_are_flatter_near_zero() {
        let t = 0.1;
        assert!(smoothstep7(t) < smoothstep5(t));
        assert!(smoothstep5(t) < smoothstep3(t));
    }

    #[test]
    fn mask_is_strict_for_every_profile() {
        for smoothing in Smoothing::ALL {
            assert_eq!(smoothing.masked_height(1.0), 0.0);
            assert_eq!(smoothing.masked_height(1.5), 0.0);
            assert!((smoothing.masked_height(0.0) - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn evaluate_defaults_to_quintic() {
        let grid = Grid::square(-1.0, 1.0, 0.25).unwrap();
        let surface = BumpSurface::evaluate(grid.clone());
        assert_eq!(surface.smoothing, Smoothing::Quintic);
        let cubic = BumpSurface::evaluate_with(grid, Smoothing::Cubic);
        assert_eq!(cubic.masked.shape(), surface.masked.shape());
        assert_ne!(cubic.masked, surface.masked);
    }
}
