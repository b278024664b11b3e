//! Tick placement and tick label formatting.

use crate::{FieldError, Result};

/// Exactly `numticks` evenly spaced ticks spanning the view limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearLocator {
    pub numticks: usize,
}

impl LinearLocator {
    #[must_use]
    pub fn new(numticks: usize) -> Self {
        Self { numticks }
    }

    /// `linspace(vmin, vmax, numticks)`; an inverted range is swapped first.
    #[must_use]
    pub fn tick_values(&self, vmin: f64, vmax: f64) -> Vec<f64> {
        let (lo, hi) = if vmax < vmin { (vmax, vmin) } else { (vmin, vmax) };
        match self.numticks {
            0 => Vec::new(),
            1 => vec![lo],
            n => {
                let step = (hi - lo) / (n - 1) as f64;
                (0..n)
                    .map(|i| if i == n - 1 { hi } else { lo + i as f64 * step })
                    .collect()
            }
        }
    }
}

/// "Nice" ticks: at most `max_bins` intervals, step drawn from `steps`
/// times a power of ten, ticks on integer multiples of the step.
#[derive(Debug, Clone, PartialEq)]
pub struct MaxNLocator {
    pub max_bins: usize,
    pub steps: Vec<f64>,
}

impl MaxNLocator {
    #[must_use]
    pub fn new(max_bins: usize) -> Self {
        Self {
            max_bins: max_bins.max(1),
            steps: vec![1.0, 2.0, 2.5, 5.0, 10.0],
        }
    }

    /// Tick spacing for the range.
    #[must_use]
    pub fn step(&self, vmin: f64, vmax: f64) -> Option<f64> {
        let raw = (vmax - vmin).abs() / self.max_bins as f64;
        if !raw.is_finite() || raw <= 0.0 {
            return None;
        }
        let scale = 10f64.powf(raw.log10().floor());
        self.steps
            .iter()
            .map(|s| s * scale)
            .find(|&s| s >= raw * (1.0 - 1e-10))
    }

    /// Ticks inside `[vmin, vmax]`. A zero-width range gives the single value.
    #[must_use]
    pub fn tick_values(&self, vmin: f64, vmax: f64) -> Vec<f64> {
        let (lo, hi) = if vmax < vmin { (vmax, vmin) } else { (vmin, vmax) };
        let Some(step) = self.step(lo, hi) else {
            return vec![lo];
        };
        let first = (lo / step - 1e-10).ceil() as i64;
        let last = (hi / step + 1e-10).floor() as i64;
        (first..=last).map(|k| k as f64 * step).collect()
    }
}

/// Fixed-point tick label format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickFormat {
    decimals: usize,
}

impl TickFormat {
    #[must_use]
    pub fn fixed(decimals: usize) -> Self {
        Self { decimals }
    }

    /// Parse a printf-style `%.Nf` (or zero-padded `%.0Nf`) pattern.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::UnsupportedFormat`] for anything else.
    pub fn parse(pattern: &str) -> Result<Self> {
        let unsupported = || FieldError::UnsupportedFormat(pattern.to_owned());
        let digits = pattern
            .strip_prefix("%.")
            .and_then(|rest| rest.strip_suffix('f'))
            .ok_or_else(unsupported)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(unsupported());
        }
        let decimals = digits.parse().map_err(|_| unsupported())?;
        Ok(Self { decimals })
    }

    /// Fewest decimals that show multiples of `step` exactly.
    #[must_use]
    pub fn for_step(step: f64) -> Self {
        let step = step.abs();
        let decimals = (0..=8)
            .find(|&d| {
                let scaled = step * 10f64.powi(d);
                (scaled - scaled.round()).abs() < 1e-9 * scaled.max(1.0)
            })
            .unwrap_or(8);
        Self {
            decimals: decimals as usize,
        }
    }

    #[must_use]
    pub fn decimals(&self) -> usize {
        self.decimals
    }

    #[must_use]
    pub fn format(&self, value: f64) -> String {
        let s = format!("{value:.prec$}", prec = self.decimals);
        match s.strip_prefix('-') {
            Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_owned(),
            _ => s,
        }
    }

    #[must_use]
    pub fn format_all(&self, values: &[f64]) -> Vec<String> {
        values.iter().map(|&v| self.format(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_zero_is_unsigned() {
        assert_eq!(TickFormat::fixed(2).format(-0.0001), "0.00");
        assert_eq!(TickFormat::fixed(1).format(-0.0), "0.0");
        assert_eq!(TickFormat::fixed(2).format(-0.25), "-0.25");
    }

    #[test]
    fn parse_rejects_other_patterns() {
        for bad in ["%d", "%.2e", "%.f", "0.2f", "%.2fx", ""] {
            assert!(TickFormat::parse(bad).is_err(), "{bad}");
        }
    }
}
