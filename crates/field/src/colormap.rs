//! Colour maps and value normalisation.
//!
//! `coolwarm` is Moreland's diverging map: its two end colours are
//! interpolated in Msh space (polar CIELAB) through an unsaturated white at
//! `M = 88`, which keeps perceived lightness symmetric around the midpoint.

use std::f64::consts::{FRAC_PI_3, PI};

use crate::{FieldError, Result};

/// Registered colour map names (case-sensitive).
pub const SUPPORTED: &[&str] = &["coolwarm"];

/// Entries in a sampled lookup table.
pub const LUT_SIZE: usize = 256;

const COOL: [f64; 3] = [59.0 / 255.0, 76.0 / 255.0, 192.0 / 255.0];
const WARM: [f64; 3] = [180.0 / 255.0, 4.0 / 255.0, 38.0 / 255.0];
const WHITE_MAGNITUDE: f64 = 88.0;

/// D65 reference white.
const WHITE_POINT: [f64; 3] = [0.950_47, 1.0, 1.088_83];

/// sRGB colour with alpha, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub fn rgb(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Colour converted to linear light, for sRGB render targets.
    #[must_use]
    pub fn to_linear(self) -> [f32; 3] {
        [
            srgb_to_linear(f64::from(self.r)) as f32,
            srgb_to_linear(f64::from(self.g)) as f32,
            srgb_to_linear(f64::from(self.b)) as f32,
        ]
    }
}

/// A colour map sampled into a lookup table.
#[derive(Debug, Clone)]
pub struct Colormap {
    name: String,
    lut: Vec<Rgba>,
    bad: Rgba,
}

impl Colormap {
    /// # Errors
    ///
    /// Returns [`FieldError::UnknownColormap`] for names not in [`SUPPORTED`].
    pub fn by_name(name: &str) -> Result<Self> {
        if !SUPPORTED.contains(&name) {
            return Err(FieldError::UnknownColormap(name.to_owned()));
        }
        Ok(Self::coolwarm())
    }

    #[must_use]
    pub fn coolwarm() -> Self {
        Self::diverging("coolwarm", COOL, WARM, LUT_SIZE)
    }

    /// Msh diverging map between two sRGB colours.
    #[must_use]
    pub fn diverging(name: &str, low: [f64; 3], high: [f64; 3], n: usize) -> Self {
        let n = n.max(2);
        let lut = (0..n)
            .map(|i| {
                let [r, g, b] = diverging_rgb(low, high, i as f64 / (n - 1) as f64);
                Rgba::new(r as f32, g as f32, b as f32, 1.0)
            })
            .collect();
        Self {
            name: name.to_owned(),
            lut,
            bad: Rgba::TRANSPARENT,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lut.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lut.is_empty()
    }

    /// Colour for a normalised value.
    ///
    /// `t` is quantised to `floor(t * N)` and clamped into the table, so
    /// values outside `[0, 1]` take the end colours. NaN gives the "bad"
    /// colour.
    #[must_use]
    pub fn map(&self, t: f64) -> Rgba {
        if t.is_nan() {
            return self.bad;
        }
        let n = self.lut.len();
        let idx = (t * n as f64).floor().clamp(0.0, (n - 1) as f64) as usize;
        self.lut[idx]
    }
}

/// Linear map of `[vmin, vmax]` onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    pub vmin: f64,
    pub vmax: f64,
}

impl Normalize {
    #[must_use]
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    /// Range of the finite values.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::EmptyField`] if there are no finite values.
    pub fn autoscale(values: impl IntoIterator<Item = f64>) -> Result<Self> {
        let mut range: Option<(f64, f64)> = None;
        for v in values.into_iter().filter(|v| v.is_finite()) {
            range = Some(match range {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            });
        }
        range
            .map(|(lo, hi)| Self::new(lo, hi))
            .ok_or(FieldError::EmptyField)
    }

    /// Normalised position of `v`; not clamped. A zero-width range maps to 0.
    #[must_use]
    pub fn apply(&self, v: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span == 0.0 {
            0.0
        } else {
            (v - self.vmin) / span
        }
    }
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn rgb_to_lab(rgb: [f64; 3]) -> [f64; 3] {
    let [r, g, b] = rgb.map(srgb_to_linear);
    let x = 0.4124 * r + 0.3576 * g + 0.1805 * b;
    let y = 0.2126 * r + 0.7152 * g + 0.0722 * b;
    let z = 0.0193 * r + 0.1192 * g + 0.9505 * b;

    let f = |t: f64| {
        if t > 0.008_856 {
            t.cbrt()
        } else {
            7.787 * t + 16.0 / 116.0
        }
    };
    let fx = f(x / WHITE_POINT[0]);
    let fy = f(y / WHITE_POINT[1]);
    let fz = f(z / WHITE_POINT[2]);
    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

fn lab_to_rgb(lab: [f64; 3]) -> [f64; 3] {
    let [l, a, b] = lab;
    let fy = (l + 16.0) / 116.0;
    let fx = fy + a / 500.0;
    let fz = fy - b / 200.0;
    let finv = |t: f64| {
        if t > 0.206_893 {
            t * t * t
        } else {
            (t - 16.0 / 116.0) / 7.787
        }
    };
    let x = finv(fx) * WHITE_POINT[0];
    let y = finv(fy) * WHITE_POINT[1];
    let z = finv(fz) * WHITE_POINT[2];

    let r = 3.2406 * x - 1.5372 * y - 0.4986 * z;
    let g = -0.9689 * x + 1.8758 * y + 0.0415 * z;
    let b = 0.0557 * x - 0.2040 * y + 1.0570 * z;
    [r, g, b].map(|c| linear_to_srgb(c).clamp(0.0, 1.0))
}

fn lab_to_msh([l, a, b]: [f64; 3]) -> [f64; 3] {
    let m = (l * l + a * a + b * b).sqrt();
    let s = if m > 0.0 { (l / m).clamp(-1.0, 1.0).acos() } else { 0.0 };
    let h = b.atan2(a);
    [m, s, h]
}

fn msh_to_lab([m, s, h]: [f64; 3]) -> [f64; 3] {
    [m * s.cos(), m * s.sin() * h.cos(), m * s.sin() * h.sin()]
}

/// Hue for an unsaturated colour of magnitude `m_unsat` next to a
/// saturated `msh`, spun away from the saturated hue.
fn adjust_hue([m, s, h]: [f64; 3], m_unsat: f64) -> f64 {
    if m >= m_unsat {
        return h;
    }
    let spin = s * (m_unsat * m_unsat - m * m).sqrt() / (m * s.sin());
    if h > -FRAC_PI_3 {
        h + spin
    } else {
        h - spin
    }
}

fn hue_distance(h1: f64, h2: f64) -> f64 {
    let d = (h1 - h2).abs() % (2.0 * PI);
    if d > PI {
        2.0 * PI - d
    } else {
        d
    }
}

fn diverging_rgb(low: [f64; 3], high: [f64; 3], t: f64) -> [f64; 3] {
    let mut msh1 = lab_to_msh(rgb_to_lab(low));
    let mut msh2 = lab_to_msh(rgb_to_lab(high));
    let mut t = t;

    if msh1[1] > 0.05 && msh2[1] > 0.05 && hue_distance(msh1[2], msh2[2]) > FRAC_PI_3 {
        let mid = msh1[0].max(msh2[0]).max(WHITE_MAGNITUDE);
        if t < 0.5 {
            msh2 = [mid, 0.0, 0.0];
            t *= 2.0;
        } else {
            msh1 = [mid, 0.0, 0.0];
            t = 2.0 * t - 1.0;
        }
    }

    if msh1[1] < 0.05 && msh2[1] > 0.05 {
        msh1[2] = adjust_hue(msh2, msh1[0]);
    } else if msh2[1] < 0.05 && msh1[1] > 0.05 {
        msh2[2] = adjust_hue(msh1, msh2[0]);
    }

    let msh = [
        (1.0 - t) * msh1[0] + t * msh2[0],
        (1.0 - t) * msh1[1] + t * msh2[1],
        (1.0 - t) * msh1[2] + t * msh2[2],
    ];
    lab_to_rgb(msh_to_lab(msh))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lab_round_trip() {
        for rgb in [COOL, WARM, [0.5, 0.5, 0.5], [0.1, 0.9, 0.3]] {
            let back = lab_to_rgb(rgb_to_lab(rgb));
            for (a, b) in rgb.iter().zip(back) {
                assert!((a - b).abs() < 2e-3, "{rgb:?} -> {back:?}");
            }
        }
    }

    #[test]
    fn hue_distance_wraps() {
        assert!((hue_distance(3.0, -3.0) - (2.0 * PI - 6.0)).abs() < 1e-12);
        assert!((hue_distance(0.5, 0.25) - 0.25).abs() < 1e-12);
    }
}
