//! Seven-segment tick labels.
//!
//! Tick labels only ever contain digits, a minus sign and a decimal point,
//! so they are drawn as solid rectangles instead of through a font atlas.
//!
//! ```text
//!  --a--
//! |     |
//! f     b
//! |     |
//!  --g--
//! |     |
//! e     c
//! |     |
//!  --d--
//! ```

use crate::layout::PixelRect;

const SEG_A: u8 = 1 << 0;
const SEG_B: u8 = 1 << 1;
const SEG_C: u8 = 1 << 2;
const SEG_D: u8 = 1 << 3;
const SEG_E: u8 = 1 << 4;
const SEG_F: u8 = 1 << 5;
const SEG_G: u8 = 1 << 6;

/// Horizontal anchoring of a label relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Lit segments for a character, `None` for characters without a glyph.
#[must_use]
pub fn segments(ch: char) -> Option<u8> {
    let bits = match ch {
        '0' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,
        '1' => SEG_B | SEG_C,
        '2' => SEG_A | SEG_B | SEG_D | SEG_E | SEG_G,
        '3' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_G,
        '4' => SEG_B | SEG_C | SEG_F | SEG_G,
        '5' => SEG_A | SEG_C | SEG_D | SEG_F | SEG_G,
        '6' => SEG_A | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
        '7' => SEG_A | SEG_B | SEG_C,
        '8' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
        '9' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,
        '-' => SEG_G,
        _ => return None,
    };
    Some(bits)
}

/// Glyph metrics at a given scale, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    pub thick: f32,
    pub width: f32,
    pub height: f32,
    pub spacing: f32,
}

impl GlyphMetrics {
    #[must_use]
    pub fn new(scale: f32) -> Self {
        Self {
            thick: 2.0 * scale,
            width: 10.0 * scale,
            height: 18.0 * scale,
            spacing: 4.0 * scale,
        }
    }

    fn glyph_width(&self, ch: char) -> f32 {
        match ch {
            '.' => self.thick,
            _ => self.width,
        }
    }

    /// Width of the inked extent of `text`.
    #[must_use]
    pub fn text_width(&self, text: &str) -> f32 {
        let n = text.chars().count();
        if n == 0 {
            return 0.0;
        }
        let glyphs: f32 = text.chars().map(|c| self.glyph_width(c)).sum();
        glyphs + self.spacing * (n - 1) as f32
    }
}

/// Push the rectangles of one character with its top left at `(x, y)`;
/// returns the advance to the next character.
pub fn push_char(out: &mut Vec<PixelRect>, x: f32, y: f32, m: &GlyphMetrics, ch: char) -> f32 {
    let advance = m.glyph_width(ch) + m.spacing;
    let mut rect = |x0: f32, y0: f32, x1: f32, y1: f32| {
        out.push(PixelRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        });
    };

    if ch == '.' {
        rect(x, y + m.height - m.thick, x + m.thick, y + m.height);
        return advance;
    }
    let Some(bits) = segments(ch) else {
        return advance;
    };

    let (t, w, h) = (m.thick, m.width, m.height);
    let mid = y + h / 2.0;
    if bits & SEG_A != 0 {
        rect(x + t, y, x + w - t, y + t);
    }
    if bits & SEG_B != 0 {
        rect(x + w - t, y + t, x + w, mid - t / 2.0);
    }
    if bits & SEG_C != 0 {
        rect(x + w - t, mid + t / 2.0, x + w, y + h - t);
    }
    if bits & SEG_D != 0 {
        rect(x + t, y + h - t, x + w - t, y + h);
    }
    if bits & SEG_E != 0 {
        rect(x, mid + t / 2.0, x + t, y + h - t);
    }
    if bits & SEG_F != 0 {
        rect(x, y + t, x + t, mid - t / 2.0);
    }
    if bits & SEG_G != 0 {
        rect(x + t, mid - t / 2.0, x + w - t, mid + t / 2.0);
    }
    advance
}

/// Push a label positioned by `align` horizontally and centred vertically
/// on `(x, y)`.
pub fn push_label(out: &mut Vec<PixelRect>, x: f32, y: f32, m: &GlyphMetrics, text: &str, align: Align) {
    let width = m.text_width(text);
    let mut pen = match align {
        Align::Left => x,
        Align::Center => x - width / 2.0,
        Align::Right => x - width,
    };
    let top = y - m.height / 2.0;
    for ch in text.chars() {
        pen += push_char(out, pen, top, m, ch);
    }
}
