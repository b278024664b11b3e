//! 2D overlay drawn over the 3D axes: the colour bar and every tick label.

use glam::Mat4;

use field::Rgba;

use crate::axes::WorldLabel;
use crate::figure::{ColorTarget, Figure};
use crate::gpu_types::Vertex;
use crate::layout::{FigureLayout, PixelRect};
use crate::text::{self, Align, GlyphMetrics};

const INK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

/// Glyph scale at a device scale factor of 1.
pub const BASE_TEXT_SCALE: f32 = 0.6;

/// Colour bar tick mark length in pixels at scale 1.
const CBAR_TICK: f32 = 4.0;

/// Triangle list accumulated in normalised device coordinates.
pub struct OverlayBuilder<'a> {
    layout: &'a FigureLayout,
    target: ColorTarget,
    pub vertices: Vec<Vertex>,
}

impl<'a> OverlayBuilder<'a> {
    #[must_use]
    pub fn new(layout: &'a FigureLayout, target: ColorTarget) -> Self {
        Self {
            layout,
            target,
            vertices: Vec::new(),
        }
    }

    /// Filled pixel rectangle as two triangles.
    pub fn rect(&mut self, rect: &PixelRect, color: Rgba) {
        let color = self.target.encode(color);
        let [x0, y0] = self.layout.to_ndc(rect.x, rect.y);
        let [x1, y1] = self.layout.to_ndc(rect.right(), rect.bottom());
        for [x, y] in [[x0, y0], [x1, y0], [x1, y1], [x0, y0], [x1, y1], [x0, y1]] {
            self.vertices.push(Vertex::new([x, y, 0.0], color));
        }
    }

    pub fn label(&mut self, x: f32, y: f32, metrics: &GlyphMetrics, label: &str, align: Align) {
        let mut rects = Vec::new();
        text::push_label(&mut rects, x, y, metrics, label, align);
        for r in &rects {
            self.rect(r, INK);
        }
    }

    /// Colour bar: one band per colour map entry, an outline, and the
    /// ticks on its right side.
    pub fn colorbar(&mut self, figure: &Figure, metrics: &GlyphMetrics, px: f32) {
        let bar = self.layout.colorbar;
        let bands = figure.colormap.len().max(1);
        let band_height = bar.height / bands as f32;
        for i in 0..bands {
            let t = (i as f64 + 0.5) / bands as f64;
            let band = PixelRect {
                x: bar.x,
                y: bar.bottom() - (i + 1) as f32 * band_height,
                width: bar.width,
                height: band_height,
            };
            self.rect(&band, figure.colorbar_color(t));
        }

        let line = px.max(1.0);
        for edge in [
            PixelRect { x: bar.x, y: bar.y, width: bar.width, height: line },
            PixelRect { x: bar.x, y: bar.bottom() - line, width: bar.width, height: line },
            PixelRect { x: bar.x, y: bar.y, width: line, height: bar.height },
            PixelRect { x: bar.right() - line, y: bar.y, width: line, height: bar.height },
        ] {
            self.rect(&edge, INK);
        }

        for tick in &figure.colorbar.ticks {
            let t = figure.colorbar_position(tick.value);
            if !(0.0..=1.0).contains(&t) {
                continue;
            }
            let y = self.layout.colorbar_y(t);
            let mark = PixelRect {
                x: bar.right(),
                y: y - line / 2.0,
                width: CBAR_TICK * px,
                height: line,
            };
            self.rect(&mark, INK);
            let x = bar.right() + (CBAR_TICK + 3.0) * px;
            self.label(x, y, metrics, &tick.label, Align::Left);
        }
    }

    /// Project each label into the axes viewport and draw it there.
    pub fn world_labels(&mut self, labels: &[WorldLabel], view_proj: Mat4, metrics: &GlyphMetrics) {
        for label in labels {
            let Some((x, y)) = self.layout.project(view_proj, label.position) else {
                continue;
            };
            if !self.layout.axes.contains(x, y) {
                continue;
            }
            self.label(x, y, metrics, &label.text, label.align);
        }
    }
}

/// Overlay for one frame. `px` is the device scale factor.
#[must_use]
pub fn build(
    figure: &Figure,
    layout: &FigureLayout,
    labels: &[WorldLabel],
    view_proj: Mat4,
    target: ColorTarget,
    px: f32,
) -> Vec<Vertex> {
    let metrics = GlyphMetrics::new(BASE_TEXT_SCALE * px);
    let mut builder = OverlayBuilder::new(layout, target);
    builder.colorbar(figure, &metrics, px);
    builder.world_labels(labels, view_proj, &metrics);
    builder.vertices
}
