//! Where the axes and the colour bar sit in the window.
//!
//! All rectangles are in physical pixels with the origin at the top left
//! and `y` growing downwards, matching window cursor coordinates.

use glam::{Mat4, Vec3, Vec4};

/// Share of the window width given to the 3D axes; the colour bar and its
/// labels use the rest.
pub const AXES_WIDTH_FRACTION: f32 = 0.8;

/// Height of the region the colour bar is shrunk relative to, as a share of
/// the window height.
pub const AXES_HEIGHT_FRACTION: f32 = 0.77;

/// Gap between the axes region and the colour bar, as a share of the
/// remaining width.
const COLORBAR_PAD_FRACTION: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureLayout {
    pub width: f32,
    pub height: f32,
    /// Viewport the 3D scene is rendered into.
    pub axes: PixelRect,
    pub colorbar: PixelRect,
}

impl FigureLayout {
    /// Layout for a window of `width` x `height` pixels.
    ///
    /// The colour bar is `shrink` times the axes height tall and
    /// `1 / aspect` of its own height wide, centred vertically.
    #[must_use]
    pub fn new(width: u32, height: u32, shrink: f64, aspect: f64) -> Self {
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        let axes = PixelRect {
            x: 0.0,
            y: 0.0,
            width: (w * AXES_WIDTH_FRACTION).floor().max(1.0),
            height: h,
        };

        let bar_height = shrink as f32 * AXES_HEIGHT_FRACTION * h;
        let bar_width = if aspect > 0.0 {
            bar_height / aspect as f32
        } else {
            0.0
        };
        let colorbar = PixelRect {
            x: axes.right() + COLORBAR_PAD_FRACTION * (w - axes.width),
            y: 0.5 * (h - bar_height),
            width: bar_width,
            height: bar_height,
        };

        Self {
            width: w,
            height: h,
            axes,
            colorbar,
        }
    }

    /// Aspect ratio for the 3D camera.
    #[must_use]
    pub fn axes_aspect(&self) -> f32 {
        self.axes.width / self.axes.height
    }

    /// Window pixel to normalised device coordinates.
    #[must_use]
    pub fn to_ndc(&self, x: f32, y: f32) -> [f32; 2] {
        [2.0 * x / self.width - 1.0, 1.0 - 2.0 * y / self.height]
    }

    /// Window pixel of a world point seen through `view_proj` in the axes
    /// viewport, or `None` if the point is behind the camera.
    #[must_use]
    pub fn project(&self, view_proj: Mat4, world: Vec3) -> Option<(f32, f32)> {
        let clip: Vec4 = view_proj * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        Some((
            self.axes.x + 0.5 * (ndc_x + 1.0) * self.axes.width,
            self.axes.y + 0.5 * (1.0 - ndc_y) * self.axes.height,
        ))
    }

    /// Pixel row of a normalised colour bar position, `0` at the bottom.
    #[must_use]
    pub fn colorbar_y(&self, t: f64) -> f32 {
        self.colorbar.bottom() - t as f32 * self.colorbar.height
    }
}
