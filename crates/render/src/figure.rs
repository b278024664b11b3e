//! Everything drawn in the window, in data units.
//!
//! A [`Figure`] is built once from the plot constants and the evaluated
//! surface. It owns the coloured patches, the three axes with their ticks
//! and the colour bar; the GPU side only turns it into vertices.

use anyhow::{Context, Result};
use field::{BumpSurface, Colormap, MaxNLocator, Normalize, PlotConfig, Rgba, SurfacePatch, SurfaceSampling, TickFormat};
use glam::Vec3;

use crate::gpu_types::Vertex;

/// How vertex colours must be encoded for the render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    /// The target applies the sRGB transfer on write; feed it linear light.
    Srgb,
    /// The target stores values as given.
    Unorm,
}

impl ColorTarget {
    #[must_use]
    pub fn for_format(format: wgpu::TextureFormat) -> Self {
        if format.is_srgb() {
            Self::Srgb
        } else {
            Self::Unorm
        }
    }

    #[must_use]
    pub fn encode(self, color: Rgba) -> [f32; 3] {
        match self {
            Self::Srgb => color.to_linear(),
            Self::Unorm => color.rgb(),
        }
    }
}

/// One labelled tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

impl Tick {
    fn labelled(values: &[f64], format: TickFormat) -> Vec<Self> {
        values
            .iter()
            .map(|&value| Self {
                value,
                label: format.format(value),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<Tick>,
}

impl Axis {
    /// Nice ticks with labels just precise enough for the tick step.
    fn nice(min: f64, max: f64, max_bins: usize) -> Self {
        let locator = MaxNLocator::new(max_bins);
        let values = locator.tick_values(min, max);
        let format = locator
            .step(min, max)
            .map_or(TickFormat::fixed(0), TickFormat::for_step);
        Self {
            min,
            max,
            ticks: Tick::labelled(&values, format),
        }
    }
}

/// Vertical colour bar beside the axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Colorbar {
    /// Height as a fraction of the axes height.
    pub shrink: f64,
    /// Height over width.
    pub aspect: f64,
    pub ticks: Vec<Tick>,
}

/// The complete plot.
#[derive(Debug, Clone)]
pub struct Figure {
    pub title: String,
    pub window_size: (u32, u32),
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub z_axis: Axis,
    /// Box aspect normalised so its largest side is 1.
    pub box_scale: [f64; 3],
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub antialiased: bool,
    pub patches: Vec<SurfacePatch>,
    /// Face colour of each patch, same order as `patches`.
    pub patch_colors: Vec<Rgba>,
    pub colormap: Colormap,
    pub norm: Normalize,
    pub colorbar: Colorbar,
}

impl Figure {
    /// Lay out the plot for an evaluated surface.
    ///
    /// # Errors
    ///
    /// Fails on an unknown colour map, an unparsable tick format, mismatched
    /// grids or a surface with no finite heights.
    pub fn new(config: &PlotConfig, surface: &BumpSurface) -> Result<Self> {
        let colormap = config.colormap().context("failed to resolve colormap")?;
        let z_format = config.z_format().context("failed to parse z tick format")?;

        let sampling = SurfaceSampling::new(
            &surface.grid.x,
            &surface.grid.y,
            &surface.masked,
            config.rcount,
            config.ccount,
        )
        .context("failed to sample surface")?;
        let norm = Normalize::autoscale(sampling.means()).context("failed to scale colours")?;
        let patch_colors = sampling
            .patches
            .iter()
            .map(|p| colormap.map(norm.apply(p.mean_z)))
            .collect();

        let (lo, hi) = config.limits();
        let z_values = config.z_locator().tick_values(lo, hi);
        let z_axis = Axis {
            min: lo,
            max: hi,
            ticks: Tick::labelled(&z_values, z_format),
        };

        let cbar_axis = Axis::nice(norm.vmin, norm.vmax, config.colorbar_max_bins);
        let largest = config.box_aspect.iter().copied().fold(f64::MIN, f64::max);

        Ok(Self {
            title: config.window_title.to_owned(),
            window_size: config.window_size,
            x_axis: Axis::nice(lo, hi, config.xy_max_bins),
            y_axis: Axis::nice(lo, hi, config.xy_max_bins),
            z_axis,
            box_scale: config.box_aspect.map(|a| a / largest),
            azimuth_deg: config.azimuth_deg,
            elevation_deg: config.elevation_deg,
            antialiased: config.antialiased,
            patches: sampling.patches,
            patch_colors,
            colormap,
            norm,
            colorbar: Colorbar {
                shrink: config.colorbar_shrink,
                aspect: config.colorbar_aspect,
                ticks: cbar_axis.ticks,
            },
        })
    }

    fn axes(&self) -> [&Axis; 3] {
        [&self.x_axis, &self.y_axis, &self.z_axis]
    }

    /// Data point to world space. The view box becomes a box centred on the
    /// origin with half sides `box_scale`; data outside the limits is not
    /// clipped.
    #[must_use]
    pub fn to_world(&self, p: [f64; 3]) -> Vec3 {
        let mut out = [0.0f32; 3];
        for (i, axis) in self.axes().iter().enumerate() {
            let mid = 0.5 * (axis.min + axis.max);
            let half = 0.5 * (axis.max - axis.min);
            let t = if half == 0.0 { 0.0 } else { (p[i] - mid) / half };
            out[i] = (t * self.box_scale[i]) as f32;
        }
        Vec3::from(out)
    }

    /// Half sides of the view box in world space.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(
            self.box_scale[0] as f32,
            self.box_scale[1] as f32,
            self.box_scale[2] as f32,
        )
    }

    /// Filled surface as a triangle list.
    ///
    /// Each patch is fanned from its centroid, so every triangle of a patch
    /// shares the patch's flat face colour.
    #[must_use]
    pub fn surface_vertices(&self, target: ColorTarget) -> Vec<Vertex> {
        let total: usize = self.patches.iter().map(|p| p.perimeter.len() * 3).sum();
        let mut vertices = Vec::with_capacity(total);
        for (patch, &color) in self.patches.iter().zip(&self.patch_colors) {
            let color = target.encode(color);
            let centre = self.to_world(patch.centroid()).to_array();
            let n = patch.perimeter.len();
            for i in 0..n {
                let a = self.to_world(patch.perimeter[i]).to_array();
                let b = self.to_world(patch.perimeter[(i + 1) % n]).to_array();
                vertices.push(Vertex::new(centre, color));
                vertices.push(Vertex::new(a, color));
                vertices.push(Vertex::new(b, color));
            }
        }
        vertices
    }

    /// Colour bar colour at a normalised height in `[0, 1]`.
    #[must_use]
    pub fn colorbar_color(&self, t: f64) -> Rgba {
        self.colormap.map(t)
    }

    /// Normalised colour bar position of a colour bar tick value.
    #[must_use]
    pub fn colorbar_position(&self, value: f64) -> f64 {
        self.norm.apply(value)
    }
}
