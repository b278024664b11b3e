//! Every constant the plot is built from.

use crate::bump::{BumpSurface, Smoothing};
use crate::grid::Grid;
use crate::colormap::Colormap;
use crate::ticks::{LinearLocator, TickFormat};
use crate::Result;

/// Plot constants. There is no runtime override; [`Default`] is the plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Start of the sample range on both axes (inclusive).
    pub range_start: f64,
    /// End of the sample range on both axes (exclusive).
    pub range_stop: f64,
    pub step: f64,
    /// Radial profile of the bump.
    pub smoothing: Smoothing,
    /// Symmetric view limit applied to x, y and z.
    pub axis_limit: f64,
    pub z_numticks: usize,
    pub z_tick_format: &'static str,
    /// Max nice ticks on the x and y axes.
    pub xy_max_bins: usize,
    pub colormap: &'static str,
    /// Colour bar height as a fraction of the axes height.
    pub colorbar_shrink: f64,
    /// Colour bar long side over short side.
    pub colorbar_aspect: f64,
    pub colorbar_max_bins: usize,
    pub antialiased: bool,
    /// Max samples per direction drawn by the surface.
    pub rcount: usize,
    pub ccount: usize,
    /// Box aspect (x, y, z).
    pub box_aspect: [f64; 3],
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub window_title: &'static str,
    pub window_size: (u32, u32),
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            range_start: -1.0,
            range_stop: 1.0,
            step: 0.01,
            smoothing: Smoothing::Quintic,
            axis_limit: 1.01,
            z_numticks: 10,
            z_tick_format: "%.02f",
            xy_max_bins: 9,
            colormap: "coolwarm",
            colorbar_shrink: 0.5,
            colorbar_aspect: 5.0,
            colorbar_max_bins: 5,
            antialiased: true,
            rcount: 50,
            ccount: 50,
            box_aspect: [4.0, 4.0, 3.0],
            azimuth_deg: -60.0,
            elevation_deg: 30.0,
            window_title: "3D surface (color map)",
            window_size: (800, 600),
        }
    }
}

impl PlotConfig {
    /// View limits as `(min, max)`.
    #[must_use]
    pub fn limits(&self) -> (f64, f64) {
        (-self.axis_limit, self.axis_limit)
    }

    /// # Errors
    ///
    /// Returns [`crate::FieldError::InvalidStep`] for a bad step.
    pub fn surface(&self) -> Result<BumpSurface> {
        let grid = Grid::square(self.range_start, self.range_stop, self.step)?;
        Ok(BumpSurface::evaluate_with(grid, self.smoothing))
    }

    /// # Errors
    ///
    /// Returns [`crate::FieldError::UnknownColormap`] for an unregistered name.
    pub fn colormap(&self) -> Result<Colormap> {
        Colormap::by_name(self.colormap)
    }

    #[must_use]
    pub fn z_locator(&self) -> LinearLocator {
        LinearLocator::new(self.z_numticks)
    }

    /// # Errors
    ///
    /// Returns [`crate::FieldError::UnsupportedFormat`] for a bad pattern.
    pub fn z_format(&self) -> Result<TickFormat> {
        TickFormat::parse(self.z_tick_format)
    }
}
