#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::module_name_repetitions
)]

//! Numerics behind the bump surface plot.
//!
//! Everything here is plain `f64` array math with no GPU or window
//! dependencies: the sample grid, the masked quintic height field, the
//! sampling the plot applies to it, the colour map and the tick logic the
//! renderer draws from.

use thiserror::Error;

pub mod bump;
pub mod colormap;
pub mod config;
pub mod grid;
pub mod sampling;
pub mod ticks;

pub use bump::{
    masked_height, smoothstep3, smoothstep5, smoothstep7, smoothstep_sin, BumpSurface,
    FieldSummary, Smoothing,
};
pub use colormap::{Colormap, Normalize, Rgba};
pub use config::PlotConfig;
pub use grid::{arange, Field2, Grid};
pub use sampling::{sample_indices, SurfacePatch, SurfaceSampling};
pub use ticks::{LinearLocator, MaxNLocator, TickFormat};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("step must be finite and positive, got {0}")]
    InvalidStep(f64),
    #[error("shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    #[error("unknown colormap '{0}'")]
    UnknownColormap(String),
    #[error("unsupported tick format '{0}', expected %.Nf")]
    UnsupportedFormat(String),
    #[error("field has no samples")]
    EmptyField,
}

pub type Result<T> = std::result::Result<T, FieldError>;
