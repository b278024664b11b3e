#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::many_single_char_names,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::too_many_lines
)]

//! Interactive window for the bump surface plot.
//!
//! [`Figure`] lays the plot out in data units; [`show`] opens a window,
//! draws it with wgpu and blocks until the window is closed.

pub mod axes;
pub mod camera;
pub mod figure;
pub mod gpu_types;
pub mod layout;
pub mod overlay;
pub mod pipeline;
pub mod run;
pub mod snapshot;
pub mod state;
pub mod text;

pub use figure::{ColorTarget, Figure};
pub use run::show;
