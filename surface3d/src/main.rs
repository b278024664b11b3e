//! # surface3d
//!
//! Entry point for the surface plot binary.
//!
//! Evaluates the masked quintic bump on a 200x200 grid and, when built with
//! the `render` feature, shows it as a colour-mapped 3D surface with a colour
//! bar until the window is closed.

mod app;

use anyhow::Result;

/// Entry point for the surface plot
///
/// Determines execution mode based on compile-time features:
/// - With `render` feature: opens the plot window and blocks until it closes
/// - Without `render` feature: evaluates the surface and logs a summary
fn main() -> Result<()> {
    let execution_mode = determine_execution_mode();
    app::run(execution_mode.should_render())
}

/// How the plot is delivered
enum ExecutionMode {
    /// Interactive plot window
    Windowed,
    /// Numbers only, no window
    Headless,
}

impl ExecutionMode {
    fn should_render(&self) -> bool {
        matches!(self, ExecutionMode::Windowed)
    }
}

/// Determine execution mode based on compile-time features
fn determine_execution_mode() -> ExecutionMode {
    if cfg!(feature = "render") {
        ExecutionMode::Windowed
    } else {
        ExecutionMode::Headless
    }
}
