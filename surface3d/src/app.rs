//! # Application logic
//!
//! [`run`] evaluates the surface from [`field::PlotConfig`], logs what was
//! computed and hands the figure to the viewer when rendering is enabled.

use anyhow::{Context, Result};
use field::{BumpSurface, FieldSummary, PlotConfig};

/// Evaluate the surface and show it.
///
/// With `enable_render` and the `render` feature the call blocks until the
/// plot window is closed; otherwise it returns after logging.
///
/// # Errors
///
/// Returns any error from evaluating the field, laying out the figure or
/// creating the window and GPU device.
#[cfg_attr(not(feature = "render"), allow(unused_variables))]
pub fn run(enable_render: bool) -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = PlotConfig::default();
    tracing::info!(
        range = ?(config.range_start, config.range_stop),
        step = config.step,
        smoothing = ?config.smoothing,
        colormap = config.colormap,
        "evaluating surface"
    );
    let evaluated = evaluate(&config)?;
    let summary = evaluated.summary;
    tracing::info!(
        shape = ?summary.shape,
        min = summary.min,
        max = summary.max,
        peak = ?summary.argmax,
        inside_disk = summary.inside_disk,
        "surface evaluated"
    );
    tracing::info!(z_labels = ?evaluated.z_labels, "z axis ticks");

    #[cfg(feature = "render")]
    if enable_render {
        let figure = render::Figure::new(&config, &evaluated.surface)?;
        tracing::info!(
            patches = figure.patches.len(),
            vmin = figure.norm.vmin,
            vmax = figure.norm.vmax,
            "showing figure"
        );
        render::show(figure)?;
        tracing::info!("window closed");
        return Ok(());
    }

    tracing::info!("rendering disabled, exiting");
    Ok(())
}

/// Everything computed before a window is involved.
#[cfg_attr(not(feature = "render"), allow(dead_code))]
struct Evaluated {
    surface: BumpSurface,
    summary: FieldSummary,
    z_labels: Vec<String>,
}

fn evaluate(config: &PlotConfig) -> Result<Evaluated> {
    let surface = config.surface().context("failed to evaluate surface")?;
    let summary = surface.summary().context("failed to summarise surface")?;
    let (lo, hi) = config.limits();
    let z_labels = config
        .z_format()
        .context("invalid z tick format")?
        .format_all(&config.z_locator().tick_values(lo, hi));
    Ok(Evaluated {
        surface,
        summary,
        z_labels,
    })
}
