use std::sync::Arc;

use anyhow::{Context, Result};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::WindowBuilder;

use crate::figure::Figure;
use crate::state::{InputOutcome, State};

/// Open a window showing `figure` and block until it is closed.
///
/// # Errors
///
/// Fails if no window, adapter or device can be created, or if the GPU
/// runs out of memory while drawing.
pub fn show(figure: Figure) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let (width, height) = figure.window_size;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(figure.title.clone())
            .with_inner_size(LogicalSize::new(width, height))
            .build(&event_loop)
            .context("failed to create window")?,
    );

    let mut state = pollster::block_on(State::new(window, figure))?;
    let mut failure: Option<anyhow::Error> = None;
    tracing::info!("window open, close it or press Q to exit");

    event_loop.run(|event, elwt| {
        let Event::WindowEvent { event, window_id } = event else {
            return;
        };
        if window_id != state.window().id() {
            return;
        }
        match state.input(&event) {
            InputOutcome::Quit => elwt.exit(),
            InputOutcome::Handled => state.window().request_redraw(),
            InputOutcome::Ignored => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(physical_size) => {
                    state.resize(physical_size);
                    state.window().request_redraw();
                }
                WindowEvent::RedrawRequested => {
                    state.update();
                    match state.render() {
                        Ok(()) => {}
                        // Reconfigure the surface if lost
                        Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            failure = Some(anyhow::anyhow!("GPU out of memory"));
                            elwt.exit();
                        }
                        // Outdated and Timeout resolve on the next frame
                        Err(e) => tracing::warn!("frame skipped: {e:?}"),
                    }
                }
                _ => {}
            },
        }
    })?;

    failure.map_or(Ok(()), Err)
}
