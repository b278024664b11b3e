use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use glam::Vec3;
use wgpu::util::DeviceExt;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Window;

use crate::axes::{self, WorldLabel};
use crate::camera::{Camera, OrbitController};
use crate::figure::{ColorTarget, Figure};
use crate::gpu_types::{CameraUniform, Vertex};
use crate::layout::FigureLayout;
use crate::overlay;
use crate::pipeline::{self, PipelineKind};
use crate::snapshot::{self, PendingSnapshot};

/// Distance of the eye from the box centre at startup.
const VIEW_DISTANCE: f32 = 7.0;

const BACKGROUND: wgpu::Color = wgpu::Color::WHITE;

/// What the event loop should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Ignored,
    Handled,
    Quit,
}

/// Vertex buffer that grows on demand.
struct DynamicBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: u64,
    count: u32,
}

impl DynamicBuffer {
    fn new(device: &wgpu::Device, label: &'static str) -> Self {
        let capacity = std::mem::size_of::<Vertex>() as u64 * 64;
        Self {
            label,
            buffer: device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: capacity,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }),
            capacity,
            count: 0,
        }
    }

    fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, vertices: &[Vertex]) {
        let data: &[u8] = bytemuck::cast_slice(vertices);
        let required = data.len() as u64;
        if required > self.capacity {
            self.buffer.destroy();
            let capacity = required.next_power_of_two();
            self.buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: capacity,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.capacity = capacity;
        }
        if required > 0 {
            queue.write_buffer(&self.buffer, 0, data);
        }
        self.count = vertices.len() as u32;
    }
}

pub struct State {
    pub window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    color_target: ColorTarget,
    sample_count: u32,
    surface_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    overlay_pipeline: wgpu::RenderPipeline,
    depth_view: wgpu::TextureView,
    msaa_view: Option<wgpu::TextureView>,
    surface_buffer: wgpu::Buffer,
    surface_vertex_count: u32,
    line_buffer: DynamicBuffer,
    overlay_buffer: DynamicBuffer,
    camera: Camera,
    orbit: OrbitController,
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    layout: FigureLayout,
    figure: Figure,
    snapshot_requested: bool,
}

impl State {
    pub async fn new(window: Arc<Window>, figure: Figure) -> Result<Self> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to get adapter")?;
        tracing::info!(adapter = ?adapter.get_info().name, backend = ?adapter.get_info().backend, "using adapter");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Surface Plot Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .context("failed to request device")?;

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(wgpu::TextureFormat::is_srgb)
            .or_else(|| caps.formats.first().copied())
            .context("surface reports no formats")?;
        let mut usage = wgpu::TextureUsages::RENDER_ATTACHMENT;
        if caps.usages.contains(wgpu::TextureUsages::COPY_SRC) {
            usage |= wgpu::TextureUsages::COPY_SRC;
        }
        let config = wgpu::SurfaceConfiguration {
            usage,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            desired_maximum_frame_latency: 2,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let color_target = ColorTarget::for_format(format);
        let sample_count = pipeline::choose_sample_count(&adapter, format, figure.antialiased);
        tracing::info!(?format, sample_count, "configured surface");

        let layout = FigureLayout::new(
            config.width,
            config.height,
            figure.colorbar.shrink,
            figure.colorbar.aspect,
        );
        let orbit = OrbitController::new(
            figure.azimuth_deg as f32,
            figure.elevation_deg as f32,
            VIEW_DISTANCE,
        );
        let mut camera = Camera {
            eye: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Z,
            aspect: layout.axes_aspect(),
            fovy: 30.0f32.to_radians(),
            znear: 0.1,
            zfar: 100.0,
        };
        orbit.update_camera(&mut camera);

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update(camera.build_view_projection_matrix());
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = pipeline::create_bind_group_layout(&device);
        let bind_group = pipeline::create_bind_group(&device, &bind_group_layout, &camera_buffer);
        let shader = pipeline::create_shader(&device);
        let make = |kind| {
            pipeline::create_pipeline(&device, &shader, &bind_group_layout, format, sample_count, kind)
        };
        let surface_pipeline = make(PipelineKind::Surface);
        let line_pipeline = make(PipelineKind::Lines);
        let overlay_pipeline = make(PipelineKind::Overlay);

        let surface_vertices = figure.surface_vertices(color_target);
        let surface_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Surface Vertex Buffer"),
            contents: bytemuck::cast_slice(&surface_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        tracing::debug!(vertices = surface_vertices.len(), "uploaded surface mesh");

        let depth_view = pipeline::create_depth_view(&device, config.width, config.height, sample_count);
        let msaa_view = pipeline::create_msaa_view(&device, format, config.width, config.height, sample_count);
        let line_buffer = DynamicBuffer::new(&device, "Axes Line Buffer");
        let overlay_buffer = DynamicBuffer::new(&device, "Overlay Buffer");

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            color_target,
            sample_count,
            surface_pipeline,
            line_pipeline,
            overlay_pipeline,
            depth_view,
            msaa_view,
            surface_buffer,
            surface_vertex_count: surface_vertices.len() as u32,
            line_buffer,
            overlay_buffer,
            camera,
            orbit,
            camera_uniform,
            camera_buffer,
            bind_group,
            layout,
            figure,
            snapshot_requested: false,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.layout = FigureLayout::new(
                new_size.width,
                new_size.height,
                self.figure.colorbar.shrink,
                self.figure.colorbar.aspect,
            );
            self.camera.aspect = self.layout.axes_aspect();
            self.depth_view = pipeline::create_depth_view(
                &self.device,
                new_size.width,
                new_size.height,
                self.sample_count,
            );
            self.msaa_view = pipeline::create_msaa_view(
                &self.device,
                self.config.format,
                new_size.width,
                new_size.height,
                self.sample_count,
            );
        }
    }

    pub fn input(&mut self, event: &WindowEvent) -> InputOutcome {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::KeyR => {
                    self.orbit.reset();
                    InputOutcome::Handled
                }
                KeyCode::KeyS => {
                    self.snapshot_requested = true;
                    InputOutcome::Handled
                }
                KeyCode::KeyQ | KeyCode::Escape => InputOutcome::Quit,
                _ => InputOutcome::Ignored,
            },
            WindowEvent::MouseInput { state, button, .. } => {
                if *button == MouseButton::Left {
                    self.orbit.mouse_pressed = *state == ElementState::Pressed;
                }
                InputOutcome::Ignored
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.orbit.process_cursor(position.x, position.y) {
                    InputOutcome::Handled
                } else {
                    InputOutcome::Ignored
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y * 0.1,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.02,
                };
                self.orbit.process_scroll(scroll);
                InputOutcome::Handled
            }
            _ => InputOutcome::Ignored,
        }
    }

    /// Rebuild the view dependent geometry for the current camera.
    pub fn update(&mut self) {
        self.orbit.update_camera(&mut self.camera);
        let view_proj = self.camera.build_view_projection_matrix();
        self.camera_uniform.update(view_proj);
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );

        let decorations = axes::decorate(&self.figure, self.camera.eye - self.camera.target, self.color_target);
        self.line_buffer.write(&self.device, &self.queue, &decorations.lines);
        let overlay = self.build_overlay(&decorations.labels, view_proj);
        self.overlay_buffer.write(&self.device, &self.queue, &overlay);
    }

    fn build_overlay(&self, labels: &[WorldLabel], view_proj: glam::Mat4) -> Vec<Vertex> {
        overlay::build(
            &self.figure,
            &self.layout,
            labels,
            view_proj,
            self.color_target,
            self.window.scale_factor() as f32,
        )
    }

    /// Draw one frame. A pending snapshot is written after the frame is
    /// submitted and before it is presented.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });
        {
            let (color_view, resolve_target) = match &self.msaa_view {
                Some(msaa) => (msaa, Some(&view)),
                None => (&view, None),
            };
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Figure Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(BACKGROUND),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);

            let axes = self.layout.axes;
            rpass.set_viewport(axes.x, axes.y, axes.width, axes.height, 0.0, 1.0);
            rpass.set_pipeline(&self.surface_pipeline);
            rpass.set_vertex_buffer(0, self.surface_buffer.slice(..));
            rpass.draw(0..self.surface_vertex_count, 0..1);

            if self.line_buffer.count > 0 {
                rpass.set_pipeline(&self.line_pipeline);
                rpass.set_vertex_buffer(0, self.line_buffer.buffer.slice(..));
                rpass.draw(0..self.line_buffer.count, 0..1);
            }

            rpass.set_viewport(0.0, 0.0, self.layout.width, self.layout.height, 0.0, 1.0);
            if self.overlay_buffer.count > 0 {
                rpass.set_pipeline(&self.overlay_pipeline);
                rpass.set_vertex_buffer(0, self.overlay_buffer.buffer.slice(..));
                rpass.draw(0..self.overlay_buffer.count, 0..1);
            }
        }

        let pending = if std::mem::take(&mut self.snapshot_requested) {
            self.record_snapshot(&mut encoder, &output.texture)
        } else {
            None
        };
        self.queue.submit(Some(encoder.finish()));
        if let Some(pending) = pending {
            match pending.save(&self.device) {
                Ok(path) => tracing::info!(path = %path.display(), "saved snapshot"),
                Err(e) => tracing::error!("failed to save snapshot: {e:#}"),
            }
        }
        output.present();

        Ok(())
    }

    fn record_snapshot(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        texture: &wgpu::Texture,
    ) -> Option<PendingSnapshot> {
        if !self.config.usage.contains(wgpu::TextureUsages::COPY_SRC) {
            tracing::warn!("surface does not allow copies, snapshot skipped");
            return None;
        }
        let path = PathBuf::from(snapshot::file_name(&chrono::Local::now()));
        PendingSnapshot::record(&self.device, encoder, texture, path)
    }
}
