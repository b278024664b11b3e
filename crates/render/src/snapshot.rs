//! Saving the current frame as a PNG.
//!
//! The presented swapchain texture is copied into a mappable buffer in the
//! same submission as the frame, then read back once the GPU is done.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};

const BYTES_PER_PIXEL: u32 = 4;

/// `surface3d_<YYYYmmdd_HHMMSS>.png` for the given time.
#[must_use]
pub fn file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("surface3d_{}.png", now.format("%Y%m%d_%H%M%S"))
}

/// Row pitch of the readback buffer.
#[must_use]
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * BYTES_PER_PIXEL;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Channel order of a 4 byte colour format, `None` if it cannot be saved.
#[must_use]
pub fn channel_order(format: wgpu::TextureFormat) -> Option<ChannelOrder> {
    match format {
        wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => {
            Some(ChannelOrder::Rgba)
        }
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => {
            Some(ChannelOrder::Bgra)
        }
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    Rgba,
    Bgra,
}

/// Strip row padding and convert to tightly packed RGBA with opaque alpha.
#[must_use]
pub fn unpad_rows(data: &[u8], width: u32, height: u32, padded: u32, order: ChannelOrder) -> Vec<u8> {
    let row_bytes = (width * BYTES_PER_PIXEL) as usize;
    let mut pixels = Vec::with_capacity(row_bytes * height as usize);
    for y in 0..height as usize {
        let start = y * padded as usize;
        let Some(row) = data.get(start..start + row_bytes) else {
            break;
        };
        for px in row.chunks_exact(4) {
            match order {
                ChannelOrder::Rgba => pixels.extend_from_slice(&[px[0], px[1], px[2], 255]),
                ChannelOrder::Bgra => pixels.extend_from_slice(&[px[2], px[1], px[0], 255]),
            }
        }
    }
    pixels
}

/// A copy recorded into a frame's command buffer, waiting to be read.
pub struct PendingSnapshot {
    buffer: wgpu::Buffer,
    width: u32,
    height: u32,
    padded_bytes_per_row: u32,
    order: ChannelOrder,
    path: PathBuf,
}

impl PendingSnapshot {
    /// Record a copy of `texture` into `encoder`.
    ///
    /// Returns `None` (and logs) for formats that cannot be written as PNG.
    pub fn record(
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        texture: &wgpu::Texture,
        path: PathBuf,
    ) -> Option<Self> {
        let Some(order) = channel_order(texture.format()) else {
            tracing::warn!(format = ?texture.format(), "cannot save frames of this format");
            return None;
        };
        let (width, height) = (texture.width(), texture.height());
        let padded = padded_bytes_per_row(width);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Snapshot Buffer"),
            size: u64::from(padded) * u64::from(height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });
        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        Some(Self {
            buffer,
            width,
            height,
            padded_bytes_per_row: padded,
            order,
            path,
        })
    }

    /// Wait for the copy and write the PNG. Call after the frame is submitted.
    ///
    /// # Errors
    ///
    /// Fails if the buffer cannot be mapped or the file cannot be written.
    pub fn save(self, device: &wgpu::Device) -> Result<PathBuf> {
        let slice = self.buffer.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        device.poll(wgpu::Maintain::Wait);
        receiver
            .recv()
            .context("snapshot buffer mapping was dropped")?
            .context("failed to map snapshot buffer")?;

        let pixels = {
            let data = slice.get_mapped_range();
            unpad_rows(&data, self.width, self.height, self.padded_bytes_per_row, self.order)
        };
        self.buffer.unmap();

        write_png(&self.path, self.width, self.height, pixels)?;
        Ok(self.path)
    }
}

fn write_png(path: &Path, width: u32, height: u32, pixels: Vec<u8>) -> Result<()> {
    let img: image::RgbaImage = image::ImageBuffer::from_raw(width, height, pixels)
        .context("snapshot size does not match pixel data")?;
    img.save(path)
        .with_context(|| format!("failed to save {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_padded_to_copy_alignment() {
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
        assert_eq!(padded_bytes_per_row(800), 3328);
    }

    #[test]
    fn bgra_is_swizzled() {
        let data = [1, 2, 3, 0, 9, 9, 9, 9];
        let out = unpad_rows(&data, 1, 2, 4, ChannelOrder::Bgra);
        assert_eq!(out, vec![3, 2, 1, 255, 9, 9, 9, 255]);
    }
}
