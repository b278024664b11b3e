use chrono::{TimeZone, Utc};
use render::snapshot::{channel_order, file_name, padded_bytes_per_row, unpad_rows, ChannelOrder};

#[test]
fn test_snapshot_file_name() {
    let when = Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap();
    assert_eq!(file_name(&when), "surface3d_20240305_070809.png");
}

#[test]
fn test_supported_formats() {
    assert_eq!(channel_order(wgpu::TextureFormat::Bgra8UnormSrgb), Some(ChannelOrder::Bgra));
    assert_eq!(channel_order(wgpu::TextureFormat::Rgba8Unorm), Some(ChannelOrder::Rgba));
    assert_eq!(channel_order(wgpu::TextureFormat::Rgba16Float), None);
}

#[test]
fn test_padding_is_removed() {
    let width = 3;
    let height = 2;
    let padded = padded_bytes_per_row(width);
    let mut data = vec![0u8; (padded * height) as usize];
    for y in 0..height as usize {
        for x in 0..width as usize {
            let i = y * padded as usize + x * 4;
            data[i..i + 4].copy_from_slice(&[x as u8, y as u8, 7, 0]);
        }
    }
    let pixels = unpad_rows(&data, width, height, padded, ChannelOrder::Rgba);
    assert_eq!(pixels.len(), (width * height * 4) as usize);
    assert_eq!(&pixels[12..16], &[0, 1, 7, 255]);
}
