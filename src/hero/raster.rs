//! Resizing generated images to their final dimensions.

use crate::error::Result;
use image::ImageFormat;
use image::imageops::FilterType;
use std::path::Path;

/// Decodes `bytes`, resizes to exactly `width`x`height` and writes a PNG.
///
/// The aspect ratio is not preserved; hero slots have a fixed size.
pub fn resize_to_png(bytes: &[u8], path: &Path, width: u32, height: u32) -> Result<()> {
    let decoded = image::load_from_memory(bytes)?;
    let resized = decoded.resize_exact(width, height, FilterType::Lanczos3);
    resized.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn sample_png(width: u32, height: u32) -> Vec<u8> {
    use image::{DynamicImage, Rgb, RgbImage};
    use std::io::Cursor;

    let img = RgbImage::from_pixel(width, height, Rgb([14, 165, 233]));
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}
