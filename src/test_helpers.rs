//! Shared helpers for unit tests. Compiled only under `#[cfg(test)]`.

use image::{ImageEncoder, RgbImage};
use std::path::Path;

/// Write a small valid JPEG with a simple gradient pattern.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = test_pattern(width, height);
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a small valid PNG with a simple gradient pattern.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = test_pattern(width, height);
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::png::PngEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

fn test_pattern(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}
