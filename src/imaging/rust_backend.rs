//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary — no ImageMagick, no
//! sharp/libvips sidecar, no system packages.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Format sniffing | `image::ImageReader::with_guessed_format` |
//! | Decode (JPEG, PNG) | `image` crate (pure Rust decoders) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |
//! | Encode → PNG | `image::codecs::png::PngEncoder` |
//! | Encode → WebP | `webp` crate (libwebp, lossy) |
//! | Encode → AVIF | `image::codecs::avif::AvifEncoder` (rav1e, speed 6) |

use super::backend::{BackendError, ImageBackend};
use super::params::{DeriveParams, DerivedFormat, RasterFormat, Reencode, ReencodeParams};
use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, PngEncoder};
use image::{DynamicImage, ImageFormat, ImageReader};
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Map the source's lowercased extension to a raster format, for files whose
/// content sniffing came back ambiguous.
fn format_from_extension(path: &Path) -> Result<RasterFormat, BackendError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Ok(RasterFormat::Jpeg),
        "png" => Ok(RasterFormat::Png),
        other => Err(BackendError::UnsupportedFormat(format!(
            "{} ({})",
            other,
            path.display()
        ))),
    }
}

/// Map the 0-9 deflate effort to the png encoder's compression tiers.
fn compression_type(level: u8) -> CompressionType {
    match level {
        0..=3 => CompressionType::Fast,
        4..=7 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

fn create_writer(path: &Path) -> Result<std::io::BufWriter<std::fs::File>, BackendError> {
    let file = std::fs::File::create(path).map_err(BackendError::Io)?;
    Ok(std::io::BufWriter::new(file))
}

impl ImageBackend for RustBackend {
    fn detect_format(&self, path: &Path) -> Result<RasterFormat, BackendError> {
        let reader = ImageReader::open(path)
            .map_err(BackendError::Io)?
            .with_guessed_format()
            .map_err(BackendError::Io)?;

        // Content magic wins; extension is the fallback when the bytes
        // don't identify a format we re-encode.
        match reader.format() {
            Some(ImageFormat::Jpeg) => Ok(RasterFormat::Jpeg),
            Some(ImageFormat::Png) => Ok(RasterFormat::Png),
            _ => format_from_extension(path),
        }
    }

    fn reencode(&self, params: &ReencodeParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;

        match params.settings {
            Reencode::Jpeg { quality, .. } => {
                // Baseline scan only: the pure Rust JPEG encoder has no
                // progressive mode, so the `progressive` tunable is carried
                // in config but not acted on here.
                // TODO: switch to mozjpeg bindings if progressive output
                // turns out to matter for delivery size.
                let writer = create_writer(&params.output)?;
                let encoder = JpegEncoder::new_with_quality(writer, quality.value());
                img.write_with_encoder(encoder).map_err(|e| {
                    BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e))
                })
            }
            Reencode::Png {
                compression_level, ..
            } => {
                // PNG is lossless; deflate effort is what drives output size.
                let writer = create_writer(&params.output)?;
                let encoder = PngEncoder::new_with_quality(
                    writer,
                    compression_type(compression_level),
                    image::codecs::png::FilterType::Adaptive,
                );
                img.write_with_encoder(encoder).map_err(|e| {
                    BackendError::ProcessingFailed(format!("PNG encode failed: {}", e))
                })
            }
        }
    }

    fn derive(&self, params: &DeriveParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;

        match params.format {
            DerivedFormat::WebP => {
                // libwebp wants RGB8/RGBA8 input
                let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
                let encoder = webp::Encoder::from_image(&rgba).map_err(|e| {
                    BackendError::ProcessingFailed(format!("WebP encode failed: {}", e))
                })?;
                let encoded = encoder.encode(params.quality.value() as f32);
                std::fs::write(&params.output, &*encoded).map_err(BackendError::Io)
            }
            DerivedFormat::Avif => {
                let writer = create_writer(&params.output)?;
                let encoder =
                    AvifEncoder::new_with_speed_quality(writer, 6, params.quality.value());
                img.write_with_encoder(encoder).map_err(|e| {
                    BackendError::ProcessingFailed(format!("AVIF encode failed: {}", e))
                })
            }
        }
    }
}
