//! Image processing — pure Rust plus statically linked libwebp.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Format detection** | `image::ImageReader::with_guessed_format` |
//! | **Re-encode JPEG/PNG** | `image` codecs with quality/compression tunables |
//! | **Derive WebP** | `webp` crate (libwebp, lossy) |
//! | **Derive AVIF** | `image::codecs::avif::AvifEncoder` (rav1e) |
//!
//! The module is split into:
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use params::{
    DeriveParams, DerivedFormat, Quality, RasterFormat, Reencode, ReencodeParams,
};
pub use rust_backend::RustBackend;
