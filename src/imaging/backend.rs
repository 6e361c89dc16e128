//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations every backend must
//! support: detect_format, reencode, and derive.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust plus
//! statically linked libwebp, no external tools to install.

use super::params::{DeriveParams, RasterFormat, ReencodeParams};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
    #[error("Unsupported raster format: {0}")]
    UnsupportedFormat(String),
}

/// Trait for image processing backends.
///
/// Every backend must implement all three operations so the conversion
/// pipeline stays backend-agnostic.
pub trait ImageBackend {
    /// Determine the effective container format of a raster source.
    ///
    /// Decoded content is authoritative; the file extension is the fallback
    /// signal when content sniffing is ambiguous.
    fn detect_format(&self, path: &Path) -> Result<RasterFormat, BackendError>;

    /// Re-encode the source into the same container with the given tunables.
    fn reencode(&self, params: &ReencodeParams) -> Result<(), BackendError>;

    /// Encode the source into a derived next-gen lossy format.
    fn derive(&self, params: &DeriveParams) -> Result<(), BackendError>;
}
