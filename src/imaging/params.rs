//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the [`convert`](crate::convert) pipeline (which decides
//! which outputs to create) and the [`backend`](super::backend) (which does
//! the actual pixel work). This separation allows swapping backends
//! (e.g. for testing with a mock) without changing pipeline logic.

use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// Container format of a convertible raster source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Jpeg,
    Png,
}

/// Next-gen lossy target for derived outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedFormat {
    WebP,
    Avif,
}

impl DerivedFormat {
    pub fn extension(self) -> &'static str {
        match self {
            DerivedFormat::WebP => "webp",
            DerivedFormat::Avif => "avif",
        }
    }
}

/// Format-specific tunables for the primary re-encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reencode {
    Jpeg { quality: Quality, progressive: bool },
    Png { quality: Quality, compression_level: u8 },
}

impl Reencode {
    pub fn quality(self) -> Quality {
        match self {
            Reencode::Jpeg { quality, .. } => quality,
            Reencode::Png { quality, .. } => quality,
        }
    }
}

/// Full specification of a primary re-encode: same container in and out.
#[derive(Debug, Clone, PartialEq)]
pub struct ReencodeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub settings: Reencode,
}

/// Full specification of a derived next-gen output.
#[derive(Debug, Clone, PartialEq)]
pub struct DeriveParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub format: DerivedFormat,
    pub quality: Quality,
}
