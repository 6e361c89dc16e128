//! Source discovery and classification.
//!
//! Walks the source directory tree and partitions every matching file into
//! one of four groups by extension:
//!
//! | Group | Extensions | Handling |
//! |---|---|---|
//! | Raster | `jpg`, `jpeg`, `png` | Re-encoded + WebP/AVIF variants |
//! | Vector | `svg` | Copied through unchanged |
//! | Animated | `gif` | Copied through unchanged |
//! | Icon | `ico` | Copied through unchanged |
//!
//! The partition is exhaustive and exclusive over matched files: a file
//! belongs to exactly one group, decided by its extension alone. Files with
//! any other extension are ignored. A missing or empty source directory is
//! not an error — the run simply has nothing to do.
//!
//! Each group is sorted by path. Walk order is not guaranteed by the
//! filesystem, and stable ordering keeps logs reproducible across runs.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Classification of a discovered file, by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Photographic/graphic raster formats that get re-encoded (jpg, jpeg, png).
    Raster,
    /// Scalable vector graphics (svg) — copied as-is.
    Vector,
    /// Animated raster (gif) — copied as-is.
    Animated,
    /// Favicons (ico) — copied as-is.
    Icon,
}

impl FileKind {
    /// Short uppercase tag used in log lines (`Copied SVG: ...`).
    pub fn tag(self) -> &'static str {
        match self {
            FileKind::Raster => "RASTER",
            FileKind::Vector => "SVG",
            FileKind::Animated => "GIF",
            FileKind::Icon => "ICO",
        }
    }
}

/// Classify a path by its extension. `None` for unsupported extensions.
pub fn classify(path: &Path) -> Option<FileKind> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" | "png" => Some(FileKind::Raster),
        "svg" => Some(FileKind::Vector),
        "gif" => Some(FileKind::Animated),
        "ico" => Some(FileKind::Icon),
        _ => None,
    }
}

/// The four disjoint file lists produced by a scan.
#[derive(Debug, Default)]
pub struct Discovered {
    pub raster: Vec<PathBuf>,
    pub vector: Vec<PathBuf>,
    pub animated: Vec<PathBuf>,
    pub icon: Vec<PathBuf>,
}

impl Discovered {
    /// Total number of discovered files across all groups.
    pub fn total(&self) -> usize {
        self.raster.len() + self.vector.len() + self.animated.len() + self.icon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Recursively discover and partition files under `root`.
///
/// A nonexistent root yields an empty partition. Unreadable entries below
/// the root surface as `ScanError::Walk`.
pub fn scan(root: &Path) -> Result<Discovered, ScanError> {
    let mut discovered = Discovered::default();

    if !root.exists() {
        return Ok(discovered);
    }

    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        match classify(&path) {
            Some(FileKind::Raster) => discovered.raster.push(path),
            Some(FileKind::Vector) => discovered.vector.push(path),
            Some(FileKind::Animated) => discovered.animated.push(path),
            Some(FileKind::Icon) => discovered.icon.push(path),
            None => {}
        }
    }

    discovered.raster.sort();
    discovered.vector.sort();
    discovered.animated.sort();
    discovered.icon.sort();

    Ok(discovered)
}
