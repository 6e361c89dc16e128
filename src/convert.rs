//! The conversion pipeline.
//!
//! Takes the partition produced by [`scan`](crate::scan) and turns the source
//! tree into a delivery-ready destination tree:
//!
//! - **Raster** (jpg/jpeg/png): re-encoded in its own container format plus
//!   two derived siblings, `.webp` and `.avif`, at the mirrored path.
//! - **Vector/Animated/Icon** (svg/gif/ico): copied byte-for-byte to the
//!   mirrored path.
//!
//! ## Output Structure
//!
//! ```text
//! dist/assets/images/
//! ├── hero.jpg                   # Re-encoded (quality 80)
//! ├── hero.webp                  # Derived (quality 75)
//! ├── hero.avif                  # Derived (quality 65)
//! └── icons/
//!     └── logo.svg               # Copied unchanged
//! ```
//!
//! ## Failure model
//!
//! Every file is handled in its own guarded block: a decode or encode failure
//! is reported as a [`ConvertEvent::Failed`], counted, and the run moves on
//! to the next file. Nothing is rolled back — a partially written output may
//! remain on disk. Only top-level failures (scanning the source tree,
//! creating the destination root) abort the run.
//!
//! Files are handled strictly sequentially, one operation at a time. Re-runs
//! overwrite previous outputs; there is no skip-if-unchanged logic.

use crate::config::EncodeConfig;
use crate::imaging::{
    BackendError, DeriveParams, DerivedFormat, ImageBackend, Quality, RasterFormat, Reencode,
    ReencodeParams,
};
use crate::scan::{self, FileKind, ScanError};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

/// Top-level pipeline failures. Per-file failures never surface here.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
}

/// Failures recovered at file granularity.
#[derive(Error, Debug)]
enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Backend(#[from] BackendError),
    #[error("Path outside source root: {0}")]
    Prefix(#[from] std::path::StripPrefixError),
}

/// Counters for one pipeline run, returned to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Raster files fully converted (primary + both derived outputs).
    pub processed: usize,
    /// Files copied through unchanged.
    pub copied: usize,
    /// Files that failed anywhere in their guarded block.
    pub errors: usize,
}

impl RunStats {
    pub fn total(&self) -> usize {
        self.processed + self.copied + self.errors
    }
}

/// Progress events, one per handled file.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertEvent {
    /// A raster file was re-encoded and both derived outputs written.
    Optimized { rel: PathBuf },
    /// A file was copied through unchanged.
    Copied { rel: PathBuf, kind: FileKind },
    /// A file failed; the run continues.
    Failed { path: PathBuf, message: String },
}

/// Run the full conversion pipeline.
///
/// Discovers files under `source_root`, converts/copies each into the
/// mirrored location under `dest_root`, and returns the run counters.
/// Progress events are sent to `progress` as files are handled.
///
/// On completion `stats.total()` equals the number of discovered files.
pub fn run(
    backend: &impl ImageBackend,
    source_root: &Path,
    dest_root: &Path,
    config: &EncodeConfig,
    progress: Option<Sender<ConvertEvent>>,
) -> Result<RunStats, ConvertError> {
    let discovered = scan::scan(source_root)?;

    // Destination root is expected to be creatable; failure here aborts.
    fs::create_dir_all(dest_root)?;

    let mut stats = RunStats::default();
    let emit = |event: ConvertEvent| {
        if let Some(tx) = &progress {
            // A dropped receiver just means nobody is listening
            let _ = tx.send(event);
        }
    };

    for path in &discovered.raster {
        match convert_raster(backend, path, source_root, dest_root, config) {
            Ok(rel) => {
                stats.processed += 1;
                emit(ConvertEvent::Optimized { rel });
            }
            Err(e) => {
                stats.errors += 1;
                emit(ConvertEvent::Failed {
                    path: path.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    let copy_groups = [
        (&discovered.vector, FileKind::Vector),
        (&discovered.animated, FileKind::Animated),
        (&discovered.icon, FileKind::Icon),
    ];
    for (group, kind) in copy_groups {
        for path in group {
            match copy_through(path, source_root, dest_root) {
                Ok(rel) => {
                    stats.copied += 1;
                    emit(ConvertEvent::Copied { rel, kind });
                }
                Err(e) => {
                    stats.errors += 1;
                    emit(ConvertEvent::Failed {
                        path: path.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }
    }

    Ok(stats)
}

/// Compute the mirrored output path and make sure its directory exists.
fn prepare_output(
    path: &Path,
    source_root: &Path,
    dest_root: &Path,
) -> Result<(PathBuf, PathBuf), FileError> {
    let rel = path.strip_prefix(source_root)?.to_path_buf();
    let output = dest_root.join(&rel);
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok((rel, output))
}

/// Convert one raster file: primary re-encode plus `.webp` and `.avif`
/// siblings, replacing only the final extension.
fn convert_raster(
    backend: &impl ImageBackend,
    path: &Path,
    source_root: &Path,
    dest_root: &Path,
    config: &EncodeConfig,
) -> Result<PathBuf, FileError> {
    let (rel, output) = prepare_output(path, source_root, dest_root)?;

    let settings = match backend.detect_format(path)? {
        RasterFormat::Jpeg => Reencode::Jpeg {
            quality: Quality::new(config.jpeg.quality),
            progressive: config.jpeg.progressive,
        },
        RasterFormat::Png => Reencode::Png {
            quality: Quality::new(config.png.quality),
            compression_level: config.png.compression_level,
        },
    };

    backend.reencode(&ReencodeParams {
        source: path.to_path_buf(),
        output: output.clone(),
        settings,
    })?;

    // Derived variants are unconditional: every raster input gets both,
    // whether or not anything ends up referencing them.
    backend.derive(&DeriveParams {
        source: path.to_path_buf(),
        output: output.with_extension(DerivedFormat::WebP.extension()),
        format: DerivedFormat::WebP,
        quality: Quality::new(config.webp.quality),
    })?;
    backend.derive(&DeriveParams {
        source: path.to_path_buf(),
        output: output.with_extension(DerivedFormat::Avif.extension()),
        format: DerivedFormat::Avif,
        quality: Quality::new(config.avif.quality),
    })?;

    Ok(rel)
}

/// Copy one file byte-for-byte to its mirrored path.
fn copy_through(path: &Path, source_root: &Path, dest_root: &Path) -> Result<PathBuf, FileError> {
    let (rel, output) = prepare_output(path, source_root, dest_root)?;
    fs::copy(path, &output)?;
    Ok(rel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"content").unwrap();
    }

    fn roots(tmp: &TempDir) -> (PathBuf, PathBuf) {
        (tmp.path().join("source"), tmp.path().join("dist"))
    }

    #[test]
    fn stats_add_up_to_discovered_total() {
        let tmp = TempDir::new().unwrap();
        let (source, dest) = roots(&tmp);
        touch(&source.join("a.jpg"));
        touch(&source.join("b.png"));
        touch(&source.join("logo.svg"));
        touch(&source.join("loop.gif"));
        touch(&source.join("favicon.ico"));

        let backend = MockBackend::new();
        let stats = run(&backend, &source, &dest, &EncodeConfig::default(), None).unwrap();

        assert_eq!(stats.processed, 2);
        assert_eq!(stats.copied, 3);
        assert_eq!(stats.errors, 0);
        assert_eq!(stats.total(), 5);
    }

    #[test]
    fn raster_file_triggers_detect_reencode_and_two_derives() {
        let tmp = TempDir::new().unwrap();
        let (source, dest) = roots(&tmp);
        touch(&source.join("photo.jpg"));

        let backend = MockBackend::new();
        run(&backend, &source, &dest, &EncodeConfig::default(), None).unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 4);
        assert!(matches!(&ops[0], RecordedOp::DetectFormat(_)));
        assert!(matches!(&ops[1], RecordedOp::Reencode { quality: 80, .. }));
        assert!(matches!(
            &ops[2],
            RecordedOp::Derive {
                format: DerivedFormat::WebP,
                quality: 75,
                ..
            }
        ));
        assert!(matches!(
            &ops[3],
            RecordedOp::Derive {
                format: DerivedFormat::Avif,
                quality: 65,
                ..
            }
        ));
    }

    #[test]
    fn outputs_mirror_nested_source_paths() {
        let tmp = TempDir::new().unwrap();
        let (source, dest) = roots(&tmp);
        touch(&source.join("photos/trip/beach.png"));

        let backend = MockBackend::new();
        run(&backend, &source, &dest, &EncodeConfig::default(), None).unwrap();

        let ops = backend.get_operations();
        let expected = dest.join("photos/trip/beach.png");
        assert!(matches!(
            &ops[1],
            RecordedOp::Reencode { output, .. } if output == &expected
        ));
        // Derived outputs replace only the final extension
        assert!(matches!(
            &ops[2],
            RecordedOp::Derive { output, .. } if output == &dest.join("photos/trip/beach.webp")
        ));
        assert!(matches!(
            &ops[3],
            RecordedOp::Derive { output, .. } if output == &dest.join("photos/trip/beach.avif")
        ));
    }

    #[test]
    fn failing_file_is_counted_and_run_continues() {
        let tmp = TempDir::new().unwrap();
        let (source, dest) = roots(&tmp);
        touch(&source.join("bad.jpg"));
        touch(&source.join("good.jpg"));

        let backend = MockBackend::new().fail_on(source.join("bad.jpg"));
        let (tx, rx) = mpsc::channel();
        let stats = run(&backend, &source, &dest, &EncodeConfig::default(), Some(tx)).unwrap();

        assert_eq!(stats.processed, 1);
        assert_eq!(stats.errors, 1);

        let events: Vec<ConvertEvent> = rx.iter().collect();
        assert!(events.iter().any(|e| matches!(
            e,
            ConvertEvent::Failed { path, .. } if path.ends_with("bad.jpg")
        )));
        assert!(events.iter().any(|e| matches!(
            e,
            ConvertEvent::Optimized { rel } if rel == Path::new("good.jpg")
        )));
    }

    #[test]
    fn copies_are_byte_identical() {
        let tmp = TempDir::new().unwrap();
        let (source, dest) = roots(&tmp);
        let svg = source.join("icons/logo.svg");
        fs::create_dir_all(svg.parent().unwrap()).unwrap();
        fs::write(&svg, b"<svg xmlns='http://www.w3.org/2000/svg'/>").unwrap();

        let backend = MockBackend::new();
        let stats = run(&backend, &source, &dest, &EncodeConfig::default(), None).unwrap();

        assert_eq!(stats.copied, 1);
        let copied = fs::read(dest.join("icons/logo.svg")).unwrap();
        assert_eq!(copied, fs::read(&svg).unwrap());
    }

    #[test]
    fn copy_events_carry_file_kind() {
        let tmp = TempDir::new().unwrap();
        let (source, dest) = roots(&tmp);
        touch(&source.join("loop.gif"));
        touch(&source.join("favicon.ico"));

        let backend = MockBackend::new();
        let (tx, rx) = mpsc::channel();
        run(&backend, &source, &dest, &EncodeConfig::default(), Some(tx)).unwrap();

        let events: Vec<ConvertEvent> = rx.iter().collect();
        assert!(events.contains(&ConvertEvent::Copied {
            rel: PathBuf::from("loop.gif"),
            kind: FileKind::Animated,
        }));
        assert!(events.contains(&ConvertEvent::Copied {
            rel: PathBuf::from("favicon.ico"),
            kind: FileKind::Icon,
        }));
    }

    #[test]
    fn empty_source_completes_with_zero_stats() {
        let tmp = TempDir::new().unwrap();
        let (source, dest) = roots(&tmp);
        fs::create_dir_all(&source).unwrap();

        let backend = MockBackend::new();
        let stats = run(&backend, &source, &dest, &EncodeConfig::default(), None).unwrap();
        assert_eq!(stats, RunStats::default());
        assert!(dest.exists());
    }

    #[test]
    fn missing_source_is_a_no_op_run() {
        let tmp = TempDir::new().unwrap();
        let (source, dest) = roots(&tmp);

        let backend = MockBackend::new();
        let stats = run(&backend, &source, &dest, &EncodeConfig::default(), None).unwrap();
        assert_eq!(stats.total(), 0);
    }

    #[test]
    fn custom_config_qualities_reach_the_backend() {
        let tmp = TempDir::new().unwrap();
        let (source, dest) = roots(&tmp);
        touch(&source.join("photo.png"));

        let mut config = EncodeConfig::default();
        config.png.quality = 60;
        config.webp.quality = 40;
        config.avif.quality = 30;

        let backend = MockBackend::new();
        run(&backend, &source, &dest, &config, None).unwrap();

        let ops = backend.get_operations();
        assert!(matches!(&ops[1], RecordedOp::Reencode { quality: 60, .. }));
        assert!(matches!(&ops[2], RecordedOp::Derive { quality: 40, .. }));
        assert!(matches!(&ops[3], RecordedOp::Derive { quality: 30, .. }));
    }
}
