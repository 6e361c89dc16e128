//! # assetpress
//!
//! Build-time web asset converter. Walks a source directory of images and
//! produces a delivery-ready destination tree: raster photos are re-encoded
//! and get modern-format variants, everything else is copied through.
//!
//! # Architecture: Scan → Convert
//!
//! ```text
//! 1. Scan      src/assets/images/  →  Discovered     (four extension groups)
//! 2. Convert   Discovered          →  dist/assets/images/  (encoded + copied)
//! ```
//!
//! For every jpg/jpeg/png input the converter writes three sibling outputs at
//! the mirrored path — the primary re-encode plus `.webp` and `.avif`
//! variants. svg, gif, and ico files are copied byte-for-byte. Each file is
//! handled in its own guarded block: failures are logged, counted, and never
//! stop the run.
//!
//! The crate also ships a small [`counter`] component: a currency count-up
//! animation whose interpolation core is a pure function of elapsed time.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Recursive discovery and four-way classification of source files |
//! | [`convert`] | The sequential conversion pipeline, run statistics, per-file recovery |
//! | [`imaging`] | Backend trait + pure-Rust backend for decode/encode work |
//! | [`config`] | Encode parameters, optional `assetpress.toml`, validation |
//! | [`output`] | CLI output formatting — pure `format_*` functions + print wrappers |
//! | [`counter`] | Count-up animation: pure time→value core + terminal adapter |
//!
//! # Design Decisions
//!
//! ## Unconditional WebP + AVIF Variants
//!
//! Every raster input gets both derived outputs whether or not a page ends up
//! referencing them. Precomputing all variants keeps the pipeline a pure
//! function of the source tree — no knowledge of consumers required.
//!
//! ## Pure-Rust Imaging (No sharp, No ImageMagick)
//!
//! The [`imaging`] module uses the `image` crate for decode and JPEG/PNG/AVIF
//! encode, plus statically linked libwebp for lossy WebP. No Node.js sidecar,
//! no system packages: the binary is fully self-contained.
//!
//! ## Per-File Error Recovery
//!
//! A corrupt or unreadable file increments the error counter and produces a
//! log line; it never aborts the run or affects any other file. The run
//! statistics are an explicit return value, so callers (CLI or tests) can
//! assert on the outcome deterministically.
//!
//! ## Sequential Processing
//!
//! Files are handled one at a time, each operation completing before the
//! next begins. The workloads this tool serves are small asset directories
//! where encode time is dominated by AVIF anyway; keeping the loop flat makes
//! the log order and the failure model trivial to reason about.

pub mod config;
pub mod convert;
pub mod counter;
pub mod imaging;
pub mod output;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
