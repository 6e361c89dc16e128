//! CLI output formatting.
//!
//! Line-oriented progress output: one line per handled file, tagged by
//! outcome, plus a final summary block.
//!
//! ```text
//! Starting image optimization...
//! Optimized: hero.jpg
//! Optimized: photos/trip/beach.png
//! Copied SVG: icons/logo.svg
//! Copied ICO: favicon.ico
//! Error processing src/assets/images/broken.jpg: Failed to decode ...
//!
//! Image optimization complete:
//!   - 2 images optimized
//!   - 2 files copied
//!   - 1 errors encountered
//! ```
//!
//! The errors line appears only when errors occurred.
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `String`/`Vec<String>`)
//! for testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::convert::{ConvertEvent, RunStats};
use crate::scan::Discovered;

/// One log line per pipeline event.
pub fn format_convert_event(event: &ConvertEvent) -> String {
    match event {
        ConvertEvent::Optimized { rel } => format!("Optimized: {}", rel.display()),
        ConvertEvent::Copied { rel, kind } => {
            format!("Copied {}: {}", kind.tag(), rel.display())
        }
        ConvertEvent::Failed { path, message } => {
            format!("Error processing {}: {}", path.display(), message)
        }
    }
}

/// Final summary block. The errors line is omitted when no errors occurred.
pub fn format_summary(stats: &RunStats) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        "Image optimization complete:".to_string(),
        format!("  - {} images optimized", stats.processed),
        format!("  - {} files copied", stats.copied),
    ];
    if stats.errors > 0 {
        lines.push(format!("  - {} errors encountered", stats.errors));
    }
    lines
}

/// Classification report for the `scan` subcommand.
pub fn format_scan_output(discovered: &Discovered) -> Vec<String> {
    vec![
        format!("Raster (jpg/jpeg/png): {}", discovered.raster.len()),
        format!("Vector (svg):          {}", discovered.vector.len()),
        format!("Animated (gif):        {}", discovered.animated.len()),
        format!("Icons (ico):           {}", discovered.icon.len()),
        format!("Total:                 {}", discovered.total()),
    ]
}

pub fn print_summary(stats: &RunStats) {
    for line in format_summary(stats) {
        println!("{}", line);
    }
}

pub fn print_scan_output(discovered: &Discovered) {
    for line in format_scan_output(discovered) {
        println!("{}", line);
    }
}
