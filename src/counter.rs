//! Currency count-up animation.
//!
//! Animates a displayed dollar amount from `$0.00` to a final value over a
//! fixed duration, after a short startup delay. The numeric core is a pure
//! function of elapsed time — given `t`, produce the displayed string — and
//! the frame loop is a thin adapter around it, so the interpolation logic is
//! testable without any timing.
//!
//! Interpolation is linear: `value(t) = min(t / duration, 1) * target`. Once
//! the duration has elapsed the display is pinned to the exactly formatted
//! target, so the last frame never shows floating-point drift from the
//! second-to-last interpolated value.

use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Animation duration.
const DURATION: Duration = Duration::from_millis(1200);
/// Delay before the first frame.
const DELAY: Duration = Duration::from_millis(550);
/// Frame interval for the terminal adapter (~60 fps).
const FRAME: Duration = Duration::from_millis(16);

/// One count-up animation: target value plus fixed timing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountUp {
    pub target: f64,
    pub duration: Duration,
    pub delay: Duration,
}

impl CountUp {
    /// A count-up to `target` with the standard timing (1200 ms after 550 ms).
    pub fn new(target: f64) -> Self {
        Self {
            target,
            duration: DURATION,
            delay: DELAY,
        }
    }

    /// Build from an optional attached string datum.
    ///
    /// `None` input (no target present) or a non-numeric datum yields `None`:
    /// the animation is a silent no-op, not an error.
    pub fn from_attr(attr: Option<&str>) -> Option<Self> {
        let target: f64 = attr?.trim().parse().ok()?;
        if !target.is_finite() {
            return None;
        }
        Some(Self::new(target))
    }

    /// Interpolated value at `elapsed` since the first frame.
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        let fraction = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0);
        fraction * self.target
    }

    /// Displayed text at `elapsed`: `$` plus the value with fixed 2 decimals.
    ///
    /// At or past the duration this is exactly the formatted target.
    pub fn display_at(&self, elapsed: Duration) -> String {
        if self.is_complete(elapsed) {
            format!("${:.2}", self.target)
        } else {
            format!("${:.2}", self.value_at(elapsed))
        }
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

/// Drive the animation against a terminal-style writer.
///
/// Sleeps the startup delay, then rewrites the line each frame with a
/// carriage return until the duration has elapsed, finishing with the pinned
/// final value and a newline. Runs entirely on the calling thread.
pub fn animate(count: &CountUp, out: &mut impl Write) -> io::Result<()> {
    std::thread::sleep(count.delay);

    let start = Instant::now();
    loop {
        let elapsed = start.elapsed();
        write!(out, "\r{}", count.display_at(elapsed))?;
        out.flush()?;
        if count.is_complete(elapsed) {
            break;
        }
        std::thread::sleep(FRAME);
    }
    writeln!(out)?;
    Ok(())
}
