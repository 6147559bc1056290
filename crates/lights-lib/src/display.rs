//! Display tuning — panel RGB calibration and adaptive backlight (CABC).
//!
//! Both are plain attribute files next to the framebuffer. Reads that fail or
//! don't parse mean "no value", never an error.

use std::path::PathBuf;

use crate::error::{LightsError, Result};
use crate::output::LedOutput;

/// Lowest per-channel calibration value the panel accepts.
pub const CALIBRATION_MIN: i32 = 255;
/// Highest per-channel calibration value the panel accepts.
pub const CALIBRATION_MAX: i32 = 32768;

/// Panel RGB calibration stored as `"r g b"`.
pub struct ColorCalibration<O: LedOutput> {
    output: O,
    path: PathBuf,
}

impl<O: LedOutput> ColorCalibration<O> {
    pub fn new(output: O, path: impl Into<PathBuf>) -> Self {
        ColorCalibration {
            output,
            path: path.into(),
        }
    }

    pub fn min_value(&self) -> i32 {
        CALIBRATION_MIN
    }

    pub fn max_value(&self) -> i32 {
        CALIBRATION_MAX
    }

    /// Current `[r, g, b]`, or an empty vector if unavailable or malformed.
    pub fn get(&mut self) -> Vec<i32> {
        match self.output.read(&self.path) {
            Ok(contents) => parse_triplet(&contents).map(Vec::from).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    /// Write `[r, g, b]`. Exactly three values are required.
    pub fn set(&mut self, rgb: &[i32]) -> Result<()> {
        let [r, g, b] = rgb else {
            return Err(LightsError::Calibration(format!(
                "expected 3 values (r g b), got {}",
                rgb.len()
            )));
        };
        self.output.write(&self.path, &format!("{r} {g} {b}"))
    }
}

/// Parse the first three whitespace-separated integers.
fn parse_triplet(s: &str) -> Option<[i32; 3]> {
    let mut it = s.split_whitespace().map(str::parse::<i32>);
    let r = it.next()?.ok()?;
    let g = it.next()?.ok()?;
    let b = it.next()?.ok()?;
    Some([r, g, b])
}

/// Content adaptive backlight control on/off switch.
pub struct AdaptiveBacklight<O: LedOutput> {
    output: O,
    path: PathBuf,
}

impl<O: LedOutput> AdaptiveBacklight<O> {
    pub fn new(output: O, path: impl Into<PathBuf>) -> Self {
        AdaptiveBacklight {
            output,
            path: path.into(),
        }
    }

    /// True when the switch reads as a positive integer.
    pub fn is_enabled(&mut self) -> bool {
        self.output
            .read(&self.path)
            .ok()
            .and_then(|s| s.split_whitespace().next()?.parse::<i32>().ok())
            .is_some_and(|v| v > 0)
    }

    /// Flip the switch. Returns whether the write went through.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        let value = if enabled { "1" } else { "0" };
        match self.output.write(&self.path, value) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("cabc write failed: {e}");
                false
            }
        }
    }
}
