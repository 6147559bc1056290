//! LED output operations — derive a frame from a light state and write it.

use std::path::Path;

use serde::Serialize;

use crate::config::LedPaths;
use crate::output::LedOutput;
use crate::state::LightState;

use super::blink::BlinkParams;
use super::color::brightness;

/// Everything written to the shared LED for one arbitration result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedFrame {
    /// The state the frame was derived from.
    pub state: LightState,
    /// Intensity written to all three color channels.
    pub brightness: u8,
    pub blink: BlinkParams,
}

impl LedFrame {
    pub fn from_state(state: LightState) -> Self {
        LedFrame {
            state,
            brightness: brightness(state.color),
            blink: BlinkParams::from_state(&state),
        }
    }
}

/// Best-effort single write. Failures are left to the output adapter to report.
fn write_value(out: &mut impl LedOutput, path: &Path, value: impl ToString) {
    if let Err(e) = out.write(path, &value.to_string()) {
        log::debug!("ignoring failed write to {}: {e}", path.display());
    }
}

/// Write a single-brightness light (LCD or button backlight).
pub fn write_brightness(out: &mut impl LedOutput, path: &Path, state: &LightState) {
    write_value(out, path, brightness(state.color));
}

/// Write a frame to the shared LED.
///
/// The same intensity goes to red, green and blue. Frequency and pwm are
/// only written when blinking, and the blink flag always goes last so the
/// group never starts blinking with stale timing.
pub fn write_shared_led(out: &mut impl LedOutput, paths: &LedPaths, frame: &LedFrame) {
    for path in paths.rgb() {
        write_value(out, path, frame.brightness);
    }
    if frame.blink.enabled {
        write_value(out, &paths.blink_frequency, frame.blink.frequency);
        write_value(out, &paths.blink_pwm, frame.blink.pwm);
    }
    write_value(out, &paths.blink, u8::from(frame.blink.enabled));
}
