//! Light controller — routes light requests to their outputs under one lock.
//!
//! Backlight and button lights map straight to a brightness file. The lights
//! sharing the notification LED go through the [`Arbiter`], and the winning
//! state is derived into a [`LedFrame`] and written out. The arbitration
//! state and the output live behind a single mutex, so a request's update,
//! selection, and every write it causes happen as one unit.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::{Config, LedPaths, is_dedicated};
use crate::error::{LightsError, Result};
use crate::led::{self, Arbiter, LedFrame};
use crate::output::LedOutput;
use crate::state::{LightKind, LightState};

struct Shared<O> {
    arbiter: Arbiter,
    output: O,
}

pub struct LightController<O: LedOutput> {
    paths: LedPaths,
    supported: Vec<LightKind>,
    shared: Mutex<Shared<O>>,
}

impl<O: LedOutput> LightController<O> {
    /// Create a controller driving `paths`, with `shared_led` arbitrating the
    /// notification LED in priority order. All lights start off.
    pub fn new(output: O, paths: LedPaths, shared_led: &[LightKind]) -> Self {
        let shared_led: Vec<LightKind> = shared_led
            .iter()
            .copied()
            .filter(|k| !is_dedicated(*k))
            .collect();
        let arbiter = Arbiter::new(&shared_led);

        let mut supported = vec![LightKind::Backlight, LightKind::Buttons];
        supported.extend(arbiter.order());

        LightController {
            paths,
            supported,
            shared: Mutex::new(Shared { arbiter, output }),
        }
    }

    /// Create a controller from a loaded config.
    pub fn from_config(output: O, config: &Config) -> Self {
        Self::new(output, config.paths.clone(), &config.shared_lights())
    }

    /// Light types this controller drives. Order is stable: backlight,
    /// buttons, then the shared-LED lights by priority.
    pub fn supported_types(&self) -> &[LightKind] {
        &self.supported
    }

    pub fn is_supported(&self, kind: LightKind) -> bool {
        self.supported.contains(&kind)
    }

    pub fn paths(&self) -> &LedPaths {
        &self.paths
    }

    fn lock(&self) -> MutexGuard<'_, Shared<O>> {
        // Writes are best-effort and the arbiter is never left half-updated,
        // so a panic in another caller doesn't invalidate the state.
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `state` to `kind`.
    ///
    /// Returns [`LightsError::NotSupported`] without touching anything if
    /// `kind` isn't driven here. Hardware write failures are not reported.
    pub fn set_light(&self, kind: LightKind, state: &LightState) -> Result<()> {
        if !self.is_supported(kind) {
            return Err(LightsError::NotSupported(kind.to_string()));
        }

        let mut shared = self.lock();
        let Shared { arbiter, output } = &mut *shared;
        match kind {
            LightKind::Backlight => {
                led::write_brightness(output, &self.paths.lcd_backlight, state);
            }
            LightKind::Buttons => {
                led::write_brightness(output, &self.paths.button_backlight, state);
            }
            _ => {
                arbiter.update(kind, *state);
                let frame = LedFrame::from_state(arbiter.select());
                log::debug!(
                    "shared led: {kind} set, mode={:?}, color={:08X}, onMs={}, offMs={}",
                    frame.state.flash_mode,
                    frame.state.color,
                    frame.state.flash_on_ms,
                    frame.state.flash_off_ms
                );
                led::write_shared_led(output, &self.paths, &frame);
            }
        }
        Ok(())
    }

    /// Apply `state` to the light named `id`. Unknown ids are not supported.
    pub fn set_light_by_id(&self, id: &str, state: &LightState) -> Result<()> {
        let kind: LightKind = id.parse()?;
        self.set_light(kind, state)
    }

    /// The state currently driving the shared LED.
    pub fn selected_state(&self) -> LightState {
        self.lock().arbiter.select()
    }

    /// The light whose state currently drives the shared LED, if any is lit.
    pub fn selected_light(&self) -> Option<LightKind> {
        self.lock()
            .arbiter
            .selected_slot()
            .filter(|(_, state)| state.is_lit())
            .map(|(kind, _)| kind)
    }

    /// The frame for the current shared-LED selection.
    pub fn current_frame(&self) -> LedFrame {
        LedFrame::from_state(self.selected_state())
    }

    /// Stored state of a shared-LED light, after normalization.
    pub fn slot(&self, kind: LightKind) -> Option<LightState> {
        self.lock().arbiter.slot(kind)
    }

    /// Run `f` with exclusive access to the output.
    pub fn with_output<R>(&self, f: impl FnOnce(&mut O) -> R) -> R {
        f(&mut self.lock().output)
    }
}
