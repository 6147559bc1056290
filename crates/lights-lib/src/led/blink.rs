//! Blink timing — converts on/off durations into the LED group's
//! frequency and duty-cycle registers.

use serde::Serialize;

use crate::state::{FlashMode, LightState};

/// Milliseconds of blink period per unit of the frequency register.
/// A value of 20 gives roughly one blink per second.
const MS_PER_FREQ_STEP: u64 = 50;

/// The duty-cycle register ignores its low 4 bits.
const MIN_VISIBLE_PWM: u8 = 16;

/// Hardware blink parameters for the shared LED group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BlinkParams {
    /// Whether the blink-enable flag is set.
    pub enabled: bool,
    /// Group frequency register value.
    pub frequency: u32,
    /// Group duty-cycle register: 0 = always off, 255 = always on.
    pub pwm: u8,
}

impl BlinkParams {
    /// Derive blink parameters. Only [`FlashMode::Timed`] can blink.
    pub fn new(mode: FlashMode, on_ms: u32, off_ms: u32) -> Self {
        let (on_ms, off_ms) = match mode {
            FlashMode::Timed => (u64::from(on_ms), u64::from(off_ms)),
            FlashMode::None | FlashMode::Hardware => (0, 0),
        };
        if on_ms == 0 || off_ms == 0 {
            return BlinkParams::default();
        }

        let total = on_ms + off_ms;
        let frequency = u32::try_from(total / MS_PER_FREQ_STEP).unwrap_or(u32::MAX);
        // on <= total, so the quotient is at most 255
        let mut pwm = ((on_ms * 255) / total) as u8;
        if pwm > 0 && pwm < MIN_VISIBLE_PWM {
            pwm = MIN_VISIBLE_PWM;
        }

        BlinkParams {
            enabled: true,
            frequency,
            pwm,
        }
    }

    /// Derive blink parameters from a light state.
    pub fn from_state(state: &LightState) -> Self {
        Self::new(state.flash_mode, state.flash_on_ms, state.flash_off_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_zero_durations_disabled() {
        let p = BlinkParams::new(FlashMode::Timed, 0, 0);
        assert!(!p.enabled);
        assert_eq!(p, BlinkParams::default());
    }

    #[test]
    fn timed_with_zero_off_disabled() {
        assert!(!BlinkParams::new(FlashMode::Timed, 500, 0).enabled);
        assert!(!BlinkParams::new(FlashMode::Timed, 0, 500).enabled);
    }

    #[test]
    fn non_timed_modes_never_blink() {
        assert!(!BlinkParams::new(FlashMode::None, 500, 500).enabled);
        assert!(!BlinkParams::new(FlashMode::Hardware, 500, 500).enabled);
    }

    #[test]
    fn one_second_half_duty() {
        assert_eq!(
            BlinkParams::new(FlashMode::Timed, 500, 500),
            BlinkParams {
                enabled: true,
                frequency: 20,
                pwm: 127
            }
        );
    }

    #[test]
    fn zero_pwm_is_not_clamped() {
        // 255 / 1000 rounds down to 0
        let p = BlinkParams::new(FlashMode::Timed, 1, 999);
        assert!(p.enabled);
        assert_eq!(p.frequency, 20);
        assert_eq!(p.pwm, 0);
    }

    #[test]
    fn small_pwm_rounds_up_to_16() {
        // 5 * 255 / 1000 = 1
        let p = BlinkParams::new(FlashMode::Timed, 5, 995);
        assert!(p.enabled);
        assert_eq!(p.pwm, 16);
    }

    #[test]
    fn pwm_at_16_unchanged() {
        // 64 * 255 / 1000 = 16
        assert_eq!(BlinkParams::new(FlashMode::Timed, 64, 936).pwm, 16);
        // 68 * 255 / 1000 = 17
        assert_eq!(BlinkParams::new(FlashMode::Timed, 68, 932).pwm, 17);
    }

    #[test]
    fn mostly_on_duty() {
        // 3000 * 255 / 4000 = 191, 4000 / 50 = 80
        let p = BlinkParams::new(FlashMode::Timed, 3000, 1000);
        assert_eq!(p.frequency, 80);
        assert_eq!(p.pwm, 191);
    }

    #[test]
    fn short_period_has_zero_frequency() {
        let p = BlinkParams::new(FlashMode::Timed, 10, 10);
        assert!(p.enabled);
        assert_eq!(p.frequency, 0);
        assert_eq!(p.pwm, 127);
    }

    #[test]
    fn huge_durations_do_not_overflow() {
        let p = BlinkParams::new(FlashMode::Timed, u32::MAX, u32::MAX);
        assert!(p.enabled);
        assert_eq!(p.pwm, 127);
        assert_eq!(p.frequency, ((u64::from(u32::MAX) * 2) / 50) as u32);
    }

    #[test]
    fn from_state_uses_flash_fields() {
        let s = LightState::timed(0xFFFF_FFFF, 500, 500);
        assert_eq!(BlinkParams::from_state(&s).frequency, 20);
        assert!(!BlinkParams::from_state(&LightState::solid(0xFFFF_FFFF)).enabled);
    }
}
