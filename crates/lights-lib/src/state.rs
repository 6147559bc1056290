//! Light request data model — light types, flash modes, and the light state value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::LightsError;
use crate::led::parse_color;

/// Logical light source identity.
///
/// Mirrors the full set of light types a host may ask for. A controller only
/// drives a fixed subset of these (see [`crate::controller::LightController::supported_types`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightKind {
    Backlight,
    Keyboard,
    Buttons,
    Battery,
    Notifications,
    Attention,
    Bluetooth,
    Wifi,
}

impl LightKind {
    pub const ALL: [LightKind; 8] = [
        LightKind::Backlight,
        LightKind::Keyboard,
        LightKind::Buttons,
        LightKind::Battery,
        LightKind::Notifications,
        LightKind::Attention,
        LightKind::Bluetooth,
        LightKind::Wifi,
    ];

    /// Stable string id, as used in config files, requests and the CLI.
    pub fn id(self) -> &'static str {
        match self {
            LightKind::Backlight => "backlight",
            LightKind::Keyboard => "keyboard",
            LightKind::Buttons => "buttons",
            LightKind::Battery => "battery",
            LightKind::Notifications => "notifications",
            LightKind::Attention => "attention",
            LightKind::Bluetooth => "bluetooth",
            LightKind::Wifi => "wifi",
        }
    }
}

impl fmt::Display for LightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for LightKind {
    type Err = LightsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        // "notification" is accepted as a convenience alias
        if s == "notification" {
            return Ok(LightKind::Notifications);
        }
        LightKind::ALL
            .into_iter()
            .find(|k| k.id() == s)
            .ok_or(LightsError::NotSupported(s))
    }
}

/// How the light should flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashMode {
    /// Steady, no blinking.
    #[default]
    None,
    /// Software-timed blink using `flash_on_ms` / `flash_off_ms`.
    Timed,
    /// Blink pattern owned by a hardware path outside this driver.
    Hardware,
}

impl FromStr for FlashMode {
    type Err = LightsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(FlashMode::None),
            "timed" => Ok(FlashMode::Timed),
            "hardware" | "hw" => Ok(FlashMode::Hardware),
            other => Err(LightsError::Request(format!(
                "unknown flash mode: {other} (use none, timed or hardware)"
            ))),
        }
    }
}

/// Brightness source hint from the host. Carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrightnessMode {
    #[default]
    User,
    Sensor,
    LowPersistence,
}

/// A requested light state. Replaced wholesale on every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LightState {
    /// `0xAARRGGBB`; the alpha byte never contributes to output.
    #[serde(default, deserialize_with = "deserialize_color")]
    pub color: u32,
    #[serde(default)]
    pub flash_mode: FlashMode,
    #[serde(default)]
    pub flash_on_ms: u32,
    #[serde(default)]
    pub flash_off_ms: u32,
    #[serde(default)]
    pub brightness_mode: BrightnessMode,
}

impl LightState {
    /// The all-off state.
    pub const OFF: LightState = LightState {
        color: 0,
        flash_mode: FlashMode::None,
        flash_on_ms: 0,
        flash_off_ms: 0,
        brightness_mode: BrightnessMode::User,
    };

    /// A steady light of the given color.
    pub fn solid(color: u32) -> Self {
        LightState {
            color,
            ..LightState::OFF
        }
    }

    /// A timed blink of the given color.
    pub fn timed(color: u32, on_ms: u32, off_ms: u32) -> Self {
        LightState {
            color,
            flash_mode: FlashMode::Timed,
            flash_on_ms: on_ms,
            flash_off_ms: off_ms,
            ..LightState::OFF
        }
    }

    /// True when any RGB bit is set.
    pub fn is_lit(&self) -> bool {
        self.color & 0x00FF_FFFF != 0
    }
}

/// Accept either a raw integer or any string [`parse_color`] understands.
fn deserialize_color<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawColor {
        Number(u32),
        Text(String),
    }

    match RawColor::deserialize(deserializer)? {
        RawColor::Number(n) => Ok(n),
        RawColor::Text(s) => parse_color(&s).map_err(serde::de::Error::custom),
    }
}
