//! Application configuration — TOML-based, platform-aware paths.
//!
//! Holds the device attribute paths for every light output and the priority
//! order of the lights sharing the notification LED.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::state::LightKind;

/// Header comment prepended to saved config files.
const CONFIG_HEADER: &str =
    "# lights configuration — changes made outside the tool may be overwritten.\n\n";

/// Device attribute files written by the controller and display helpers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedPaths {
    pub lcd_backlight: PathBuf,
    pub button_backlight: PathBuf,
    pub red: PathBuf,
    pub green: PathBuf,
    pub blue: PathBuf,
    /// Blink enable flag of the LED group.
    pub blink: PathBuf,
    /// Group blink frequency register.
    pub blink_frequency: PathBuf,
    /// Group blink duty-cycle register.
    pub blink_pwm: PathBuf,
    /// Panel RGB calibration (`"r g b"`).
    pub color_calibration: PathBuf,
    /// Content adaptive backlight control switch.
    pub cabc: PathBuf,
}

impl Default for LedPaths {
    fn default() -> Self {
        LedPaths {
            lcd_backlight: "/sys/class/leds/lcd-backlight/brightness".into(),
            button_backlight: "/sys/class/leds/button-backlight/brightness".into(),
            red: "/sys/class/leds/red/brightness".into(),
            green: "/sys/class/leds/green/brightness".into(),
            blue: "/sys/class/leds/blue/brightness".into(),
            blink: "/sys/class/leds/red/device/blink".into(),
            blink_frequency: "/sys/class/leds/red/device/grpfreq".into(),
            blink_pwm: "/sys/class/leds/red/device/grppwm".into(),
            color_calibration: "/sys/class/graphics/fb0/rgb".into(),
            cabc: "/sys/class/graphics/fb0/cabc".into(),
        }
    }
}

impl LedPaths {
    /// The three color channel brightness files of the shared LED.
    pub fn rgb(&self) -> [&Path; 3] {
        [self.red.as_path(), self.green.as_path(), self.blue.as_path()]
    }

    fn named(&self) -> [(&'static str, &Path); 10] {
        [
            ("lcd_backlight", self.lcd_backlight.as_path()),
            ("button_backlight", self.button_backlight.as_path()),
            ("red", self.red.as_path()),
            ("green", self.green.as_path()),
            ("blue", self.blue.as_path()),
            ("blink", self.blink.as_path()),
            ("blink_frequency", self.blink_frequency.as_path()),
            ("blink_pwm", self.blink_pwm.as_path()),
            ("color_calibration", self.color_calibration.as_path()),
            ("cabc", self.cabc.as_path()),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Prefix for every device path. Empty = real filesystem root.
    #[serde(default)]
    pub root: String,

    /// Lights sharing the notification LED, highest priority first.
    /// Default: `["attention", "notifications"]`.
    #[serde(default = "default_shared_led")]
    pub shared_led: Vec<String>,

    #[serde(default)]
    pub paths: LedPaths,
}

fn default_shared_led() -> Vec<String> {
    vec!["attention".into(), "notifications".into()]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            root: String::new(),
            shared_led: default_shared_led(),
            paths: LedPaths::default(),
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A device path is empty.
    EmptyPath(&'static str),
    /// `shared_led` has no entries.
    NoSharedLights,
    /// A `shared_led` entry is not a known light id.
    UnknownLight(String),
    /// A `shared_led` entry names a light with its own dedicated output.
    DedicatedLight(String),
    /// A `shared_led` entry appears more than once.
    DuplicateLight(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyPath(name) => write!(f, "Path for {name} cannot be empty"),
            ValidationError::NoSharedLights => {
                write!(f, "shared_led must list at least one light")
            }
            ValidationError::UnknownLight(id) => write!(f, "Unknown light in shared_led: {id}"),
            ValidationError::DedicatedLight(id) => {
                write!(f, "{id} has its own output and cannot share the LED")
            }
            ValidationError::DuplicateLight(id) => {
                write!(f, "{id} is listed more than once in shared_led")
            }
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lights"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Save config to an arbitrary path atomically (write to temp file, then rename).
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let contents = format!("{CONFIG_HEADER}{serialized}");
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &contents)?;
        match std::fs::rename(&tmp, path) {
            Ok(()) => Ok(()),
            Err(_) => {
                // Rename can fail across filesystems; fall back to direct write + cleanup
                let result = std::fs::write(path, &contents);
                let _ = std::fs::remove_file(&tmp);
                result
            }
        }
    }

    /// Save config to the default platform path.
    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = Self::path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config directory",
            ));
        };
        self.save_to(&path)
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Root prefix as a path, `None` when unset.
    pub fn root_path(&self) -> Option<PathBuf> {
        let root = self.root.trim();
        if root.is_empty() {
            None
        } else {
            Some(PathBuf::from(root))
        }
    }

    /// Parse `shared_led` into light kinds, skipping entries that are unknown,
    /// dedicated, or repeated. Falls back to the default order when nothing
    /// usable remains.
    pub fn shared_lights(&self) -> Vec<LightKind> {
        let mut kinds = Vec::new();
        for id in &self.shared_led {
            if let Ok(kind) = id.parse::<LightKind>()
                && !is_dedicated(kind)
                && !kinds.contains(&kind)
            {
                kinds.push(kind);
            }
        }
        if kinds.is_empty() {
            vec![LightKind::Attention, LightKind::Notifications]
        } else {
            kinds
        }
    }

    /// Validate the entire config, collecting all errors.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (name, path) in self.paths.named() {
            if path.as_os_str().is_empty() {
                errors.push(ValidationError::EmptyPath(name));
            }
        }

        if self.shared_led.is_empty() {
            errors.push(ValidationError::NoSharedLights);
        }
        let mut seen = Vec::new();
        for id in &self.shared_led {
            match id.parse::<LightKind>() {
                Ok(kind) if is_dedicated(kind) => {
                    errors.push(ValidationError::DedicatedLight(id.clone()));
                }
                Ok(kind) if seen.contains(&kind) => {
                    errors.push(ValidationError::DuplicateLight(id.clone()));
                }
                Ok(kind) => seen.push(kind),
                Err(_) => errors.push(ValidationError::UnknownLight(id.clone())),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Lights with their own brightness file, never arbitrated.
pub fn is_dedicated(kind: LightKind) -> bool {
    matches!(kind, LightKind::Backlight | LightKind::Buttons)
}
