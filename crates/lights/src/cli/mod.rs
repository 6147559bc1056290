//! CLI subcommands — light requests, batches, previews and display tuning.

mod apply;
mod config_cmd;
mod display;
mod preview;
mod set;
mod types;

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use serde::Serialize;

pub(super) use lights_lib::LightController;
pub(super) use lights_lib::config::Config;
pub(super) use lights_lib::error::{LightsError, Result};
pub(super) use lights_lib::led::{self, BlinkParams, LedFrame};
pub(super) use lights_lib::output::{DryRunOutput, LedOutput, SysfsOutput};
pub(super) use lights_lib::state::{FlashMode, LightKind, LightState};

const PADDING: usize = 2;

/// Global flags every subcommand sees.
pub struct Options {
    pub json: bool,
    pub config: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub dry_run: bool,
}

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

// ── Shared setup ──

/// Load the config from `custom` or the platform default, logging parse and
/// validation problems. Never fails: bad files fall back to defaults.
pub(super) fn load_config(custom: Option<&Path>) -> Config {
    let (config, warnings) = match custom {
        Some(path) => Config::load_from(path),
        None => Config::load_with_warnings(),
    };
    for w in &warnings {
        log::warn!("{w}");
    }
    if let Err(errors) = config.validate() {
        for e in &errors {
            log::warn!("config: {e}");
        }
    }
    config
}

/// Output backend chosen by the global flags. `--root` beats the config's root.
pub(super) fn open_output(config: &Config, opts: &Options) -> Box<dyn LedOutput> {
    if opts.dry_run {
        return Box::new(DryRunOutput::default());
    }
    match opts.root.clone().or_else(|| config.root_path()) {
        Some(root) => {
            log::debug!("sysfs root: {}", root.display());
            Box::new(SysfsOutput::with_root(root))
        }
        None => Box::new(SysfsOutput::new()),
    }
}

pub(super) fn open_controller(
    config: &Config,
    opts: &Options,
) -> LightController<Box<dyn LedOutput>> {
    LightController::from_config(open_output(config, opts), config)
}

// ── Request arguments ──

/// Light state flags shared by `set` and `preview`.
#[derive(Args, Debug, Clone)]
pub struct StateArgs {
    /// Color: name (red, white, off), #RRGGBB, AARRGGBB, or 0x-prefixed hex
    #[arg(long, default_value = "off")]
    pub color: String,
    /// Flash mode: none, timed, or hardware
    #[arg(long, default_value = "none")]
    pub mode: String,
    /// Milliseconds on per blink cycle
    #[arg(long, default_value_t = 0)]
    pub on_ms: u32,
    /// Milliseconds off per blink cycle
    #[arg(long, default_value_t = 0)]
    pub off_ms: u32,
}

impl StateArgs {
    pub(super) fn to_state(&self) -> Result<LightState> {
        Ok(LightState {
            color: led::parse_color(&self.color)?,
            flash_mode: self.mode.parse::<FlashMode>()?,
            flash_on_ms: self.on_ms,
            flash_off_ms: self.off_ms,
            ..LightState::OFF
        })
    }
}

// ── JSON output structs ──

/// A derived shared-LED frame as reported to the user.
#[derive(Serialize)]
pub(super) struct FrameJson {
    pub color: String,
    pub flash_mode: FlashMode,
    pub flash_on_ms: u32,
    pub flash_off_ms: u32,
    pub brightness: u8,
    pub blink: BlinkParams,
}

impl From<&LedFrame> for FrameJson {
    fn from(frame: &LedFrame) -> Self {
        FrameJson {
            color: led::format_color(frame.state.color),
            flash_mode: frame.state.flash_mode,
            flash_on_ms: frame.state.flash_on_ms,
            flash_off_ms: frame.state.flash_off_ms,
            brightness: frame.brightness,
            blink: frame.blink,
        }
    }
}

#[derive(Serialize)]
pub(super) struct SetOutput {
    pub light: LightKind,
    pub brightness: u8,
    pub shared_led: Option<FrameJson>,
}

#[derive(Serialize)]
pub(super) struct ApplyOutput {
    pub applied: usize,
    pub failed: Vec<FailedRequestJson>,
    pub shared_led: FrameJson,
}

#[derive(Serialize)]
pub(super) struct FailedRequestJson {
    pub light: String,
    pub error: String,
}

#[derive(Serialize)]
pub(super) struct CalibrationOutput {
    pub min: i32,
    pub max: i32,
    pub rgb: Vec<i32>,
}

#[derive(Serialize)]
pub(super) struct CabcOutput {
    pub enabled: bool,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
    pub problems: Vec<String>,
}

/// Print `value` as pretty JSON.
pub(super) fn print_json(value: &impl Serialize) {
    println!("{}", serde_json::to_string_pretty(value).unwrap());
}

#[derive(Subcommand)]
pub enum CalibrationAction {
    /// Show the current panel calibration
    Get,
    /// Write a new panel calibration
    Set {
        #[arg(allow_negative_numbers = true)]
        r: i32,
        #[arg(allow_negative_numbers = true)]
        g: i32,
        #[arg(allow_negative_numbers = true)]
        b: i32,
    },
}

#[derive(Subcommand)]
pub enum CabcAction {
    /// Show whether adaptive backlight is on
    Get,
    /// Turn adaptive backlight on
    On,
    /// Turn adaptive backlight off
    Off,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Write the default configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum Command {
    /// List the light types this device drives
    Types,

    /// Set one light
    Set {
        /// Light id (backlight, buttons, notifications, attention, ...)
        light: String,
        #[command(flatten)]
        state: StateArgs,
    },

    /// Apply a batch of JSON-lines requests in order (stdin when no file)
    Apply {
        /// File with one JSON request per line
        file: Option<PathBuf>,
    },

    /// Show brightness and blink values for a state without writing anything
    Preview {
        #[command(flatten)]
        state: StateArgs,
    },

    /// Panel RGB calibration
    Calibration {
        #[command(subcommand)]
        action: Option<CalibrationAction>,
    },

    /// Content adaptive backlight control
    Cabc {
        #[command(subcommand)]
        action: Option<CabcAction>,
    },

    /// Show or initialise the configuration file
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

pub fn run(cmd: Command, opts: &Options) -> Result<()> {
    match cmd {
        Command::Types => types::cmd_types(opts),
        Command::Set { light, state } => set::cmd_set(&light, &state, opts),
        Command::Apply { file } => apply::cmd_apply(file.as_deref(), opts),
        Command::Preview { state } => preview::cmd_preview(&state, opts.json),
        Command::Calibration { action } => {
            display::cmd_calibration(action.unwrap_or(CalibrationAction::Get), opts)
        }
        Command::Cabc { action } => display::cmd_cabc(action.unwrap_or(CabcAction::Get), opts),
        Command::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => config_cmd::cmd_config(opts),
            ConfigAction::Init { force } => config_cmd::cmd_config_init(force, opts),
        },
    }
}


#[cfg(test)]
mod state_args_tests {
    use super::*;

    fn args(color: &str, mode: &str, on_ms: u32, off_ms: u32) -> StateArgs {
        StateArgs {
            color: color.into(),
            mode: mode.into(),
            on_ms,
            off_ms,
        }
    }

    #[test]
    fn defaults_are_off() {
        let state = args("off", "none", 0, 0).to_state().unwrap();
        assert_eq!(state, LightState::OFF);
    }

    #[test]
    fn timed_state() {
        let state = args("#00FF00", "timed", 500, 2000).to_state().unwrap();
        assert_eq!(state, LightState::timed(0xFF00_FF00, 500, 2000));
    }

    #[test]
    fn bad_color_is_rejected() {
        let err = args("chartreuse-ish", "none", 0, 0).to_state().unwrap_err();
        assert!(matches!(err, LightsError::Color(_)));
    }

    #[test]
    fn bad_mode_is_rejected() {
        assert!(args("red", "strobe", 0, 0).to_state().is_err());
    }
}
