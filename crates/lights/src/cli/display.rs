//! `calibration` and `cabc` subcommands — panel tuning files next to fb0.

use lights_lib::display::{AdaptiveBacklight, ColorCalibration};

use super::{
    CabcAction, CabcOutput, CalibrationAction, CalibrationOutput, LightsError, Options, Result, kv,
    kv_width, load_config, open_output, print_json,
};

pub(super) fn cmd_calibration(action: CalibrationAction, opts: &Options) -> Result<()> {
    let config = load_config(opts.config.as_deref());
    let mut cal = ColorCalibration::new(
        open_output(&config, opts),
        config.paths.color_calibration.clone(),
    );

    if let CalibrationAction::Set { r, g, b } = action {
        let (min, max) = (cal.min_value(), cal.max_value());
        if let Some(v) = [r, g, b].into_iter().find(|v| !(min..=max).contains(v)) {
            return Err(LightsError::Calibration(format!(
                "{v} is outside {min}..={max}"
            )));
        }
        cal.set(&[r, g, b])?;
    }

    let output = CalibrationOutput {
        min: cal.min_value(),
        max: cal.max_value(),
        rgb: cal.get(),
    };

    if opts.json {
        print_json(&output);
        return Ok(());
    }

    let w = kv_width(&["Calibration:", "Range:"], &[]);
    match output.rgb.as_slice() {
        [r, g, b] => kv("Calibration:", format_args!("{r} {g} {b}"), w),
        _ => kv("Calibration:", "(unavailable)", w),
    }
    kv("Range:", format_args!("{}..={}", output.min, output.max), w);
    Ok(())
}

pub(super) fn cmd_cabc(action: CabcAction, opts: &Options) -> Result<()> {
    let config = load_config(opts.config.as_deref());
    let mut cabc = AdaptiveBacklight::new(open_output(&config, opts), config.paths.cabc.clone());

    let wanted = match action {
        CabcAction::Get => None,
        CabcAction::On => Some(true),
        CabcAction::Off => Some(false),
    };
    if let Some(enabled) = wanted
        && !cabc.set_enabled(enabled)
    {
        return Err(LightsError::Io(std::io::Error::other(format!(
            "could not write {}",
            config.paths.cabc.display()
        ))));
    }

    // A dry run can't read back what it didn't write.
    let enabled = match wanted {
        Some(enabled) if opts.dry_run => enabled,
        _ => cabc.is_enabled(),
    };

    if opts.json {
        print_json(&CabcOutput { enabled });
        return Ok(());
    }
    kv("CABC:", if enabled { "on" } else { "off" }, kv_width(&["CABC:"], &[]));
    Ok(())
}
