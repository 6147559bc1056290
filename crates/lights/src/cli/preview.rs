//! `preview` subcommand — derive brightness and blink values without hardware.

use super::{FrameJson, LedFrame, Result, StateArgs, kv, kv_indent, kv_width, print_json};

pub(super) fn cmd_preview(args: &StateArgs, json: bool) -> Result<()> {
    let frame = LedFrame::from_state(args.to_state()?);
    let out = FrameJson::from(&frame);

    if json {
        print_json(&out);
        return Ok(());
    }

    let w = kv_width(
        &["Color:", "Flash:", "Brightness:", "Blink:"],
        &["Frequency:", "PWM:"],
    );
    kv("Color:", &out.color, w);
    kv(
        "Flash:",
        format_args!(
            "{:?} ({} ms on, {} ms off)",
            out.flash_mode, out.flash_on_ms, out.flash_off_ms
        ),
        w,
    );
    kv("Brightness:", out.brightness, w);
    if out.blink.enabled {
        kv("Blink:", "on", w);
        kv_indent("Frequency:", out.blink.frequency, w);
        kv_indent("PWM:", out.blink.pwm, w);
    } else {
        kv("Blink:", "off", w);
    }
    Ok(())
}
