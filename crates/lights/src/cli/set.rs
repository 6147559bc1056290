//! `set` subcommand — apply one light request.

use super::{
    FrameJson, LightKind, Options, Result, SetOutput, StateArgs, kv, kv_indent, kv_width, led,
    load_config, open_controller, print_json,
};

pub(super) fn cmd_set(light: &str, args: &StateArgs, opts: &Options) -> Result<()> {
    let kind: LightKind = light.parse()?;
    let state = args.to_state()?;

    let config = load_config(opts.config.as_deref());
    let controller = open_controller(&config, opts);
    controller.set_light(kind, &state)?;

    // Dedicated lights have no arbitration slot. Arbitrated ones report the
    // state as stored, after normalization.
    let slot = controller.slot(kind);
    let stored = slot.unwrap_or(state);
    let output = SetOutput {
        light: kind,
        brightness: led::brightness(stored.color),
        shared_led: slot.map(|_| FrameJson::from(&controller.current_frame())),
    };

    if opts.json {
        print_json(&output);
        return Ok(());
    }

    let w = kv_width(
        &["Light:", "Brightness:", "Shared LED:"],
        &["Driven by:", "Color:", "Blink:"],
    );
    kv("Light:", kind, w);
    kv("Brightness:", output.brightness, w);
    if let Some(frame) = &output.shared_led {
        println!();
        println!("Shared LED:");
        if let Some(winner) = controller.selected_light() {
            kv_indent("Driven by:", winner, w);
        }
        kv_indent(
            "Color:",
            format_args!("{} (brightness {})", frame.color, frame.brightness),
            w,
        );
        let blink = if frame.blink.enabled {
            format!("freq {} pwm {}", frame.blink.frequency, frame.blink.pwm)
        } else {
            "off".to_string()
        };
        kv_indent("Blink:", blink, w);
    }
    Ok(())
}
