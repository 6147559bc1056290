//! `apply` subcommand — run a JSON-lines batch against one controller.

use std::io::Read;
use std::path::Path;

use lights_lib::request;

use super::{
    ApplyOutput, FailedRequestJson, FrameJson, Options, Result, kv, kv_indent, kv_width,
    load_config, open_controller, print_json,
};

pub(super) fn cmd_apply(file: Option<&Path>, opts: &Options) -> Result<()> {
    let input = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let requests = request::parse_requests(&input)?;

    let config = load_config(opts.config.as_deref());
    let controller = open_controller(&config, opts);
    let results = request::apply_requests(&controller, requests);

    let total = results.len();
    let failed: Vec<FailedRequestJson> = results
        .into_iter()
        .filter_map(|a| {
            a.result.err().map(|e| FailedRequestJson {
                light: a.request.light,
                error: e.to_string(),
            })
        })
        .collect();
    let output = ApplyOutput {
        applied: total - failed.len(),
        failed,
        shared_led: FrameJson::from(&controller.current_frame()),
    };

    if opts.json {
        print_json(&output);
        return Ok(());
    }

    let w = kv_width(
        &["Applied:", "Failed:", "Shared LED:"],
        &["Driven by:", "Color:", "Blink:"],
    );
    kv("Applied:", output.applied, w);
    kv("Failed:", output.failed.len(), w);
    for f in &output.failed {
        kv_indent(&format!("{}:", f.light), &f.error, w.max(f.light.len() + 5));
    }
    println!();
    println!("Shared LED:");
    let winner = controller
        .selected_light()
        .map(|k| k.to_string())
        .unwrap_or_else(|| "(none lit)".to_string());
    kv_indent("Driven by:", winner, w);
    let frame = &output.shared_led;
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
    Ok(())
}
