//! `types` subcommand — list the light types this device drives.

use super::{Options, Result, load_config, open_controller, print_json};

pub(super) fn cmd_types(opts: &Options) -> Result<()> {
    let config = load_config(opts.config.as_deref());
    let controller = open_controller(&config, opts);
    let types = controller.supported_types();

    if opts.json {
        print_json(&types);
        return Ok(());
    }

    for kind in types {
        println!("{kind}");
    }
    Ok(())
}
