//! `config` subcommand — show effective configuration and file path, or
//! write a default config file.

use super::{
    Config, ConfigOutput, LightsError, Options, Result, kv, kv_indent, kv_width, print_json,
};

pub(super) fn cmd_config(opts: &Options) -> Result<()> {
    let custom_path = opts.config.as_deref();
    let config = super::load_config(custom_path);
    let config_path = custom_path.map(|p| p.to_path_buf()).or_else(Config::path);
    let config_exists = config_path.as_ref().is_some_and(|p| p.exists());
    let problems: Vec<String> = match config.validate() {
        Ok(()) => vec![],
        Err(errors) => errors.iter().map(|e| e.to_string()).collect(),
    };

    if opts.json {
        let output = ConfigOutput {
            config_file: config_path.as_ref().map(|p| p.display().to_string()),
            config_file_exists: config_exists,
            settings: config,
            problems,
        };
        print_json(&output);
        return Ok(());
    }

    let paths = &config.paths;
    let named = [
        ("lcd_backlight:", &paths.lcd_backlight),
        ("button_backlight:", &paths.button_backlight),
        ("red:", &paths.red),
        ("green:", &paths.green),
        ("blue:", &paths.blue),
        ("blink:", &paths.blink),
        ("blink_frequency:", &paths.blink_frequency),
        ("blink_pwm:", &paths.blink_pwm),
        ("color_calibration:", &paths.color_calibration),
        ("cabc:", &paths.cabc),
    ];
    let mut indent_keys = vec!["root:", "shared_led:"];
    indent_keys.extend(named.iter().map(|(k, _)| *k));
    let w = kv_width(&["Config file:"], &indent_keys);

    match &config_path {
        Some(p) if config_exists => kv("Config file:", format_args!("{} (loaded)", p.display()), w),
        Some(p) => kv(
            "Config file:",
            format_args!("{} (not found, using defaults)", p.display()),
            w,
        ),
        None => kv("Config file:", "(no config directory)", w),
    }
    println!();

    println!("Settings:");
    let root = match config.root_path() {
        Some(r) => r.display().to_string(),
        None => "/".to_string(),
    };
    kv_indent("root:", root, w);
    kv_indent("shared_led:", config.shared_led.join(", "), w);
    println!();

    println!("Paths:");
    for (key, path) in named {
        kv_indent(key, path.display(), w);
    }

    if !problems.is_empty() {
        println!();
        println!("Problems:");
        for p in &problems {
            println!("  {p}");
        }
    }
    Ok(())
}

pub(super) fn cmd_config_init(force: bool, opts: &Options) -> Result<()> {
    let custom_path = opts.config.as_deref();
    let Some(path) = custom_path.map(|p| p.to_path_buf()).or_else(Config::path) else {
        return Err(LightsError::Config("no config directory".into()));
    };
    if path.exists() && !force {
        return Err(LightsError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let config = Config::default();
    match custom_path {
        Some(p) => config.save_to(p)?,
        None => config.save()?,
    }
    log::info!("wrote {}", path.display());

    if opts.json {
        let output = ConfigOutput {
            config_file: Some(path.display().to_string()),
            config_file_exists: true,
            settings: config,
            problems: vec![],
        };
        print_json(&output);
        return Ok(());
    }
    kv(
        "Config file:",
        format_args!("{} (written)", path.display()),
        kv_width(&["Config file:"], &[]),
    );
    Ok(())
}
