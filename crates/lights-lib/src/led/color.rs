//! Color parsing, formatting, and brightness derivation.
//!
//! Colors use the host format `0xAARRGGBB`. The alpha byte is carried but
//! never contributes to LED output.

const RGB_MASK: u32 = 0x00FF_FFFF;
const OPAQUE: u32 = 0xFF00_0000;

/// Parse a color string into `0xAARRGGBB`.
///
/// Accepts:
/// - Hex: `"#FF0000"`, `"FF0000"` (alpha set to `FF`), `"#80FF0000"` (explicit alpha)
/// - Raw integer: `"0x00FF0000"`, or decimal digits that aren't 6 or 8 long (`"255"`)
/// - Named: `"red"`, `"green"`, `"blue"`, `"white"`, `"orange"`, `"yellow"`, `"purple"`, `"cyan"`, `"off"`
pub fn parse_color(s: &str) -> crate::error::Result<u32> {
    let s = s.trim();

    match s.to_lowercase().as_str() {
        "red" => return Ok(0xFFFF_0000),
        "green" => return Ok(0xFF00_FF00),
        "blue" => return Ok(0xFF00_00FF),
        "white" => return Ok(0xFFFF_FFFF),
        "orange" => return Ok(0xFFFF_8000),
        "yellow" => return Ok(0xFFFF_FF00),
        "purple" => return Ok(0xFF80_00FF),
        "cyan" => return Ok(0xFF00_FFFF),
        "off" | "black" => return Ok(0x0000_0000),
        _ => {}
    }

    let invalid = || crate::LightsError::Color(format!("Invalid color: {s}"));

    if let Some(raw) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u32::from_str_radix(raw, 16).map_err(|_| invalid());
    }
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) && !s.starts_with('#') {
        // Decimal only when it can't be read as a 6/8 digit hex code.
        if s.len() != 6 && s.len() != 8 {
            return s.parse::<u32>().map_err(|_| invalid());
        }
    }

    let hex = s.strip_prefix('#').unwrap_or(s);
    let val = u32::from_str_radix(hex, 16).map_err(|_| {
        crate::LightsError::Color(format!(
            "Invalid hex color: {s} (use #RRGGBB, #AARRGGBB or a color name)"
        ))
    })?;
    match hex.len() {
        6 => Ok(OPAQUE | val),
        8 => Ok(val),
        _ => Err(crate::LightsError::Color(format!(
            "Invalid color: {s} (use #RRGGBB, #AARRGGBB or a color name)"
        ))),
    }
}

/// Format a color value as `#RRGGBB`.
pub fn format_color(val: u32) -> String {
    format!("#{:06X}", val & RGB_MASK)
}

/// Perceived intensity of a color, `(77*R + 150*G + 29*B) >> 8`.
///
/// The integer weights and the final shift are calibrated against the LED
/// hardware and must stay bit-exact. The weights sum to 256, so full white
/// yields 255.
pub fn brightness(color: u32) -> u8 {
    let color = color & RGB_MASK;
    let r = (color >> 16) & 0xFF;
    let g = (color >> 8) & 0xFF;
    let b = color & 0xFF;
    // Max is (256 * 255) >> 8 = 255, always fits.
    ((77 * r + 150 * g + 29 * b) >> 8) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── brightness ──

    #[test]
    fn brightness_black_is_zero() {
        assert_eq!(brightness(0x0000_0000), 0);
    }

    #[test]
    fn brightness_white_is_full_scale() {
        assert_eq!(brightness(0x00FF_FFFF), 255);
        assert_eq!(brightness(0x00FE_FFFF), 254);
    }

    #[test]
    fn brightness_ignores_alpha() {
        for c in [0x0012_3456, 0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0x0080_8080] {
            assert_eq!(brightness(c), brightness(c | 0xFF00_0000));
            assert_eq!(brightness(c), brightness(c | 0x5A00_0000));
        }
        assert_eq!(brightness(0xFF00_0000), 0);
    }

    #[test]
    fn brightness_primary_weights() {
        assert_eq!(brightness(0x00FF_0000), 76); // 77*255 >> 8
        assert_eq!(brightness(0x0000_FF00), 149); // 150*255 >> 8
        assert_eq!(brightness(0x0000_00FF), 28); // 29*255 >> 8
    }

    #[test]
    fn brightness_mid_grey() {
        // 256 * 128 >> 8
        assert_eq!(brightness(0x0080_8080), 128);
    }

    // ── parse_color ──

    #[test]
    fn parse_named_colors_are_opaque() {
        assert_eq!(parse_color("red").unwrap(), 0xFFFF_0000);
        assert_eq!(parse_color("green").unwrap(), 0xFF00_FF00);
        assert_eq!(parse_color("blue").unwrap(), 0xFF00_00FF);
        assert_eq!(parse_color("white").unwrap(), 0xFFFF_FFFF);
    }

    #[test]
    fn parse_named_off() {
        assert_eq!(parse_color("off").unwrap(), 0);
        assert_eq!(parse_color("black").unwrap(), 0);
    }

    #[test]
    fn parse_named_case_insensitive() {
        assert_eq!(parse_color("  RED ").unwrap(), 0xFFFF_0000);
    }

    #[test]
    fn parse_hex_rgb_sets_alpha() {
        assert_eq!(parse_color("#123456").unwrap(), 0xFF12_3456);
        assert_eq!(parse_color("abcdef").unwrap(), 0xFFAB_CDEF);
    }

    #[test]
    fn parse_hex_argb_keeps_alpha() {
        assert_eq!(parse_color("#80FF0000").unwrap(), 0x80FF_0000);
        assert_eq!(parse_color("#00000000").unwrap(), 0);
    }

    #[test]
    fn parse_raw_hex_and_decimal() {
        assert_eq!(parse_color("0x00FF0000").unwrap(), 0x00FF_0000);
        assert_eq!(parse_color("255").unwrap(), 255);
    }

    #[test]
    fn parse_invalid() {
        assert!(parse_color("#FFF").is_err());
        assert!(parse_color("#GGHHII").is_err());
        assert!(parse_color("chartreuse").is_err());
        assert!(parse_color("0xZZ").is_err());
        assert!(parse_color("").is_err());
    }

    // ── format_color ──

    #[test]
    fn format_drops_alpha() {
        assert_eq!(format_color(0xFFFF_0000), "#FF0000");
        assert_eq!(format_color(0x0000_00FF), "#0000FF");
        assert_eq!(format_color(0), "#000000");
    }

    #[test]
    fn parse_format_hex() {
        let val = parse_color("#AB12CD").unwrap();
        assert_eq!(format_color(val), "#AB12CD");
    }
}
