//! Color helpers shared by the terminal, TUI and image renderers.

use std::sync::OnceLock;

use regex::Regex;


/// Fill used for the summary bar chart.
pub const SUMMARY_FILL: &str = "#8884d8";

/// Fallback series colors when a payload color cannot be parsed.
const FALLBACK_PALETTE: [(u8, u8, u8); 7] = [
    (136, 132, 216),
    (130, 202, 157),
    (255, 198, 88),
    (255, 128, 66),
    (0, 136, 254),
    (239, 107, 107),
    (97, 205, 187),
];


fn hex_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid color regex")
    })
}


/// Parse `#rgb` or `#rrggbb` into an RGB tuple.
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let caps = hex_pattern().captures(value.trim())?;
    let hex = caps.get(1)?.as_str();

    let expanded: String = if hex.len() == 3 {
        hex.chars().flat_map(|c| [c, c]).collect()
    } else {
        hex.to_string()
    };

    let r = u8::from_str_radix(&expanded[0..2], 16).ok()?;
    let g = u8::from_str_radix(&expanded[2..4], 16).ok()?;
    let b = u8::from_str_radix(&expanded[4..6], 16).ok()?;
    Some((r, g, b))
}


/// Color for the `index`-th series, preferring the payload's own color.
pub fn series_rgb(fill_color: &str, index: usize) -> (u8, u8, u8) {
    parse_hex_color(fill_color).unwrap_or(FALLBACK_PALETTE[index % FALLBACK_PALETTE.len()])
}


/// CSS color string for SVG output.
pub fn css_color(rgb: (u8, u8, u8)) -> String {
    format!("rgb({},{},{})", rgb.0, rgb.1, rgb.2)
}


/// ANSI 24-bit foreground escape.
pub fn ansi_fg(rgb: (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", rgb.0, rgb.1, rgb.2)
}
