//! Utility functions for visualization: palette, colour parsing, label gutters.

use anyhow::{Result, anyhow};
use plotters::prelude::*;

use super::text::estimate_text_width_px;

/// FiveThirtyEight chart palette.
/// Order: Blue, Green, Red, Gold, Gray, Purple. Dual-axis plots use the first two.
pub const FIVETHIRTYEIGHT: [RGBColor; 6] = [
    RGBColor(0, 143, 213),   // blue   (#008FD5)
    RGBColor(109, 144, 79),  // green  (#6D904F)
    RGBColor(252, 79, 48),   // red    (#FC4F30)
    RGBColor(229, 174, 56),  // gold   (#E5AE38)
    RGBColor(139, 139, 139), // gray   (#8B8B8B)
    RGBColor(129, 15, 124),  // purple (#810F7C)
];

/// Pick a colour from a palette, cycling when there are more series than colours.
#[inline]
pub fn palette_color(palette: &[RGBColor], idx: usize) -> RGBColor {
    if palette.is_empty() {
        return FIVETHIRTYEIGHT[idx % FIVETHIRTYEIGHT.len()];
    }
    palette[idx % palette.len()]
}

/// Parse `#RRGGBB` (leading `#` optional).
pub fn parse_hex_color(hex: &str) -> Result<RGBColor> {
    let h = hex.trim().trim_start_matches('#');
    if h.len() != 6 || !h.is_ascii() {
        return Err(anyhow!("invalid colour '{hex}', expected #RRGGBB"));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&h[i..i + 2], 16).map_err(|_| anyhow!("invalid colour '{hex}'"))
    };
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

/// Width in pixels of a vertical axis label gutter that fits all `labels`.
///
/// Adds room for tick marks and clamps to a sensible range.
pub fn label_area_px(labels: &[String], font_px: u32) -> u32 {
    let max_px = labels
        .iter()
        .map(|s| estimate_text_width_px(s, font_px))
        .max()
        .unwrap_or(0);
    max_px.saturating_add(18).clamp(48, 160)
}

/// Convert a figure size in inches to pixels.
pub fn inches_to_px(width_in: f64, height_in: f64, dpi: f64) -> Result<(u32, u32)> {
    let to_px = |inches: f64| -> Result<u32> {
        let px = (inches * dpi).round();
        if !px.is_finite() || px < 16.0 || px > 20_000.0 {
            return Err(anyhow!(
                "figure size {inches}in at {dpi} dpi gives {px}px, outside 16..=20000"
            ));
        }
        Ok(px as u32)
    };
    Ok((to_px(width_in)?, to_px(height_in)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colours() {
        let c = parse_hex_color("#008FD5").unwrap();
        assert_eq!((c.0, c.1, c.2), (0, 143, 213));
        assert!(parse_hex_color("blue").is_err());
    }

    #[test]
    fn palette_cycles() {
        let p = [RED, BLUE];
        assert_eq!(palette_color(&p, 3), BLUE);
    }

    #[test]
    fn figure_size_in_pixels() {
        assert_eq!(inches_to_px(10.0, 4.0, 100.0).unwrap(), (1000, 400));
        assert!(inches_to_px(0.0, 4.0, 100.0).is_err());
    }
}
