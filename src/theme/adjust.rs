//! Dark-mode color adjustment.
//!
//! Pure helpers used when deriving dark-mode style variables.

use anyhow::Result;

use crate::models::RgbColor;

/// Brightness applied to `primary` in the dark highlight gradient.
pub const DARK_PRIMARY_FACTOR: f64 = 0.7;
/// Brightness applied to `primaryLight` in the dark highlight gradient.
pub const DARK_PRIMARY_LIGHT_FACTOR: f64 = 0.6;
/// Brightness applied to `highlightBorder` in the dark highlight gradient.
pub const DARK_HIGHLIGHT_BORDER_FACTOR: f64 = 0.8;

/// Translucent highlight used for light highlight colors not in the table.
pub const DEFAULT_DARK_HIGHLIGHT: &str = "rgba(0, 47, 167, 0.3)";

/// Curated dark-mode replacements for known light highlight colors.
const DARK_HIGHLIGHTS: [(&str, &str); 8] = [
    ("#eff6ff", "rgba(0, 47, 167, 0.3)"),
    ("#f0fdf4", "rgba(64, 125, 82, 0.25)"),
    ("#fef3c7", "rgba(146, 64, 14, 0.3)"),
    ("#fef3e2", "rgba(146, 64, 14, 0.3)"),
    ("#fef7ff", "rgba(124, 58, 237, 0.3)"),
    ("#fef2f2", "rgba(220, 38, 38, 0.3)"),
    ("#f0fdfa", "rgba(13, 148, 136, 0.3)"),
    ("#fff7ed", "rgba(234, 88, 12, 0.3)"),
];

/// Scales a hex color's channels by `factor` and renders it as `rgb(...)`.
///
/// # Examples
///
/// ```
/// use scholar_site::theme::adjust::adjust_brightness;
///
/// assert_eq!(adjust_brightness("#002fa7", 0.7).unwrap(), "rgb(0, 33, 117)");
/// ```
pub fn adjust_brightness(hex: &str, factor: f64) -> Result<String> {
    Ok(RgbColor::from_hex(hex)?.scale(factor).to_css_rgb())
}

/// Dark-mode replacement for a light highlight background.
///
/// Exact (case-insensitive) matches come from the curated table; anything
/// else gets [`DEFAULT_DARK_HIGHLIGHT`].
#[must_use]
pub fn dark_highlight(hex: &str) -> &'static str {
    let hex = hex.trim();
    DARK_HIGHLIGHTS
        .iter()
        .find(|(light, _)| light.eq_ignore_ascii_case(hex))
        .map_or(DEFAULT_DARK_HIGHLIGHT, |(_, dark)| dark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_brightness_klein() {
        assert_eq!(adjust_brightness("#002fa7", 0.7).unwrap(), "rgb(0, 33, 117)");
        // Deterministic
        assert_eq!(
            adjust_brightness("#002fa7", 0.7).unwrap(),
            adjust_brightness("#002fa7", 0.7).unwrap()
        );
    }

    #[test]
    fn test_adjust_brightness_identity() {
        for hex in ["#002fa7", "#3b82f6", "#ffffff", "#000000", "#0040d9"] {
            let rgb = RgbColor::from_hex(hex).unwrap();
            assert_eq!(adjust_brightness(hex, 1.0).unwrap(), rgb.to_css_rgb());
        }
    }

    #[test]
    fn test_adjust_brightness_factors() {
        // primaryLight * 0.6: 0x40 = 64 -> 38.4, 0xd9 = 217 -> 130.2
        assert_eq!(
            adjust_brightness("#0040d9", DARK_PRIMARY_LIGHT_FACTOR).unwrap(),
            "rgb(0, 38, 130)"
        );
        // highlightBorder * 0.8: 59 -> 47.2, 130 -> 104, 246 -> 196.8
        assert_eq!(
            adjust_brightness("#3b82f6", DARK_HIGHLIGHT_BORDER_FACTOR).unwrap(),
            "rgb(47, 104, 197)"
        );
    }

    #[test]
    fn test_adjust_brightness_invalid_hex() {
        assert!(adjust_brightness("blue", 0.5).is_err());
    }

    #[test]
    fn test_dark_highlight_table() {
        assert_eq!(dark_highlight("#eff6ff"), "rgba(0, 47, 167, 0.3)");
        assert_eq!(dark_highlight("#f0fdf4"), "rgba(64, 125, 82, 0.25)");
        assert_eq!(dark_highlight("#FFF7ED"), "rgba(234, 88, 12, 0.3)");
    }

    #[test]
    fn test_dark_highlight_fallback() {
        assert_eq!(dark_highlight("#123456"), DEFAULT_DARK_HIGHLIGHT);
        assert_eq!(dark_highlight(""), DEFAULT_DARK_HIGHLIGHT);
    }
}
