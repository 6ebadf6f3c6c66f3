//! Color palette data structures and palette-set parsing.
//!
//! A palette set is loaded once per session from a `themes.json` document
//! of the form `{ "defaultTheme": "...", "themes": { "<key>": Palette } }`.
//! When that document is unusable, [`PaletteSet::builtin`] provides a
//! single Klein Blue palette.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use super::RgbColor;

/// Key of the built-in palette and the default when none is declared.
pub const BUILTIN_PALETTE_KEY: &str = "klein";

/// Failure to obtain a usable palette set.
#[derive(Debug, Error)]
pub enum PaletteError {
    /// The configuration source could not be reached.
    #[error("palette configuration unavailable: {0}")]
    Unavailable(String),

    /// Reading a local configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON or does not match the schema.
    #[error("malformed palette configuration: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The document declares no palettes.
    #[error("palette configuration declares no themes")]
    Empty,

    /// `defaultTheme` names a palette that is not declared.
    #[error("default theme '{0}' is not declared in themes")]
    UnknownDefault(String),
}

/// A validated `#RRGGBB` color that remembers how it was written.
///
/// Style variables pass the literal through unchanged; the parsed channels
/// are used for dark-mode arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    literal: String,
    rgb: RgbColor,
}

impl HexColor {
    /// Parses a hex color, keeping the trimmed input as its literal.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid `#RRGGBB` color.
    pub fn parse(input: &str) -> anyhow::Result<Self> {
        let rgb = RgbColor::from_hex(input)?;
        let trimmed = input.trim();
        let literal = if trimmed.starts_with('#') {
            trimmed.to_string()
        } else {
            format!("#{trimmed}")
        };
        Ok(Self { literal, rgb })
    }

    /// The color as written in the configuration (always `#`-prefixed).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.literal
    }

    /// Parsed channel values.
    #[must_use]
    pub const fn rgb(&self) -> RgbColor {
        self.rgb
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).map_err(|e| e.to_string())
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.literal
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

/// The eight base colors of a palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteColors {
    /// Main brand color (links, headings, buttons)
    pub primary: HexColor,
    /// Hover state of the primary color
    pub primary_hover: HexColor,
    /// Lighter variant of the primary color
    pub primary_light: HexColor,
    /// Secondary accent color
    pub accent: HexColor,
    /// Hover state of the accent color
    pub accent_hover: HexColor,
    /// Lighter variant of the accent color
    pub accent_light: HexColor,
    /// Soft highlight background
    pub highlight: HexColor,
    /// Border color of highlighted blocks
    pub highlight_border: HexColor,
}

/// A named set of base colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Display name (e.g., "Klein Blue")
    pub name: String,
    /// Base colors
    pub colors: PaletteColors,
}

impl Palette {
    /// The built-in Klein Blue palette.
    #[must_use]
    pub fn klein() -> Self {
        let hex = |r, g, b| {
            let rgb = RgbColor::new(r, g, b);
            HexColor {
                literal: rgb.to_hex(),
                rgb,
            }
        };
        Self {
            name: "Klein Blue".to_string(),
            colors: PaletteColors {
                primary: hex(0x00, 0x2f, 0xa7),
                primary_hover: hex(0x00, 0x1f, 0x73),
                primary_light: hex(0x00, 0x40, 0xd9),
                accent: hex(0x64, 0x74, 0x8b),
                accent_hover: hex(0x47, 0x55, 0x69),
                accent_light: hex(0xe2, 0xe8, 0xf0),
                highlight: hex(0xef, 0xf6, 0xff),
                highlight_border: hex(0x3b, 0x82, 0xf6),
            },
        }
    }
}

/// On-disk shape of `themes.json`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaletteDocument {
    #[serde(default)]
    default_theme: Option<String>,
    themes: BTreeMap<String, Palette>,
}

/// All palettes available for the session plus the default key.
///
/// Invariant: non-empty, and `default_key` names one of the palettes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteSet {
    palettes: BTreeMap<String, Palette>,
    default_key: String,
}

impl PaletteSet {
    /// The single-palette fallback set.
    #[must_use]
    pub fn builtin() -> Self {
        let mut palettes = BTreeMap::new();
        palettes.insert(BUILTIN_PALETTE_KEY.to_string(), Palette::klein());
        Self {
            palettes,
            default_key: BUILTIN_PALETTE_KEY.to_string(),
        }
    }

    /// Parses and validates a `themes.json` document.
    ///
    /// A missing `defaultTheme` falls back to `klein`.
    pub fn from_json(json: &str) -> Result<Self, PaletteError> {
        let document: PaletteDocument = serde_json::from_str(json)?;

        if document.themes.is_empty() {
            return Err(PaletteError::Empty);
        }

        let default_key = document
            .default_theme
            .unwrap_or_else(|| BUILTIN_PALETTE_KEY.to_string());
        if !document.themes.contains_key(&default_key) {
            return Err(PaletteError::UnknownDefault(default_key));
        }

        Ok(Self {
            palettes: document.themes,
            default_key,
        })
    }

    /// Key of the default palette.
    #[must_use]
    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    /// The default palette.
    #[must_use]
    pub fn default_palette(&self) -> &Palette {
        // Guaranteed by construction
        &self.palettes[&self.default_key]
    }

    /// Looks up a palette by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Palette> {
        self.palettes.get(key)
    }

    /// Whether a palette with this key exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.palettes.contains_key(key)
    }

    /// Palette keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.palettes.keys().map(String::as_str)
    }

    /// Palettes with their keys in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Palette)> {
        self.palettes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of palettes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// Whether the set has no palettes (never true once constructed).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

impl Default for PaletteSet {
    fn default() -> Self {
        Self::builtin()
    }
}
