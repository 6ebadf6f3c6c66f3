//! Light/dark display mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Binary display mode, independent of the palette choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light backgrounds with dark text
    #[default]
    Light,
    /// Dark backgrounds with light text
    Dark,
}

impl ThemeMode {
    /// Detects the OS color scheme preference.
    ///
    /// Uses the `dark-light` crate; anything other than an explicit dark
    /// preference (including detection errors) maps to light.
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Dark) => Self::Dark,
            Ok(dark_light::Mode::Light | dark_light::Mode::Unspecified) | Err(_) => Self::Light,
        }
    }

    /// Returns the attribute/storage spelling ("light" or "dark").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Returns the opposite mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not exactly `light` or `dark`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported theme mode '{0}', expected 'light' or 'dark'")]
pub struct UnknownMode(pub String);

impl FromStr for ThemeMode {
    type Err = UnknownMode;

    /// Parses the exact, case-sensitive spellings used in storage.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_spellings() {
        assert_eq!("light".parse::<ThemeMode>(), Ok(ThemeMode::Light));
        assert_eq!("dark".parse::<ThemeMode>(), Ok(ThemeMode::Dark));
    }

    #[test]
    fn test_parse_rejects_everything_else() {
        for input in ["", "Dark", "LIGHT", " dark", "auto", "night"] {
            assert!(input.parse::<ThemeMode>().is_err(), "{input:?} should be rejected");
        }
    }

    #[test]
    fn test_toggled() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled().toggled(), ThemeMode::Dark);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ThemeMode::Dark).unwrap(), "\"dark\"");
        let mode: ThemeMode = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(mode, ThemeMode::Light);
    }

    #[test]
    fn test_detect_returns_a_mode() {
        let mode = ThemeMode::detect();
        assert!(mode == ThemeMode::Light || mode == ThemeMode::Dark);
    }
}
