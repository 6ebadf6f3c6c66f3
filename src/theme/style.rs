//! Style variable derivation for a (palette, mode) pair.

use crate::models::{HexColor, Palette, ThemeMode};
use crate::surface::Surface;

use super::adjust::{
    dark_highlight, DARK_HIGHLIGHT_BORDER_FACTOR, DARK_PRIMARY_FACTOR, DARK_PRIMARY_LIGHT_FACTOR,
};

/// Background, text and border values for light mode.
const LIGHT_SURFACE: [(&str, &str); 8] = [
    ("--bg-primary", "#ffffff"),
    ("--bg-secondary", "#fafbfc"),
    ("--bg-tertiary", "#f3f4f6"),
    ("--text-primary", "#111827"),
    ("--text-secondary", "#374151"),
    ("--text-muted", "#6b7280"),
    ("--border-color", "#e5e7eb"),
    ("--blue-light", "#f1f5f9"),
];

/// Background, text and border values for dark mode.
const DARK_SURFACE: [(&str, &str); 8] = [
    ("--bg-primary", "#111827"),
    ("--bg-secondary", "#1f2937"),
    ("--bg-tertiary", "#374151"),
    ("--text-primary", "#f9fafb"),
    ("--text-secondary", "#e5e7eb"),
    ("--text-muted", "#d1d5db"),
    ("--border-color", "#374151"),
    ("--blue-light", "#1e293b"),
];

/// Ordered set of CSS custom properties. Later writes to the same name
/// replace the earlier value in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleSheet {
    variables: Vec<(&'static str, String)>,
}

impl StyleSheet {
    fn set(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.variables.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.variables.push((name, value));
        }
    }

    /// Looks up a variable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Variables in derivation order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.variables.iter().map(|(n, v)| (*n, v.as_str()))
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether no variables are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Writes every variable to the surface root.
    pub fn apply_to(&self, surface: &mut impl Surface) {
        for (name, value) in self.iter() {
            surface.set_style_variable(name, value);
        }
    }

    /// Renders the sheet as a `:root { ... }` CSS rule.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in self.iter() {
            css.push_str("  ");
            css.push_str(name);
            css.push_str(": ");
            css.push_str(value);
            css.push_str(";\n");
        }
        css.push('}');
        css
    }
}

fn gradient(stops: &[(&str, u8)]) -> String {
    let stops: Vec<String> = stops
        .iter()
        .map(|(color, at)| format!("{color} {at}%"))
        .collect();
    format!("linear-gradient(135deg, {})", stops.join(", "))
}

fn scaled(color: &HexColor, factor: f64) -> String {
    color.rgb().scale(factor).to_css_rgb()
}

/// Derives every style variable for a palette in the given mode.
#[must_use]
pub fn resolve(palette: &Palette, mode: ThemeMode) -> StyleSheet {
    let c = &palette.colors;
    let mut sheet = StyleSheet::default();

    sheet.set("--primary-color", c.primary.as_str());
    sheet.set("--primary-hover", c.primary_hover.as_str());
    sheet.set("--primary-light", c.primary_light.as_str());
    sheet.set("--accent-color", c.accent.as_str());
    sheet.set("--accent-hover", c.accent_hover.as_str());
    sheet.set("--accent-light", c.accent_light.as_str());
    sheet.set("--blue-accent", c.primary.as_str());
    sheet.set("--blue-hover", c.primary_hover.as_str());
    sheet.set("--highlight-bg-soft", c.highlight.as_str());

    sheet.set(
        "--gradient-primary",
        gradient(&[(c.primary.as_str(), 0), (c.primary_hover.as_str(), 100)]),
    );
    sheet.set(
        "--gradient-accent",
        gradient(&[(c.accent.as_str(), 0), (c.accent_hover.as_str(), 100)]),
    );
    sheet.set(
        "--highlight-soft",
        gradient(&[
            (c.highlight_border.as_str(), 0),
            (c.primary.as_str(), 50),
            (c.primary_light.as_str(), 100),
        ]),
    );

    match mode {
        ThemeMode::Light => {
            for (name, value) in LIGHT_SURFACE {
                sheet.set(name, value);
            }
        }
        ThemeMode::Dark => {
            for (name, value) in DARK_SURFACE {
                sheet.set(name, value);
            }
            sheet.set("--highlight-bg-soft", dark_highlight(c.highlight.as_str()));

            let border = scaled(&c.highlight_border, DARK_HIGHLIGHT_BORDER_FACTOR);
            let primary = scaled(&c.primary, DARK_PRIMARY_FACTOR);
            let primary_light = scaled(&c.primary_light, DARK_PRIMARY_LIGHT_FACTOR);
            sheet.set(
                "--highlight-soft",
                gradient(&[
                    (border.as_str(), 0),
                    (primary.as_str(), 50),
                    (primary_light.as_str(), 100),
                ]),
            );
        }
    }

    sheet
}
