//! Palette engine: loads the palette set, applies the active selection,
//! persists it and publishes change notifications.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::constants::{MODE_ATTRIBUTE, PALETTE_ATTRIBUTE, THEME_TOGGLE_ID};
use crate::events::{EventBus, ThemeEvent};
use crate::models::{Palette, PaletteSet, ThemeMode, BUILTIN_PALETTE_KEY};
use crate::store::{PreferenceStore, COLOR_THEME_KEY, THEME_MODE_KEY};
use crate::surface::{DomEvent, Listener, Surface};

use super::source::PaletteSource;
use super::style;

/// The currently applied (palette, mode) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSelection {
    /// Key of the applied palette; always present in the palette set
    pub palette_key: String,
    /// Applied mode
    pub mode: ThemeMode,
}

impl Default for ActiveSelection {
    fn default() -> Self {
        Self {
            palette_key: BUILTIN_PALETTE_KEY.to_string(),
            mode: ThemeMode::Light,
        }
    }
}

/// Snapshot of the active theme for external callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentTheme<'a> {
    /// Active palette key
    pub color_theme: &'a str,
    /// Active mode
    pub mode: ThemeMode,
    /// Active palette
    pub theme: &'a Palette,
}

/// One entry of a palette picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeOption {
    /// Palette key
    pub key: String,
    /// Display name
    pub name: String,
    /// Swatch color (the palette's primary)
    pub preview: String,
    /// Whether this palette is the active one
    pub active: bool,
}

/// Owns the palette set and the active selection.
///
/// Constructed by the page startup routine; there is no global instance.
#[derive(Debug)]
pub struct PaletteEngine<S: PreferenceStore> {
    palettes: PaletteSet,
    selection: ActiveSelection,
    store: S,
    bus: EventBus,
    preferred_mode: Option<ThemeMode>,
}

impl<S: PreferenceStore> PaletteEngine<S> {
    /// Creates an engine holding the built-in palette set.
    pub fn new(store: S) -> Self {
        Self {
            palettes: PaletteSet::builtin(),
            selection: ActiveSelection::default(),
            store,
            bus: EventBus::new(),
            preferred_mode: None,
        }
    }

    /// Overrides the host color-scheme preference used when no mode was
    /// persisted. Without it the OS preference is detected.
    #[must_use]
    pub fn with_preferred_mode(mut self, mode: ThemeMode) -> Self {
        self.preferred_mode = Some(mode);
        self
    }

    /// Palettes available this session.
    pub fn palettes(&self) -> &PaletteSet {
        &self.palettes
    }

    /// The applied selection.
    pub fn selection(&self) -> &ActiveSelection {
        &self.selection
    }

    /// Backing preference store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Event bus carrying `paletteChanged` notifications.
    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    fn preferred_mode(&self) -> ThemeMode {
        self.preferred_mode.unwrap_or_else(ThemeMode::detect)
    }

    /// Loads the palette set, restores the persisted selection, applies it
    /// and binds the mode toggle control.
    ///
    /// Never fails: an unusable configuration falls back to the built-in
    /// palette set, and any other failure applies `klein` in light mode.
    pub async fn initialize(&mut self, source: &impl PaletteSource, surface: &mut impl Surface) {
        self.palettes = load_palettes(source).await;

        if let Err(err) = self.restore_and_apply(surface) {
            error!("Palette engine initialization failed, applying default theme: {err:#}");
            self.apply_default(surface);
        }

        if surface.contains(THEME_TOGGLE_ID) {
            surface.listen(
                THEME_TOGGLE_ID,
                Listener {
                    event: DomEvent::Click,
                    once: false,
                },
            );
        }

        info!("Palette engine initialized with {} palette(s)", self.palettes.len());
    }

    /// A first visit asks for `klein`; `apply_theme` redirects to the
    /// declared default when the set has no `klein`.
    fn restore_and_apply(&mut self, surface: &mut impl Surface) -> Result<()> {
        let key = self
            .store
            .get(COLOR_THEME_KEY)?
            .unwrap_or_else(|| BUILTIN_PALETTE_KEY.to_string());

        let mode = match self.store.get(THEME_MODE_KEY)? {
            Some(stored) => stored.parse().unwrap_or_else(|err| {
                warn!("Ignoring persisted mode: {err}");
                self.preferred_mode()
            }),
            None => self.preferred_mode(),
        };

        self.apply_theme(&key, mode, surface);
        Ok(())
    }

    /// Replaces the palette set with the built-in one and applies `klein`
    /// in light mode.
    pub fn apply_default(&mut self, surface: &mut impl Surface) {
        self.palettes = PaletteSet::builtin();
        self.apply_theme(BUILTIN_PALETTE_KEY, ThemeMode::Light, surface);
    }

    /// Applies a palette in a mode.
    ///
    /// Unknown keys are replaced by the default key with a warning. All
    /// style variables and root attributes are written before returning,
    /// then the selection is persisted and `paletteChanged` is published.
    pub fn apply_theme(
        &mut self,
        palette_key: &str,
        mode: ThemeMode,
        surface: &mut impl Surface,
    ) -> &ActiveSelection {
        let key = if self.palettes.contains(palette_key) {
            palette_key
        } else {
            warn!(
                "Theme '{}' does not exist, using default theme '{}'",
                palette_key,
                self.palettes.default_key()
            );
            self.palettes.default_key()
        }
        .to_string();

        let palette = self
            .palettes
            .get(&key)
            .unwrap_or_else(|| self.palettes.default_palette());

        style::resolve(palette, mode).apply_to(surface);
        surface.set_root_attribute(MODE_ATTRIBUTE, mode.as_str());
        surface.set_root_attribute(PALETTE_ATTRIBUTE, &key);

        if let Err(err) = self.store.set(COLOR_THEME_KEY, &key) {
            warn!("Failed to persist palette '{key}': {err:#}");
        }
        if let Err(err) = self.store.set(THEME_MODE_KEY, mode.as_str()) {
            warn!("Failed to persist mode '{mode}': {err:#}");
        }

        let event = ThemeEvent::PaletteChanged {
            color_theme: key.clone(),
            mode,
            theme: palette.clone(),
        };

        info!("Applied theme: {key} ({mode})");
        self.selection = ActiveSelection {
            palette_key: key,
            mode,
        };
        self.bus.publish(&event);

        &self.selection
    }

    /// Switches to another palette keeping the current mode.
    ///
    /// Returns false, changing nothing, if the key is unknown.
    pub fn switch_color_theme(&mut self, key: &str, surface: &mut impl Surface) -> bool {
        if !self.palettes.contains(key) {
            debug!("Rejected unknown palette '{key}'");
            return false;
        }
        let mode = self.selection.mode;
        self.apply_theme(key, mode, surface);
        true
    }

    /// Switches the mode keeping the current palette.
    ///
    /// Returns false, changing nothing, unless `mode` is exactly `light` or
    /// `dark`.
    pub fn switch_mode(&mut self, mode: &str, surface: &mut impl Surface) -> bool {
        let Ok(mode) = mode.parse::<ThemeMode>() else {
            debug!("Rejected unsupported mode '{mode}'");
            return false;
        };
        let key = self.selection.palette_key.clone();
        self.apply_theme(&key, mode, surface);
        true
    }

    /// Flips between light and dark (theme toggle activation).
    pub fn toggle_mode(&mut self, surface: &mut impl Surface) -> ThemeMode {
        let key = self.selection.palette_key.clone();
        let mode = self.selection.mode.toggled();
        self.apply_theme(&key, mode, surface);
        mode
    }

    /// The active palette key, mode and palette.
    pub fn current_theme(&self) -> CurrentTheme<'_> {
        CurrentTheme {
            color_theme: &self.selection.palette_key,
            mode: self.selection.mode,
            theme: self
                .palettes
                .get(&self.selection.palette_key)
                .unwrap_or_else(|| self.palettes.default_palette()),
        }
    }

    /// Keys of all available palettes in sorted order.
    pub fn available_themes(&self) -> Vec<&str> {
        self.palettes.keys().collect()
    }

    /// Entries for a palette picker, marking the active palette.
    pub fn theme_options(&self) -> Vec<ThemeOption> {
        self.palettes
            .iter()
            .map(|(key, palette)| ThemeOption {
                key: key.to_string(),
                name: palette.name.clone(),
                preview: palette.colors.primary.to_string(),
                active: key == self.selection.palette_key,
            })
            .collect()
    }
}

async fn load_palettes(source: &impl PaletteSource) -> PaletteSet {
    let loaded = match source.fetch().await {
        Ok(json) => PaletteSet::from_json(&json),
        Err(err) => Err(err),
    };

    match loaded {
        Ok(set) => {
            debug!(
                "Loaded {} palette(s), default '{}'",
                set.len(),
                set.default_key()
            );
            set
        }
        Err(err) => {
            error!("Failed to load palette configuration, using built-in palette: {err}");
            PaletteSet::builtin()
        }
    }
}
