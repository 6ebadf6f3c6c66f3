//! Simple light/dark switch.
//!
//! The legacy toggle path: a single `theme` preference, the root
//! `data-theme` attribute and a `modeChanged` notification. It knows nothing
//! about palettes and is used when the palette engine is disabled.

use tracing::{info, warn};

use crate::constants::{MODE_ATTRIBUTE, THEME_TOGGLE_ID};
use crate::events::{EventBus, ThemeEvent};
use crate::models::ThemeMode;
use crate::store::{PreferenceStore, THEME_KEY};
use crate::surface::{DomEvent, Listener, Surface};

/// Mode-only theme switch.
#[derive(Debug)]
pub struct ModeSwitch<S: PreferenceStore> {
    mode: ThemeMode,
    store: S,
    bus: EventBus,
}

impl<S: PreferenceStore> ModeSwitch<S> {
    /// Creates a switch in light mode.
    pub fn new(store: S) -> Self {
        Self {
            mode: ThemeMode::Light,
            store,
            bus: EventBus::new(),
        }
    }

    /// Current mode.
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Backing preference store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Event bus carrying `modeChanged` notifications.
    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Restores the persisted mode (or `preferred`), marks the root and
    /// binds the toggle control.
    pub fn initialize(&mut self, preferred: ThemeMode, surface: &mut impl Surface) {
        self.mode = match self.store.get(THEME_KEY) {
            Ok(Some(stored)) => stored.parse().unwrap_or(preferred),
            Ok(None) => preferred,
            Err(err) => {
                warn!("Failed to read persisted mode: {err:#}");
                preferred
            }
        };
        surface.set_root_attribute(MODE_ATTRIBUTE, self.mode.as_str());

        if surface.contains(THEME_TOGGLE_ID) {
            surface.listen(
                THEME_TOGGLE_ID,
                Listener {
                    event: DomEvent::Click,
                    once: false,
                },
            );
        }
    }

    /// Flips the mode, persists it and publishes `modeChanged`.
    pub fn toggle(&mut self, surface: &mut impl Surface) -> ThemeMode {
        self.mode = self.mode.toggled();
        surface.set_root_attribute(MODE_ATTRIBUTE, self.mode.as_str());

        if let Err(err) = self.store.set(THEME_KEY, self.mode.as_str()) {
            warn!("Failed to persist mode: {err:#}");
        }

        info!("Switched mode to {}", self.mode);
        self.bus.publish(&ThemeEvent::ModeChanged { theme: self.mode });
        self.mode
    }
}
