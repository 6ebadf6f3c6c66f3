//! Deferred loading of media elements.
//!
//! Elements carrying `data-src` stay unloaded until they come near the
//! viewport or the user points at or focuses them. Loading is one-way:
//! `pending` (has `data-src`) to `loaded` (`src` set, `data-loaded="true"`).

use tracing::debug;

use crate::constants::{DEFERRED_SOURCE_ATTRIBUTE, LOADED_ATTRIBUTE};
use crate::surface::{DomEvent, Listener, ProximityOptions, Surface};

/// Activates deferred media on proximity or interaction.
#[derive(Debug, Clone, Default)]
pub struct LazyMediaActivator {
    options: ProximityOptions,
}

impl LazyMediaActivator {
    /// Creates an activator with the given observer settings.
    #[must_use]
    pub fn new(options: ProximityOptions) -> Self {
        Self { options }
    }

    /// Observer settings in use.
    pub fn options(&self) -> &ProximityOptions {
        &self.options
    }

    /// Registers every pending element, or loads all of them at once when
    /// the surface cannot observe proximity. Returns the number of pending
    /// elements found.
    pub fn init(&self, surface: &mut impl Surface) -> usize {
        let pending = surface.elements_with_attribute(DEFERRED_SOURCE_ATTRIBUTE);

        if !surface.supports_proximity() {
            debug!("Proximity observation unavailable, loading {} media element(s)", pending.len());
            for id in &pending {
                self.load(surface, id);
            }
            return pending.len();
        }

        for id in &pending {
            surface.observe_proximity(id, &self.options);
            for event in [DomEvent::PointerEnter, DomEvent::Focus] {
                surface.listen(id, Listener { event, once: true });
            }
        }
        pending.len()
    }

    /// Handles an intersection report. Loads once the visible fraction
    /// reaches the threshold; returns whether a load happened.
    pub fn on_intersection(
        &self,
        surface: &mut impl Surface,
        id: &str,
        intersecting: bool,
        ratio: f64,
    ) -> bool {
        if !intersecting || ratio < self.options.threshold {
            return false;
        }
        surface.unobserve_proximity(id);
        self.load(surface, id)
    }

    /// Handles pointer-enter or focus on a pending element.
    pub fn on_interaction(&self, surface: &mut impl Surface, id: &str) -> bool {
        surface.unobserve_proximity(id);
        self.load(surface, id)
    }

    /// Loads a media element.
    ///
    /// Does nothing (returns false) if the element is already loaded or has
    /// no deferred source. Playback rejections are ignored.
    pub fn load(&self, surface: &mut impl Surface, id: &str) -> bool {
        if surface.attribute(id, LOADED_ATTRIBUTE).as_deref() == Some("true") {
            return false;
        }
        let Some(source) = surface.attribute(id, DEFERRED_SOURCE_ATTRIBUTE) else {
            return false;
        };

        surface.set_attribute(id, "src", &source);
        surface.reload_media(id);
        surface.set_attribute(id, LOADED_ATTRIBUTE, "true");
        surface.remove_attribute(id, DEFERRED_SOURCE_ATTRIBUTE);
        let _ = surface.play_media(id);

        debug!("Loaded media '{id}' from {source}");
        true
    }
}
