//! Page startup and event routing.
//!
//! [`Page`] owns every behavior service together with the surface it
//! drives. The host calls [`Page::start`] once the document is ready and
//! then forwards user and observer events through [`Page::handle`].

use tracing::info;

use crate::config::SiteConfig;
use crate::constants::{NEWS_TOGGLE_ID, THEME_TOGGLE_ID};
use crate::events::{Channel, SubscriptionId, ThemeEvent};
use crate::media::LazyMediaActivator;
use crate::models::{NewsEntry, ThemeMode};
use crate::store::PreferenceStore;
use crate::surface::{DomEvent, Listener, Surface};
use crate::theme::{ModeSwitch, PaletteEngine, PaletteSource};
use crate::timeline::NewsTimeline;
use crate::visibility;

/// Attribute on a trigger element naming the block it shows and hides.
pub const TOGGLE_TARGET_ATTRIBUTE: &str = "data-toggle";

/// Events delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// An element was activated
    Click(String),
    /// The pointer entered an element
    PointerEnter(String),
    /// An element received keyboard focus
    Focus(String),
    /// An observed element's viewport intersection changed
    Intersection {
        /// Element id
        id: String,
        /// Whether the element intersects the (margin-extended) viewport
        intersecting: bool,
        /// Visible fraction, 0.0-1.0
        ratio: f64,
    },
}

/// Which theme path drives the toggle control.
#[derive(Debug)]
pub enum ThemeControl<S: PreferenceStore> {
    /// Palette + mode engine
    Palette(PaletteEngine<S>),
    /// Single-flag light/dark switch
    Simple(ModeSwitch<S>),
}

/// A running homepage.
#[derive(Debug)]
pub struct Page<'a, P: Surface, S: PreferenceStore> {
    surface: P,
    theme: ThemeControl<S>,
    preferred_mode: ThemeMode,
    timeline: NewsTimeline<'a>,
    media: LazyMediaActivator,
}

impl<'a, P: Surface, S: PreferenceStore> Page<'a, P, S> {
    /// Builds the page services from configuration.
    pub fn new(config: &SiteConfig, surface: P, store: S, entries: &'a [NewsEntry]) -> Self {
        let preferred_mode = config.theme.default_mode.resolve();
        let theme = if config.theme.palette_engine {
            ThemeControl::Palette(PaletteEngine::new(store).with_preferred_mode(preferred_mode))
        } else {
            ThemeControl::Simple(ModeSwitch::new(store))
        };

        Self {
            surface,
            theme,
            preferred_mode,
            timeline: NewsTimeline::new(entries, config.timeline_limits()),
            media: LazyMediaActivator::new(config.proximity_options()),
        }
    }

    /// Runs the startup sequence: theme, news timeline, lazy media and
    /// block toggles. Each feature degrades independently.
    pub async fn start(&mut self, source: &impl PaletteSource) {
        match &mut self.theme {
            ThemeControl::Palette(engine) => engine.initialize(source, &mut self.surface).await,
            ThemeControl::Simple(switch) => switch.initialize(self.preferred_mode, &mut self.surface),
        }

        self.timeline.render(&mut self.surface);
        self.timeline.init_toggle(&mut self.surface);

        let pending = self.media.init(&mut self.surface);

        for trigger in self.surface.elements_with_attribute(TOGGLE_TARGET_ATTRIBUTE) {
            self.surface.listen(
                &trigger,
                Listener {
                    event: DomEvent::Click,
                    once: false,
                },
            );
        }

        info!(
            "Page started: {} news entries, {} deferred media element(s)",
            self.timeline.total(),
            pending
        );
    }

    /// Routes a host event to the component that owns the target element.
    /// Returns whether any component acted on it.
    pub fn handle(&mut self, event: PageEvent) -> bool {
        match event {
            PageEvent::Click(id) if id == THEME_TOGGLE_ID => {
                match &mut self.theme {
                    ThemeControl::Palette(engine) => {
                        engine.toggle_mode(&mut self.surface);
                    }
                    ThemeControl::Simple(switch) => {
                        switch.toggle(&mut self.surface);
                    }
                }
                true
            }
            PageEvent::Click(id) if id == NEWS_TOGGLE_ID => {
                if !self.timeline.needs_toggle() {
                    return false;
                }
                self.timeline.activate(&mut self.surface);
                true
            }
            PageEvent::Click(id) => match self.surface.attribute(&id, TOGGLE_TARGET_ATTRIBUTE) {
                Some(block) => visibility::toggle(&mut self.surface, &block, Some(id.as_str())),
                None => false,
            },
            PageEvent::PointerEnter(id) | PageEvent::Focus(id) => {
                self.media.on_interaction(&mut self.surface, &id)
            }
            PageEvent::Intersection {
                id,
                intersecting,
                ratio,
            } => self
                .media
                .on_intersection(&mut self.surface, &id, intersecting, ratio),
        }
    }

    /// Subscribes to theme notifications from whichever theme path is active.
    pub fn subscribe(
        &mut self,
        channel: Channel,
        handler: impl FnMut(&ThemeEvent) + 'static,
    ) -> SubscriptionId {
        match &mut self.theme {
            ThemeControl::Palette(engine) => engine.bus_mut().subscribe(channel, handler),
            ThemeControl::Simple(switch) => switch.bus_mut().subscribe(channel, handler),
        }
    }

    /// The display surface.
    pub fn surface(&self) -> &P {
        &self.surface
    }

    /// The active theme path.
    pub fn theme(&self) -> &ThemeControl<S> {
        &self.theme
    }

    /// The palette engine, when it drives the theme.
    pub fn palette_engine(&self) -> Option<&PaletteEngine<S>> {
        match &self.theme {
            ThemeControl::Palette(engine) => Some(engine),
            ThemeControl::Simple(_) => None,
        }
    }

    /// Applies a palette through the engine. False when the palette engine
    /// is disabled or the key is unknown.
    pub fn switch_color_theme(&mut self, key: &str) -> bool {
        match &mut self.theme {
            ThemeControl::Palette(engine) => engine.switch_color_theme(key, &mut self.surface),
            ThemeControl::Simple(_) => false,
        }
    }

    /// Applies a mode through the engine. False when the palette engine is
    /// disabled or the mode is not `light`/`dark`.
    pub fn switch_mode(&mut self, mode: &str) -> bool {
        match &mut self.theme {
            ThemeControl::Palette(engine) => engine.switch_mode(mode, &mut self.surface),
            ThemeControl::Simple(_) => false,
        }
    }

    /// The news timeline.
    pub fn timeline(&self) -> &NewsTimeline<'a> {
        &self.timeline
    }

    /// Consumes the page, returning the surface.
    pub fn into_surface(self) -> P {
        self.surface
    }
}
