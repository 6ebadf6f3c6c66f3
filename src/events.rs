//! Typed publish/subscribe bus for theme notifications.
//!
//! Publishers do not know their consumers; subscribers register a handler
//! on a named channel and receive every event published there.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Palette, ThemeMode};

/// Named notification channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Mode-only change from the simple toggle path
    ModeChanged,
    /// Combined palette + mode change from the palette engine
    PaletteChanged,
}

impl Channel {
    /// Channel name as exposed to external listeners.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ModeChanged => "modeChanged",
            Self::PaletteChanged => "paletteChanged",
        }
    }
}

/// Payload of a theme notification.
///
/// Serializes to the detail object external listeners expect, e.g.
/// `{ "colorTheme": "klein", "mode": "dark", "theme": { ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ThemeEvent {
    /// The display mode changed.
    ModeChanged {
        /// New mode
        theme: ThemeMode,
    },
    /// The active palette/mode selection was applied.
    #[serde(rename_all = "camelCase")]
    PaletteChanged {
        /// Key of the applied palette
        color_theme: String,
        /// Applied mode
        mode: ThemeMode,
        /// The applied palette itself
        theme: Palette,
    },
}

impl ThemeEvent {
    /// The channel this event is published on.
    #[must_use]
    pub const fn channel(&self) -> Channel {
        match self {
            Self::ModeChanged { .. } => Channel::ModeChanged,
            Self::PaletteChanged { .. } => Channel::PaletteChanged,
        }
    }
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&ThemeEvent)>;

/// Single-threaded event bus.
#[derive(Default)]
pub struct EventBus {
    handlers: HashMap<Channel, Vec<(SubscriptionId, Handler)>>,
    next_id: u64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<&str, usize> = self
            .handlers
            .iter()
            .map(|(channel, handlers)| (channel.name(), handlers.len()))
            .collect();
        f.debug_struct("EventBus").field("subscribers", &counts).finish()
    }
}

impl EventBus {
    /// Creates a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler on a channel.
    pub fn subscribe(
        &mut self,
        channel: Channel,
        handler: impl FnMut(&ThemeEvent) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers
            .entry(channel)
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Removes a handler. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for handlers in self.handlers.values_mut() {
            if let Some(index) = handlers.iter().position(|(sid, _)| *sid == id) {
                handlers.remove(index);
                return true;
            }
        }
        false
    }

    /// Delivers an event to every subscriber of its channel, in
    /// subscription order.
    pub fn publish(&mut self, event: &ThemeEvent) {
        if let Some(handlers) = self.handlers.get_mut(&event.channel()) {
            for (_, handler) in handlers.iter_mut() {
                handler(event);
            }
        }
    }

    /// Number of subscribers on a channel.
    #[must_use]
    pub fn subscriber_count(&self, channel: Channel) -> usize {
        self.handlers.get(&channel).map_or(0, Vec::len)
    }
}
