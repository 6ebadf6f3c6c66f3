//! News timeline with an expand/collapse control.
//!
//! Two states: collapsed (first `collapsed_limit` entries) and expanded
//! (every entry). The list is rebuilt from scratch on each render.

use tracing::debug;

use crate::constants::{NEWS_ACTIONS_ID, NEWS_LIST_ID, NEWS_TOGGLE_ID};
use crate::models::NewsEntry;
use crate::surface::{DomEvent, Listener, Node, Surface};
use crate::visibility;

/// Entries shown while collapsed.
pub const DEFAULT_COLLAPSED_LIMIT: usize = 5;
/// Leading rendered entries that carry the accent marker.
pub const DEFAULT_ACCENT_COUNT: usize = 3;

/// Timeline rendering limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineLimits {
    /// Entries shown while collapsed
    pub collapsed_limit: usize,
    /// Leading rendered entries marked as accented
    pub accent_count: usize,
}

impl Default for TimelineLimits {
    fn default() -> Self {
        Self {
            collapsed_limit: DEFAULT_COLLAPSED_LIMIT,
            accent_count: DEFAULT_ACCENT_COUNT,
        }
    }
}

/// Renders a static list of announcements.
#[derive(Debug, Clone)]
pub struct NewsTimeline<'a> {
    entries: &'a [NewsEntry],
    limits: TimelineLimits,
    expanded: bool,
}

impl<'a> NewsTimeline<'a> {
    /// Creates a collapsed timeline over `entries`.
    pub fn new(entries: &'a [NewsEntry], limits: TimelineLimits) -> Self {
        Self {
            entries,
            limits,
            expanded: false,
        }
    }

    /// Whether every entry is shown.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Total number of entries.
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is long enough to need the expand control.
    pub fn needs_toggle(&self) -> bool {
        self.entries.len() > self.limits.collapsed_limit
    }

    /// Entries displayed in the current state.
    pub fn visible_entries(&self) -> &'a [NewsEntry] {
        let entries = self.entries;
        let count = if self.expanded {
            entries.len()
        } else {
            entries.len().min(self.limits.collapsed_limit)
        };
        &entries[..count]
    }

    /// Label of the expand/collapse control for the current state.
    pub fn toggle_label(&self) -> String {
        if self.expanded {
            "Show less".to_string()
        } else {
            format!("Show all news ({})", self.entries.len())
        }
    }

    /// Builds the list items for the current state.
    pub fn items(&self) -> Vec<Node> {
        self.visible_entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| self.item(index, entry))
            .collect()
    }

    fn item(&self, index: usize, entry: &NewsEntry) -> Node {
        let mut item = Node::new("li").class("news-item");
        if index < self.limits.accent_count {
            item = item.class("news-item--accent");
        }
        if entry.is_new {
            item = item.class("news-item--new");
        }

        item = item
            .child(
                Node::new("span")
                    .class("news-date")
                    .attr("datetime", &entry.date)
                    .text(&entry.label),
            )
            .child(Node::new("span").class("news-content").html(&entry.html));

        if entry.is_new {
            item = item.child(Node::new("span").class("news-badge").text("NEW"));
        }
        item
    }

    /// Rebuilds the `news-list` element for the current state.
    pub fn render(&self, surface: &mut impl Surface) {
        if !surface.contains(NEWS_LIST_ID) {
            return;
        }
        surface.replace_children(NEWS_LIST_ID, self.items());
    }

    /// Shows and labels the expand control, or hides it entirely when the
    /// list fits in the collapsed view.
    pub fn init_toggle(&self, surface: &mut impl Surface) {
        if !self.needs_toggle() {
            visibility::hide(surface, NEWS_TOGGLE_ID, None);
            visibility::hide(surface, NEWS_ACTIONS_ID, None);
            debug!("News list has {} entries, expand control hidden", self.total());
            return;
        }

        if !surface.contains(NEWS_TOGGLE_ID) {
            return;
        }
        visibility::show(surface, NEWS_ACTIONS_ID, None);
        visibility::show(surface, NEWS_TOGGLE_ID, None);
        self.update_toggle(surface);
        surface.listen(
            NEWS_TOGGLE_ID,
            Listener {
                event: DomEvent::Click,
                once: false,
            },
        );
    }

    fn update_toggle(&self, surface: &mut impl Surface) {
        surface.set_text(NEWS_TOGGLE_ID, &self.toggle_label());
        surface.set_attribute(
            NEWS_TOGGLE_ID,
            "aria-expanded",
            if self.expanded { "true" } else { "false" },
        );
    }

    /// Handles activation of the expand control: flips the state,
    /// re-renders and re-labels.
    pub fn activate(&mut self, surface: &mut impl Surface) -> bool {
        self.expanded = !self.expanded;
        self.render(surface);
        self.update_toggle(surface);
        self.expanded
    }
}
