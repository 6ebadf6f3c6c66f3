//! Show/hide toggling for collapsible content blocks.
//!
//! A block counts as hidden if any of three signals says so: the `hidden`
//! attribute, an inline `display: none`, or `data-visible="false"`. Every
//! change rewrites all signals together so they never disagree afterwards.

use crate::surface::Surface;

const HIDDEN: &str = "hidden";
const DISPLAY: &str = "display";
const ARIA_HIDDEN: &str = "aria-hidden";
const ARIA_EXPANDED: &str = "aria-expanded";
const DATA_VISIBLE: &str = "data-visible";

/// Whether the block is currently hidden. Absent blocks are not hidden.
pub fn is_hidden(surface: &impl Surface, block_id: &str) -> bool {
    if !surface.contains(block_id) {
        return false;
    }
    surface.attribute(block_id, HIDDEN).is_some()
        || surface.inline_style(block_id, DISPLAY).as_deref() == Some("none")
        || surface.attribute(block_id, DATA_VISIBLE).as_deref() == Some("false")
}

fn set_visible(surface: &mut impl Surface, block_id: &str, visible: bool, trigger: Option<&str>) {
    if visible {
        surface.remove_attribute(block_id, HIDDEN);
        surface.set_inline_style(block_id, DISPLAY, Some("block"));
        surface.remove_attribute(block_id, ARIA_HIDDEN);
        surface.set_attribute(block_id, DATA_VISIBLE, "true");
    } else {
        surface.set_attribute(block_id, HIDDEN, "");
        surface.set_inline_style(block_id, DISPLAY, Some("none"));
        surface.set_attribute(block_id, ARIA_HIDDEN, "true");
        surface.set_attribute(block_id, DATA_VISIBLE, "false");
    }

    if let Some(trigger) = trigger {
        surface.set_attribute(trigger, ARIA_EXPANDED, if visible { "true" } else { "false" });
    }
}

/// Flips a block between shown and hidden.
///
/// Returns false (doing nothing) if the block does not exist. When a
/// trigger id is given its `aria-expanded` follows the new visibility.
pub fn toggle(surface: &mut impl Surface, block_id: &str, trigger: Option<&str>) -> bool {
    if !surface.contains(block_id) {
        return false;
    }
    let show = is_hidden(surface, block_id);
    set_visible(surface, block_id, show, trigger);
    true
}

/// Forces a block into the hidden state.
pub fn hide(surface: &mut impl Surface, block_id: &str, trigger: Option<&str>) -> bool {
    if !surface.contains(block_id) {
        return false;
    }
    set_visible(surface, block_id, false, trigger);
    true
}

/// Forces a block into the shown state.
pub fn show(surface: &mut impl Surface, block_id: &str, trigger: Option<&str>) -> bool {
    if !surface.contains(block_id) {
        return false;
    }
    set_visible(surface, block_id, true, trigger);
    true
}
