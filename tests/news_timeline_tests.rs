//! Integration tests for the news timeline and show/hide blocks.

use scholar_site::models::news::{builtin_entries, parse_entries};
use scholar_site::surface::{DomEvent, MemorySurface, Surface};
use scholar_site::timeline::{NewsTimeline, TimelineLimits};
use scholar_site::visibility;

mod fixtures;
use fixtures::*;

fn rendered(surface: &MemorySurface) -> Vec<String> {
    surface
        .children("news-list")
        .iter()
        .map(|item| item.to_html())
        .collect()
}

// ============================================================================
// Expand/collapse control
// ============================================================================

#[test]
fn test_list_at_limit_hides_control() {
    let entries = news_entries(5);
    let timeline = NewsTimeline::new(&entries, TimelineLimits::default());
    let mut surface = MemorySurface::homepage();

    timeline.render(&mut surface);
    timeline.init_toggle(&mut surface);

    assert_eq!(surface.children("news-list").len(), 5);
    assert!(visibility::is_hidden(&surface, "news-toggle"));
    assert!(visibility::is_hidden(&surface, "news-actions"));
    assert!(!surface.has_listener("news-toggle", DomEvent::Click));
}

#[test]
fn test_list_over_limit_shows_control() {
    let entries = news_entries(6);
    let timeline = NewsTimeline::new(&entries, TimelineLimits::default());
    let mut surface = MemorySurface::homepage();
    visibility::hide(&mut surface, "news-actions", None);

    timeline.render(&mut surface);
    timeline.init_toggle(&mut surface);

    assert_eq!(surface.children("news-list").len(), 5);
    assert_eq!(surface.text("news-toggle"), Some("Show all news (6)"));
    assert_eq!(
        surface.attribute("news-toggle", "aria-expanded").as_deref(),
        Some("false")
    );
    assert!(!visibility::is_hidden(&surface, "news-actions"));
    assert!(surface.has_listener("news-toggle", DomEvent::Click));
}

#[test]
fn test_activate_expands_and_collapses() {
    let entries = news_entries(8);
    let mut timeline = NewsTimeline::new(&entries, TimelineLimits::default());
    let mut surface = MemorySurface::homepage();
    timeline.render(&mut surface);
    timeline.init_toggle(&mut surface);

    assert!(timeline.activate(&mut surface));
    assert_eq!(surface.children("news-list").len(), 8);
    assert_eq!(surface.text("news-toggle"), Some("Show less"));
    assert_eq!(
        surface.attribute("news-toggle", "aria-expanded").as_deref(),
        Some("true")
    );

    assert!(!timeline.activate(&mut surface));
    assert_eq!(surface.children("news-list").len(), 5);
    assert_eq!(surface.text("news-toggle"), Some("Show all news (8)"));
}

#[test]
fn test_render_is_idempotent() {
    let entries = news_entries(7);
    let mut timeline = NewsTimeline::new(&entries, TimelineLimits::default());
    let mut surface = MemorySurface::homepage();

    timeline.render(&mut surface);
    let collapsed = rendered(&surface);
    timeline.render(&mut surface);
    assert_eq!(rendered(&surface), collapsed);

    timeline.activate(&mut surface);
    let expanded = rendered(&surface);
    timeline.render(&mut surface);
    assert_eq!(rendered(&surface), expanded);
    assert_eq!(&expanded[..5], &collapsed[..]);
}

#[test]
fn test_empty_list_renders_nothing() {
    let timeline = NewsTimeline::new(&[], TimelineLimits::default());
    let mut surface = MemorySurface::homepage();

    timeline.render(&mut surface);
    timeline.init_toggle(&mut surface);

    assert!(surface.children("news-list").is_empty());
    assert!(visibility::is_hidden(&surface, "news-toggle"));
}

#[test]
fn test_custom_limits() {
    let entries = news_entries(4);
    let limits = TimelineLimits {
        collapsed_limit: 2,
        accent_count: 1,
    };
    let timeline = NewsTimeline::new(&entries, limits);

    let items = timeline.items();
    assert_eq!(items.len(), 2);
    assert!(items[0].has_class("news-item--accent"));
    assert!(!items[1].has_class("news-item--accent"));
    assert_eq!(timeline.toggle_label(), "Show all news (4)");
}

// ============================================================================
// Markup
// ============================================================================

#[test]
fn test_item_markup() {
    let entries = news_entries(2);
    let timeline = NewsTimeline::new(&entries, TimelineLimits::default());
    let items = timeline.items();

    assert_eq!(
        items[0].to_html(),
        "<li class=\"news-item news-item--accent news-item--new\">\
         <span class=\"news-date\" datetime=\"2025-12\">2025.12</span>\
         <span class=\"news-content\">Announcement <strong>0</strong></span>\
         <span class=\"news-badge\">NEW</span></li>"
    );
    assert!(!items[1].to_html().contains("news-badge"));
}

#[test]
fn test_builtin_entries() {
    let entries = builtin_entries();
    assert_eq!(entries.len(), 10);

    let timeline = NewsTimeline::new(entries, TimelineLimits::default());
    assert!(timeline.needs_toggle());
    assert_eq!(timeline.toggle_label(), "Show all news (10)");
}

#[test]
fn test_parse_entries_rejects_bad_date() {
    let json = r#"[{"date": "2025-13", "label": "x", "html": "y"}]"#;
    assert!(parse_entries(json).is_err());

    let json = r#"[{"date": "2025-09", "label": "2025.09", "html": "ok"}]"#;
    let entries = parse_entries(json).unwrap();
    assert!(!entries[0].is_new);
}

// ============================================================================
// Show/hide blocks
// ============================================================================

#[test]
fn test_visibility_round_trip_restores_state() {
    let mut surface = MemorySurface::new();
    surface
        .add_element_with(
            "bibtex",
            &[("hidden", ""), ("aria-hidden", "true"), ("data-visible", "false")],
        )
        .add_element_with("bibtex-btn", &[("aria-expanded", "false")]);
    surface.set_inline_style("bibtex", "display", Some("none"));
    let before = surface.element("bibtex").cloned();

    visibility::toggle(&mut surface, "bibtex", Some("bibtex-btn"));
    assert!(!visibility::is_hidden(&surface, "bibtex"));
    visibility::toggle(&mut surface, "bibtex", Some("bibtex-btn"));

    assert_eq!(surface.element("bibtex").cloned(), before);
    assert_eq!(
        surface.attribute("bibtex-btn", "aria-expanded").as_deref(),
        Some("false")
    );
}
