//! End-to-end tests for page startup and event routing.

use std::cell::RefCell;
use std::rc::Rc;

use scholar_site::config::ModePreference;
use scholar_site::events::{Channel, ThemeEvent};
use scholar_site::models::ThemeMode;
use scholar_site::page::{Page, PageEvent, ThemeControl};
use scholar_site::store::{MemoryStore, PreferenceStore, COLOR_THEME_KEY, THEME_KEY, THEME_MODE_KEY};
use scholar_site::surface::{DomEvent, MemorySurface, Surface};
use scholar_site::theme::MemorySource;
use scholar_site::visibility;

mod fixtures;
use fixtures::*;

fn homepage() -> MemorySurface {
    let mut surface = MemorySurface::homepage();
    surface
        .add_element_with("abstract", &[("hidden", ""), ("data-visible", "false")])
        .add_element_with(
            "abstract-btn",
            &[("data-toggle", "abstract"), ("aria-expanded", "false")],
        )
        .add_element_with("teaser", &[("data-src", "media/teaser.mp4")]);
    surface
}

fn click(id: &str) -> PageEvent {
    PageEvent::Click(id.to_string())
}

#[tokio::test]
async fn test_startup_with_unreachable_configuration() {
    let entries = news_entries(3);
    let mut page = Page::new(&light_config(), homepage(), MemoryStore::new(), &entries);

    page.start(&MemorySource::unavailable("fetch failed")).await;

    let surface = page.surface();
    assert_eq!(surface.root_attribute("data-color-theme"), Some("klein"));
    assert_eq!(surface.root_attribute("data-theme"), Some("light"));
    assert_eq!(surface.style_variable("--primary-color"), Some("#002fa7"));
    assert_eq!(surface.children("news-list").len(), 3);
    assert!(visibility::is_hidden(surface, "news-toggle"));
    assert!(surface.element("teaser").unwrap().observed);
}

#[tokio::test]
async fn test_startup_binds_every_control() {
    let entries = news_entries(9);
    let mut page = Page::new(&light_config(), homepage(), MemoryStore::new(), &entries);

    page.start(&MemorySource::document(THEMES_JSON)).await;

    let surface = page.surface();
    assert!(surface.has_listener("theme-toggle", DomEvent::Click));
    assert!(surface.has_listener("news-toggle", DomEvent::Click));
    assert!(surface.has_listener("abstract-btn", DomEvent::Click));
    assert!(surface.has_listener("teaser", DomEvent::PointerEnter));
    assert_eq!(surface.text("news-toggle"), Some("Show all news (9)"));
    assert_eq!(
        page.palette_engine().unwrap().available_themes(),
        THEME_KEYS
    );
}

#[tokio::test]
async fn test_theme_toggle_click_flips_mode() {
    let entries = news_entries(1);
    let mut page = Page::new(&light_config(), homepage(), MemoryStore::new(), &entries);
    page.start(&MemorySource::document(THEMES_JSON)).await;
    assert!(page.switch_color_theme("mint"));

    assert!(page.handle(click("theme-toggle")));
    assert_eq!(page.surface().root_attribute("data-theme"), Some("dark"));
    assert_eq!(page.surface().root_attribute("data-color-theme"), Some("mint"));

    assert!(page.handle(click("theme-toggle")));
    assert_eq!(page.surface().root_attribute("data-theme"), Some("light"));

    let engine = page.palette_engine().unwrap();
    assert_eq!(
        engine.store().get(THEME_MODE_KEY).unwrap().as_deref(),
        Some("light")
    );
    assert_eq!(
        engine.store().get(COLOR_THEME_KEY).unwrap().as_deref(),
        Some("mint")
    );
}

#[tokio::test]
async fn test_news_toggle_click() {
    let entries = news_entries(6);
    let mut page = Page::new(&light_config(), homepage(), MemoryStore::new(), &entries);
    page.start(&MemorySource::document(THEMES_JSON)).await;

    assert!(page.handle(click("news-toggle")));
    assert!(page.timeline().is_expanded());
    assert_eq!(page.surface().children("news-list").len(), 6);
    assert_eq!(page.surface().text("news-toggle"), Some("Show less"));

    let short = news_entries(2);
    let mut page = Page::new(&light_config(), homepage(), MemoryStore::new(), &short);
    page.start(&MemorySource::document(THEMES_JSON)).await;
    assert!(!page.handle(click("news-toggle")));
}

#[tokio::test]
async fn test_block_toggle_click() {
    let entries = news_entries(1);
    let mut page = Page::new(&light_config(), homepage(), MemoryStore::new(), &entries);
    page.start(&MemorySource::document(THEMES_JSON)).await;

    assert!(page.handle(click("abstract-btn")));
    assert!(!visibility::is_hidden(page.surface(), "abstract"));
    assert_eq!(
        page.surface().attribute("abstract-btn", "aria-expanded").as_deref(),
        Some("true")
    );

    assert!(page.handle(click("abstract-btn")));
    assert!(visibility::is_hidden(page.surface(), "abstract"));

    assert!(!page.handle(click("unknown")));
}

#[tokio::test]
async fn test_media_events_are_routed() {
    let entries = news_entries(1);
    let mut page = Page::new(&light_config(), homepage(), MemoryStore::new(), &entries);
    page.start(&MemorySource::document(THEMES_JSON)).await;

    assert!(!page.handle(PageEvent::Intersection {
        id: "teaser".to_string(),
        intersecting: true,
        ratio: 0.1,
    }));
    assert!(page.handle(PageEvent::Focus("teaser".to_string())));
    assert!(!page.handle(PageEvent::PointerEnter("teaser".to_string())));

    let surface = page.into_surface();
    assert_eq!(
        surface.attribute("teaser", "src").as_deref(),
        Some("media/teaser.mp4")
    );
    assert_eq!(surface.element("teaser").unwrap().reloads, 1);
}

#[tokio::test]
async fn test_subscribers_receive_palette_changes() {
    let entries = news_entries(1);
    let mut page = Page::new(&light_config(), homepage(), MemoryStore::new(), &entries);
    let received = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&received);
    page.subscribe(Channel::PaletteChanged, move |event| {
        if let ThemeEvent::PaletteChanged { color_theme, mode, .. } = event {
            sink.borrow_mut().push((color_theme.clone(), *mode));
        }
    });

    page.start(&MemorySource::document(THEMES_JSON)).await;
    page.switch_color_theme("teal");
    page.switch_mode("dark");

    assert_eq!(
        *received.borrow(),
        vec![
            ("klein".to_string(), ThemeMode::Light),
            ("teal".to_string(), ThemeMode::Light),
            ("teal".to_string(), ThemeMode::Dark),
        ]
    );
}

#[tokio::test]
async fn test_simple_mode_switch_path() {
    let mut config = light_config();
    config.theme.palette_engine = false;
    config.theme.default_mode = ModePreference::Dark;
    let entries = news_entries(1);
    let mut page = Page::new(&config, homepage(), MemoryStore::new(), &entries);

    let received = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&received);
    page.subscribe(Channel::ModeChanged, move |event| {
        sink.borrow_mut().push(event.clone());
    });

    page.start(&MemorySource::document(THEMES_JSON)).await;
    assert_eq!(page.surface().root_attribute("data-theme"), Some("dark"));
    assert_eq!(page.surface().root_attribute("data-color-theme"), None);
    assert!(page.palette_engine().is_none());
    assert!(!page.switch_color_theme("mint"));
    assert!(!page.switch_mode("light"));

    assert!(page.handle(click("theme-toggle")));
    assert_eq!(page.surface().root_attribute("data-theme"), Some("light"));

    match page.theme() {
        ThemeControl::Simple(switch) => {
            assert_eq!(switch.store().get(THEME_KEY).unwrap().as_deref(), Some("light"));
            assert_eq!(switch.store().get(THEME_MODE_KEY).unwrap(), None);
        }
        ThemeControl::Palette(_) => panic!("palette engine should be disabled"),
    }
    assert_eq!(
        *received.borrow(),
        vec![ThemeEvent::ModeChanged {
            theme: ThemeMode::Light
        }]
    );
}
