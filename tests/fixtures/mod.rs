//! Shared test fixtures for integration tests.
#![allow(dead_code)] // Each test binary uses a different subset

use scholar_site::config::{ModePreference, SiteConfig};
use scholar_site::models::NewsEntry;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The sample palette configuration shipped with the repository.
pub const THEMES_JSON: &str = include_str!("../../site/themes.json");

/// Keys of the sample palettes in sorted order.
pub const THEME_KEYS: [&str; 5] = ["amber", "klein", "mint", "teal", "violet"];

/// Creates `count` news entries, newest first. The first one is new.
pub fn news_entries(count: usize) -> Vec<NewsEntry> {
    (0..count)
        .map(|i| NewsEntry {
            date: format!("2025-{:02}", 12 - (i % 12)),
            label: format!("2025.{:02}", 12 - (i % 12)),
            html: format!("Announcement <strong>{i}</strong>"),
            is_new: i == 0,
        })
        .collect()
}

/// Configuration that never consults the OS color scheme.
pub fn light_config() -> SiteConfig {
    let mut config = SiteConfig::new();
    config.theme.default_mode = ModePreference::Light;
    config
}

/// A temporary site: `site/themes.json`, a preferences path and a
/// `config.toml` pointing at both.
pub struct TestSite {
    pub dir: TempDir,
    pub config: SiteConfig,
    pub config_path: PathBuf,
}

impl TestSite {
    /// Site with the sample palette configuration.
    pub fn new() -> Self {
        Self::with_themes(Some(THEMES_JSON))
    }

    /// Site with the given palette document, or none at all.
    pub fn with_themes(themes: Option<&str>) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let site_root = dir.path().join("site");
        fs::create_dir_all(&site_root).expect("Failed to create site dir");
        if let Some(themes) = themes {
            fs::write(site_root.join("themes.json"), themes).expect("Failed to write themes");
        }

        let mut config = light_config();
        config.paths.site_root = Some(site_root);
        config.paths.preferences = Some(dir.path().join("prefs").join("preferences.toml"));

        let config_path = dir.path().join("config.toml");
        config.save_to(&config_path).expect("Failed to save config");

        Self {
            dir,
            config,
            config_path,
        }
    }

    /// Location of the preference store file.
    pub fn preferences_path(&self) -> PathBuf {
        self.config
            .paths
            .preferences
            .clone()
            .expect("preferences path set")
    }

    /// Writes a news file and points the configuration at it.
    pub fn with_news(mut self, entries: &[NewsEntry]) -> Self {
        let path = self.dir.path().join("news.json");
        fs::write(&path, serde_json::to_string(entries).expect("serialize news"))
            .expect("Failed to write news");
        self.config.paths.news = Some(path);
        self.config
            .save_to(&self.config_path)
            .expect("Failed to save config");
        self
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}
