//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::ThemeMode;
use crate::surface::ProximityOptions;
use crate::theme::THEMES_FILE;
use crate::timeline::{TimelineLimits, DEFAULT_ACCENT_COUNT, DEFAULT_COLLAPSED_LIMIT};

/// Mode used when no mode has been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModePreference {
    /// Follow the OS color scheme
    #[default]
    Auto,
    /// Always start dark
    Dark,
    /// Always start light
    Light,
}

impl ModePreference {
    /// Resolves the preference to a concrete mode.
    #[must_use]
    pub fn resolve(self) -> ThemeMode {
        match self {
            Self::Auto => ThemeMode::detect(),
            Self::Dark => ThemeMode::Dark,
            Self::Light => ThemeMode::Light,
        }
    }
}

/// File system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Site root containing `themes.json` (defaults to the current directory)
    #[serde(default)]
    pub site_root: Option<PathBuf>,
    /// Preference store file (defaults to `preferences.toml` in the config directory)
    #[serde(default)]
    pub preferences: Option<PathBuf>,
    /// News list JSON file (defaults to the embedded list)
    #[serde(default)]
    pub news: Option<PathBuf>,
}

/// Theme settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Palette configuration file name, relative to the site root
    #[serde(default = "default_config_file")]
    pub config_file: String,
    /// Use the palette engine for the theme toggle (false: simple mode switch)
    #[serde(default = "default_true")]
    pub palette_engine: bool,
    /// Mode used before the visitor picked one
    #[serde(default)]
    pub default_mode: ModePreference,
}

fn default_config_file() -> String {
    THEMES_FILE.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            config_file: default_config_file(),
            palette_engine: true,
            default_mode: ModePreference::default(),
        }
    }
}

/// News timeline settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsConfig {
    /// Entries shown while collapsed
    #[serde(default = "default_collapsed_limit")]
    pub collapsed_limit: usize,
    /// Leading entries carrying the accent marker
    #[serde(default = "default_accent_count")]
    pub accent_count: usize,
}

fn default_collapsed_limit() -> usize {
    DEFAULT_COLLAPSED_LIMIT
}

fn default_accent_count() -> usize {
    DEFAULT_ACCENT_COUNT
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            collapsed_limit: DEFAULT_COLLAPSED_LIMIT,
            accent_count: DEFAULT_ACCENT_COUNT,
        }
    }
}

/// Lazy media settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Margin around the viewport that counts as "near"
    #[serde(default = "default_root_margin")]
    pub root_margin: String,
    /// Visible fraction (0.0-1.0) that triggers loading
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_root_margin() -> String {
    ProximityOptions::default().root_margin
}

fn default_threshold() -> f64 {
    ProximityOptions::default().threshold
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root_margin: default_root_margin(),
            threshold: default_threshold(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/ScholarSite/config.toml`
/// - macOS: `~/Library/Application Support/ScholarSite/config.toml`
/// - Windows: `%APPDATA%\ScholarSite\config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SiteConfig {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Theme settings
    #[serde(default)]
    pub theme: ThemeConfig,
    /// News timeline settings
    #[serde(default)]
    pub news: NewsConfig,
    /// Lazy media settings
    #[serde(default)]
    pub media: MediaConfig,
}

impl SiteConfig {
    /// Creates a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("ScholarSite");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from a specific file, defaulting when it is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration using atomic write (temp file + rename).
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .context(format!("Failed to create config directory: {}", dir.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, path).context(format!(
            "Failed to rename temp config file to: {}",
            path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `theme.config_file` is not empty
    /// - `news.collapsed_limit` is at least 1
    /// - `media.threshold` is within 0.0-1.0
    pub fn validate(&self) -> Result<()> {
        if self.theme.config_file.trim().is_empty() {
            anyhow::bail!("theme.config_file must not be empty");
        }

        if self.news.collapsed_limit == 0 {
            anyhow::bail!("news.collapsed_limit must be at least 1");
        }

        if !(0.0..=1.0).contains(&self.media.threshold) {
            anyhow::bail!(
                "media.threshold must be between 0.0 and 1.0, got {}",
                self.media.threshold
            );
        }

        Ok(())
    }

    /// Site root directory.
    #[must_use]
    pub fn site_root(&self) -> PathBuf {
        self.paths
            .site_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Path of the palette configuration document.
    #[must_use]
    pub fn themes_path(&self) -> PathBuf {
        self.site_root().join(&self.theme.config_file)
    }

    /// Path of the preference store file.
    pub fn preferences_path(&self) -> Result<PathBuf> {
        match &self.paths.preferences {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("preferences.toml")),
        }
    }

    /// News timeline limits.
    #[must_use]
    pub fn timeline_limits(&self) -> TimelineLimits {
        TimelineLimits {
            collapsed_limit: self.news.collapsed_limit,
            accent_count: self.news.accent_count,
        }
    }

    /// Lazy media observer settings.
    #[must_use]
    pub fn proximity_options(&self) -> ProximityOptions {
        ProximityOptions {
            root_margin: self.media.root_margin.clone(),
            threshold: self.media.threshold,
        }
    }
}
