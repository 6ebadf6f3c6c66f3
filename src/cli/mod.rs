//! CLI command handlers for Scholar Site.
//!
//! The commands drive the homepage components against an in-memory surface,
//! for previewing the rendered theme and news list and for managing the
//! persisted preferences from scripts.

pub mod news;
pub mod render;
pub mod theme;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::borrow::Cow;
use std::path::PathBuf;
use tracing::debug;

use crate::config::SiteConfig;
use crate::models::{news as news_model, NewsEntry};
use crate::store::{FileStore, MemoryStore, PreferenceStore, COLOR_THEME_KEY, THEME_KEY, THEME_MODE_KEY};
use crate::theme::FileSource;

pub use news::NewsArgs;
pub use render::RenderArgs;
pub use theme::{ModeArgs, PaletteArgs, ThemesArgs};

/// Scholar Site - homepage theme and news toolkit
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Site root containing the palette configuration (overrides the config file)
    #[arg(long, global = true, value_name = "DIR")]
    pub site: Option<PathBuf>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the page in memory and print its theme and news output
    Render(RenderArgs),
    /// List the available palettes
    Themes(ThemesArgs),
    /// Persist the active palette
    Palette(PaletteArgs),
    /// Persist the active mode
    Mode(ModeArgs),
    /// Print the news timeline
    News(NewsArgs),
}

impl Cli {
    /// Loads the configuration and runs the selected command.
    pub async fn execute(&self) -> Result<()> {
        let site = Site::load(self)?;
        match &self.command {
            Command::Render(args) => args.execute(&site).await,
            Command::Themes(args) => args.execute(&site).await,
            Command::Palette(args) => args.execute(&site).await,
            Command::Mode(args) => args.execute(&site).await,
            Command::News(args) => args.execute(&site),
        }
    }
}

/// Resolved configuration shared by every command.
#[derive(Debug, Clone)]
pub struct Site {
    /// Effective configuration
    pub config: SiteConfig,
}

impl Site {
    /// Loads the configuration named on the command line, applying overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => SiteConfig::load_from(path)?,
            None => SiteConfig::load()?,
        };

        if let Some(site) = &cli.site {
            config.paths.site_root = Some(site.clone());
        }

        debug!("Palette configuration: {}", config.themes_path().display());
        Ok(Self { config })
    }

    /// Palette configuration source.
    #[must_use]
    pub fn source(&self) -> FileSource {
        FileSource::new(self.config.themes_path())
    }

    /// Opens the persistent preference store.
    pub fn open_store(&self) -> Result<FileStore> {
        let path = self.config.preferences_path()?;
        FileStore::open(&path).context(format!(
            "Failed to open preference store: {}",
            path.display()
        ))
    }

    /// Copies the persisted preferences into a scratch store, so previews
    /// never write back.
    pub fn preview_store(&self) -> Result<MemoryStore> {
        let store = self.open_store()?;
        let mut values = Vec::new();
        for key in [THEME_KEY, COLOR_THEME_KEY, THEME_MODE_KEY] {
            if let Some(value) = store.get(key)? {
                values.push((key, value));
            }
        }
        Ok(MemoryStore::with_values(
            values.iter().map(|(k, v)| (*k, v.as_str())),
        ))
    }

    /// News entries from the configured file, or the embedded list.
    pub fn news_entries(&self) -> Result<Cow<'static, [NewsEntry]>> {
        match &self.config.paths.news {
            Some(path) => Ok(Cow::Owned(news_model::load_entries(path)?)),
            None => Ok(Cow::Borrowed(news_model::builtin_entries())),
        }
    }
}
