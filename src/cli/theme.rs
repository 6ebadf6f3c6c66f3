//! Palette and mode commands.

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::constants::APP_NAME;
use crate::store::PreferenceStore;
use crate::surface::MemorySurface;
use crate::theme::PaletteEngine;

use super::Site;

/// List the available palettes
#[derive(Args, Debug)]
pub struct ThemesArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Persist the active palette
#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// Palette key from the palette configuration
    #[arg(value_name = "KEY")]
    key: String,
}

/// Persist the active mode
#[derive(Args, Debug)]
pub struct ModeArgs {
    /// Display mode: light or dark
    #[arg(value_name = "MODE")]
    mode: String,
}

async fn start_engine<S: PreferenceStore>(
    site: &Site,
    store: S,
    surface: &mut MemorySurface,
) -> PaletteEngine<S> {
    let mut engine =
        PaletteEngine::new(store).with_preferred_mode(site.config.theme.default_mode.resolve());
    engine.initialize(&site.source(), surface).await;
    engine
}

impl ThemesArgs {
    /// Execute themes command
    pub async fn execute(&self, site: &Site) -> Result<()> {
        let mut surface = MemorySurface::homepage();
        let engine = start_engine(site, site.preview_store()?, &mut surface).await;
        let options = engine.theme_options();

        if self.json {
            let json = serde_json::to_string_pretty(&options)
                .context("Failed to serialize palette list to JSON")?;
            println!("{json}");
            return Ok(());
        }

        println!("{APP_NAME} Palettes");
        println!("================");
        println!();

        for option in &options {
            let marker = if option.active { "*" } else { " " };
            println!(
                "{marker} {:<12} {:<24} {}",
                option.key, option.name, option.preview
            );
        }
        println!();
        println!(
            "Default: {}  Mode: {}",
            engine.palettes().default_key(),
            engine.selection().mode
        );
        Ok(())
    }
}

impl PaletteArgs {
    /// Execute palette command
    pub async fn execute(&self, site: &Site) -> Result<()> {
        let mut store = site.open_store()?;
        let mut surface = MemorySurface::homepage();
        let mut engine = start_engine(site, &mut store, &mut surface).await;

        if !engine.switch_color_theme(&self.key, &mut surface) {
            bail!(
                "Unknown palette '{}'. Available: {}",
                self.key,
                engine.available_themes().join(", ")
            );
        }

        println!("Palette set to '{}'.", engine.selection().palette_key);
        Ok(())
    }
}

impl ModeArgs {
    /// Execute mode command
    pub async fn execute(&self, site: &Site) -> Result<()> {
        let mut store = site.open_store()?;
        let mut surface = MemorySurface::homepage();
        let mut engine = start_engine(site, &mut store, &mut surface).await;

        if !engine.switch_mode(&self.mode, &mut surface) {
            bail!("Invalid mode '{}'. Must be 'light' or 'dark'", self.mode);
        }

        println!("Mode set to '{}'.", engine.selection().mode);
        Ok(())
    }
}
