//! Page preview command.

use anyhow::{bail, Result};
use clap::Args;

use crate::constants::{NEWS_LIST_ID, NEWS_TOGGLE_ID};
use crate::page::{Page, PageEvent};
use crate::surface::MemorySurface;
use crate::theme::style;

use super::Site;

/// Start the page in memory and print its theme and news output
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Preview a palette instead of the persisted one
    #[arg(long, value_name = "KEY")]
    palette: Option<String>,

    /// Preview a mode (light or dark) instead of the persisted one
    #[arg(long, value_name = "MODE")]
    mode: Option<String>,

    /// Expand the news list
    #[arg(long)]
    expanded: bool,
}

impl RenderArgs {
    /// Execute render command
    pub async fn execute(&self, site: &Site) -> Result<()> {
        let entries = site.news_entries()?;
        let store = site.preview_store()?;
        let mut page = Page::new(&site.config, MemorySurface::homepage(), store, &entries);
        page.start(&site.source()).await;

        if let Some(key) = &self.palette {
            if !page.switch_color_theme(key) {
                bail!("Unknown palette '{key}'");
            }
        }
        if let Some(mode) = &self.mode {
            if !page.switch_mode(mode) {
                bail!("Invalid mode '{mode}'. Must be 'light' or 'dark'");
            }
        }
        if self.expanded {
            page.handle(PageEvent::Click(NEWS_TOGGLE_ID.to_string()));
        }

        let surface = page.surface();
        for (name, value) in surface.root_attributes() {
            println!("{name}=\"{value}\"");
        }
        println!();

        if let Some(engine) = page.palette_engine() {
            let current = engine.current_theme();
            println!("{}", style::resolve(current.theme, current.mode).to_css());
            println!();
        }

        for item in surface.children(NEWS_LIST_ID) {
            println!("{}", item.to_html());
        }
        if let Some(label) = surface.text(NEWS_TOGGLE_ID) {
            println!();
            println!("[{label}]");
        }

        Ok(())
    }
}
