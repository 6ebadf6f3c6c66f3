//! News timeline command.

use anyhow::Result;
use clap::Args;

use crate::constants::APP_BINARY_NAME;
use crate::surface::MemorySurface;
use crate::timeline::NewsTimeline;

use super::Site;

/// Print the news timeline
#[derive(Args, Debug)]
pub struct NewsArgs {
    /// Print every entry instead of the collapsed view
    #[arg(long)]
    all: bool,
}

impl NewsArgs {
    /// Execute news command
    pub fn execute(&self, site: &Site) -> Result<()> {
        let entries = site.news_entries()?;
        let mut timeline = NewsTimeline::new(&entries, site.config.timeline_limits());
        if self.all && timeline.needs_toggle() {
            timeline.activate(&mut MemorySurface::new());
        }

        for item in timeline.items() {
            println!("{}", item.to_html());
        }

        let hidden = timeline.total() - timeline.visible_entries().len();
        if hidden > 0 {
            println!();
            println!(
                "{hidden} older entries hidden, run `{APP_BINARY_NAME} news --all` to show them."
            );
        }
        Ok(())
    }
}
