//! Scholar Site - homepage theme and news toolkit
//!
//! Drives the homepage components against an in-memory page for previews
//! and manages the persisted theme preferences.
//!
//! # Usage
//!
//! ```bash
//! # Preview the page with the persisted theme
//! scholar-site render --site ./site
//!
//! # Persist a palette and a mode
//! scholar-site palette mint
//! scholar-site mode dark
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scholar_site::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    cli.execute().await
}
