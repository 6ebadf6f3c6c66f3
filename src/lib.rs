//! Scholar Site Library
//!
//! This library provides the client-side behavior of a personal academic
//! homepage: palette-driven theming with light/dark modes, a collapsible
//! news timeline, deferred media loading and show/hide blocks. Every
//! component talks to the page through the [`surface::Surface`] port, so
//! the whole page can be driven and inspected in memory.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod events;
pub mod media;
pub mod models;
pub mod page;
pub mod store;
pub mod surface;
pub mod theme;
pub mod timeline;
pub mod visibility;

pub use config::SiteConfig;
pub use page::{Page, PageEvent};
