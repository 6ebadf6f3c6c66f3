//! Application-wide constants.
//!
//! Element ids are part of the page contract: a missing id disables only
//! the feature that uses it.

/// The display name of the application.
pub const APP_NAME: &str = "Scholar Site";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "scholar-site";

/// Light/dark toggle button.
pub const THEME_TOGGLE_ID: &str = "theme-toggle";

/// List element the news timeline renders into.
pub const NEWS_LIST_ID: &str = "news-list";

/// Container of the news expand/collapse control.
pub const NEWS_ACTIONS_ID: &str = "news-actions";

/// News expand/collapse button.
pub const NEWS_TOGGLE_ID: &str = "news-toggle";

/// Root attribute carrying the active mode.
pub const MODE_ATTRIBUTE: &str = "data-theme";

/// Root attribute carrying the active palette key.
pub const PALETTE_ATTRIBUTE: &str = "data-color-theme";

/// Attribute holding a media element's deferred source.
pub const DEFERRED_SOURCE_ATTRIBUTE: &str = "data-src";

/// Attribute marking a media element as loaded.
pub const LOADED_ATTRIBUTE: &str = "data-loaded";
