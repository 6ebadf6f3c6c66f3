//! Theme system: palette loading, style derivation and mode switching.
//!
//! [`PaletteEngine`] is the full palette + mode path; [`ModeSwitch`] is the
//! simple single-flag toggle.

pub mod adjust;
pub mod engine;
pub mod mode_switch;
pub mod source;
pub mod style;

pub use engine::{ActiveSelection, CurrentTheme, PaletteEngine, ThemeOption};
pub use mode_switch::ModeSwitch;
pub use source::{FileSource, MemorySource, PaletteSource, THEMES_FILE};
pub use style::{resolve, StyleSheet};
