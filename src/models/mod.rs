//! Data models for palettes, display modes, colors and news entries.
//!
//! Models are independent of the rendering surface and of persistence.

pub mod mode;
pub mod news;
pub mod palette;
pub mod rgb;

// Re-export all model types
pub use mode::{ThemeMode, UnknownMode};
pub use news::NewsEntry;
pub use palette::{HexColor, Palette, PaletteColors, PaletteError, PaletteSet, BUILTIN_PALETTE_KEY};
pub use rgb::RgbColor;
