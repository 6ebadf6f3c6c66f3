//! Where the palette configuration document comes from.

use std::future::Future;
use std::path::{Path, PathBuf};

use crate::models::PaletteError;

/// File name of the palette configuration, relative to the site root.
pub const THEMES_FILE: &str = "themes.json";

/// Asynchronous provider of the raw `themes.json` document.
pub trait PaletteSource {
    /// Fetches the document text.
    fn fetch(&self) -> impl Future<Output = Result<String, PaletteError>>;
}

/// Reads the configuration from a local file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Source for an explicit file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Source for `themes.json` inside a site root.
    #[must_use]
    pub fn in_site(site_root: &Path) -> Self {
        Self::new(site_root.join(THEMES_FILE))
    }

    /// Path being read.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PaletteSource for FileSource {
    async fn fetch(&self) -> Result<String, PaletteError> {
        tokio::fs::read_to_string(&self.path).await.map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                PaletteError::Unavailable(format!("{} not found", self.path.display()))
            } else {
                PaletteError::Io(err)
            }
        })
    }
}

/// Serves a fixed document or a fixed failure.
#[derive(Debug, Clone)]
pub struct MemorySource {
    document: Result<String, String>,
}

impl MemorySource {
    /// Source that returns the given document.
    #[must_use]
    pub fn document(json: impl Into<String>) -> Self {
        Self {
            document: Ok(json.into()),
        }
    }

    /// Source that always reports the configuration as unreachable.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            document: Err(reason.into()),
        }
    }
}

impl PaletteSource for MemorySource {
    async fn fetch(&self) -> Result<String, PaletteError> {
        self.document
            .clone()
            .map_err(PaletteError::Unavailable)
    }
}
