//! Announcement entries for the news timeline.
//!
//! The built-in list is embedded at compile time and parsed once into a
//! process-wide frozen slice, ordered newest-first by convention.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{LazyLock, OnceLock};

/// A single announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsEntry {
    /// Month of the announcement (YYYY-MM)
    pub date: String,
    /// Display label (e.g., "2025.09")
    pub label: String,
    /// Trusted HTML body
    pub html: String,
    /// Whether the entry carries the "new" badge
    #[serde(default)]
    pub is_new: bool,
}

/// Month pattern (YYYY-MM), compiled on first use.
fn date_pattern() -> Result<&'static Regex> {
    static PATTERN: LazyLock<Result<Regex, regex::Error>> =
        LazyLock::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$"));
    PATTERN
        .as_ref()
        .map_err(|err| anyhow::anyhow!("Invalid news date pattern: {err}"))
}

/// Parses a JSON array of news entries, rejecting malformed dates.
pub fn parse_entries(json: &str) -> Result<Vec<NewsEntry>> {
    let entries: Vec<NewsEntry> =
        serde_json::from_str(json).context("Failed to parse news entries")?;

    let pattern = date_pattern()?;
    for (index, entry) in entries.iter().enumerate() {
        if !pattern.is_match(&entry.date) {
            anyhow::bail!(
                "News entry {} has invalid date '{}'. Expected YYYY-MM",
                index,
                entry.date
            );
        }
    }

    Ok(entries)
}

/// Loads news entries from a JSON file.
pub fn load_entries(path: &Path) -> Result<Vec<NewsEntry>> {
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read news file: {}", path.display()))?;
    parse_entries(&content).context(format!("Invalid news file: {}", path.display()))
}

/// The embedded announcement list.
///
/// Parsed on first access; an unparseable embedded list yields an empty
/// slice rather than aborting the page.
pub fn builtin_entries() -> &'static [NewsEntry] {
    static ENTRIES: OnceLock<Box<[NewsEntry]>> = OnceLock::new();
    ENTRIES.get_or_init(|| {
        parse_entries(include_str!("../data/news.json"))
            .map(Vec::into_boxed_slice)
            .unwrap_or_else(|err| {
                tracing::error!("Embedded news list is invalid: {err:#}");
                Box::default()
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_entries_load() {
        let entries = builtin_entries();
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].label, "2025.09");
        assert!(entries[0].is_new);
        // isNew defaults to false when omitted
        assert!(!entries[3].is_new);
    }

    #[test]
    fn test_builtin_entries_newest_first() {
        let entries = builtin_entries();
        assert!(entries.windows(2).all(|pair| pair[0].date >= pair[1].date));
    }

    #[test]
    fn test_parse_entries_rejects_bad_date() {
        let json = r#"[{ "date": "2025-13", "label": "x", "html": "x" }]"#;
        assert!(parse_entries(json).is_err());

        let json = r#"[{ "date": "2025.09", "label": "x", "html": "x" }]"#;
        assert!(parse_entries(json).is_err());
    }

    #[test]
    fn test_date_pattern_compiles() {
        let pattern = date_pattern().unwrap();
        assert!(pattern.is_match("2024-01"));
        assert!(pattern.is_match("2025-12"));
        assert!(!pattern.is_match("2025-00"));
        assert!(!pattern.is_match("25-01"));
    }

    #[test]
    fn test_parse_entries_empty_list() {
        assert!(parse_entries("[]").unwrap().is_empty());
    }

    #[test]
    fn test_load_entries_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("news.json");
        std::fs::write(
            &path,
            r#"[{ "date": "2024-03", "label": "2024.03", "html": "Hello", "isNew": true }]"#,
        )
        .unwrap();

        let entries = load_entries(&path).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].html, "Hello");
    }
}
