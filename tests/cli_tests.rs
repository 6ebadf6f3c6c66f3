//! End-to-end tests for the `scholar-site` binary.

use std::fs;
use std::process::{Command, Output};

mod fixtures;
use fixtures::*;

/// Path to the scholar-site binary
fn scholar_site_bin() -> String {
    std::env::var("CARGO_BIN_EXE_scholar-site")
        .unwrap_or_else(|_| "target/release/scholar-site".to_string())
}

/// Runs the binary against the site's config file.
fn run(site: &TestSite, args: &[&str]) -> Output {
    Command::new(scholar_site_bin())
        .arg("--config")
        .arg(&site.config_path)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

// ============================================================================
// Render Command Tests
// ============================================================================

#[test]
fn test_render_default() {
    let site = TestSite::new();
    let output = run(&site, &["render"]);

    assert!(
        output.status.success(),
        "render should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = stdout(&output);
    assert!(stdout.contains("data-color-theme=\"klein\""));
    assert!(stdout.contains("data-theme=\"light\""));
    assert!(stdout.contains("--primary-color: #002fa7;"));
    assert_eq!(stdout.matches("<li class=\"news-item").count(), 5);
    assert!(stdout.contains("[Show all news (10)]"));
}

#[test]
fn test_render_preview_does_not_persist() {
    let site = TestSite::new();
    let output = run(&site, &["render", "--palette", "mint", "--mode", "dark", "--expanded"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("data-color-theme=\"mint\""));
    assert!(stdout.contains("--bg-primary: #111827;"));
    assert_eq!(stdout.matches("<li class=\"news-item").count(), 10);
    assert!(stdout.contains("[Show less]"));
    assert!(!site.preferences_path().exists());
}

#[test]
fn test_render_rejects_unknown_palette() {
    let site = TestSite::new();
    let output = run(&site, &["render", "--palette", "ocean"]);
    assert!(!output.status.success());
}

// ============================================================================
// Palette and Mode Command Tests
// ============================================================================

#[test]
fn test_palette_and_mode_persist() {
    let site = TestSite::new();

    let output = run(&site, &["palette", "violet"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Palette set to 'violet'."));

    let output = run(&site, &["mode", "dark"]);
    assert!(output.status.success());

    let preferences = fs::read_to_string(site.preferences_path()).unwrap();
    assert!(preferences.contains("colorTheme = \"violet\""));
    assert!(preferences.contains("themeMode = \"dark\""));

    let output = run(&site, &["render"]);
    assert!(stdout(&output).contains("data-color-theme=\"violet\""));
    assert!(stdout(&output).contains("data-theme=\"dark\""));
}

#[test]
fn test_palette_rejects_unknown_key() {
    let site = TestSite::new();
    let output = run(&site, &["palette", "ocean"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown palette 'ocean'"));
    assert!(stderr.contains("amber, klein, mint, teal, violet"));
}

#[test]
fn test_mode_rejects_invalid_value() {
    let site = TestSite::new();
    assert!(run(&site, &["palette", "teal"]).status.success());

    let output = run(&site, &["mode", "sepia"]);
    assert!(!output.status.success());

    let preferences = fs::read_to_string(site.preferences_path()).unwrap();
    assert!(preferences.contains("themeMode = \"light\""));
}

// ============================================================================
// Themes Command Tests
// ============================================================================

#[test]
fn test_themes_json() {
    let site = TestSite::new();
    let output = run(&site, &["themes", "--json"]);
    assert!(output.status.success());

    let options: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let keys: Vec<&str> = options
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, THEME_KEYS);
    assert_eq!(options[1]["active"], true);
}

#[test]
fn test_themes_without_configuration() {
    let site = TestSite::with_themes(None);
    let output = run(&site, &["themes"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("* klein"));
    assert!(stdout.contains("Default: klein"));
}

// ============================================================================
// News Command Tests
// ============================================================================

#[test]
fn test_news_from_file() {
    let site = TestSite::new().with_news(&news_entries(7));

    let output = run(&site, &["news"]);
    assert!(output.status.success());
    let stdout_text = stdout(&output);
    assert_eq!(stdout_text.matches("<li ").count(), 5);
    assert!(stdout_text.contains("2 older entries hidden"));

    let output = run(&site, &["news", "--all"]);
    let stdout_text = stdout(&output);
    assert_eq!(stdout_text.matches("<li ").count(), 7);
    assert!(!stdout_text.contains("hidden"));
}
