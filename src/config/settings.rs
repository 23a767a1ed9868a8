//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files.  Every field has a
//! serde default, so a partial `settings.toml` still loads.

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::session::DEFAULT_WPM;

// ---------------------------------------------------------------------------
// Speed options
// ---------------------------------------------------------------------------

/// The reading speeds offered to the user, in words per minute.
///
/// The playback engine accepts any positive value; this list is what the
/// front end lets people pick from.
pub const SPEED_OPTIONS: [u32; 14] = [
    100, 150, 200, 250, 300, 350, 400, 450, 500, 600, 700, 800, 900, 1000,
];

/// `true` when `wpm` is one of [`SPEED_OPTIONS`].
pub fn is_permitted_speed(wpm: u32) -> bool {
    SPEED_OPTIONS.contains(&wpm)
}

// ---------------------------------------------------------------------------
// BackendConfig
// ---------------------------------------------------------------------------

/// Connection settings for the text-enrichment service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// When `false` every text is segmented locally.
    pub enabled: bool,
    /// Base URL of the API; `/process-text` is appended.
    pub api_base_url: String,
    /// Full URL of the liveness endpoint.
    pub health_url: String,
    /// Per-request timeout for `/process-text`.
    pub request_timeout_secs: u64,
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_base_url: "http://localhost:5000/api".into(),
            health_url: "http://localhost:5000/health".into(),
            request_timeout_secs: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// PlaybackConfig
// ---------------------------------------------------------------------------

/// Settings for the playback controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Starting speed in words per minute.
    pub speed_wpm: u32,
    /// Pause between `restart` and the automatic `play` that follows it.
    pub restart_grace_ms: u64,
}

impl PlaybackConfig {
    pub fn restart_grace(&self) -> Duration {
        Duration::from_millis(self.restart_grace_ms)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed_wpm: DEFAULT_WPM,
            restart_grace_ms: 100,
        }
    }
}

// ---------------------------------------------------------------------------
// DisplayConfig
// ---------------------------------------------------------------------------

/// Terminal renderer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Column (0-based) the ORP character is pinned to.
    pub orp_column: usize,
    /// Emit ANSI colour/bold escapes.
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            orp_column: 20,
            color: true,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use speed_reader::config::AppConfig;
///
/// // Returns Default when the file is missing.
/// let config = AppConfig::load().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub playback: PlaybackConfig,
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path.  A missing file yields the defaults.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        if !is_permitted_speed(config.playback.speed_wpm) {
            log::warn!(
                "config: speed_wpm = {} is not one of the offered speeds {:?}",
                config.playback.speed_wpm,
                SPEED_OPTIONS
            );
        }
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path, creating parent directories as needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert!(cfg.backend.enabled);
        assert_eq!(cfg.backend.api_base_url, "http://localhost:5000/api");
        assert_eq!(cfg.backend.health_url, "http://localhost:5000/health");
        assert_eq!(cfg.backend.request_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.playback.speed_wpm, 300);
        assert_eq!(cfg.playback.restart_grace(), Duration::from_millis(100));
        assert!(is_permitted_speed(cfg.playback.speed_wpm));
    }

    #[test]
    fn speed_options_are_sorted_and_positive() {
        assert!(SPEED_OPTIONS.windows(2).all(|w| w[0] < w[1]));
        assert!(SPEED_OPTIONS.iter().all(|&s| s > 0));
        assert!(is_permitted_speed(600));
        assert!(!is_permitted_speed(301));
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config.playback.speed_wpm, DEFAULT_WPM);
        assert_eq!(config.backend.api_base_url, BackendConfig::default().api_base_url);
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("settings.toml");

        let mut cfg = AppConfig::default();
        cfg.backend.enabled = false;
        cfg.backend.api_base_url = "https://reader.example.com/api".into();
        cfg.backend.request_timeout_secs = 3;
        cfg.playback.speed_wpm = 600;
        cfg.playback.restart_grace_ms = 250;
        cfg.display.color = false;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert!(!loaded.backend.enabled);
        assert_eq!(loaded.backend.api_base_url, "https://reader.example.com/api");
        assert_eq!(loaded.backend.request_timeout_secs, 3);
        assert_eq!(loaded.playback.speed_wpm, 600);
        assert_eq!(loaded.playback.restart_grace_ms, 250);
        assert!(!loaded.display.color);
    }

    /// Missing sections and fields fall back to their defaults.
    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[playback]\nspeed_wpm = 500\n").expect("write");

        let loaded = AppConfig::load_from(&path).expect("load");
        assert_eq!(loaded.playback.speed_wpm, 500);
        assert_eq!(loaded.playback.restart_grace_ms, 100);
        assert!(loaded.backend.enabled);
        assert_eq!(loaded.display.orp_column, 20);
    }

    /// The health probe bound is not a setting; older files that still
    /// carry it load without error.
    #[test]
    fn unknown_backend_keys_are_ignored() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("old.toml");
        std::fs::write(&path, "[backend]\nhealth_timeout_ms = 9000\n").expect("write");

        let loaded = AppConfig::load_from(&path).expect("load");
        assert_eq!(loaded.backend.health_url, BackendConfig::default().health_url);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[playback\nspeed_wpm = ").expect("write");

        assert!(AppConfig::load_from(&path).is_err());
    }
}
