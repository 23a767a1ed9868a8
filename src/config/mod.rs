//! Configuration module for the speed reader.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the backend,
//! playback and terminal display, `AppPaths` for the platform config
//! directory, and TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    is_permitted_speed, AppConfig, BackendConfig, DisplayConfig, PlaybackConfig, SPEED_OPTIONS,
};
