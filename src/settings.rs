//! Host settings
//!
//! Read once at startup from a JSON file. Missing or broken files fall back
//! to defaults so the demo always runs.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_TICK_MS;
use crate::sim::Layout;

/// Host simulation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Delay between frames in milliseconds
    pub tick_ms: u64,
    /// How long the result screen stays up before the next frame
    pub round_over_pause_ms: u64,
    /// RNG seed; taken from the clock when absent
    pub seed: Option<u64>,
    /// Layout file; the built-in layout when absent
    pub layout: Option<PathBuf>,
    /// Let the paddle follow the ball and restart rounds by itself
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            round_over_pause_ms: 2000,
            seed: None,
            layout: None,
            autopilot: true,
        }
    }
}

impl Settings {
    /// Default settings file name, looked up in the working directory
    pub const FILE_NAME: &'static str = "raster-breakout.json";

    /// Parse settings from JSON; unspecified fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from disk, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn round_over_pause(&self) -> Duration {
        Duration::from_millis(self.round_over_pause_ms)
    }

    /// Configured seed, or one derived from the current time
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default()
        })
    }

    /// Configured layout, or the built-in one if none is set or it fails to load
    pub fn resolve_layout(&self) -> Layout {
        let Some(path) = &self.layout else {
            return Layout::default();
        };
        match Layout::load(path) {
            Ok(layout) => layout,
            Err(e) => {
                log::warn!("Layout {} rejected ({}), using built-in layout", path.display(), e);
                Layout::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.tick_interval(), Duration::from_millis(250));
        assert!(settings.autopilot);
        assert_eq!(settings.resolve_layout(), Layout::default());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "tick_ms": 100, "seed": 42 }"#).unwrap();
        assert_eq!(settings.tick_ms, 100);
        assert_eq!(settings.resolve_seed(), 42);
        assert_eq!(settings.round_over_pause_ms, 2000);
        assert!(settings.autopilot);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/definitely/not/here.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_bad_layout_path_falls_back() {
        let settings = Settings {
            layout: Some(PathBuf::from("/definitely/not/a/layout.json")),
            ..Default::default()
        };
        assert_eq!(settings.resolve_layout(), Layout::default());
    }
}
