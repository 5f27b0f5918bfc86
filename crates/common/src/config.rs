//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default analysis settings.
    pub analysis: AnalysisDefaults,

    /// External media tooling.
    pub media: MediaToolsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Defaults that seed a per-run analysis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisDefaults {
    /// Whether stall events are recorded.
    pub track_movement: bool,

    /// Sensitivity in [10, 100]; multiplied by 100 to get a pixel count.
    pub movement_threshold: u32,

    /// Produce an activity overview when no events were recorded.
    pub full_analysis: bool,

    /// Draw the zone rectangle on display frames.
    pub zone_overlay: bool,
}

/// Locations of the ffmpeg binaries used for decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaToolsConfig {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "vidinspect_motion=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path. Logs go to stderr when unset.
    pub file: Option<PathBuf>,
}

impl Default for AnalysisDefaults {
    fn default() -> Self {
        Self {
            track_movement: true,
            movement_threshold: 30,
            full_analysis: false,
            zone_overlay: true,
        }
    }
}

impl Default for MediaToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&config_file_path())
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("vidinspect").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scratch directory unique to this test process.
    fn scratch_dir(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("{name}_{}", std::process::id()))
    }

    #[test]
    fn analysis_defaults_match_ui_defaults() {
        let config = AppConfig::default();
        assert!(config.analysis.track_movement);
        assert_eq!(config.analysis.movement_threshold, 30);
        assert!(!config.analysis.full_analysis);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.media.ffprobe, PathBuf::from("ffprobe"));
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let raw = r#"{ "analysis": { "movement_threshold": 55 } }"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.analysis.movement_threshold, 55);
        assert!(config.analysis.track_movement);
        assert!(!config.logging.json);
    }

    #[test]
    fn save_then_load_from_path() {
        let dir = scratch_dir("vidinspect_test_config");
        let path = dir.join("config.json");
        let _ = std::fs::remove_file(&path);

        let mut config = AppConfig::default();
        config.analysis.full_analysis = true;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert!(loaded.analysis.full_analysis);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let dir = scratch_dir("vidinspect_test_config_invalid");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.analysis.movement_threshold, 30);

        std::fs::remove_dir_all(&dir).ok();
    }
}
