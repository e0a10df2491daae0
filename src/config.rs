//! Configuration management for the capture engine.
//!
//! Provides loading, saving, and validation of session timing and
//! quality-threshold settings. All thresholds are configuration, not
//! hard-coded constants; the defaults follow a deployment tuned for ID
//! cards but carry no special authority.

use crate::errors::EngineError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub session: SessionConfig,
    pub quality: QualityConfig,
}

/// Tick cadence and temporal-window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Interval between evaluation ticks in milliseconds.
    pub frame_interval_ms: u64,
    /// Number of recent metric samples the stability window holds.
    pub buffer_size: usize,
    /// Minimum time between two auto-captures in milliseconds.
    pub cooldown_ms: u64,
}

/// Quality-gate thresholds for the capture decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Mean Laplacian-variance sharpness the window must exceed.
    pub sharpness_threshold: f64,
    /// Lower bound on mean edge density (percent); rejects blank or
    /// out-of-frame scenes.
    pub min_edge_density: f64,
    /// Upper bound on mean edge density (percent); rejects cluttered or
    /// noise-saturated scenes.
    pub max_edge_density: f64,
    /// Steadiness is sharpness variance below
    /// `stability_factor * sharpness_threshold`.
    pub stability_factor: f64,
    /// Gradient magnitude above which a pixel counts as an edge.
    pub edge_magnitude_threshold: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig {
                frame_interval_ms: 200,
                buffer_size: 5,
                cooldown_ms: 5000,
            },
            quality: QualityConfig {
                sharpness_threshold: 30.0,
                min_edge_density: 4.0,
                max_edge_density: 25.0,
                stability_factor: 0.25,
                edge_magnitude_threshold: 30.0,
            },
        }
    }
}

impl SessionConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file, falling back to defaults if
    /// the file does not exist.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| EngineError::ConfigIo(format!("Failed to read config file: {}", e)))?;

        let config: EngineConfig = toml::from_str(&contents)
            .map_err(|e| EngineError::ConfigIo(format!("Failed to parse config file: {}", e)))?;

        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), EngineError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                EngineError::ConfigIo(format!("Failed to create config directory: {}", e))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| EngineError::ConfigIo(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string)
            .map_err(|e| EngineError::ConfigIo(format!("Failed to write config file: {}", e)))?;

        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get default config file path.
    pub fn default_path() -> PathBuf {
        PathBuf::from("docsnap.toml")
    }

    /// Load from default location or create with defaults.
    pub fn load_or_default() -> Self {
        Self::load_from_file(Self::default_path()).unwrap_or_else(|e| {
            log::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.session.frame_interval_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "frame_interval_ms must be at least 1".to_string(),
            ));
        }
        if self.session.buffer_size == 0 {
            return Err(EngineError::InvalidConfig(
                "buffer_size must be at least 1".to_string(),
            ));
        }

        if self.quality.sharpness_threshold <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "sharpness_threshold must be positive".to_string(),
            ));
        }
        if self.quality.min_edge_density < 0.0 {
            return Err(EngineError::InvalidConfig(
                "min_edge_density must not be negative".to_string(),
            ));
        }
        if self.quality.max_edge_density > 100.0 {
            return Err(EngineError::InvalidConfig(
                "max_edge_density must not exceed 100".to_string(),
            ));
        }
        if self.quality.min_edge_density >= self.quality.max_edge_density {
            return Err(EngineError::InvalidConfig(
                "min_edge_density must be below max_edge_density".to_string(),
            ));
        }
        if self.quality.stability_factor <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "stability_factor must be positive".to_string(),
            ));
        }
        if self.quality.edge_magnitude_threshold < 0.0 {
            return Err(EngineError::InvalidConfig(
                "edge_magnitude_threshold must not be negative".to_string(),
            ));
        }

        Ok(())
    }
}
