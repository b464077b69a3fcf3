//! Configuration and settings management for StitchKit
//!
//! Provides configuration file handling, settings management, and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Generation defaults (satin, appliqué, lock stitches, fill)
//! - Simulation defaults (playback speed, frame rate)
//! - Display preferences (units, hoop scale, default hoop)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
pub use stitchkit_core::MeasurementSystem;
use stitchkit_core::{find_fabric_preset, find_hoop, DEFAULT_HOOP_ID};
use tracing::{debug, info};

use crate::error::{ConfigError, SettingsError, SettingsResult};

const APP_DIR: &str = "stitchkit";
const CONFIG_FILE: &str = "config.toml";
const MAX_RECENT_PROJECTS: usize = 10;

/// Stitch generation defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Satin column width in mm
    pub satin_width: f64,
    /// Satin rung spacing in mm
    pub satin_density: f64,
    /// Width of the appliqué satin border in mm
    pub applique_satin_width: f64,
    /// Rung spacing of the appliqué satin border in mm
    pub applique_satin_density: f64,
    /// Add tie-in and tie-out locks to generated paths
    pub lock_stitches: bool,
    /// Lock stitch leg length in mm
    pub lock_length: f64,
    /// Maximum run stitch length in mm
    pub default_stitch_length: f64,
    /// Jumps shorter than this are bridged when optimizing stitch order
    pub connect_threshold: f64,
    /// Brick offset of tatami rows as a fraction of the stitch length
    pub tatami_row_offset: f64,
    /// Fabric preset applied to new layers
    pub default_fabric: Option<String>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            satin_width: 4.0,
            satin_density: 0.4,
            applique_satin_width: 4.0,
            applique_satin_density: 0.4,
            lock_stitches: false,
            lock_length: 0.5,
            default_stitch_length: 3.5,
            connect_threshold: 50.0,
            tatami_row_offset: 0.0,
            default_fabric: None,
        }
    }
}

/// Simulation playback defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Stitches advanced per tick
    pub default_speed: usize,
    /// Ticks per second of the frame clock
    pub frames_per_second: u32,
    /// Machine speed used for sew time estimates
    pub stitches_per_minute: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            default_speed: 10,
            frames_per_second: 60,
            stitches_per_minute: 700.0,
        }
    }
}

/// Display preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Measurement system (Metric or Imperial)
    pub measurement_system: MeasurementSystem,
    /// Display units per millimetre used to draw the hoop
    pub hoop_scale: f64,
    /// Hoop selected in a new project, `None` to disable the hoop check
    pub default_hoop_id: Option<String>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            measurement_system: MeasurementSystem::default(),
            hoop_scale: 3.0,
            default_hoop_id: Some(DEFAULT_HOOP_ID.to_string()),
        }
    }
}

/// File format picked from the config file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Recently opened projects, newest first
    pub recent_projects: Vec<PathBuf>,
    /// Stitch generation defaults
    pub generation: GenerationSettings,
    /// Simulation defaults
    pub simulation: SimulationSettings,
    /// Display preferences
    pub display: DisplaySettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config directory for StitchKit
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| {
                ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()).into()
            })
    }

    /// Default config file location
    pub fn default_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist yet.
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(e.to_string()))?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        info!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let g = &self.generation;
        for (key, value) in [
            ("satin_width", g.satin_width),
            ("satin_density", g.satin_density),
            ("applique_satin_width", g.applique_satin_width),
            ("applique_satin_density", g.applique_satin_density),
            ("lock_length", g.lock_length),
            ("default_stitch_length", g.default_stitch_length),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::invalid(key, "must be > 0"));
            }
        }

        if !(g.connect_threshold.is_finite() && g.connect_threshold >= 0.0) {
            return Err(SettingsError::invalid("connect_threshold", "must be >= 0"));
        }

        if !(0.0..1.0).contains(&g.tatami_row_offset) {
            return Err(ConfigError::ValueOutOfRange {
                key: "tatami_row_offset".to_string(),
                value: g.tatami_row_offset.to_string(),
            }
            .into());
        }

        if let Some(fabric) = &g.default_fabric {
            if find_fabric_preset(fabric).is_none() {
                return Err(ConfigError::UnknownCatalogEntry {
                    kind: "fabric preset",
                    id: fabric.clone(),
                }
                .into());
            }
        }

        // Validate simulation settings
        if self.simulation.default_speed == 0 {
            return Err(SettingsError::invalid("default_speed", "must be > 0"));
        }

        if self.simulation.frames_per_second == 0 {
            return Err(SettingsError::invalid("frames_per_second", "must be > 0"));
        }

        let spm = self.simulation.stitches_per_minute;
        if !(spm.is_finite() && spm > 0.0) {
            return Err(SettingsError::invalid("stitches_per_minute", "must be > 0"));
        }

        // Validate display settings
        if !(self.display.hoop_scale.is_finite() && self.display.hoop_scale > 0.0) {
            return Err(SettingsError::invalid("hoop_scale", "must be > 0"));
        }

        if let Some(hoop) = &self.display.default_hoop_id {
            if find_hoop(hoop).is_err() {
                return Err(ConfigError::UnknownCatalogEntry {
                    kind: "hoop",
                    id: hoop.clone(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Add project to recent projects list
    pub fn add_recent_project(&mut self, path: PathBuf) {
        // Remove if already in list
        self.recent_projects.retain(|p| p != &path);

        // Add to front
        self.recent_projects.insert(0, path);

        self.recent_projects.truncate(MAX_RECENT_PROJECTS);
    }
}
