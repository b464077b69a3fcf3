//! StitchKit Settings Crate
//!
//! Handles application configuration: generation defaults, simulation
//! defaults and display preferences, persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{Config, DisplaySettings, GenerationSettings, MeasurementSystem, SimulationSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
