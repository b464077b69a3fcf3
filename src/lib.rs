//! # StitchKit
//!
//! Embroidery stitch geometry pipeline and stitch-out simulation engine:
//! - Satin, appliqué, tatami and running stitch generation
//! - Pull compensation, lock stitches and stitch length resampling
//! - Immutable layer store with hoop containment checks
//! - Frame-driven stitch-out playback
//!
//! ## Architecture
//!
//! StitchKit is organized as a workspace with multiple crates:
//!
//! 1. **stitchkit-core** - Geometry, layers, stitch settings, hoop and fabric catalogs, errors
//! 2. **stitchkit-designer** - Generators, layer store, discretizer, simulation, project files
//! 3. **stitchkit-settings** - Persisted application configuration
//! 4. **stitchkit** - Logging bootstrap and the headless player binary

use std::path::Path;

use anyhow::Context;
use tracing::info;

use stitchkit_core::units::{format_length, format_thread_length, get_unit_label};

pub use stitchkit_core::{
    Bounds, Error, GeometryError, Hoop, Layer, Point, Result, ServiceError, StitchPoint,
    StitchSettings, StitchType, StoreError,
};
pub use stitchkit_designer as designer;
pub use stitchkit_designer::{
    discretize, AppliqueOptions, GenerationOptions, LayerStore, LocalStitchService, LockMode,
    ProjectFile, SimulationState, StitchAnalyzer, StitchService, StitchSimulator,
};
pub use stitchkit_settings::{Config, GenerationSettings, MeasurementSystem, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Stitches longer than this are reported as jumps in a replay summary.
pub const JUMP_LENGTH: f64 = 12.0;

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

/// Generator options derived from the persisted generation settings.
pub fn generation_options(settings: &GenerationSettings) -> GenerationOptions {
    GenerationOptions {
        lock_mode: settings.lock_stitches.then_some(LockMode::Both),
        lock_length: settings.lock_length,
        default_satin_width: settings.satin_width,
        tatami_row_offset: settings.tatami_row_offset,
    }
}

/// Appliqué options derived from the persisted generation settings.
pub fn applique_options(settings: &GenerationSettings) -> AppliqueOptions {
    AppliqueOptions {
        satin_width: settings.applique_satin_width,
        satin_density: settings.applique_satin_density,
        ..AppliqueOptions::default()
    }
}

/// Summary of a headless stitch-out.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    pub layers: usize,
    pub stitches: usize,
    pub ticks: usize,
    pub color_changes: usize,
    pub jumps: usize,
    /// Needle travel in millimetres.
    pub travel: f64,
    /// Machine time in seconds.
    pub sew_time: f64,
}

impl ReplaySummary {
    /// Needle travel formatted in `system` units, e.g. `38.0 mm`.
    pub fn travel_label(&self, system: MeasurementSystem) -> String {
        format!("{} {}", format_length(self.travel, system), get_unit_label(system))
    }

    /// Top thread consumed, e.g. `42 cm` or `12.35 m`.
    pub fn thread_label(&self) -> String {
        format_thread_length(self.travel / 1000.0)
    }
}

/// Loads a project and plays it to completion at `speed` stitches per tick.
///
/// Falls back to the configured default speed when `speed` is `None`.
pub fn replay_project(
    path: impl AsRef<Path>,
    speed: Option<usize>,
    config: &Config,
) -> anyhow::Result<ReplaySummary> {
    let project = ProjectFile::load_from_file(path.as_ref())?;
    let store = project.to_store();

    let mut sim = StitchSimulator::new();
    sim.sync(&store);
    sim.set_speed(speed.unwrap_or(config.simulation.default_speed))
        .context("Invalid playback speed")?;

    info!(
        project = %project.name,
        layers = store.len(),
        stitches = sim.state().total_stitches,
        ticks = sim.estimated_ticks(),
        "replaying project"
    );

    let ticks = sim.run_to_end();
    let analyzer = StitchAnalyzer::new(sim.stitches());
    let summary = ReplaySummary {
        layers: store.len(),
        stitches: sim.state().total_stitches,
        ticks,
        color_changes: analyzer.color_changes(),
        jumps: analyzer.long_stitches(JUMP_LENGTH).len(),
        travel: analyzer.total_length(),
        sew_time: analyzer.estimate_sew_time(config.simulation.stitches_per_minute),
    };
    info!(
        stitches = summary.stitches,
        ticks = summary.ticks,
        color_changes = summary.color_changes,
        jumps = summary.jumps,
        "replay complete"
    );
    Ok(summary)
}
