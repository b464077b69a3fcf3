//! Three-step appliqué decomposition.
//!
//! An appliqué outline is stitched as a placement line, a tackdown line that
//! doubles as the trim guide, and a satin border that covers the raw edge.

use serde::{Deserialize, Serialize};
use stitchkit_core::{close_path, GeometryError, Layer, Path, Point, StitchSettings, StitchType};
use tracing::debug;

use crate::satin::{generate_satin, DEFAULT_SATIN_DENSITY, DEFAULT_SATIN_WIDTH};

pub const POSITION_STEP_NAME: &str = "Appliqué Position";
pub const TACKDOWN_STEP_NAME: &str = "Appliqué Tackdown";
pub const SATIN_STEP_NAME: &str = "Appliqué Satin Finish";

/// One step of an appliqué sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliqueStep {
    pub name: String,
    #[serde(rename = "type")]
    pub step_type: StitchType,
    pub color: String,
    pub paths: Vec<Path>,
}

impl AppliqueStep {
    /// Converts the step into a fresh, visible layer.
    ///
    /// Step paths are finished needle positions, so every step layer is
    /// stored as a run without a stitch length and regeneration leaves it
    /// unchanged. The satin finish records the width and density it was
    /// stitched with.
    pub fn into_layer(self, options: &AppliqueOptions) -> Layer {
        let settings = match self.step_type {
            StitchType::Satin => StitchSettings {
                density: options.satin_density,
                satin_width: Some(options.satin_width),
                ..finished_run()
            },
            _ => finished_run(),
        };
        Layer::new(self.name, self.color)
            .with_paths(self.paths)
            .with_settings(settings)
    }
}

fn finished_run() -> StitchSettings {
    StitchSettings {
        stitch_type: StitchType::Run,
        stitch_length: None,
        pull_compensation: 0.0,
        ..StitchSettings::default()
    }
}

/// Overrides for the appliqué step parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliqueOptions {
    pub satin_width: f64,
    pub satin_density: f64,
    pub position_color: String,
    pub tackdown_color: String,
    pub satin_color: String,
}

impl Default for AppliqueOptions {
    fn default() -> Self {
        Self {
            satin_width: DEFAULT_SATIN_WIDTH,
            satin_density: DEFAULT_SATIN_DENSITY,
            position_color: "#e0e0e0".to_string(),
            tackdown_color: "#cccccc".to_string(),
            satin_color: "#000000".to_string(),
        }
    }
}

/// Decomposes `polygon` into the three appliqué steps with default options.
pub fn generate_applique(polygon: &[Point]) -> Result<[AppliqueStep; 3], GeometryError> {
    generate_applique_with(polygon, &AppliqueOptions::default())
}

/// Decomposes `polygon` into position, tackdown and satin finish steps.
pub fn generate_applique_with(
    polygon: &[Point],
    options: &AppliqueOptions,
) -> Result<[AppliqueStep; 3], GeometryError> {
    GeometryError::check_len(3, polygon.len())?;

    let contour = polygon.to_vec();
    let border = generate_satin(
        &close_path(polygon),
        options.satin_width,
        options.satin_density,
    )?;

    debug!(
        vertices = polygon.len(),
        border = border.len(),
        "generated appliqué steps"
    );

    Ok([
        AppliqueStep {
            name: POSITION_STEP_NAME.to_string(),
            step_type: StitchType::Run,
            color: options.position_color.clone(),
            paths: vec![contour.clone()],
        },
        AppliqueStep {
            name: TACKDOWN_STEP_NAME.to_string(),
            step_type: StitchType::Run,
            color: options.tackdown_color.clone(),
            paths: vec![contour],
        },
        AppliqueStep {
            name: SATIN_STEP_NAME.to_string(),
            step_type: StitchType::Satin,
            color: options.satin_color.clone(),
            paths: vec![border],
        },
    ])
}
