//! Stitch service contracts.
//!
//! Request and response DTOs exchanged with a stitch generator, plus the
//! async [`StitchService`] trait. Coordinates travel as `[x, y]` arrays;
//! requests carry raw arrays and are validated before any geometry runs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stitchkit_core::{
    normalize_hex, parse_path, path_to_pairs, Error, GeometryError, Layer, Path, Point, Result,
    ServiceError, StitchType,
};
use tracing::debug;

use crate::applique::{generate_applique_with, AppliqueOptions, AppliqueStep};
use crate::satin::{generate_satin, DEFAULT_SATIN_DENSITY, DEFAULT_SATIN_WIDTH};

/// A path as it arrives over the wire.
pub type RawPath = Vec<Vec<f64>>;

fn default_width() -> f64 {
    DEFAULT_SATIN_WIDTH
}

fn default_density() -> f64 {
    DEFAULT_SATIN_DENSITY
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatinRequest {
    pub path: RawPath,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_density")]
    pub density: f64,
}

impl SatinRequest {
    pub fn new(centerline: &[Point], width: f64, density: f64) -> Self {
        Self {
            path: to_raw(centerline),
            width,
            density,
        }
    }

    pub fn centerline(&self) -> std::result::Result<Path, GeometryError> {
        parse_path(&self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatinResponse {
    pub stitches: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliqueRequest {
    pub polygon: RawPath,
}

impl AppliqueRequest {
    pub fn new(polygon: &[Point]) -> Self {
        Self {
            polygon: to_raw(polygon),
        }
    }

    pub fn polygon(&self) -> std::result::Result<Path, GeometryError> {
        parse_path(&self.polygon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliqueResponse {
    pub steps: Vec<AppliqueStep>,
}

impl AppliqueResponse {
    /// Checks the response shape: exactly run, run, satin.
    pub fn validate(&self) -> std::result::Result<(), ServiceError> {
        let types: Vec<StitchType> = self.steps.iter().map(|s| s.step_type).collect();
        if types != [StitchType::Run, StitchType::Run, StitchType::Satin] {
            return Err(ServiceError::MalformedResponse {
                reason: format!("expected run, run, satin steps, got {:?}", types),
            });
        }
        Ok(())
    }
}

/// One color region produced by the vectorizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizedLayer {
    pub color: String,
    #[serde(default)]
    pub paths: Vec<RawPath>,
}

/// Vectorizer output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorizedImage {
    pub layers: Vec<VectorizedLayer>,
}

impl VectorizedImage {
    /// Converts the regions into fresh visible layers named "Color N".
    pub fn into_layers(self) -> std::result::Result<Vec<Layer>, GeometryError> {
        self.layers
            .into_iter()
            .enumerate()
            .map(|(i, region)| {
                let paths = region
                    .paths
                    .iter()
                    .map(|p| parse_path(p))
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                let color = normalize_hex(&region.color).unwrap_or(region.color);
                Ok(Layer::new(format!("Color {}", i + 1), color).with_paths(paths))
            })
            .collect()
    }
}

fn to_raw(path: &[Point]) -> RawPath {
    path_to_pairs(path).into_iter().map(Vec::from).collect()
}

/// Handles a satin request with the in-process generator.
pub fn handle_satin(request: &SatinRequest) -> std::result::Result<SatinResponse, GeometryError> {
    let centerline = request.centerline()?;
    let stitches = generate_satin(&centerline, request.width, request.density)?;
    Ok(SatinResponse { stitches })
}

/// Handles an appliqué request with the in-process generator.
pub fn handle_applique(
    request: &AppliqueRequest,
    options: &AppliqueOptions,
) -> std::result::Result<AppliqueResponse, GeometryError> {
    let polygon = request.polygon()?;
    let steps = generate_applique_with(&polygon, options)?;
    Ok(AppliqueResponse {
        steps: steps.into(),
    })
}

/// A stitch generator reachable asynchronously.
///
/// Implementations report transport problems as [`ServiceError`] and bad
/// input as [`GeometryError`], both wrapped in [`Error`].
#[async_trait]
pub trait StitchService: Send + Sync {
    async fn generate_satin(&self, request: SatinRequest) -> Result<SatinResponse>;

    async fn generate_applique(&self, request: AppliqueRequest) -> Result<AppliqueResponse>;

    /// Parameters the service stitches appliqué borders with.
    fn applique_options(&self) -> AppliqueOptions {
        AppliqueOptions::default()
    }
}

/// Runs the pure generators in-process.
#[derive(Debug, Clone, Default)]
pub struct LocalStitchService {
    applique: AppliqueOptions,
}

impl LocalStitchService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_applique_options(applique: AppliqueOptions) -> Self {
        Self { applique }
    }
}

#[async_trait]
impl StitchService for LocalStitchService {
    async fn generate_satin(&self, request: SatinRequest) -> Result<SatinResponse> {
        let response = handle_satin(&request)?;
        debug!(stitches = response.stitches.len(), "local satin request");
        Ok(response)
    }

    async fn generate_applique(&self, request: AppliqueRequest) -> Result<AppliqueResponse> {
        handle_applique(&request, &self.applique).map_err(Error::from)
    }

    fn applique_options(&self) -> AppliqueOptions {
        self.applique.clone()
    }
}
