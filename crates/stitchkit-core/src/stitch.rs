//! Stitch parameters and stitch-point records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GeometryError;
use crate::geometry::Point;

/// Fill technique applied to a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StitchType {
    /// Edge-to-edge zig-zag column
    Satin,
    /// Parallel running rows
    Tatami,
    /// Single-pass line stitch
    Run,
    /// Triple run: every step is stitched forward, back and forward again
    Bean,
}

impl Default for StitchType {
    fn default() -> Self {
        Self::Run
    }
}

impl fmt::Display for StitchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Satin => write!(f, "satin"),
            Self::Tatami => write!(f, "tatami"),
            Self::Run => write!(f, "run"),
            Self::Bean => write!(f, "bean"),
        }
    }
}

impl FromStr for StitchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "satin" => Ok(Self::Satin),
            "tatami" | "fill" => Ok(Self::Tatami),
            "run" | "running" => Ok(Self::Run),
            "bean" | "triple" => Ok(Self::Bean),
            _ => Err(format!("Unknown stitch type: {}", s)),
        }
    }
}

/// Per-layer stitch parameters.
///
/// `density` is the spacing between adjacent rows or rungs in millimetres.
/// When `density_end` is set, tatami row spacing runs linearly from
/// `density` at the first row to `density_end` at the far edge.
/// `underlay` is carried through persistence but no underlay geometry is
/// generated from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StitchSettings {
    pub density: f64,
    #[serde(default)]
    pub pull_compensation: f64,
    #[serde(default)]
    pub underlay: bool,
    #[serde(default)]
    pub angle: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stitch_length: Option<f64>,
    #[serde(default)]
    pub stitch_type: StitchType,
    /// Column width used when the layer is stitched as satin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satin_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_end: Option<f64>,
}

impl Default for StitchSettings {
    fn default() -> Self {
        Self {
            density: 0.4,
            pull_compensation: 0.2,
            underlay: true,
            angle: 45.0,
            stitch_length: Some(3.5),
            stitch_type: StitchType::Run,
            satin_width: None,
            density_end: None,
        }
    }
}

impl StitchSettings {
    /// Checks the invariants: `density > 0`, `stitch_length > 0` when present.
    pub fn validate(&self) -> Result<(), GeometryError> {
        GeometryError::check_positive("density", self.density)?;
        if let Some(len) = self.stitch_length {
            GeometryError::check_positive("stitch_length", len)?;
        }
        if let Some(width) = self.satin_width {
            GeometryError::check_positive("satin_width", width)?;
        }
        if let Some(end) = self.density_end {
            GeometryError::check_positive("density_end", end)?;
        }
        if !self.pull_compensation.is_finite() {
            return Err(GeometryError::NonFinite {
                field: "pull_compensation",
            });
        }
        if !self.angle.is_finite() {
            return Err(GeometryError::NonFinite { field: "angle" });
        }
        Ok(())
    }

    /// Applies a partial update, keeping fields the patch leaves unset.
    pub fn merged(&self, patch: &SettingsPatch) -> StitchSettings {
        StitchSettings {
            density: patch.density.unwrap_or(self.density),
            pull_compensation: patch.pull_compensation.unwrap_or(self.pull_compensation),
            underlay: patch.underlay.unwrap_or(self.underlay),
            angle: patch.angle.unwrap_or(self.angle),
            stitch_length: patch.stitch_length.or(self.stitch_length),
            stitch_type: patch.stitch_type.unwrap_or(self.stitch_type),
            satin_width: patch.satin_width.or(self.satin_width),
            density_end: patch.density_end.or(self.density_end),
        }
    }
}

/// Partial settings update; unset fields leave the target untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub density: Option<f64>,
    pub pull_compensation: Option<f64>,
    pub underlay: Option<bool>,
    pub angle: Option<f64>,
    pub stitch_length: Option<f64>,
    pub stitch_type: Option<StitchType>,
    pub satin_width: Option<f64>,
    pub density_end: Option<f64>,
}

/// One needle penetration in stitch-out order.
///
/// `layer_id` is a back-reference to the layer that produced the point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StitchPoint {
    pub x: f64,
    pub y: f64,
    pub color: String,
    pub layer_id: String,
}

impl StitchPoint {
    pub fn new(point: Point, color: impl Into<String>, layer_id: impl Into<String>) -> Self {
        Self {
            x: point.x,
            y: point.y,
            color: color.into(),
            layer_id: layer_id.into(),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
