//! Fabric presets: tuned stitch settings per base fabric.

use serde::{Deserialize, Serialize};

use crate::stitch::SettingsPatch;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FabricPreset {
    pub id: String,
    pub label: String,
    pub description: String,
    /// Row spacing in mm
    pub density: f64,
    pub pull_compensation: f64,
    pub stitch_length: f64,
    pub underlay: bool,
}

impl FabricPreset {
    /// The preset expressed as a settings patch.
    pub fn as_patch(&self) -> SettingsPatch {
        SettingsPatch {
            density: Some(self.density),
            pull_compensation: Some(self.pull_compensation),
            underlay: Some(self.underlay),
            stitch_length: Some(self.stitch_length),
            ..Default::default()
        }
    }
}

fn preset(
    id: &str,
    label: &str,
    description: &str,
    density: f64,
    pull_compensation: f64,
    stitch_length: f64,
) -> FabricPreset {
    FabricPreset {
        id: id.to_string(),
        label: label.to_string(),
        description: description.to_string(),
        density,
        pull_compensation,
        stitch_length,
        underlay: true,
    }
}

/// Built-in presets. Stretchier or higher-pile fabrics get more pull
/// compensation and shorter stitches.
pub fn fabric_presets() -> Vec<FabricPreset> {
    vec![
        preset(
            "cotton",
            "Cotton (Standard)",
            "Standard woven cotton. Balanced settings.",
            0.40,
            0.2,
            3.5,
        ),
        preset(
            "denim",
            "Denim / Canvas",
            "Thick, stable fabrics. Higher density allowed.",
            0.35,
            0.1,
            3.5,
        ),
        preset(
            "silk",
            "Silk / Satin",
            "Delicate, slippery fabrics. Low density to avoid puckering.",
            0.50,
            0.4,
            3.0,
        ),
        preset(
            "jersey",
            "Jersey / Knit",
            "Stretchy fabrics. Needs high compensation and underlay.",
            0.45,
            0.5,
            3.0,
        ),
        preset(
            "towel",
            "Terry Cloth / Towel",
            "High pile. Needs topping and heavy underlay.",
            0.40,
            0.3,
            4.0,
        ),
    ]
}

pub fn find_fabric_preset(id: &str) -> Option<FabricPreset> {
    fabric_presets().into_iter().find(|p| p.id == id)
}
