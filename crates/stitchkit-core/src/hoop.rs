//! Hoop definitions and the built-in hoop catalog.

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, StoreError};
use crate::units::{format_length, get_unit_label, MeasurementSystem};

/// Outline of the hoop frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoopShape {
    Rect,
    Oval,
}

/// Machine brand a hoop ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoopBrand {
    Singer,
    Brother,
    Janome,
    Universal,
}

/// The maximum embroiderable area of one machine setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hoop {
    pub id: String,
    pub name: String,
    /// Width in millimetres
    pub width: f64,
    /// Height in millimetres
    pub height: f64,
    pub shape: HoopShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<HoopBrand>,
}

impl Hoop {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        width: f64,
        height: f64,
        shape: HoopShape,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            width,
            height,
            shape,
            brand: None,
        }
    }

    /// Both extents must be finite and positive.
    pub fn validate(&self) -> Result<(), GeometryError> {
        GeometryError::check_positive("hoop width", self.width)?;
        GeometryError::check_positive("hoop height", self.height)?;
        Ok(())
    }

    /// Human readable extents, e.g. `100.0 x 100.0 mm`.
    pub fn size_label(&self, system: MeasurementSystem) -> String {
        format!(
            "{} x {} {}",
            format_length(self.width, system),
            format_length(self.height, system),
            get_unit_label(system)
        )
    }
}

/// Id of the hoop selected in a fresh editor.
pub const DEFAULT_HOOP_ID: &str = "singer-s";

fn preset(
    id: &str,
    name: &str,
    width: f64,
    height: f64,
    shape: HoopShape,
    brand: HoopBrand,
) -> Hoop {
    Hoop {
        id: id.to_string(),
        name: name.to_string(),
        width,
        height,
        shape,
        brand: Some(brand),
    }
}

/// The read-only hoop catalog.
pub fn hoop_catalog() -> Vec<Hoop> {
    vec![
        preset("singer-s", "Singer Small (100x100)", 100.0, 100.0, HoopShape::Rect, HoopBrand::Singer),
        preset("singer-m", "Singer Medium (170x100)", 170.0, 100.0, HoopShape::Oval, HoopBrand::Singer),
        preset("singer-l", "Singer Large (260x160)", 260.0, 160.0, HoopShape::Rect, HoopBrand::Singer),
        preset("brother-4x4", "Brother 4x4 (100x100)", 100.0, 100.0, HoopShape::Rect, HoopBrand::Brother),
        preset("brother-5x7", "Brother 5x7 (180x130)", 180.0, 130.0, HoopShape::Rect, HoopBrand::Brother),
        preset("uni-120", "Universal 120x120", 120.0, 120.0, HoopShape::Rect, HoopBrand::Universal),
        preset("uni-200", "Universal 200x200", 200.0, 200.0, HoopShape::Rect, HoopBrand::Universal),
    ]
}

/// Looks a hoop up in the catalog.
pub fn find_hoop(id: &str) -> Result<Hoop, StoreError> {
    hoop_catalog()
        .into_iter()
        .find(|h| h.id == id)
        .ok_or_else(|| StoreError::HoopNotFound { id: id.to_string() })
}
