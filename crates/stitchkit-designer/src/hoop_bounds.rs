//! Hoop bounds validation.
//!
//! The hoop is drawn centred on the display; a shape is considered inside
//! when its centre lies within the scaled hoop rectangle (edges inclusive).
//! The result is advisory: violating shapes are dimmed, never moved.

use stitchkit_core::{Bounds, GeometryError, Hoop, Point};
use tracing::warn;

/// Opacity applied to a shape outside the hoop.
pub const OUT_OF_BOUNDS_OPACITY: f64 = 0.5;
/// Opacity applied to a shape inside the hoop.
pub const IN_BOUNDS_OPACITY: f64 = 1.0;

/// Outcome of one containment check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsCheck {
    pub within_bounds: bool,
    pub opacity: f64,
}

impl BoundsCheck {
    fn from_inside(within_bounds: bool) -> Self {
        Self {
            within_bounds,
            opacity: if within_bounds {
                IN_BOUNDS_OPACITY
            } else {
                OUT_OF_BOUNDS_OPACITY
            },
        }
    }

    /// Message shown to the user when the check failed.
    pub fn warning(&self, hoop: &Hoop) -> Option<String> {
        (!self.within_bounds).then(|| format!("Design is outside {} area", hoop.name))
    }
}

/// Half extents of the hoop rectangle in display units.
fn half_extents(hoop: &Hoop, hoop_scale: f64) -> Result<(f64, f64), GeometryError> {
    hoop.validate()?;
    GeometryError::check_positive("hoop_scale", hoop_scale)?;
    Ok((hoop.width * hoop_scale / 2.0, hoop.height * hoop_scale / 2.0))
}

/// Checks a shape centre given relative to the display centre.
pub fn validate(
    hoop: &Hoop,
    shape_center_x: f64,
    shape_center_y: f64,
    hoop_scale: f64,
) -> Result<BoundsCheck, GeometryError> {
    let (half_w, half_h) = half_extents(hoop, hoop_scale)?;
    let inside = shape_center_x.abs() <= half_w && shape_center_y.abs() <= half_h;
    Ok(BoundsCheck::from_inside(inside))
}

/// Checks a shape centre given in display coordinates.
pub fn validate_on_canvas(
    hoop: &Hoop,
    display_center: Point,
    shape_center: Point,
    hoop_scale: f64,
) -> Result<BoundsCheck, GeometryError> {
    validate(
        hoop,
        shape_center.x - display_center.x,
        shape_center.y - display_center.y,
        hoop_scale,
    )
}

/// Stricter check: the whole bounding box must fit inside the hoop.
///
/// `bounds` is in display coordinates.
pub fn validate_bounds(
    hoop: &Hoop,
    display_center: Point,
    bounds: &Bounds,
    hoop_scale: f64,
) -> Result<BoundsCheck, GeometryError> {
    let (half_w, half_h) = half_extents(hoop, hoop_scale)?;
    let inside = bounds.min_x >= display_center.x - half_w
        && bounds.max_x <= display_center.x + half_w
        && bounds.min_y >= display_center.y - half_h
        && bounds.max_y <= display_center.y + half_h;
    Ok(BoundsCheck::from_inside(inside))
}

/// Validator bound to the currently selected hoop and display placement.
///
/// With no hoop selected every check is skipped and returns `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct HoopValidator {
    hoop: Option<Hoop>,
    display_center: Point,
    hoop_scale: f64,
}

impl HoopValidator {
    pub fn new(hoop: Option<Hoop>, display_center: Point, hoop_scale: f64) -> Self {
        Self {
            hoop,
            display_center,
            hoop_scale,
        }
    }

    pub fn hoop(&self) -> Option<&Hoop> {
        self.hoop.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.hoop.is_some()
    }

    /// Re-evaluates a moved shape, logging a warning on violation.
    pub fn check(&self, shape_center: Point) -> Result<Option<BoundsCheck>, GeometryError> {
        let Some(hoop) = &self.hoop else {
            return Ok(None);
        };
        let result = validate_on_canvas(hoop, self.display_center, shape_center, self.hoop_scale)?;
        if !result.within_bounds {
            warn!(
                hoop = %hoop.id,
                x = shape_center.x,
                y = shape_center.y,
                "Design is outside {} area",
                hoop.name
            );
        }
        Ok(Some(result))
    }
}
