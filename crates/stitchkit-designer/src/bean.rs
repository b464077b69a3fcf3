//! Bean (triple run) stitch.
//!
//! The path is first split into steps no longer than `stitch_length`, then
//! every step is sewn forward, back and forward again so the line carries
//! three layers of thread.

use stitchkit_core::{path_length, GeometryError, Point};
use tracing::debug;

use crate::resample::resample_path;

/// Step length used when the layer sets none.
pub const DEFAULT_BEAN_STITCH_LENGTH: f64 = 2.5;

/// Generates the bean stitch penetrations for an open `path`.
///
/// A zero-length path yields no stitches.
pub fn generate_bean_stitch(
    path: &[Point],
    stitch_length: f64,
) -> Result<Vec<Point>, GeometryError> {
    GeometryError::check_len(2, path.len())?;
    GeometryError::check_positive("stitch_length", stitch_length)?;
    if path.iter().any(|p| !p.is_finite()) {
        return Err(GeometryError::NonFinite { field: "path" });
    }
    if path_length(path) == 0.0 {
        return Ok(Vec::new());
    }

    let steps = resample_path(path, stitch_length)?;
    let mut stitches = Vec::with_capacity(steps.len() * 3);
    stitches.push(steps[0]);
    for step in steps.windows(2) {
        stitches.extend([step[1], step[0], step[1]]);
    }

    debug!(
        steps = steps.len() - 1,
        stitches = stitches.len(),
        "generated bean stitch"
    );
    Ok(stitches)
}
