//! Tie-in and tie-out lock stitches.
//!
//! A lock is a tiny triangle stitched at the start or end of a run so the
//! thread does not unravel after trimming.

use serde::{Deserialize, Serialize};
use stitchkit_core::{GeometryError, Path, Point};

/// Default lock stitch leg length in mm.
pub const DEFAULT_LOCK_LENGTH: f64 = 0.5;

/// Which ends of a run receive a lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockMode {
    In,
    Out,
    Both,
}

impl LockMode {
    fn tie_in(self) -> bool {
        matches!(self, LockMode::In | LockMode::Both)
    }

    fn tie_out(self) -> bool {
        matches!(self, LockMode::Out | LockMode::Both)
    }
}

/// Unit direction and left normal from `a` towards `b`.
fn frame(a: Point, b: Point) -> Option<((f64, f64), (f64, f64))> {
    let length = a.distance_to(&b);
    if length <= f64::EPSILON {
        return None;
    }
    let (ux, uy) = ((b.x - a.x) / length, (b.y - a.y) / length);
    Some(((ux, uy), (-uy, ux)))
}

/// Adds lock triangles to a run.
///
/// Tie-in prepends `[start + dir·L, start + perp·L, start]`; tie-out appends
/// `[end - dir·L, end + perp·L, end]`. Runs shorter than two points and ends
/// whose adjoining segment has zero length are left alone.
pub fn add_lock_stitches(points: &[Point], mode: LockMode, length: f64) -> Result<Path, GeometryError> {
    GeometryError::check_positive("lock length", length)?;
    if points.len() < 2 {
        return Ok(points.to_vec());
    }

    let mut out = Vec::with_capacity(points.len() + 6);

    let start = points[0];
    if mode.tie_in() {
        if let Some(((ux, uy), (nx, ny))) = frame(start, points[1]) {
            out.push(start.offset(ux, uy, length));
            out.push(start.offset(nx, ny, length));
            out.push(start);
        }
    }

    out.extend_from_slice(points);

    let end = points[points.len() - 1];
    if mode.tie_out() {
        if let Some(((ux, uy), (nx, ny))) = frame(points[points.len() - 2], end) {
            out.push(end.offset(ux, uy, -length));
            out.push(end.offset(nx, ny, length));
            out.push(end);
        }
    }

    Ok(out)
}
