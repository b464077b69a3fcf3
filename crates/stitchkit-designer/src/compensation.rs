//! Pull compensation for fill regions.
//!
//! Thread tension pulls fabric inwards, so fill regions are stitched slightly
//! larger than drawn. The outline is offset with `cavalier_contours`; round
//! joins produced at convex corners are tessellated back into straight
//! segments.

use cavalier_contours::polyline::{PlineSource, PlineSourceMut, PlineVertex, Polyline};
use std::f64::consts::PI;
use stitchkit_core::{signed_area, GeometryError, Path, Point};
use tracing::{debug, warn};

/// Vertices closer than this are merged before offsetting.
const DUPLICATE_TOLERANCE: f64 = 0.01;
/// Maximum sweep per tessellated arc step.
const ARC_STEP: f64 = PI / 16.0;

/// Grows (positive) or shrinks (negative) a closed polygon by `compensation` mm.
///
/// The result is an open ring; a closing duplicate is appended when the
/// input was explicitly closed. When the offset collapses the polygon
/// (large negative compensation) the input is returned unchanged.
pub fn apply_pull_compensation(
    polygon: &[Point],
    compensation: f64,
) -> Result<Path, GeometryError> {
    GeometryError::check_len(3, polygon.len())?;
    if !compensation.is_finite() {
        return Err(GeometryError::NonFinite {
            field: "pull_compensation",
        });
    }
    if compensation == 0.0 {
        return Ok(polygon.to_vec());
    }

    let explicitly_closed = polygon.len() > 1
        && polygon[0].distance_to(&polygon[polygon.len() - 1]) < DUPLICATE_TOLERANCE;

    let Some(polyline) = prepare_polygon(polygon) else {
        return Err(GeometryError::TooFewPoints {
            required: 3,
            actual: polygon.len(),
        });
    };

    // The polyline is clockwise, so a positive offset moves outwards.
    let offsets = polyline.parallel_offset(compensation);
    let largest = offsets
        .iter()
        .map(tessellate)
        .filter(|ring| ring.len() >= 3)
        .max_by(|a, b| {
            signed_area(a)
                .abs()
                .partial_cmp(&signed_area(b).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(mut ring) = largest else {
        warn!(compensation, "pull compensation collapsed the polygon, keeping original outline");
        return Ok(polygon.to_vec());
    };

    if explicitly_closed {
        ring.push(ring[0]);
    }
    debug!(
        compensation,
        before = polygon.len(),
        after = ring.len(),
        "applied pull compensation"
    );
    Ok(ring)
}

/// Removes duplicate vertices and enforces clockwise orientation.
fn prepare_polygon(vertices: &[Point]) -> Option<Polyline> {
    let mut clean: Vec<Point> = Vec::with_capacity(vertices.len());
    for p in vertices {
        match clean.last() {
            Some(last) if last.distance_to(p) <= DUPLICATE_TOLERANCE => {}
            _ => clean.push(*p),
        }
    }
    if let (Some(first), Some(last)) = (clean.first(), clean.last()) {
        if clean.len() > 1 && first.distance_to(last) < DUPLICATE_TOLERANCE {
            clean.pop();
        }
    }
    if clean.len() < 3 {
        return None;
    }

    if signed_area(&clean) > 0.0 {
        clean.reverse();
    }

    let mut polyline = Polyline::new();
    for p in clean {
        polyline.add_vertex(PlineVertex::new(p.x, p.y, 0.0));
    }
    polyline.set_is_closed(true);
    Some(polyline)
}

/// Flattens a closed offset polyline, replacing bulged segments by chords.
fn tessellate(polyline: &Polyline) -> Path {
    let vertices = &polyline.vertex_data;
    let mut ring = Vec::with_capacity(vertices.len());
    for (i, v) in vertices.iter().enumerate() {
        let start = Point::new(v.x, v.y);
        ring.push(start);
        if v.bulge.abs() < 1e-12 {
            continue;
        }
        let next = &vertices[(i + 1) % vertices.len()];
        ring.extend(arc_points(start, Point::new(next.x, next.y), v.bulge));
    }
    ring
}

/// Interior points of the arc from `start` to `end` with the given bulge.
///
/// A positive bulge is a counter-clockwise arc; `bulge = tan(sweep / 4)`.
fn arc_points(start: Point, end: Point, bulge: f64) -> Vec<Point> {
    let chord = start.distance_to(&end);
    if chord <= f64::EPSILON {
        return Vec::new();
    }
    let sweep = 4.0 * bulge.atan();
    let mid = start.lerp(&end, 0.5);
    // Left normal of the chord
    let (nx, ny) = (-(end.y - start.y) / chord, (end.x - start.x) / chord);
    let center = mid.offset(nx, ny, chord * (1.0 - bulge * bulge) / (4.0 * bulge));
    let radius = center.distance_to(&start);
    let start_angle = (start.y - center.y).atan2(start.x - center.x);

    let steps = ((sweep.abs() / ARC_STEP).ceil() as usize).max(2);
    (1..steps)
        .map(|k| {
            let angle = start_angle + sweep * k as f64 / steps as f64;
            Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}
