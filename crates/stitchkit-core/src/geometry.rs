//! Design-space geometry.
//!
//! All coordinates are millimetres in design space. Paths are plain point
//! sequences; whether a path is open or closed is decided by the consumer.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// A point in millimetre design space.
///
/// Serialized as an `[x, y]` pair to match the wire format of the
/// vectorizer and the stitch service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`.
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Offsets the point by `(dx, dy) * scale`.
    pub fn offset(&self, dx: f64, dy: f64, scale: f64) -> Point {
        Point::new(self.x + dx * scale, self.y + dy * scale)
    }

    /// Rotates the point around the origin.
    pub fn rotated(&self, angle_rad: f64) -> Point {
        let (sin, cos) = angle_rad.sin_cos();
        Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// An ordered polyline or closed contour.
pub type Path = Vec<Point>;

/// Builds a path from `[x, y]` pairs.
pub fn path_from_pairs(pairs: &[[f64; 2]]) -> Path {
    pairs.iter().copied().map(Point::from).collect()
}

/// Converts a path into `[x, y]` pairs for the wire.
pub fn path_to_pairs(path: &[Point]) -> Vec<[f64; 2]> {
    path.iter().copied().map(Into::into).collect()
}

/// Parses an untyped `[[x, y], ...]` contour as received at a boundary.
///
/// Each inner array must hold exactly two finite numbers.
pub fn parse_path(raw: &[Vec<f64>]) -> Result<Path, GeometryError> {
    raw.iter()
        .enumerate()
        .map(|(index, coords)| match coords.as_slice() {
            [x, y] if x.is_finite() && y.is_finite() => Ok(Point::new(*x, *y)),
            [_, _] => Err(GeometryError::NonFinite { field: "point" }),
            _ => Err(GeometryError::MalformedPoint {
                index,
                len: coords.len(),
            }),
        })
        .collect()
}

/// Total polyline length in millimetres.
pub fn path_length(path: &[Point]) -> f64 {
    path.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}

/// Returns the contour closed back onto its first point.
///
/// Already-closed contours are returned unchanged.
pub fn close_path(path: &[Point]) -> Path {
    let mut closed = path.to_vec();
    if let (Some(first), Some(last)) = (path.first(), path.last()) {
        if path.len() > 1 && first != last {
            closed.push(*first);
        }
    }
    closed
}

/// Signed shoelace area; positive for counter-clockwise contours.
pub fn signed_area(path: &[Point]) -> f64 {
    if path.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..path.len() {
        let p1 = path[i];
        let p2 = path[(i + 1) % path.len()];
        area += p1.x * p2.y - p2.x * p1.y;
    }
    area / 2.0
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounding box of a point set, `None` when empty.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in iter {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}
