//! Tatami fill of closed contours.
//!
//! The contour is rotated so the fill angle becomes horizontal, scanned with
//! rows `row_spacing` apart, and each inside span is stitched in
//! `stitch_length` steps. Rows alternate direction so the needle never jumps
//! back across the region. An optional gradient varies the row spacing
//! linearly from the first row to the far edge of the region.

use stitchkit_core::{Bounds, GeometryError, Point};
use tracing::debug;

/// Parameters for [`generate_tatami_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TatamiOptions {
    pub row_spacing: f64,
    pub angle_deg: f64,
    pub stitch_length: f64,
    /// Fraction of `stitch_length` each row is shifted by, producing the
    /// brick pattern. `0.0` aligns all penetrations.
    pub row_offset: f64,
    /// Row spacing at the far edge; `None` keeps `row_spacing` throughout.
    pub row_spacing_end: Option<f64>,
}

impl TatamiOptions {
    pub fn new(row_spacing: f64, angle_deg: f64, stitch_length: f64) -> Self {
        Self {
            row_spacing,
            angle_deg,
            stitch_length,
            row_offset: 0.0,
            row_spacing_end: None,
        }
    }

    /// Spaces rows from `row_spacing` at the start to `end` at the far edge.
    pub fn with_gradient(mut self, end: f64) -> Self {
        self.row_spacing_end = Some(end);
        self
    }

    /// Row spacing at `progress` (0 at the first row, 1 at the far edge).
    fn spacing_at(&self, progress: f64) -> f64 {
        match self.row_spacing_end {
            Some(end) => self.row_spacing + (end - self.row_spacing) * progress.clamp(0.0, 1.0),
            None => self.row_spacing,
        }
    }
}

/// Fills `polygon` with rows at `angle_deg`.
pub fn generate_tatami(
    polygon: &[Point],
    row_spacing: f64,
    angle_deg: f64,
    stitch_length: f64,
) -> Result<Vec<Point>, GeometryError> {
    generate_tatami_with(
        polygon,
        &TatamiOptions::new(row_spacing, angle_deg, stitch_length),
    )
}

pub fn generate_tatami_with(
    polygon: &[Point],
    options: &TatamiOptions,
) -> Result<Vec<Point>, GeometryError> {
    GeometryError::check_len(3, polygon.len())?;
    GeometryError::check_positive("row_spacing", options.row_spacing)?;
    GeometryError::check_positive("stitch_length", options.stitch_length)?;
    if let Some(end) = options.row_spacing_end {
        GeometryError::check_positive("row_spacing_end", end)?;
    }
    if !options.angle_deg.is_finite() {
        return Err(GeometryError::NonFinite { field: "angle" });
    }
    if polygon.iter().any(|p| !p.is_finite()) {
        return Err(GeometryError::NonFinite { field: "polygon" });
    }

    let angle = options.angle_deg.to_radians();
    let rotated: Vec<Point> = polygon.iter().map(|p| p.rotated(-angle)).collect();
    let Some(bounds) = Bounds::from_points(&rotated) else {
        return Ok(Vec::new());
    };

    let step = options.stitch_length;
    let mut stitches = Vec::new();
    let mut row = 0usize;
    let mut y = bounds.min_y;

    while y < bounds.max_y {
        let mut crossings = scanline_crossings(&rotated, y);
        crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mut spans: Vec<(f64, f64)> = crossings
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .filter(|(a, b)| b > a)
            .collect();

        let reverse = row % 2 == 1;
        if reverse {
            spans.reverse();
        }

        let shift = (row as f64 * options.row_offset * step).rem_euclid(step);
        for (x0, x1) in spans {
            let mut xs = vec![x0];
            let mut x = x0 + shift;
            if x <= x0 {
                x += step;
            }
            while x < x1 {
                xs.push(x);
                x += step;
            }
            xs.push(x1);
            if reverse {
                xs.reverse();
            }
            stitches.extend(xs.into_iter().map(|x| Point::new(x, y).rotated(angle)));
        }

        row += 1;
        y = match options.row_spacing_end {
            None => bounds.min_y + row as f64 * options.row_spacing,
            Some(_) => {
                let height = bounds.max_y - bounds.min_y;
                y + options.spacing_at((y - bounds.min_y) / height)
            }
        };
    }

    debug!(
        rows = row,
        stitches = stitches.len(),
        angle = options.angle_deg,
        "generated tatami fill"
    );
    Ok(stitches)
}

/// X coordinates where the closed contour crosses the horizontal line `y`.
///
/// Edges are treated as half-open in y so shared vertices count once.
fn scanline_crossings(contour: &[Point], y: f64) -> Vec<f64> {
    let n = contour.len();
    let mut xs = Vec::new();
    for i in 0..n {
        let a = contour[i];
        let b = contour[(i + 1) % n];
        let (lo, hi) = if a.y <= b.y { (a, b) } else { (b, a) };
        if lo.y <= y && y < hi.y {
            let t = (y - lo.y) / (hi.y - lo.y);
            xs.push(lo.x + t * (hi.x - lo.x));
        }
    }
    xs
}
