//! Satin column generation.
//!
//! A satin column is approximated by a zig-zag that alternates between the
//! two long edges of the column, offset ±width/2 along the normal of each
//! centerline segment. Point order is stitch-out order.

use stitchkit_core::{GeometryError, Point, StitchPoint};
use tracing::debug;

/// Default column width in mm.
pub const DEFAULT_SATIN_WIDTH: f64 = 4.0;
/// Default rung spacing in mm.
pub const DEFAULT_SATIN_DENSITY: f64 = 0.4;

/// Parameters for [`generate_satin_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SatinOptions {
    pub width: f64,
    pub density: f64,
    /// Corner angle in degrees above which alternate rungs are shortened.
    /// `None` disables short stitches.
    pub short_stitch_angle: Option<f64>,
    /// Width factor applied to shortened rungs.
    pub short_stitch_factor: f64,
}

impl SatinOptions {
    pub fn new(width: f64, density: f64) -> Self {
        Self {
            width,
            density,
            short_stitch_angle: None,
            short_stitch_factor: 0.7,
        }
    }

    /// Enables short stitches at corners sharper than `angle_deg`.
    pub fn with_short_stitches(mut self, angle_deg: f64) -> Self {
        self.short_stitch_angle = Some(angle_deg);
        self
    }
}

impl Default for SatinOptions {
    fn default() -> Self {
        Self::new(DEFAULT_SATIN_WIDTH, DEFAULT_SATIN_DENSITY)
    }
}

/// Generates a satin zig-zag along `centerline`.
///
/// Each segment of length `L` contributes `ceil(L / density)` rungs (at
/// least one); zero-length segments contribute none. One closing rung is
/// placed at the end of the last non-degenerate segment.
pub fn generate_satin(
    centerline: &[Point],
    width: f64,
    density: f64,
) -> Result<Vec<Point>, GeometryError> {
    generate_satin_with(centerline, &SatinOptions::new(width, density))
}

/// Generates a satin zig-zag with explicit options.
pub fn generate_satin_with(
    centerline: &[Point],
    options: &SatinOptions,
) -> Result<Vec<Point>, GeometryError> {
    GeometryError::check_len(2, centerline.len())?;
    GeometryError::check_positive("width", options.width)?;
    GeometryError::check_positive("density", options.density)?;
    if centerline.iter().any(|p| !p.is_finite()) {
        return Err(GeometryError::NonFinite {
            field: "centerline",
        });
    }

    let half_width = options.width / 2.0;
    let short_cos = options
        .short_stitch_angle
        .map(|deg| deg.to_radians().cos());

    let mut stitches = Vec::new();
    let mut side = 1.0;
    let mut prev_normal: Option<(f64, f64)> = None;
    let mut closing_rung: Option<(Point, f64, f64)> = None;

    for segment in centerline.windows(2) {
        let (start, end) = (segment[0], segment[1]);
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let length = (dx * dx + dy * dy).sqrt();
        if length <= f64::EPSILON {
            continue;
        }

        let (ux, uy) = (dx / length, dy / length);
        let (nx, ny) = (-uy, ux);

        // Short stitches only apply to the first rung after a sharp corner.
        let mut sharp_corner = match (short_cos, prev_normal) {
            (Some(limit), Some((px, py))) => (px * nx + py * ny).clamp(-1.0, 1.0) < limit,
            _ => false,
        };

        let count = ((length / options.density).ceil() as usize).max(1);
        for k in 0..count {
            let along = k as f64 * options.density;
            let center = start.offset(ux, uy, along);
            let shortened = sharp_corner && stitches.len() % 2 == 1;
            let half = if shortened {
                half_width * options.short_stitch_factor
            } else {
                half_width
            };
            stitches.push(center.offset(nx, ny, side * half));
            side = -side;
            sharp_corner = false;
        }

        prev_normal = Some((nx, ny));
        closing_rung = Some((end, nx, ny));
    }

    if let Some((end, nx, ny)) = closing_rung {
        stitches.push(end.offset(nx, ny, side * half_width));
    }

    debug!(
        segments = centerline.len() - 1,
        stitches = stitches.len(),
        "generated satin column"
    );
    Ok(stitches)
}

/// Satin column tagged with a layer's color and id, ready for playback.
pub fn satin_layer(
    centerline: &[Point],
    width: f64,
    density: f64,
    color: &str,
    layer_id: &str,
) -> Result<Vec<StitchPoint>, GeometryError> {
    Ok(generate_satin(centerline, width, density)?
        .into_iter()
        .map(|p| StitchPoint::new(p, color, layer_id))
        .collect())
}
