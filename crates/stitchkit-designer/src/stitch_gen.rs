//! Per-layer stitch generation.
//!
//! Dispatches on the layer's stitch type and produces a new layer whose
//! paths are the needle penetrations. The source layer is left untouched
//! and the result keeps its id.

use stitchkit_core::{GeometryError, Layer, Path, StitchSettings, StitchType};
use tracing::debug;

use crate::bean::{generate_bean_stitch, DEFAULT_BEAN_STITCH_LENGTH};
use crate::compensation::apply_pull_compensation;
use crate::lock_stitch::{add_lock_stitches, LockMode, DEFAULT_LOCK_LENGTH};
use crate::resample::resample_path;
use crate::satin::{generate_satin, DEFAULT_SATIN_WIDTH};
use crate::tatami::{generate_tatami_with, TatamiOptions};

/// Stitch length used for tatami rows when the layer sets none.
pub const DEFAULT_FILL_STITCH_LENGTH: f64 = 3.5;

/// Generation switches that are not part of the per-layer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    /// Lock mode applied to every generated path, `None` for no locks.
    pub lock_mode: Option<LockMode>,
    pub lock_length: f64,
    /// Satin width for layers that do not set one.
    pub default_satin_width: f64,
    /// Brick offset for tatami rows, as a fraction of the stitch length.
    pub tatami_row_offset: f64,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            lock_mode: None,
            lock_length: DEFAULT_LOCK_LENGTH,
            default_satin_width: DEFAULT_SATIN_WIDTH,
            tatami_row_offset: 0.0,
        }
    }
}

/// Generates the stitch paths of `layer` according to its settings.
///
/// Layers without settings use [`StitchSettings::default`]. Paths too short
/// for the stitch type are dropped.
pub fn generate_layer_stitches(
    layer: &Layer,
    options: &GenerationOptions,
) -> Result<Layer, GeometryError> {
    let settings = layer.settings.clone().unwrap_or_default();
    settings.validate()?;

    let mut paths = Vec::with_capacity(layer.paths.len());
    for path in &layer.paths {
        let Some(generated) = generate_path(path, &settings, options)? else {
            continue;
        };
        let generated = match options.lock_mode {
            Some(mode) => add_lock_stitches(&generated, mode, options.lock_length)?,
            None => generated,
        };
        paths.push(generated);
    }

    debug!(
        layer = %layer.id,
        stitch_type = %settings.stitch_type,
        paths = paths.len(),
        "generated layer stitches"
    );

    Ok(Layer {
        paths,
        stitch_count: None,
        thread_length: None,
        ..layer.clone()
    })
}

fn generate_path(
    path: &Path,
    settings: &StitchSettings,
    options: &GenerationOptions,
) -> Result<Option<Path>, GeometryError> {
    match settings.stitch_type {
        StitchType::Run => {
            if path.len() < 2 {
                return Ok(None);
            }
            match settings.stitch_length {
                Some(max_len) => resample_path(path, max_len).map(Some),
                None => Ok(Some(path.clone())),
            }
        }
        StitchType::Bean => {
            if path.len() < 2 {
                return Ok(None);
            }
            let step = settings.stitch_length.unwrap_or(DEFAULT_BEAN_STITCH_LENGTH);
            let bean = generate_bean_stitch(path, step)?;
            Ok((!bean.is_empty()).then_some(bean))
        }
        StitchType::Satin => {
            if path.len() < 2 {
                return Ok(None);
            }
            // Compensation widens the column on both sides
            let width = settings.satin_width.unwrap_or(options.default_satin_width)
                + 2.0 * settings.pull_compensation.max(0.0);
            generate_satin(path, width, settings.density).map(Some)
        }
        StitchType::Tatami => {
            if path.len() < 3 {
                return Ok(None);
            }
            let outline = apply_pull_compensation(path, settings.pull_compensation)?;
            let tatami = TatamiOptions {
                row_spacing: settings.density,
                angle_deg: settings.angle,
                stitch_length: settings.stitch_length.unwrap_or(DEFAULT_FILL_STITCH_LENGTH),
                row_offset: options.tatami_row_offset,
                row_spacing_end: settings.density_end,
            };
            let fill = generate_tatami_with(&outline, &tatami)?;
            Ok((!fill.is_empty()).then_some(fill))
        }
    }
}
