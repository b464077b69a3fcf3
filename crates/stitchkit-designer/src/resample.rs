//! Maximum stitch length resampling.
//!
//! Long segments are split into equal pieces so no single stitch exceeds the
//! layer's `stitch_length`. Original vertices are always kept.

use stitchkit_core::{GeometryError, Layer, Path, Point};

/// Splits every segment longer than `max_len` into `ceil(len / max_len)`
/// equal parts.
pub fn resample_path(path: &[Point], max_len: f64) -> Result<Path, GeometryError> {
    GeometryError::check_positive("stitch_length", max_len)?;
    let Some(first) = path.first() else {
        return Ok(Vec::new());
    };

    let mut out = vec![*first];
    for segment in path.windows(2) {
        let (start, end) = (segment[0], segment[1]);
        let length = start.distance_to(&end);
        if length > max_len {
            let pieces = (length / max_len).ceil() as usize;
            out.extend((1..pieces).map(|k| start.lerp(&end, k as f64 / pieces as f64)));
        }
        out.push(end);
    }
    Ok(out)
}

/// Resamples a layer using its own `stitch_length`; layers without one are
/// returned unchanged.
pub fn resample_layer(layer: &Layer) -> Result<Layer, GeometryError> {
    let Some(max_len) = layer.settings.as_ref().and_then(|s| s.stitch_length) else {
        return Ok(layer.clone());
    };
    let paths = layer
        .paths
        .iter()
        .map(|p| resample_path(p, max_len))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Layer {
        paths,
        ..layer.clone()
    })
}

pub fn resample_layers<'a, I>(layers: I) -> Result<Vec<Layer>, GeometryError>
where
    I: IntoIterator<Item = &'a Layer>,
{
    layers.into_iter().map(resample_layer).collect()
}
