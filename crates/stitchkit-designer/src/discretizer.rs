//! Flattening of layers into the stitch-out sequence.

use serde::Serialize;
use stitchkit_core::{path_length, Layer, Path, StitchPoint};
use tracing::debug;

/// Paths shorter than this carry no stitch and are skipped.
const MIN_PATH_POINTS: usize = 2;

/// Paths of `layer` that produce stitches.
fn stitched_paths(layer: &Layer) -> impl Iterator<Item = &Path> {
    layer.paths.iter().filter(|p| p.len() >= MIN_PATH_POINTS)
}

fn stitched_count(layer: &Layer) -> usize {
    stitched_paths(layer).map(Vec::len).sum()
}

/// Flattens visible layers into needle penetrations in stitch-out order.
///
/// Every point of every path with at least two points is emitted as-is,
/// tagged with the owning layer's color and id. Hidden layers and
/// single-point paths contribute nothing.
pub fn discretize<'a, I>(layers: I) -> Vec<StitchPoint>
where
    I: IntoIterator<Item = &'a Layer>,
{
    let mut stitches = Vec::new();
    let mut layer_count = 0usize;
    for layer in layers.into_iter().filter(|l| l.visible) {
        layer_count += 1;
        stitches.reserve(stitched_count(layer));
        for path in stitched_paths(layer) {
            stitches.extend(
                path.iter()
                    .map(|p| StitchPoint::new(*p, layer.color.as_str(), layer.id.as_str())),
            );
        }
    }
    debug!(
        layers = layer_count,
        stitches = stitches.len(),
        "discretized layers"
    );
    stitches
}

/// Length of [`discretize`]'s output without building it.
pub fn discretized_len<'a, I>(layers: I) -> usize
where
    I: IntoIterator<Item = &'a Layer>,
{
    layers
        .into_iter()
        .filter(|l| l.visible)
        .map(stitched_count)
        .sum()
}

/// Derived statistics of one layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerStats {
    pub layer_id: String,
    pub stitch_count: usize,
    /// Thread consumption in metres.
    pub thread_length: f64,
}

impl LayerStats {
    pub fn for_layer(layer: &Layer) -> Self {
        let length_mm: f64 = stitched_paths(layer).map(|p| path_length(p)).sum();
        Self {
            layer_id: layer.id.clone(),
            stitch_count: stitched_count(layer),
            thread_length: length_mm / 1000.0,
        }
    }
}

/// Per-layer statistics, hidden layers included.
pub fn layer_stats<'a, I>(layers: I) -> Vec<LayerStats>
where
    I: IntoIterator<Item = &'a Layer>,
{
    layers.into_iter().map(LayerStats::for_layer).collect()
}
