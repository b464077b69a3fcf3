//! Stitch order optimization.
//!
//! Layers sharing a color are grouped so the machine needs one thread change
//! per color. Within a group layers are ordered nearest-neighbour and short
//! jumps are replaced by connector runs so the thread need not be trimmed.

use stitchkit_core::{Layer, Path, Point};
use tracing::debug;

/// Jumps shorter than this are bridged by a connector run.
pub const DEFAULT_CONNECT_THRESHOLD: f64 = 50.0;
/// Spacing of connector stitches in mm.
pub const CONNECTOR_STEP: f64 = 3.0;

/// Reorders layers by color and bridges short jumps.
///
/// Colors keep the order of their first appearance. Layers without points
/// are kept at the end of their color group.
pub fn optimize_branching(layers: &[Layer], connect_threshold: f64) -> Vec<Layer> {
    let mut groups: Vec<(&str, Vec<&Layer>)> = Vec::new();
    for layer in layers {
        match groups.iter_mut().find(|(color, _)| *color == layer.color) {
            Some((_, members)) => members.push(layer),
            None => groups.push((layer.color.as_str(), vec![layer])),
        }
    }

    let mut result = Vec::with_capacity(layers.len());
    let mut connectors = 0usize;

    for (_, members) in groups {
        let (mut pending, empty): (Vec<&Layer>, Vec<&Layer>) =
            members.into_iter().partition(|l| l.start_point().is_some());

        let mut ordered: Vec<Layer> = Vec::with_capacity(pending.len() + empty.len());
        if !pending.is_empty() {
            ordered.push(pending.remove(0).clone());
        }

        while !pending.is_empty() {
            let Some(current_end) = ordered.last().and_then(Layer::end_point) else {
                break;
            };
            let (idx, dist) = nearest(&pending, current_end);
            let mut next = pending.remove(idx).clone();

            if dist < connect_threshold && dist > 0.0 {
                if let Some(target) = next.start_point() {
                    next.paths.insert(0, connector(current_end, target));
                    connectors += 1;
                }
            }
            ordered.push(next);
        }

        ordered.extend(empty.into_iter().cloned());
        result.extend(ordered);
    }

    debug!(
        layers = result.len(),
        connectors, "optimized stitch order"
    );
    result
}

/// Index and distance of the candidate whose start is closest to `from`.
fn nearest(candidates: &[&Layer], from: Point) -> (usize, f64) {
    candidates
        .iter()
        .enumerate()
        .filter_map(|(i, l)| l.start_point().map(|p| (i, from.distance_to(&p))))
        .fold((0, f64::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best })
}

/// Straight run from `from` to `to` in roughly [`CONNECTOR_STEP`] increments.
fn connector(from: Point, to: Point) -> Path {
    let steps = (from.distance_to(&to) / CONNECTOR_STEP) as usize + 1;
    let mut path = Vec::with_capacity(steps + 1);
    path.push(from);
    path.extend((1..=steps).map(|s| from.lerp(&to, s as f64 / (steps + 1) as f64)));
    path.push(to);
    path
}
