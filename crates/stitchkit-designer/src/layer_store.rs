//! Layer store.
//!
//! Holds the ordered layers (stitch-out order), the active tool, the
//! selected layer and the selected hoop. The store is a value: every
//! operation returns a new snapshot and never mutates an existing
//! [`Layer`]. Untouched layers are shared between snapshots.
//!
//! `revision` counts changes to the layer list along one edit history.
//! `generation` identifies one layer list uniquely within the process, so
//! two snapshots with equal generations hold the same stitch geometry. The
//! simulator keys re-discretization on it. Derived statistics
//! (`stitch_count`, `thread_length`) are updated without a new generation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use stitchkit_core::{
    find_fabric_preset, find_hoop, Error, GeometryError, Hoop, Layer, Path, Result,
    SettingsPatch, StoreError, DEFAULT_HOOP_ID,
};
use tracing::{info, warn};

use crate::applique::AppliqueStep;
use crate::branching::optimize_branching;
use crate::discretizer::LayerStats;
use crate::service::{AppliqueRequest, StitchService, VectorizedImage};
use crate::stitch_gen::{generate_layer_stitches, GenerationOptions};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Editor tool driving canvas interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveTool {
    #[default]
    Select,
    NodeEdit,
    Pen,
    Rectangle,
    Circle,
    Knife,
}

impl fmt::Display for ActiveTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActiveTool::Select => "select",
            ActiveTool::NodeEdit => "node_edit",
            ActiveTool::Pen => "pen",
            ActiveTool::Rectangle => "rectangle",
            ActiveTool::Circle => "circle",
            ActiveTool::Knife => "knife",
        };
        f.write_str(name)
    }
}

impl FromStr for ActiveTool {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "select" => Ok(ActiveTool::Select),
            "node_edit" => Ok(ActiveTool::NodeEdit),
            "pen" => Ok(ActiveTool::Pen),
            "rectangle" => Ok(ActiveTool::Rectangle),
            "circle" => Ok(ActiveTool::Circle),
            "knife" => Ok(ActiveTool::Knife),
            other => Err(format!("Unknown tool: {}", other)),
        }
    }
}

/// Snapshot of the editor's layer state.
#[derive(Debug, Clone)]
pub struct LayerStore {
    layers: Vec<Arc<Layer>>,
    active_tool: ActiveTool,
    selected_layer_id: Option<String>,
    selected_hoop_id: Option<String>,
    revision: u64,
    generation: u64,
}

impl Default for LayerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for LayerStore {
    fn eq(&self, other: &Self) -> bool {
        self.active_tool == other.active_tool
            && self.selected_layer_id == other.selected_layer_id
            && self.selected_hoop_id == other.selected_hoop_id
            && self.layers.len() == other.layers.len()
            && self.layers.iter().zip(&other.layers).all(|(a, b)| a == b)
    }
}

impl LayerStore {
    /// Empty store with the default hoop selected.
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            active_tool: ActiveTool::default(),
            selected_layer_id: None,
            selected_hoop_id: Some(DEFAULT_HOOP_ID.to_string()),
            revision: 0,
            generation: next_generation(),
        }
    }

    pub fn from_layers(layers: Vec<Layer>) -> Self {
        Self::new().set_layers(layers)
    }

    // ---- queries ----

    pub fn layers(&self) -> impl Iterator<Item = &Layer> + Clone {
        self.layers.iter().map(|l| l.as_ref())
    }

    /// Owned copy of the layers, in order.
    pub fn to_layers(&self) -> Vec<Layer> {
        self.layers().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers().find(|l| l.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    pub fn active_tool(&self) -> ActiveTool {
        self.active_tool
    }

    pub fn selected_layer_id(&self) -> Option<&str> {
        self.selected_layer_id.as_deref()
    }

    pub fn selected_layer(&self) -> Option<&Layer> {
        self.selected_layer_id.as_deref().and_then(|id| self.layer(id))
    }

    pub fn selected_hoop_id(&self) -> Option<&str> {
        self.selected_hoop_id.as_deref()
    }

    /// The selected hoop, `None` when no hoop is selected.
    pub fn selected_hoop(&self) -> Option<Hoop> {
        self.selected_hoop_id
            .as_deref()
            .and_then(|id| find_hoop(id).ok())
    }

    /// Counter bumped on every change to the layer list.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Process-unique id of this layer list.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ---- helpers ----

    fn index_of(&self, id: &str) -> std::result::Result<usize, StoreError> {
        self.position(id).ok_or_else(|| StoreError::LayerNotFound { id: id.to_string() })
    }

    fn unlocked_index(&self, id: &str) -> std::result::Result<usize, StoreError> {
        let index = self.index_of(id)?;
        if self.layers[index].locked {
            return Err(StoreError::LayerLocked { id: id.to_string() });
        }
        Ok(index)
    }

    fn with_layer_list(&self, layers: Vec<Arc<Layer>>) -> Self {
        let selected_layer_id = self
            .selected_layer_id
            .clone()
            .filter(|id| layers.iter().any(|l| &l.id == id));
        Self {
            layers,
            active_tool: self.active_tool,
            selected_layer_id,
            selected_hoop_id: self.selected_hoop_id.clone(),
            revision: self.revision + 1,
            generation: next_generation(),
        }
    }

    /// Swaps in layers that differ only in derived statistics.
    fn with_derived_stats(&self, layers: Vec<Arc<Layer>>) -> Self {
        Self {
            layers,
            ..self.clone()
        }
    }

    fn replace_at(&self, index: usize, layer: Layer) -> Self {
        let mut layers = self.layers.clone();
        layers[index] = Arc::new(layer);
        self.with_layer_list(layers)
    }

    fn updated(&self, id: &str, f: impl FnOnce(&Layer) -> Layer) -> std::result::Result<Self, StoreError> {
        let index = self.index_of(id)?;
        Ok(self.replace_at(index, f(self.layers[index].as_ref())))
    }

    // ---- layer list ----

    /// Replaces every layer.
    #[must_use]
    pub fn set_layers(&self, layers: Vec<Layer>) -> Self {
        info!(count = layers.len(), "set layers");
        self.with_layer_list(layers.into_iter().map(Arc::new).collect())
    }

    /// Replaces every layer with the vectorizer's color regions.
    pub fn ingest_vectorized(&self, image: VectorizedImage) -> std::result::Result<Self, GeometryError> {
        let layers = image.into_layers()?;
        Ok(self.set_layers(layers))
    }

    /// Appends layers at the end of the stitch order.
    #[must_use]
    pub fn add_layers(&self, new_layers: Vec<Layer>) -> Self {
        let mut layers = self.layers.clone();
        layers.extend(new_layers.into_iter().map(Arc::new));
        self.with_layer_list(layers)
    }

    /// Inserts layers directly after `id`.
    pub fn insert_layers_after(
        &self,
        id: &str,
        new_layers: Vec<Layer>,
    ) -> std::result::Result<Self, StoreError> {
        let index = self.index_of(id)?;
        let mut layers = self.layers.clone();
        layers.splice(index + 1..index + 1, new_layers.into_iter().map(Arc::new));
        Ok(self.with_layer_list(layers))
    }

    pub fn remove_layer(&self, id: &str) -> std::result::Result<Self, StoreError> {
        let index = self.index_of(id)?;
        let mut layers = self.layers.clone();
        layers.remove(index);
        info!(layer = id, "removed layer");
        Ok(self.with_layer_list(layers))
    }

    /// Moves the layer at `old_index` to `new_index` (remove then insert).
    pub fn reorder(&self, old_index: usize, new_index: usize) -> std::result::Result<Self, StoreError> {
        let len = self.layers.len();
        if old_index >= len {
            return Err(StoreError::IndexOutOfRange { index: old_index, len });
        }
        if new_index >= len {
            return Err(StoreError::IndexOutOfRange { index: new_index, len });
        }
        let mut layers = self.layers.clone();
        let moved = layers.remove(old_index);
        layers.insert(new_index, moved);
        Ok(self.with_layer_list(layers))
    }

    // ---- per-layer flags ----

    pub fn toggle_visibility(&self, id: &str) -> std::result::Result<Self, StoreError> {
        self.updated(id, |l| Layer {
            visible: !l.visible,
            ..l.clone()
        })
    }

    pub fn toggle_lock(&self, id: &str) -> std::result::Result<Self, StoreError> {
        self.updated(id, |l| Layer {
            locked: !l.locked,
            ..l.clone()
        })
    }

    pub fn update_stitch_count(
        &self,
        id: &str,
        count: usize,
    ) -> std::result::Result<Self, StoreError> {
        let index = self.index_of(id)?;
        let mut layers = self.layers.clone();
        layers[index] = Arc::new(Layer {
            stitch_count: Some(count),
            ..self.layers[index].as_ref().clone()
        });
        Ok(self.with_derived_stats(layers))
    }

    /// Merges `patch` into the layer's settings.
    pub fn update_settings(&self, id: &str, patch: &SettingsPatch) -> Result<Self> {
        let index = self.unlocked_index(id)?;
        let layer = &self.layers[index];
        let settings = layer.settings.clone().unwrap_or_default().merged(patch);
        settings.validate()?;
        Ok(self.replace_at(
            index,
            Layer {
                settings: Some(settings),
                ..layer.as_ref().clone()
            },
        ))
    }

    pub fn apply_fabric_preset(&self, id: &str, preset_id: &str) -> Result<Self> {
        let preset = find_fabric_preset(preset_id)
            .ok_or_else(|| Error::other(format!("Unknown fabric preset: {}", preset_id)))?;
        info!(layer = id, preset = preset_id, "applying fabric preset");
        self.update_settings(id, &preset.as_patch())
    }

    /// Replaces one path of a layer, e.g. after a node edit.
    pub fn replace_path(&self, id: &str, path_index: usize, path: Path) -> std::result::Result<Self, StoreError> {
        let index = self.unlocked_index(id)?;
        let layer = &self.layers[index];
        let len = layer.paths.len();
        if path_index >= len {
            return Err(StoreError::IndexOutOfRange { index: path_index, len });
        }
        let mut paths = layer.paths.clone();
        paths[path_index] = path;
        Ok(self.replace_at(
            index,
            Layer {
                paths,
                ..layer.as_ref().clone()
            },
        ))
    }

    /// Recomputes the derived stitch count and thread length of every layer.
    #[must_use]
    pub fn refresh_stats(&self) -> Self {
        let layers = self
            .layers
            .iter()
            .map(|l| {
                let stats = LayerStats::for_layer(l);
                if l.stitch_count == Some(stats.stitch_count)
                    && l.thread_length == Some(stats.thread_length)
                {
                    Arc::clone(l)
                } else {
                    Arc::new(Layer {
                        stitch_count: Some(stats.stitch_count),
                        thread_length: Some(stats.thread_length),
                        ..l.as_ref().clone()
                    })
                }
            })
            .collect();
        self.with_derived_stats(layers)
    }

    // ---- selection / editor state ----

    /// Selects a layer, or clears the selection with `None`.
    pub fn select_layer(&self, id: Option<&str>) -> std::result::Result<Self, StoreError> {
        if let Some(id) = id {
            self.index_of(id)?;
        }
        Ok(Self {
            selected_layer_id: id.map(str::to_string),
            ..self.clone()
        })
    }

    #[must_use]
    pub fn set_tool(&self, tool: ActiveTool) -> Self {
        Self {
            active_tool: tool,
            ..self.clone()
        }
    }

    /// Selects a catalog hoop, or disables hoop validation with `None`.
    pub fn select_hoop(&self, id: Option<&str>) -> std::result::Result<Self, StoreError> {
        if let Some(id) = id {
            find_hoop(id)?;
        }
        Ok(Self {
            selected_hoop_id: id.map(str::to_string),
            ..self.clone()
        })
    }

    // ---- generators ----

    /// Regenerates the stitches of one layer from its settings.
    pub fn apply_stitch_generation(&self, id: &str, options: &GenerationOptions) -> Result<Self> {
        let index = self.unlocked_index(id)?;
        let generated = generate_layer_stitches(&self.layers[index], options)?;
        info!(layer = id, points = generated.point_count(), "regenerated layer stitches");
        Ok(self.replace_at(index, generated))
    }

    /// Reorders layers by color and bridges short jumps.
    #[must_use]
    pub fn optimize_branching(&self, connect_threshold: f64) -> Self {
        let optimized = optimize_branching(&self.to_layers(), connect_threshold);
        self.with_layer_list(optimized.into_iter().map(Arc::new).collect())
    }

    /// Sends one path of a layer to the appliqué generator and inserts the
    /// three resulting layers directly after it.
    ///
    /// On any failure the error is returned and no snapshot is produced.
    pub async fn apply_applique<S>(
        &self,
        layer_id: &str,
        path_index: usize,
        service: &S,
    ) -> Result<Self>
    where
        S: StitchService + ?Sized,
    {
        let index = self.index_of(layer_id)?;
        let layer = &self.layers[index];
        let polygon = layer.paths.get(path_index).ok_or(StoreError::IndexOutOfRange {
            index: path_index,
            len: layer.paths.len(),
        })?;

        let response = match service.generate_applique(AppliqueRequest::new(polygon)).await {
            Ok(response) => response,
            Err(e) => {
                warn!(layer = layer_id, error = %e, "appliqué generation failed");
                return Err(e);
            }
        };
        response.validate()?;

        let options = service.applique_options();
        let new_layers: Vec<Layer> = response
            .steps
            .into_iter()
            .map(|step: AppliqueStep| step.into_layer(&options))
            .collect();
        info!(layer = layer_id, path_index, "inserted appliqué steps");
        Ok(self.insert_layers_after(layer_id, new_layers)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stitchkit_core::{Point, StitchType};

    fn store() -> LayerStore {
        LayerStore::from_layers(vec![
            Layer::with_id("a", "A", "#ff0000")
                .with_paths(vec![vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]]),
            Layer::with_id("b", "B", "#00ff00"),
            Layer::with_id("c", "C", "#0000ff"),
        ])
    }

    fn ids(store: &LayerStore) -> Vec<String> {
        store.layers().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn test_defaults() {
        let s = LayerStore::new();
        assert_eq!(s.active_tool(), ActiveTool::Select);
        assert_eq!(s.selected_hoop_id(), Some("singer-s"));
        assert!(s.is_empty());
    }

    #[test]
    fn test_updates_do_not_touch_previous_snapshot() {
        let before = store();
        let after = before.toggle_visibility("a").unwrap();
        assert!(before.layer("a").unwrap().visible);
        assert!(!after.layer("a").unwrap().visible);
        assert!(after.revision() > before.revision());
    }

    #[test]
    fn test_reorder() {
        let s = store().reorder(0, 2).unwrap();
        assert_eq!(ids(&s), vec!["b", "c", "a"]);
        assert!(store().reorder(3, 0).is_err());
    }

    #[test]
    fn test_insert_after() {
        let s = store()
            .insert_layers_after("a", vec![Layer::with_id("x", "X", "#000000")])
            .unwrap();
        assert_eq!(ids(&s), vec!["a", "x", "b", "c"]);
    }

    #[test]
    fn test_locked_layer_rejects_edits() {
        let s = store().toggle_lock("a").unwrap();
        let err = s
            .update_settings("a", &SettingsPatch::default())
            .unwrap_err();
        assert!(err.is_store_error());
        // visibility still toggles
        assert!(s.toggle_visibility("a").is_ok());
    }

    #[test]
    fn test_update_settings_merges() {
        let patch = SettingsPatch {
            stitch_type: Some(StitchType::Tatami),
            ..Default::default()
        };
        let s = store().update_settings("b", &patch).unwrap();
        let settings = s.layer("b").unwrap().settings.clone().unwrap();
        assert_eq!(settings.stitch_type, StitchType::Tatami);
        assert_eq!(settings.density, 0.4);

        let bad = SettingsPatch {
            density: Some(-1.0),
            ..Default::default()
        };
        assert!(store().update_settings("b", &bad).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_selection_cleared_on_removal() {
        let s = store().select_layer(Some("b")).unwrap();
        assert_eq!(s.selected_layer().map(|l| l.name.as_str()), Some("B"));
        let s = s.remove_layer("b").unwrap();
        assert_eq!(s.selected_layer_id(), None);
    }

    #[test]
    fn test_select_unknown_hoop() {
        assert!(store().select_hoop(Some("giant")).is_err());
        let s = store().select_hoop(None).unwrap();
        assert!(s.selected_hoop().is_none());
    }

    #[test]
    fn test_tool_names() {
        assert_eq!("node_edit".parse::<ActiveTool>().unwrap(), ActiveTool::NodeEdit);
        assert_eq!(ActiveTool::Knife.to_string(), "knife");
        assert!("lasso".parse::<ActiveTool>().is_err());
    }

    #[test]
    fn test_refresh_stats() {
        let s = store().refresh_stats();
        let a = s.layer("a").unwrap();
        assert_eq!(a.stitch_count, Some(2));
        assert!((a.thread_length.unwrap() - 0.001).abs() < 1e-12);
    }
}
