//! Layers: colored stitch regions in stitch-out order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Path, Point};
use crate::stitch::StitchSettings;

/// A colored region owning zero or more paths.
///
/// `id` never changes once the layer exists. The derived `stitch_count` and
/// `thread_length` are refreshed by the store after path changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: String,
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    pub color: String,
    #[serde(default)]
    pub paths: Vec<Path>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stitch_count: Option<usize>,
    /// Thread consumption in metres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<StitchSettings>,
}

fn default_visible() -> bool {
    true
}

impl Layer {
    /// Creates a visible, unlocked layer with a fresh id.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, color)
    }

    /// Creates a visible, unlocked layer with the given id.
    pub fn with_id(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            visible: true,
            locked: false,
            color: color.into(),
            paths: Vec::new(),
            stitch_count: None,
            thread_length: None,
            settings: None,
        }
    }

    pub fn with_paths(mut self, paths: Vec<Path>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_settings(mut self, settings: StitchSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Number of points over all paths.
    pub fn point_count(&self) -> usize {
        self.paths.iter().map(Vec::len).sum()
    }

    /// First point of the first non-empty path.
    pub fn start_point(&self) -> Option<Point> {
        self.paths.iter().find_map(|p| p.first().copied())
    }

    /// Last point of the last non-empty path.
    pub fn end_point(&self) -> Option<Point> {
        self.paths.iter().rev().find_map(|p| p.last().copied())
    }
}

/// Normalizes a color string to lowercase `#rrggbb`.
///
/// Accepts `#rgb`, `#rrggbb` and the same without the leading `#`.
pub fn normalize_hex(color: &str) -> Option<String> {
    let hex = color.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => Some(format!("#{}", hex.to_ascii_lowercase())),
        3 => {
            let expanded: String = hex
                .chars()
                .flat_map(|c| [c, c])
                .collect::<String>()
                .to_ascii_lowercase();
            Some(format!("#{}", expanded))
        }
        _ => None,
    }
}
