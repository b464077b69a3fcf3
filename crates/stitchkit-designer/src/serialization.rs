//! Serialization and deserialization for project files.
//!
//! Projects are stored as JSON with camelCase keys so layers and their
//! stitch settings round-trip without loss.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use stitchkit_core::Layer;
use tracing::info;
use uuid::Uuid;

use crate::layer_store::LayerStore;

/// Project file format version
const FILE_FORMAT_VERSION: &str = "1.0";

fn default_version() -> String {
    FILE_FORMAT_VERSION.to_string()
}

/// Complete project file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    #[serde(default = "default_version")]
    pub version: String,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub hoop_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectFile {
    /// Creates an empty project.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            layers: Vec::new(),
            hoop_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Captures the layers and hoop of a store snapshot.
    pub fn from_store(name: impl Into<String>, store: &LayerStore) -> Self {
        Self {
            layers: store.to_layers(),
            hoop_id: store.selected_hoop_id().map(str::to_string),
            ..Self::new(name)
        }
    }

    /// Replaces this project's content with a newer store snapshot.
    pub fn update_from_store(&mut self, store: &LayerStore) {
        self.layers = store.to_layers();
        self.hoop_id = store.selected_hoop_id().map(str::to_string);
        self.updated_at = Utc::now();
    }

    /// Builds a store holding the project's layers and hoop.
    ///
    /// Unknown hoop ids keep the default hoop selection.
    pub fn to_store(&self) -> LayerStore {
        let store = LayerStore::from_layers(self.layers.clone());
        store
            .select_hoop(self.hoop_id.as_deref())
            .unwrap_or_else(|_| store.clone())
    }

    /// Saves the project to a file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize project")?;

        std::fs::write(path.as_ref(), json).context("Failed to write project file")?;

        info!(path = %path.as_ref().display(), layers = self.layers.len(), "saved project");
        Ok(())
    }

    /// Loads a project from a file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read project file")?;

        let project: ProjectFile =
            serde_json::from_str(&content).context("Failed to parse project file")?;

        for layer in &project.layers {
            if let Some(settings) = &layer.settings {
                settings
                    .validate()
                    .with_context(|| format!("Invalid settings on layer {}", layer.id))?;
            }
        }

        info!(path = %path.as_ref().display(), layers = project.layers.len(), "loaded project");
        Ok(project)
    }
}
