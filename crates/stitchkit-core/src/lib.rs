//! # StitchKit Core
//!
//! Core types shared by the StitchKit crates: millimetre design-space
//! geometry, stitch settings, layers, the hoop and fabric catalogs, and
//! the error types used across the stitch pipeline.

pub mod error;
pub mod fabric;
pub mod geometry;
pub mod hoop;
pub mod layer;
pub mod stitch;
pub mod units;

pub use error::{Error, GeometryError, Result, ServiceError, StoreError};
pub use fabric::{fabric_presets, find_fabric_preset, FabricPreset};
pub use geometry::{
    close_path, parse_path, path_from_pairs, path_length, path_to_pairs, signed_area, Bounds,
    Path, Point,
};
pub use hoop::{find_hoop, hoop_catalog, Hoop, HoopBrand, HoopShape, DEFAULT_HOOP_ID};
pub use layer::{normalize_hex, Layer};
pub use stitch::{SettingsPatch, StitchPoint, StitchSettings, StitchType};
pub use units::MeasurementSystem;
