//! # StitchKit Designer
//!
//! Stitch geometry pipeline and stitch-out simulation for the embroidery
//! editor. Takes colored vector regions from the vectorizer, turns them into
//! needle penetrations and replays them in stitch-out order.
//!
//! ## Core Components
//!
//! ### Generators
//! - **Satin**: Zig-zag columns along a centerline
//! - **Appliqué**: Position, tackdown and satin finish steps for a patch
//! - **Tatami**: Scanline fill of closed regions, with optional density gradient
//! - **Bean**: Triple running stitch
//! - **Pull Compensation**: Outline growth to counter fabric pull
//! - **Lock Stitches**: Tie-in and tie-out knots
//! - **Resampling**: Maximum stitch length enforcement
//!
//! ### State
//! - **Layer Store**: Immutable snapshots of layers, tool, selection and hoop
//! - **Hoop Bounds**: Advisory containment check against the selected hoop
//! - **Project Files**: JSON persistence of a design
//!
//! ### Playback
//! - **Discretizer**: Flattens visible layers into the stitch sequence
//! - **Branching**: Color grouping and nearest-neighbour ordering
//! - **Simulation**: Frame-driven needle playback
//!
//! ## Architecture
//!
//! ```text
//! Vectorizer output ──> LayerStore ──> discretize() ──> StitchSimulator
//!                          ▲                                  │
//!                          │                              tick()/seek()
//!          generators (satin, appliqué, tatami, ...)          ▼
//!          via StitchService                               renderer
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stitchkit_designer::{discretize, LayerStore, StitchSimulator};
//!
//! let store = LayerStore::from_layers(layers);
//! let mut sim = StitchSimulator::with_stitches(discretize(store.layers()));
//! sim.play();
//! while sim.state().is_playing {
//!     sim.tick();
//! }
//! ```

pub mod applique;
pub mod bean;
pub mod branching;
pub mod compensation;
pub mod discretizer;
pub mod hoop_bounds;
pub mod layer_store;
pub mod lock_stitch;
pub mod resample;
pub mod satin;
pub mod serialization;
pub mod service;
pub mod stitch_gen;
pub mod stitch_simulation;
pub mod tatami;

pub use applique::{generate_applique, generate_applique_with, AppliqueOptions, AppliqueStep};
pub use bean::{generate_bean_stitch, DEFAULT_BEAN_STITCH_LENGTH};
pub use branching::{optimize_branching, DEFAULT_CONNECT_THRESHOLD};
pub use compensation::apply_pull_compensation;
pub use discretizer::{discretize, discretized_len, layer_stats, LayerStats};
pub use hoop_bounds::{validate, validate_bounds, validate_on_canvas, BoundsCheck, HoopValidator};
pub use layer_store::{ActiveTool, LayerStore};
pub use lock_stitch::{add_lock_stitches, LockMode, DEFAULT_LOCK_LENGTH};
pub use resample::{resample_layer, resample_layers, resample_path};
pub use satin::{generate_satin, generate_satin_with, satin_layer, SatinOptions};
pub use serialization::ProjectFile;
pub use service::{
    AppliqueRequest, AppliqueResponse, LocalStitchService, SatinRequest, SatinResponse,
    StitchService, VectorizedImage, VectorizedLayer,
};
pub use stitch_gen::{generate_layer_stitches, GenerationOptions};
pub use stitch_simulation::{
    PlaybackState, SimulationState, StitchAnalyzer, StitchSimulator, DEFAULT_SPEED,
};
pub use tatami::{generate_tatami, generate_tatami_with, TatamiOptions};
