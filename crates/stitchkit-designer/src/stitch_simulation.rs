//! Stitch-out simulation.
//!
//! Replays the discretized stitch sequence as an incremental playback
//! cursor driven by an external frame clock. Each [`StitchSimulator::tick`]
//! advances the needle by `speed` stitches; the state record is replaced as
//! a whole on every transition.

use serde::Serialize;
use stitchkit_core::{GeometryError, StitchPoint};
use tracing::{debug, info};

use crate::discretizer::discretize;
use crate::layer_store::LayerStore;

/// Stitches advanced per tick in a fresh simulator.
pub const DEFAULT_SPEED: usize = 10;

/// Playback state of the needle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Paused,
    Playing,
}

impl PlaybackState {
    /// Returns the name of the state.
    pub fn name(&self) -> &'static str {
        match self {
            PlaybackState::Paused => "Paused",
            PlaybackState::Playing => "Playing",
        }
    }
}

/// Snapshot of the playback cursor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationState {
    pub is_playing: bool,
    /// Fraction of the sequence stitched, in `[0, 1]`.
    pub progress: f64,
    pub current_stitch_index: usize,
    /// Stitches per tick.
    pub speed: usize,
    pub total_stitches: usize,
}

impl SimulationState {
    fn initial(speed: usize, total_stitches: usize) -> Self {
        Self {
            is_playing: false,
            progress: 0.0,
            current_stitch_index: 0,
            speed,
            total_stitches,
        }
    }

    pub fn playback(&self) -> PlaybackState {
        if self.is_playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        }
    }

    /// Percentage of the sequence stitched.
    pub fn progress_percentage(&self) -> f64 {
        self.progress * 100.0
    }
}

/// Playback engine over a stitch sequence.
#[derive(Debug, Clone)]
pub struct StitchSimulator {
    stitches: Vec<StitchPoint>,
    state: SimulationState,
    source_generation: Option<u64>,
}

impl Default for StitchSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl StitchSimulator {
    /// Creates an empty, paused simulator.
    pub fn new() -> Self {
        Self {
            stitches: Vec::new(),
            state: SimulationState::initial(DEFAULT_SPEED, 0),
            source_generation: None,
        }
    }

    /// Creates a paused simulator over `stitches`.
    pub fn with_stitches(stitches: Vec<StitchPoint>) -> Self {
        let mut sim = Self::new();
        sim.load(stitches);
        sim
    }

    /// Replaces the sequence and resets the cursor; speed is kept.
    pub fn load(&mut self, stitches: Vec<StitchPoint>) {
        let total = stitches.len();
        self.stitches = stitches;
        self.state = SimulationState::initial(self.state.speed, total);
        debug!(total, "loaded stitch sequence");
    }

    /// Re-discretizes the store if it holds a different layer list than the
    /// last synced one.
    ///
    /// Returns `true` when the sequence was replaced.
    pub fn sync(&mut self, store: &LayerStore) -> bool {
        if self.source_generation == Some(store.generation()) {
            return false;
        }
        self.load(discretize(store.layers()));
        self.source_generation = Some(store.generation());
        true
    }

    /// Starts playback. Does nothing while playing, on an empty sequence,
    /// or when the cursor is already at the end.
    pub fn play(&mut self) {
        let s = self.state;
        if s.is_playing || s.total_stitches == 0 || s.current_stitch_index >= s.total_stitches {
            return;
        }
        self.state = SimulationState {
            is_playing: true,
            ..s
        };
        info!(
            from = s.current_stitch_index,
            total = s.total_stitches,
            "simulation playing"
        );
    }

    /// Pauses playback, keeping the cursor.
    pub fn pause(&mut self) {
        if self.state.is_playing {
            self.state = SimulationState {
                is_playing: false,
                ..self.state
            };
            info!(at = self.state.current_stitch_index, "simulation paused");
        }
    }

    pub fn toggle_play(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Advances one frame. Reaching the end pauses playback.
    pub fn tick(&mut self) -> SimulationState {
        let s = self.state;
        if !s.is_playing {
            return s;
        }
        let index = s.current_stitch_index.saturating_add(s.speed).min(s.total_stitches);
        let complete = index >= s.total_stitches;
        self.state = SimulationState {
            is_playing: !complete,
            progress: progress_of(index, s.total_stitches),
            current_stitch_index: index,
            ..s
        };
        if complete {
            info!(total = s.total_stitches, "simulation complete");
        }
        self.state
    }

    /// Moves the cursor to `progress` (clamped to `[0, 1]`, NaN as 0).
    pub fn seek(&mut self, progress: f64) {
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        let total = self.state.total_stitches;
        let index = ((p * total as f64).floor() as usize).min(total);
        self.state = SimulationState {
            progress: p,
            current_stitch_index: index,
            ..self.state
        };
    }

    /// Sets stitches per tick; takes effect on the next tick.
    pub fn set_speed(&mut self, speed: usize) -> Result<(), GeometryError> {
        if speed == 0 {
            return Err(GeometryError::InvalidSpeed);
        }
        self.state = SimulationState {
            speed,
            ..self.state
        };
        Ok(())
    }

    /// Returns the cursor to the start and pauses.
    pub fn reset(&mut self) {
        self.state = SimulationState::initial(self.state.speed, self.state.total_stitches);
    }

    /// Plays from the current position to the end, returning the ticks used.
    pub fn run_to_end(&mut self) -> usize {
        self.play();
        let mut ticks = 0;
        while self.state.is_playing {
            self.tick();
            ticks += 1;
        }
        ticks
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.state.playback()
    }

    pub fn stitches(&self) -> &[StitchPoint] {
        &self.stitches
    }

    /// Stitches already sewn, `[0, current_stitch_index)`.
    pub fn visible_stitches(&self) -> &[StitchPoint] {
        &self.stitches[..self.state.current_stitch_index.min(self.stitches.len())]
    }

    /// The needle position: the last sewn stitch.
    pub fn current_stitch(&self) -> Option<&StitchPoint> {
        self.visible_stitches().last()
    }

    pub fn is_complete(&self) -> bool {
        self.state.total_stitches > 0 && self.state.current_stitch_index >= self.state.total_stitches
    }

    /// Ticks needed to play the whole sequence at the current speed.
    pub fn estimated_ticks(&self) -> usize {
        self.state.total_stitches.div_ceil(self.state.speed)
    }
}

fn progress_of(index: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        index as f64 / total as f64
    }
}

/// Summary figures of a stitch sequence.
pub struct StitchAnalyzer<'a> {
    stitches: &'a [StitchPoint],
}

impl<'a> StitchAnalyzer<'a> {
    pub fn new(stitches: &'a [StitchPoint]) -> Self {
        Self { stitches }
    }

    /// Total needle travel in millimetres.
    pub fn total_length(&self) -> f64 {
        self.stitches
            .windows(2)
            .map(|w| w[0].position().distance_to(&w[1].position()))
            .sum()
    }

    /// Number of thread changes between consecutive stitches.
    pub fn color_changes(&self) -> usize {
        self.stitches
            .windows(2)
            .filter(|w| w[0].color != w[1].color)
            .count()
    }

    /// Indices of stitches longer than `max_len` (jumps that need trimming).
    pub fn long_stitches(&self, max_len: f64) -> Vec<usize> {
        self.stitches
            .windows(2)
            .enumerate()
            .filter(|(_, w)| w[0].position().distance_to(&w[1].position()) > max_len)
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// Machine time in seconds at `stitches_per_minute`.
    pub fn estimate_sew_time(&self, stitches_per_minute: f64) -> f64 {
        if stitches_per_minute <= 0.0 {
            return 0.0;
        }
        self.stitches.len() as f64 / stitches_per_minute * 60.0
    }
}
