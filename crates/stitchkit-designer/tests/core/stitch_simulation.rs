use stitchkit_core::{GeometryError, Point, StitchPoint};
use stitchkit_designer::stitch_simulation::{PlaybackState, StitchSimulator};

fn sequence(n: usize) -> Vec<StitchPoint> {
    (0..n)
        .map(|i| StitchPoint::new(Point::new(i as f64, (i % 7) as f64), "#aa0000", "layer"))
        .collect()
}

#[test]
fn test_simulator_creation() {
    let sim = StitchSimulator::new();
    assert_eq!(sim.playback_state(), PlaybackState::Paused);
    assert_eq!(sim.state().current_stitch_index, 0);
    assert!(sim.visible_stitches().is_empty());
    assert!(sim.current_stitch().is_none());
}

#[test]
fn test_play_on_empty_sequence_is_noop() {
    let mut sim = StitchSimulator::new();
    sim.play();
    assert_eq!(sim.playback_state(), PlaybackState::Paused);
    assert_eq!(sim.tick().progress, 0.0);
}

#[test]
fn test_reset_on_regeneration() {
    let mut sim = StitchSimulator::with_stitches(sequence(2000));
    sim.set_speed(100).unwrap();
    sim.play();
    for _ in 0..5 {
        sim.tick();
    }
    assert_eq!(sim.state().current_stitch_index, 500);
    assert!(sim.state().is_playing);

    sim.load(sequence(1200));
    let s = sim.state();
    assert_eq!(s.current_stitch_index, 0);
    assert_eq!(s.progress, 0.0);
    assert!(!s.is_playing);
    assert_eq!(s.total_stitches, 1200);
    assert_eq!(s.speed, 100);
}

#[test]
fn test_seek_keeps_playback_state() {
    let mut sim = StitchSimulator::with_stitches(sequence(100));
    sim.play();
    sim.seek(0.255);
    let s = sim.state();
    assert!(s.is_playing);
    assert_eq!(s.current_stitch_index, 25);
    assert_eq!(s.progress, 0.255);

    sim.seek(7.0);
    assert_eq!(sim.state().current_stitch_index, 100);
    assert_eq!(sim.state().progress, 1.0);

    sim.seek(-1.0);
    assert_eq!(sim.state().current_stitch_index, 0);
}

#[test]
fn test_speed_change_applies_on_next_tick() {
    let mut sim = StitchSimulator::with_stitches(sequence(100));
    sim.play();
    sim.tick();
    sim.set_speed(25).unwrap();
    assert_eq!(sim.state().current_stitch_index, 10);
    assert_eq!(sim.tick().current_stitch_index, 35);
    assert_eq!(sim.set_speed(0), Err(GeometryError::InvalidSpeed));
}

#[test]
fn test_run_to_end() {
    let mut sim = StitchSimulator::with_stitches(sequence(95));
    assert_eq!(sim.estimated_ticks(), 10);
    assert_eq!(sim.run_to_end(), 10);
    assert!(sim.is_complete());
    assert_eq!(sim.visible_stitches().len(), 95);
}

#[test]
fn test_reset() {
    let mut sim = StitchSimulator::with_stitches(sequence(30));
    sim.run_to_end();
    sim.reset();
    assert_eq!(sim.state().current_stitch_index, 0);
    assert_eq!(sim.playback_state(), PlaybackState::Paused);
    assert_eq!(sim.state().total_stitches, 30);
}
