use stitchkit_core::Point;
use stitchkit_designer::{
    discretize, LayerStore, LocalStitchService, StitchSimulator, VectorizedImage,
};

fn two_color_image() -> VectorizedImage {
    serde_json::from_str(
        r##"{"layers": [
            {"color": "#d32f2f", "paths": [[[0, 0], [10, 0], [10, 10], [0, 10]]]},
            {"color": "#1976d2", "paths": [[[20, 0], [30, 0], [25, 8]]]}
        ]}"##,
    )
    .unwrap()
}

#[tokio::test]
async fn test_end_to_end_applique() {
    let store = LayerStore::new().ingest_vectorized(two_color_image()).unwrap();
    assert_eq!(store.len(), 2);

    let before = discretize(store.layers()).len();
    let first_id = store.layers().next().unwrap().id.clone();

    let service = LocalStitchService::new();
    let updated = store
        .apply_applique(&first_id, 0, &service)
        .await
        .unwrap();
    assert_eq!(updated.len(), 5);

    // the three steps sit directly after the source layer
    let names: Vec<_> = updated.layers().map(|l| l.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Color 1",
            "Appliqué Position",
            "Appliqué Tackdown",
            "Appliqué Satin Finish",
            "Color 2"
        ]
    );

    let added: usize = updated
        .layers()
        .skip(1)
        .take(3)
        .map(|l| l.point_count())
        .sum();
    assert_eq!(discretize(updated.layers()).len(), before + added);

    // the source snapshot is untouched
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_applique_on_missing_path_leaves_store() {
    let store = LayerStore::new().ingest_vectorized(two_color_image()).unwrap();
    let id = store.layers().next().unwrap().id.clone();
    let err = store
        .apply_applique(&id, 5, &LocalStitchService::new())
        .await
        .unwrap_err();
    assert!(err.is_store_error());
}

#[test]
fn test_simulator_follows_store_revisions() {
    let store = LayerStore::new().ingest_vectorized(two_color_image()).unwrap();
    let mut sim = StitchSimulator::new();
    assert!(sim.sync(&store));
    assert_eq!(sim.state().total_stitches, 7);
    assert!(!sim.sync(&store));

    sim.play();
    sim.tick();

    let first_id = store.layers().next().unwrap().id.clone();
    let hidden = store.toggle_visibility(&first_id).unwrap();
    assert!(sim.sync(&hidden));
    assert_eq!(sim.state().total_stitches, 3);
    assert_eq!(sim.state().current_stitch_index, 0);
    assert!(!sim.state().is_playing);
}

#[test]
fn test_stitch_points_carry_layer_tags() {
    let store = LayerStore::new().ingest_vectorized(two_color_image()).unwrap();
    let stitches = discretize(store.layers());
    let second = store.layers().nth(1).unwrap();
    assert_eq!(stitches[4].layer_id, second.id);
    assert_eq!(stitches[4].color, "#1976d2");
    assert_eq!(stitches[4].position(), Point::new(20.0, 0.0));
}

#[test]
fn test_stats_after_refresh() {
    let store = LayerStore::new()
        .ingest_vectorized(two_color_image())
        .unwrap()
        .refresh_stats();
    let first = store.layers().next().unwrap();
    assert_eq!(first.stitch_count, Some(4));
    // three 10 mm edges of the open square
    assert!((first.thread_length.unwrap() - 0.03).abs() < 1e-12);
}

fn run_layer(id: &str, points: usize) -> stitchkit_core::Layer {
    stitchkit_core::Layer::with_id(id, id, "#000000").with_paths(vec![(0..points)
        .map(|i| Point::new(i as f64, 0.0))
        .collect()])
}

#[test]
fn test_sync_reloads_unrelated_store_at_same_revision() {
    let a = LayerStore::from_layers(vec![run_layer("a", 4)]);
    let b = LayerStore::from_layers(vec![run_layer("b", 2)]);
    assert_eq!(a.revision(), b.revision());

    let mut sim = StitchSimulator::new();
    sim.sync(&a);
    sim.run_to_end();
    assert!(sim.sync(&b));
    assert_eq!(sim.state().total_stitches, 2);
    assert_eq!(sim.state().current_stitch_index, 0);
}

#[test]
fn test_sync_reloads_sibling_edit() {
    let base = LayerStore::from_layers(vec![run_layer("a", 8)]);
    let hidden = base.toggle_visibility("a").unwrap();
    let replaced = base
        .replace_path("a", 0, vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)])
        .unwrap();
    assert_eq!(hidden.revision(), replaced.revision());

    let mut sim = StitchSimulator::new();
    sim.sync(&hidden);
    assert_eq!(sim.state().total_stitches, 0);
    assert!(sim.sync(&replaced));
    assert_eq!(sim.state().total_stitches, 2);
    assert!(sim.sync(&base));
    assert_eq!(sim.state().total_stitches, 8);
}

#[test]
fn test_stats_refresh_keeps_playback() {
    let store = LayerStore::from_layers(vec![run_layer("a", 40)]);
    let mut sim = StitchSimulator::new();
    sim.sync(&store);
    sim.play();
    sim.tick();

    let refreshed = store
        .refresh_stats()
        .update_stitch_count("a", 40)
        .unwrap();
    assert_eq!(refreshed.revision(), store.revision());
    assert!(!sim.sync(&refreshed));
    assert_eq!(sim.state().current_stitch_index, 10);
    assert!(sim.state().is_playing);
}
