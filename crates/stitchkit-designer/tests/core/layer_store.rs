use stitchkit_core::{Layer, Point, SettingsPatch, StitchType, StoreError};
use stitchkit_designer::layer_store::{ActiveTool, LayerStore};
use stitchkit_designer::stitch_gen::GenerationOptions;

fn square_path(x: f64, y: f64, size: f64) -> Vec<Point> {
    vec![
        Point::new(x, y),
        Point::new(x + size, y),
        Point::new(x + size, y + size),
        Point::new(x, y + size),
    ]
}

fn store() -> LayerStore {
    LayerStore::from_layers(vec![
        Layer::with_id("one", "One", "#ff0000").with_paths(vec![square_path(0.0, 0.0, 10.0)]),
        Layer::with_id("two", "Two", "#00ff00").with_paths(vec![square_path(20.0, 0.0, 10.0)]),
    ])
}

#[test]
fn test_set_tool_keeps_revision() {
    let s = store();
    let t = s.set_tool(ActiveTool::Knife);
    assert_eq!(t.active_tool(), ActiveTool::Knife);
    assert_eq!(t.revision(), s.revision());
}

#[test]
fn test_unknown_layer() {
    let err = store().toggle_visibility("missing").unwrap_err();
    assert_eq!(
        err,
        StoreError::LayerNotFound {
            id: "missing".to_string()
        }
    );
}

#[test]
fn test_replace_path() {
    let s = store()
        .replace_path("one", 0, square_path(1.0, 1.0, 2.0))
        .unwrap();
    assert_eq!(s.layer("one").unwrap().paths[0][0], Point::new(1.0, 1.0));
    assert!(matches!(
        store().replace_path("one", 3, vec![]),
        Err(StoreError::IndexOutOfRange { index: 3, len: 1 })
    ));
}

#[test]
fn test_fabric_preset_merges_into_settings() {
    let s = store().apply_fabric_preset("two", "jersey").unwrap();
    let settings = s.layer("two").unwrap().settings.clone().unwrap();
    assert_eq!(settings.pull_compensation, 0.5);
    assert_eq!(settings.density, 0.45);
    assert!(store().apply_fabric_preset("two", "leather").is_err());
}

#[test]
fn test_apply_stitch_generation() {
    let patch = SettingsPatch {
        stitch_type: Some(StitchType::Satin),
        satin_width: Some(2.0),
        ..Default::default()
    };
    let s = store()
        .update_settings("one", &patch)
        .unwrap()
        .apply_stitch_generation("one", &GenerationOptions::default())
        .unwrap();
    let layer = s.layer("one").unwrap();
    assert_eq!(layer.id, "one");
    assert!(layer.point_count() > 4);
    // the untouched layer is unchanged
    assert_eq!(s.layer("two"), store().layer("two"));
}

#[test]
fn test_locked_layer_blocks_generation() {
    let s = store().toggle_lock("one").unwrap();
    let err = s
        .apply_stitch_generation("one", &GenerationOptions::default())
        .unwrap_err();
    assert!(err.is_store_error());
}

#[test]
fn test_optimize_branching_groups_colors() {
    let s = LayerStore::from_layers(vec![
        Layer::with_id("r1", "R1", "#ff0000").with_paths(vec![square_path(0.0, 0.0, 1.0)]),
        Layer::with_id("g1", "G1", "#00ff00").with_paths(vec![square_path(0.0, 0.0, 1.0)]),
        Layer::with_id("r2", "R2", "#ff0000").with_paths(vec![square_path(5.0, 0.0, 1.0)]),
    ])
    .optimize_branching(50.0);
    let ids: Vec<_> = s.layers().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r2", "g1"]);
}

#[test]
fn test_update_stitch_count() {
    let s = store().update_stitch_count("two", 1234).unwrap();
    assert_eq!(s.layer("two").unwrap().stitch_count, Some(1234));
}
