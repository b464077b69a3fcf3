use stitchkit_core::{Layer, Point, StitchSettings, StitchType};
use stitchkit_designer::{LayerStore, ProjectFile};
use tempfile::tempdir;

fn layer_with_settings() -> Layer {
    Layer::with_id("l1", "Petal", "#e91e63")
        .with_paths(vec![vec![
            Point::new(0.0, 0.0),
            Point::new(12.5, 3.25),
            Point::new(4.0, 9.0),
        ]])
        .with_settings(StitchSettings {
            density: 0.35,
            pull_compensation: 0.25,
            underlay: false,
            angle: 30.0,
            stitch_length: Some(2.5),
            stitch_type: StitchType::Tatami,
            satin_width: None,
            density_end: Some(0.6),
        })
}

#[test]
fn test_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("flower.json");

    let store = LayerStore::from_layers(vec![layer_with_settings()])
        .select_hoop(Some("brother-5x7"))
        .unwrap();
    let project = ProjectFile::from_store("Flower", &store);
    project.save_to_file(&path).unwrap();

    let loaded = ProjectFile::load_from_file(&path).unwrap();
    assert_eq!(loaded.name, "Flower");
    assert_eq!(loaded.layers, vec![layer_with_settings()]);
    assert_eq!(loaded.hoop_id.as_deref(), Some("brother-5x7"));
    assert_eq!(loaded.created_at, project.created_at);

    let restored = loaded.to_store();
    assert_eq!(restored.selected_hoop_id(), Some("brother-5x7"));
    assert_eq!(restored.to_layers(), store.to_layers());
}

#[test]
fn test_persisted_key_names() {
    let project = ProjectFile::from_store(
        "Keys",
        &LayerStore::from_layers(vec![layer_with_settings()]),
    );
    let json = serde_json::to_value(&project).unwrap();
    let settings = &json["layers"][0]["settings"];
    assert_eq!(settings["stitchType"], "tatami");
    assert_eq!(settings["pullCompensation"], 0.25);
    assert_eq!(settings["stitchLength"], 2.5);
    assert_eq!(settings["densityEnd"], 0.6);
    assert_eq!(json["layers"][0]["paths"][0][1][0], 12.5);
}

#[test]
fn test_unknown_hoop_keeps_default() {
    let mut project = ProjectFile::new("Odd");
    project.hoop_id = Some("museum-frame".to_string());
    assert_eq!(project.to_store().selected_hoop_id(), Some("singer-s"));
}

#[test]
fn test_invalid_settings_fail_to_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    let mut project = ProjectFile::new("Bad");
    let mut layer = layer_with_settings();
    if let Some(s) = layer.settings.as_mut() {
        s.density = 0.0;
    }
    project.layers.push(layer);
    project.save_to_file(&path).unwrap();

    let err = ProjectFile::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Invalid settings on layer l1"));
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let err = ProjectFile::load_from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read project file"));
}
