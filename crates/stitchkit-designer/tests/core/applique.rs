use stitchkit_core::{close_path, Point, StitchType};
use stitchkit_designer::applique::{generate_applique, generate_applique_with, AppliqueOptions};
use stitchkit_designer::satin::generate_satin;

fn square() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(20.0, 0.0),
        Point::new(20.0, 20.0),
        Point::new(0.0, 20.0),
    ]
}

#[test]
fn test_square_produces_three_layers() {
    let steps = generate_applique(&square()).unwrap();
    let types: Vec<_> = steps.iter().map(|s| s.step_type).collect();
    assert_eq!(types, vec![StitchType::Run, StitchType::Run, StitchType::Satin]);
    assert!(steps.iter().all(|s| s.paths.len() == 1));
}

#[test]
fn test_satin_border_covers_closing_edge() {
    let steps = generate_applique(&square()).unwrap();
    let border = &steps[2].paths[0];
    // four 20 mm edges at 0.4 mm plus the closing rung
    assert_eq!(border.len(), 4 * 50 + 1);
    assert_eq!(*border, generate_satin(&close_path(&square()), 4.0, 0.4).unwrap());
}

#[test]
fn test_custom_options() {
    let options = AppliqueOptions {
        satin_width: 6.0,
        satin_color: "#123456".to_string(),
        ..AppliqueOptions::default()
    };
    let steps = generate_applique_with(&square(), &options).unwrap();
    assert_eq!(steps[2].color, "#123456");
    let first = steps[2].paths[0][0];
    assert!((first.y - 3.0).abs() < 1e-9);
}

#[test]
fn test_layers_get_fresh_ids() {
    let options = AppliqueOptions::default();
    let layers: Vec<_> = generate_applique(&square())
        .unwrap()
        .into_iter()
        .map(|step| step.into_layer(&options))
        .collect();
    assert_eq!(layers.len(), 3);
    assert_ne!(layers[0].id, layers[1].id);
    assert_ne!(layers[1].id, layers[2].id);
    assert_eq!(layers[0].name, "Appliqué Position");
}
