use stitchkit_core::{Hoop, HoopShape, Point};
use stitchkit_designer::hoop_bounds::{validate, HoopValidator};

fn hoop_100() -> Hoop {
    Hoop::new("test", "Test 100", 100.0, 100.0, HoopShape::Rect)
}

#[test]
fn test_hoop_containment_scenario() {
    let hoop = hoop_100();
    assert!(validate(&hoop, 0.0, 0.0, 3.0).unwrap().within_bounds);
    assert!(!validate(&hoop, 151.0, 0.0, 3.0).unwrap().within_bounds);
    assert!(!validate(&hoop, 0.0, 151.0, 3.0).unwrap().within_bounds);
    assert!(!validate(&hoop, -151.0, 0.0, 3.0).unwrap().within_bounds);
    assert!(!validate(&hoop, 0.0, -151.0, 3.0).unwrap().within_bounds);
}

#[test]
fn test_non_square_hoop() {
    let hoop = Hoop::new("wide", "Wide", 180.0, 130.0, HoopShape::Rect);
    assert!(validate(&hoop, 89.0, 0.0, 1.0).unwrap().within_bounds);
    assert!(!validate(&hoop, 0.0, 66.0, 1.0).unwrap().within_bounds);
}

#[test]
fn test_invalid_hoop() {
    let hoop = Hoop::new("bad", "Bad", 0.0, 100.0, HoopShape::Rect);
    assert!(validate(&hoop, 0.0, 0.0, 3.0).is_err());
}

#[test]
fn test_validator_on_canvas() {
    let validator = HoopValidator::new(Some(hoop_100()), Point::new(400.0, 300.0), 3.0);
    assert!(validator.is_active());

    let inside = validator.check(Point::new(420.0, 280.0)).unwrap().unwrap();
    assert!(inside.within_bounds);
    assert_eq!(inside.opacity, 1.0);

    let outside = validator.check(Point::new(551.0, 300.0)).unwrap().unwrap();
    assert!(!outside.within_bounds);
    assert_eq!(outside.opacity, 0.5);
    assert_eq!(
        outside.warning(validator.hoop().unwrap()).as_deref(),
        Some("Design is outside Test 100 area")
    );
}
