use stitchkit_core::{GeometryError, Point};
use stitchkit_designer::satin::generate_satin;

#[test]
fn test_zero_length_centerline_is_safe() {
    let line = [Point::new(5.0, 5.0), Point::new(5.0, 5.0)];
    let stitches = generate_satin(&line, 4.0, 0.4).unwrap();
    assert!(stitches.iter().all(|p| p.is_finite()));
}

#[test]
fn test_degenerate_segment_inside_polyline() {
    let line = [
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(2.0, 0.0),
    ];
    let stitches = generate_satin(&line, 2.0, 0.5).unwrap();
    // two rungs per unit segment, one closing rung
    assert_eq!(stitches.len(), 5);
    assert!(stitches.iter().all(|p| p.is_finite()));
}

#[test]
fn test_alternation_continues_across_segments() {
    let line = [
        Point::new(0.0, 0.0),
        Point::new(0.4, 0.0),
        Point::new(0.4, 0.4),
    ];
    let stitches = generate_satin(&line, 2.0, 0.4).unwrap();
    assert_eq!(stitches.len(), 3);
    // first rung on the +normal side of a rightward segment
    assert!((stitches[0].y - 1.0).abs() < 1e-9);
    // second rung on the -normal side of an upward segment: normal is (-1, 0)
    assert!((stitches[1].x - 1.4).abs() < 1e-9);
}

#[test]
fn test_invalid_parameters() {
    let line = [Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
    assert!(matches!(
        generate_satin(&line[..1], 4.0, 0.4),
        Err(GeometryError::TooFewPoints { required: 2, actual: 1 })
    ));
    assert!(matches!(
        generate_satin(&line, 0.0, 0.4),
        Err(GeometryError::NonPositive { field: "width", .. })
    ));
    assert!(matches!(
        generate_satin(&line, 4.0, -0.4),
        Err(GeometryError::NonPositive { field: "density", .. })
    ));
    assert!(generate_satin(&line, f64::NAN, 0.4).is_err());
}

#[test]
fn test_deterministic() {
    let line = [Point::new(0.0, 0.0), Point::new(3.0, 4.0), Point::new(9.0, 1.0)];
    assert_eq!(
        generate_satin(&line, 4.0, 0.4).unwrap(),
        generate_satin(&line, 4.0, 0.4).unwrap()
    );
}
