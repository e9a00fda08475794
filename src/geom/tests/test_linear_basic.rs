use crate::geom::{GeometryError, LinearPath, Vector2, linear_endpoint, linear_trace};

fn v(x: f64, y: f64) -> Vector2 {
    Vector2::new(x, y)
}

#[test]
fn linear_two_points_half_length() {
    let end = linear_endpoint(&[v(0.0, 0.0), v(100.0, 0.0)], 50.0).unwrap();
    assert_eq!(end, v(50.0, 0.0));
}

#[test]
fn linear_full_length_ends_on_last_vertex() {
    let points = [v(0.0, 0.0), v(30.0, 40.0), v(30.0, 100.0)];
    assert_eq!(linear_endpoint(&points, 110.0).unwrap(), v(30.0, 100.0));
}

#[test]
fn linear_stops_inside_an_earlier_segment() {
    let points = [v(0.0, 0.0), v(30.0, 40.0), v(30.0, 100.0)];
    assert_eq!(linear_endpoint(&points, 25.0).unwrap(), v(15.0, 20.0));
}

#[test]
fn linear_overshoot_extrapolates_along_last_segment() {
    let points = [v(0.0, 0.0), v(10.0, 0.0), v(10.0, 10.0)];
    assert_eq!(linear_endpoint(&points, 30.0).unwrap(), v(10.0, 20.0));
}

#[test]
fn linear_endpoint_is_snapped_to_integers() {
    assert_eq!(
        linear_endpoint(&[v(0.0, 0.0), v(10.0, 10.0)], 5.0).unwrap(),
        v(4.0, 4.0)
    );
    assert_eq!(
        linear_endpoint(&[v(0.0, 0.0), v(3.0, 0.0)], 1.6).unwrap(),
        v(2.0, 0.0)
    );
}

#[test]
fn linear_zero_length_final_segment_is_rejected() {
    let points = [v(0.0, 0.0), v(10.0, 0.0), v(10.0, 0.0)];
    assert_eq!(
        linear_endpoint(&points, 20.0),
        Err(GeometryError::DegenerateSegment { index: 1 })
    );
    // Never reaching the collapsed segment is fine.
    assert_eq!(linear_endpoint(&points, 5.0).unwrap(), v(5.0, 0.0));
}

#[test]
fn linear_path_validates_inputs() {
    assert_eq!(
        LinearPath::new(Vec::new(), 10.0),
        Err(GeometryError::EmptyControlPoints)
    );
    assert_eq!(
        LinearPath::new(vec![v(1.0, 1.0)], 10.0),
        Err(GeometryError::TooFewPoints {
            expected: 2,
            found: 1
        })
    );
    assert!(matches!(
        LinearPath::new(vec![v(0.0, 0.0), v(1.0, 0.0)], -1.0),
        Err(GeometryError::InvalidLength(_))
    ));
    assert!(matches!(
        LinearPath::new(vec![v(0.0, 0.0), v(1.0, 0.0)], f64::NAN),
        Err(GeometryError::InvalidLength(_))
    ));
}

#[test]
fn linear_trace_lists_passed_vertices_then_endpoint() {
    let points = [v(0.0, 0.0), v(30.0, 40.0), v(30.0, 100.0)];
    let trace = linear_trace(&points, 80.0).unwrap();
    assert_eq!(trace, vec![v(0.0, 0.0), v(30.0, 40.0), v(30.0, 70.0)]);

    let path = LinearPath::new(points.to_vec(), 110.0).unwrap();
    assert_eq!(path.trace().unwrap().last().copied(), Some(v(30.0, 100.0)));
    assert_eq!(path.origin(), v(0.0, 0.0));
}

#[test]
fn linear_endpoint_is_idempotent_and_monotonic() {
    let path = LinearPath::new(vec![v(0.0, 0.0), v(100.0, 0.0)], 64.0).unwrap();
    assert_eq!(path.endpoint().unwrap(), path.endpoint().unwrap());

    let mut previous = f64::NEG_INFINITY;
    for step in 0..=20 {
        let end = linear_endpoint(&[v(0.0, 0.0), v(100.0, 0.0)], f64::from(step) * 5.0).unwrap();
        assert!(end.x >= previous);
        previous = end.x;
    }
}

#[test]
fn linear_rejects_non_finite_points() {
    assert_eq!(
        LinearPath::new(vec![v(0.0, 0.0), v(f64::NAN, 0.0)], 10.0),
        Err(GeometryError::NonFinitePoint { index: 1 })
    );
    assert_eq!(
        linear_endpoint(&[v(0.0, 0.0), v(10.0, 0.0), v(f64::INFINITY, 5.0)], 30.0),
        Err(GeometryError::NonFinitePoint { index: 2 })
    );
}
