use std::f64::consts::PI;

use crate::geom::{CurveKind, CurveModel, GeometryError, Vector2};

fn v(x: f64, y: f64) -> Vector2 {
    Vector2::new(x, y)
}

#[test]
fn curve_tags_round_trip() {
    for kind in CurveKind::ALL {
        assert_eq!(CurveKind::from_tag(kind.tag()), Some(kind));
    }
    assert_eq!(CurveKind::from_tag('X'), None);
    assert_eq!(CurveKind::from_tag('b'), None);
}

#[test]
fn build_selects_matching_variant() {
    let points = [v(0.0, 0.0), v(50.0, 50.0), v(100.0, 0.0)];
    for kind in CurveKind::ALL {
        let model = kind.build(&points, 20.0).unwrap();
        assert_eq!(model.kind(), kind);
        assert_eq!(model.origin(), v(0.0, 0.0));
        assert_eq!(model.path_length(), 20.0);
    }
}

#[test]
fn bezier_control_points_keep_repeated_anchors() {
    let points = [v(0.0, 0.0), v(10.0, 0.0), v(10.0, 0.0), v(10.0, 10.0)];
    let model = CurveKind::Bezier.build(&points, 15.0).unwrap();
    assert_eq!(model.control_points(), points.to_vec());
}

#[test]
fn trace_starts_at_origin_and_ends_at_endpoint() {
    let points = [v(0.0, 0.0), v(50.0, 50.0), v(100.0, 0.0)];
    for kind in [CurveKind::Linear, CurveKind::Bezier, CurveKind::PerfectCircle] {
        let model = kind.build(&points, 60.0).unwrap();
        let trace: Vec<Vector2> = model.trace_points().unwrap().collect();
        assert_eq!(trace.first().copied(), Some(model.origin()), "{kind:?}");
        assert_eq!(trace.last().copied(), Some(model.endpoint_at_length().unwrap()), "{kind:?}");
    }

    let model = CurveKind::CatmullRom.build(&points, 60.0).unwrap();
    let last = model.trace_points().unwrap().last().unwrap();
    assert_eq!(last.round(), model.endpoint_at_length().unwrap());
}

#[test]
fn perfect_circle_model_matches_scenario() {
    let model = CurveKind::PerfectCircle
        .build(&[v(0.0, 0.0), v(50.0, 50.0), v(100.0, 0.0)], PI * 25.0)
        .unwrap();
    assert!(matches!(model, CurveModel::PerfectCircle(_)));
    assert_eq!(model.endpoint_at_length().unwrap(), v(50.0, 50.0));
}

#[test]
fn collinear_perfect_circle_surfaces_error() {
    let model = CurveKind::PerfectCircle
        .build(&[v(0.0, 0.0), v(50.0, 0.0), v(100.0, 0.0)], 30.0)
        .unwrap();
    assert_eq!(model.endpoint_at_length(), Err(GeometryError::CollinearPoints));
    assert!(model.trace_points().is_err());
}

#[test]
fn perfect_circle_with_wrong_point_count_fails_to_build() {
    assert!(matches!(
        CurveKind::PerfectCircle.build(&[v(0.0, 0.0), v(5.0, 5.0)], 10.0),
        Err(GeometryError::TooFewPoints { .. })
    ));
}
