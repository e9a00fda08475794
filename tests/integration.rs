use std::f64::consts::PI;

use slider_heatmap::geom::{CurveKind, Vector2};
use slider_heatmap::heatmap::{DensityGrid, GridOptions, render_table};
use slider_heatmap::parse::{self, BeatmapSummary, HitObject, ObjectKind, ParseError};
use slider_heatmap::{HeatmapEngine, trace_slider};

fn beatmap() -> String {
    format!(
        "osu file format v14

[General]
AudioFilename: audio.mp3
Mode: 0

[Difficulty]
SliderMultiplier:1.4

[HitObjects]
256,192,1000,5,0,0:0:0:0:
0,0,1500,2,0,L|100:0,1,50
0,0,2000,6,0,B|0:100|100:100,1,40
0,0,2500,2,0,P|50:50|100:0,1,{quarter}
0,0,3000,2,0,C|100:0|100:-100,1,50
256,192,3500,12,0,5000,0:0:0:0:
0,0,6000,2,0,P|50:0|100:0,1,30
10,10,6500,2,0,Z|20:20,1,10
10,10,7000,128,0,8000:0:0:0:0:
",
        quarter = PI * 25.0
    )
}

#[test]
fn engine_processes_beatmap_and_skips_bad_objects() {
    let mut engine = HeatmapEngine::new();
    engine.load_beatmap(&beatmap());

    let summary = engine.last_summary().copied().unwrap();
    assert_eq!(
        summary,
        BeatmapSummary {
            circles: 1,
            sliders: 4,
            spinners: 1,
            skipped: 3,
            points: 9,
        }
    );
    assert_eq!(engine.density().total(), 9);
    assert_eq!(engine.density().dropped(), 0);
}

#[test]
fn slider_ends_land_in_expected_cells() {
    let mut grid = DensityGrid::new(GridOptions::default()).unwrap();
    accumulate(&mut grid);

    // Four slider heads at the origin.
    assert_eq!(grid.count(0, 0), Some(4));
    // Circle at the playfield centre.
    assert_eq!(grid.count(7, 5), Some(1));
    // Linear tail (50, 0) and Catmull-Rom tail (52, 6).
    assert_eq!(grid.count(1, 0), Some(2));
    // Perfect-circle tail (50, 50).
    assert_eq!(grid.count(1, 1), Some(1));
    // Bezier tail stops short of (5, 39).
    assert_eq!(grid.count(0, 1), Some(1));
}

fn accumulate(grid: &mut DensityGrid) -> BeatmapSummary {
    parse::accumulate_beatmap(&beatmap(), grid)
}

#[test]
fn each_hit_object_keeps_its_own_result() {
    let located = parse::locate_hit_objects(&beatmap());
    assert_eq!(located.len(), 9);

    let kinds: Vec<Option<ObjectKind>> = located
        .iter()
        .map(|entry| entry.as_ref().ok().map(|(kind, _)| *kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            Some(ObjectKind::Circle),
            Some(ObjectKind::Slider),
            Some(ObjectKind::Slider),
            Some(ObjectKind::Slider),
            Some(ObjectKind::Slider),
            Some(ObjectKind::Spinner),
            None,
            None,
            None,
        ]
    );
    assert!(matches!(located[6], Err(ParseError::Geometry(_))));
    assert_eq!(located[7], Err(ParseError::UnknownCurveType('Z')));
    assert_eq!(located[8], Err(ParseError::UnsupportedObject(128)));
}

#[test]
fn circle_slider_tail_turns_a_quarter() {
    let line = format!("0,0,0,2,0,P|50:50|100:0,1,{}", PI * 25.0);
    let path = trace_slider(&line).unwrap();
    assert_eq!(path.kind, 'P');
    assert_eq!(path.head, Vector2::new(0.0, 0.0));
    assert_eq!(path.tail, Vector2::new(50.0, 50.0));
    assert_eq!(path.points.len(), 51);
}

#[test]
fn bezier_slider_stops_within_budget() {
    let object = parse::parse_hit_object("0,0,0,2,0,B|0:100|100:100,1,40").unwrap();
    let HitObject::Slider(slider) = object else {
        panic!("expected slider");
    };
    assert_eq!(slider.curve.kind(), CurveKind::Bezier);

    let points: Vec<Vector2> = slider.curve.trace_points().unwrap().collect();
    let walked: f64 = points.windows(2).map(|w| w[0].distance_to(w[1])).sum();
    assert!(walked <= 40.0);
    assert_eq!(slider.tail().unwrap(), *points.last().unwrap());
}

#[test]
fn custom_grid_renders_as_table() {
    let mut engine = HeatmapEngine::from_options(GridOptions {
        columns: 2,
        rows: 2,
        ..GridOptions::default()
    })
    .unwrap();
    engine.load_beatmap(&beatmap());

    let table = render_table(engine.density());
    assert_eq!(table.lines().count(), 3);
    assert_eq!(engine.density().total(), 9);
    assert_eq!(engine.density().count(0, 0), Some(9));
}

#[test]
fn json_report_contains_cells() {
    let mut grid = DensityGrid::new(GridOptions::default()).unwrap();
    let summary = accumulate(&mut grid);
    let json = serde_json::json!({ "summary": summary, "grid": grid });
    assert_eq!(json["summary"]["sliders"], 4);
    assert_eq!(json["grid"]["cells"].as_array().map(Vec::len), Some(11));
}
