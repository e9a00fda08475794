//! Parsers voor `.osu` beatmaps.

pub mod beatmap;
pub mod hit_object;

pub use beatmap::{BeatmapSummary, accumulate_beatmap, hit_object_lines, locate_hit_objects};
pub use hit_object::{
    HitObject, ObjectKind, ParseError, ParseResult, Slider, SliderPath, parse_curve,
    parse_hit_object, parse_slider,
};
