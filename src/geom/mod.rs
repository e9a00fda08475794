//! Slider curve engine.
//!
//! Four curve families share one contract: given the control points and the
//! declared path length, find where the slider ends and which points it walks
//! through on the way.

mod bezier;
mod catmull;
mod circle;
mod core;
mod curve;
mod error;
mod linear;

pub use bezier::{
    BEZIER_TOLERANCE, BezierPath, BezierTrace, bezier_endpoint, flatten, is_flat_enough,
    split_segments, subdivide,
};
pub use catmull::{
    CatmullRomCurve, CatmullRomPath, CatmullRomTrace, EXTRAPOLATION_STEPS,
    MAX_EXTRAPOLATION_SAMPLES, SAMPLE_SPACING, catmull_endpoint, padded_knots,
};
pub use circle::{ARC_TRACE_STEPS, Circle, Orientation, PerfectCirclePath, circle_endpoint};
pub use core::{Tolerance, Vector2};
pub use curve::{CurveKind, CurveModel, Trace};
pub use error::GeometryError;
pub use linear::{LinearPath, linear_endpoint, linear_trace};

#[cfg(test)]
mod tests;
