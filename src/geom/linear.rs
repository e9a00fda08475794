//! Straight polyline sliders.

use super::core::Vector2;
use super::error::{GeometryError, check_finite, validate_length};

/// A polyline slider: the origin followed by every declared point.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearPath {
    points: Vec<Vector2>,
    length: f64,
}

impl LinearPath {
    /// `points` must start with the slider origin.
    pub fn new(points: Vec<Vector2>, length: f64) -> Result<Self, GeometryError> {
        check_polyline(&points)?;
        let length = validate_length(length)?;
        Ok(Self { points, length })
    }

    #[must_use]
    pub fn points(&self) -> &[Vector2] {
        &self.points
    }

    #[must_use]
    pub fn origin(&self) -> Vector2 {
        self.points[0]
    }

    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }

    pub fn endpoint(&self) -> Result<Vector2, GeometryError> {
        linear_endpoint(&self.points, self.length)
    }

    pub fn trace(&self) -> Result<Vec<Vector2>, GeometryError> {
        linear_trace(&self.points, self.length)
    }
}

/// Point reached after walking `length` along the polyline, snapped to integer coordinates.
///
/// A budget longer than the polyline keeps going in the direction of the last segment.
pub fn linear_endpoint(points: &[Vector2], length: f64) -> Result<Vector2, GeometryError> {
    walk_polyline(points, length).map(|walk| walk.end)
}

/// Every vertex passed on the way to [`linear_endpoint`], followed by the endpoint itself.
pub fn linear_trace(points: &[Vector2], length: f64) -> Result<Vec<Vector2>, GeometryError> {
    let walk = walk_polyline(points, length)?;
    let mut trace = points[..walk.reached].to_vec();
    if trace.last() != Some(&walk.end) {
        trace.push(walk.end);
    }
    Ok(trace)
}

struct PolylineWalk {
    /// Number of leading vertices that lie on the walked part of the path.
    reached: usize,
    end: Vector2,
}

fn walk_polyline(points: &[Vector2], length: f64) -> Result<PolylineWalk, GeometryError> {
    check_polyline(points)?;
    let mut remaining = validate_length(length)?;
    let last_segment = points.len() - 2;

    for (index, pair) in points.windows(2).enumerate().take(last_segment) {
        let span = pair[0].distance_to(pair[1]);
        if span > remaining {
            return Ok(PolylineWalk {
                reached: index + 1,
                end: pair[0].lerp(pair[1], remaining / span).round(),
            });
        }
        remaining -= span;
    }

    let start = points[last_segment];
    let end = points[last_segment + 1];
    let span = start.distance_to(end);
    if span == 0.0 {
        return Err(GeometryError::DegenerateSegment {
            index: last_segment,
        });
    }

    Ok(PolylineWalk {
        reached: last_segment + 1,
        end: start.lerp(end, remaining / span).round(),
    })
}

fn check_polyline(points: &[Vector2]) -> Result<(), GeometryError> {
    match points.len() {
        0 => Err(GeometryError::EmptyControlPoints),
        1 => Err(GeometryError::TooFewPoints {
            expected: 2,
            found: 1,
        }),
        _ => check_finite(points),
    }
}
