//! Perfect-circle sliders: an arc through three points.

use super::core::Vector2;
use super::error::{GeometryError, check_finite, validate_length};

/// Number of even angular steps used when tracing an arc.
pub const ARC_TRACE_STEPS: usize = 50;

/// Travel direction on screen, where the y axis points down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
}

impl Orientation {
    /// Orientation of the turn `a -> b -> c`.
    pub fn of(a: Vector2, b: Vector2, c: Vector2) -> Result<Self, GeometryError> {
        let turn = (b - a).cross(c - a);
        if turn > 0.0 {
            Ok(Self::Clockwise)
        } else if turn < 0.0 {
            Ok(Self::CounterClockwise)
        } else {
            Err(GeometryError::CollinearPoints)
        }
    }

    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Clockwise => 1.0,
            Self::CounterClockwise => -1.0,
        }
    }
}

/// The circle that generates a perfect-circle slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vector2,
    pub radius: f64,
    pub orientation: Orientation,
}

impl Circle {
    /// Solves the circle through three points.
    ///
    /// The circumcenter comes from barycentric weights built on the squared side
    /// lengths; a zero weight sum means the points are collinear.
    pub fn through(points: [Vector2; 3]) -> Result<Self, GeometryError> {
        let [a, b, c] = points;
        let side_a = (b - c).squared_norm();
        let side_b = (c - a).squared_norm();
        let side_c = (a - b).squared_norm();

        let weight_a = side_a * (side_b + side_c - side_a);
        let weight_b = side_b * (side_c + side_a - side_b);
        let weight_c = side_c * (side_a + side_b - side_c);
        let weight_sum = weight_a + weight_b + weight_c;
        if weight_sum == 0.0 || !weight_sum.is_finite() {
            return Err(GeometryError::CollinearPoints);
        }

        let center = (a * weight_a + b * weight_b + c * weight_c) / weight_sum;
        let orientation = Orientation::of(a, b, c)?;
        Ok(Self {
            center,
            radius: center.distance_to(a),
            orientation,
        })
    }

    /// Moves `origin` along the circle by an arc of `length` in the slider's direction.
    #[must_use]
    pub fn advance(&self, origin: Vector2, length: f64) -> Vector2 {
        let angle = self.orientation.sign() * length / self.radius;
        (origin - self.center).rotated(angle) + self.center
    }
}

/// An arc slider defined by its origin, a point it passes through, and its declared end.
#[derive(Debug, Clone, PartialEq)]
pub struct PerfectCirclePath {
    points: [Vector2; 3],
    length: f64,
}

impl PerfectCirclePath {
    pub fn new(points: [Vector2; 3], length: f64) -> Result<Self, GeometryError> {
        check_finite(&points)?;
        let length = validate_length(length)?;
        Ok(Self { points, length })
    }

    /// Takes the origin plus exactly two declared points.
    pub fn from_slice(points: &[Vector2], length: f64) -> Result<Self, GeometryError> {
        match points {
            [] => Err(GeometryError::EmptyControlPoints),
            &[a, b, c] => Self::new([a, b, c], length),
            _ => Err(GeometryError::TooFewPoints {
                expected: 3,
                found: points.len(),
            }),
        }
    }

    #[must_use]
    pub const fn points(&self) -> &[Vector2; 3] {
        &self.points
    }

    #[must_use]
    pub const fn origin(&self) -> Vector2 {
        self.points[0]
    }

    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }

    pub fn circle(&self) -> Result<Circle, GeometryError> {
        Circle::through(self.points)
    }

    pub fn endpoint(&self) -> Result<Vector2, GeometryError> {
        circle_endpoint(self.points, self.origin(), self.length)
    }

    /// The arc from the origin to the endpoint in [`ARC_TRACE_STEPS`] even steps.
    ///
    /// Intermediate points are left unrounded; the last one is the snapped endpoint.
    pub fn trace(&self) -> Result<Vec<Vector2>, GeometryError> {
        let circle = self.circle()?;
        let origin = self.origin();
        let mut trace: Vec<Vector2> = (0..ARC_TRACE_STEPS)
            .map(|step| {
                let travelled = self.length * step as f64 / ARC_TRACE_STEPS as f64;
                circle.advance(origin, travelled)
            })
            .collect();
        trace.push(circle.advance(origin, self.length).round());
        Ok(trace)
    }
}

/// Point reached after travelling `length` along the circle through `points`, starting at `origin`.
pub fn circle_endpoint(
    points: [Vector2; 3],
    origin: Vector2,
    length: f64,
) -> Result<Vector2, GeometryError> {
    check_finite(points.iter().chain(std::iter::once(&origin)))?;
    let length = validate_length(length)?;
    let circle = Circle::through(points)?;
    Ok(circle.advance(origin, length).round())
}
