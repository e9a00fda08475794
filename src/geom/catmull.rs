//! Catmull-Rom sliders.
//!
//! The knots are padded by repeating the first and last knot, then every window
//! of four consecutive knots yields one uniform cubic running between its two
//! interior knots.

use super::core::Vector2;
use super::error::{GeometryError, check_finite, validate_length};
use super::linear::{linear_endpoint, linear_trace};

/// Playfield distance covered by one sample between two interior knots.
pub const SAMPLE_SPACING: f64 = 4.0;

/// Parameter resolution used when sampling past the end of the last curve.
pub const EXTRAPOLATION_STEPS: usize = 50;

/// Upper bound on samples taken past the last knot. A fully collapsed final
/// window never moves, so the walk needs a hard stop.
pub const MAX_EXTRAPOLATION_SAMPLES: usize = 10_000;

/// Cubic `a + b·t + c·t² + d·t³` for one window of four knots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatmullRomCurve {
    a: Vector2,
    b: Vector2,
    c: Vector2,
    d: Vector2,
}

impl CatmullRomCurve {
    #[must_use]
    pub fn new([p0, p1, p2, p3]: [Vector2; 4]) -> Self {
        Self {
            a: p1,
            b: (p2 - p0) / 2.0,
            c: p0 - p1 * 2.5 + p2 * 2.0 - p3 * 0.5,
            d: p0 * -0.5 + p1 * 1.5 - p2 * 1.5 + p3 * 0.5,
        }
    }

    #[must_use]
    pub fn point_at(&self, t: f64) -> Vector2 {
        let t2 = t * t;
        let t3 = t2 * t;
        self.a + self.b * t + self.c * t2 + self.d * t3
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    curve: CatmullRomCurve,
    samples: usize,
}

impl Window {
    fn new(knots: [Vector2; 4]) -> Self {
        let span = knots[1].distance_to(knots[2]);
        // Truncation is the intended resolution heuristic.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let samples = (span / SAMPLE_SPACING) as usize;
        Self {
            curve: CatmullRomCurve::new(knots),
            samples: samples.max(1),
        }
    }
}

/// Knots with the first and last knot repeated, unless they already are.
#[must_use]
pub fn padded_knots(knots: &[Vector2]) -> Vec<Vector2> {
    let mut padded = Vec::with_capacity(knots.len() + 2);
    if knots.len() >= 2 && knots[0] != knots[1] {
        padded.push(knots[0]);
    }
    padded.extend_from_slice(knots);
    if let [.., before_last, last] = knots {
        if before_last != last {
            padded.push(*last);
        }
    }
    padded
}

/// Number of distinct points in `points`, counting no further than `limit`.
fn count_distinct(points: &[Vector2], limit: usize) -> usize {
    let mut seen: Vec<Vector2> = Vec::with_capacity(limit);
    for point in points {
        if !seen.contains(point) {
            if seen.len() == limit {
                return limit + 1;
            }
            seen.push(*point);
        }
    }
    seen.len()
}

/// A Catmull-Rom slider: the origin followed by every declared knot.
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRomPath {
    knots: Vec<Vector2>,
    length: f64,
}

impl CatmullRomPath {
    /// `knots` must start with the slider origin.
    pub fn new(knots: Vec<Vector2>, length: f64) -> Result<Self, GeometryError> {
        match knots.len() {
            0 => return Err(GeometryError::EmptyControlPoints),
            1 => {
                return Err(GeometryError::TooFewPoints {
                    expected: 2,
                    found: 1,
                });
            }
            _ => {}
        }
        check_finite(&knots)?;
        let length = validate_length(length)?;
        Ok(Self { knots, length })
    }

    #[must_use]
    pub fn knots(&self) -> &[Vector2] {
        &self.knots
    }

    #[must_use]
    pub fn origin(&self) -> Vector2 {
        self.knots[0]
    }

    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }

    /// The polyline to walk instead when the knots hold only two distinct points.
    ///
    /// Consecutive repeats are merged, so `[A, A, B]` walks `A -> B` and
    /// `[A, B, A]` walks there and back.
    pub fn as_line(&self) -> Result<Option<Vec<Vector2>>, GeometryError> {
        let mut line = self.knots.clone();
        line.dedup();
        match count_distinct(&line, 2) {
            1 => Err(GeometryError::DegenerateSegment { index: 0 }),
            2 => Ok(Some(line)),
            _ => Ok(None),
        }
    }

    pub fn endpoint(&self) -> Result<Vector2, GeometryError> {
        if let Some(line) = self.as_line()? {
            return linear_endpoint(&line, self.length);
        }
        let last = self
            .interpolated_points()?
            .last()
            .unwrap_or_else(|| self.origin());
        Ok(last.round())
    }

    /// Sampled points from the origin until the length budget is used up.
    pub fn interpolated_points(&self) -> Result<CatmullRomTrace, GeometryError> {
        if let Some(line) = self.as_line()? {
            let points = linear_trace(&line, self.length)?;
            return Ok(CatmullRomTrace {
                state: TraceState::Line(points.into_iter()),
            });
        }

        let windows = padded_knots(&self.knots)
            .windows(4)
            .map(|w| Window::new([w[0], w[1], w[2], w[3]]))
            .collect();
        Ok(CatmullRomTrace {
            state: TraceState::Spline(SplineWalk {
                windows,
                window: 0,
                sample: 0,
                extrapolated: 0,
                last: None,
                remaining: self.length,
                exhausted: false,
            }),
        })
    }
}

/// Endpoint of the Catmull-Rom slider through `knots`, snapped to integer coordinates.
pub fn catmull_endpoint(knots: &[Vector2], length: f64) -> Result<Vector2, GeometryError> {
    CatmullRomPath::new(knots.to_vec(), length)?.endpoint()
}

/// Lazily sampled Catmull-Rom path. Yields the origin first.
#[derive(Debug, Clone)]
pub struct CatmullRomTrace {
    state: TraceState,
}

#[derive(Debug, Clone)]
enum TraceState {
    Line(std::vec::IntoIter<Vector2>),
    Spline(SplineWalk),
}

#[derive(Debug, Clone)]
struct SplineWalk {
    windows: Vec<Window>,
    window: usize,
    sample: usize,
    extrapolated: usize,
    last: Option<Vector2>,
    remaining: f64,
    exhausted: bool,
}

impl SplineWalk {
    fn next_sample(&mut self) -> Option<Vector2> {
        if let Some(current) = self.windows.get(self.window) {
            let t = self.sample as f64 / current.samples as f64;
            let point = current.curve.point_at(t);
            self.sample += 1;
            if self.sample == current.samples {
                self.window += 1;
                self.sample = 0;
            }
            return Some(point);
        }

        let last = self.windows.last()?;
        if self.extrapolated >= MAX_EXTRAPOLATION_SAMPLES {
            log::warn!("catmull-rom extrapolation stopped with {} left", self.remaining);
            return None;
        }
        let step = EXTRAPOLATION_STEPS + self.extrapolated;
        self.extrapolated += 1;
        Some(last.curve.point_at(step as f64 / EXTRAPOLATION_STEPS as f64))
    }
}

impl Iterator for SplineWalk {
    type Item = Vector2;

    fn next(&mut self) -> Option<Vector2> {
        if self.exhausted {
            return None;
        }
        let Some(point) = self.next_sample() else {
            self.exhausted = true;
            return None;
        };

        self.remaining -= self.last.map_or(0.0, |last| last.distance_to(point));
        self.last = Some(point);
        if self.remaining <= 0.0 {
            self.exhausted = true;
        }
        Some(point)
    }
}

impl Iterator for CatmullRomTrace {
    type Item = Vector2;

    fn next(&mut self) -> Option<Vector2> {
        match &mut self.state {
            TraceState::Line(points) => points.next(),
            TraceState::Spline(walk) => walk.next(),
        }
    }
}
