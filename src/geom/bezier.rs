//! Bézier chain sliders, flattened by midpoint subdivision.
//!
//! Each segment of degree two or more is split in half until every piece
//! passes [`is_flat_enough`]. A flat piece then contributes every other control
//! point (a cut-down control polygon) to the walked path. Walking never
//! interpolates inside a flattened piece: it stops at the last point that still
//! fits the length budget.

use std::collections::VecDeque;

use super::core::Vector2;
use super::error::{GeometryError, check_finite, validate_length};

/// Maximum deviation, in playfield units, tolerated by the flatness test.
pub const BEZIER_TOLERANCE: f64 = 0.25;

/// A chain of Bézier segments joined where an anchor point is repeated.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierPath {
    segments: Vec<Vec<Vector2>>,
    length: f64,
}

impl BezierPath {
    /// Every segment needs at least two control points.
    pub fn new(segments: Vec<Vec<Vector2>>, length: f64) -> Result<Self, GeometryError> {
        check_segments(&segments)?;
        let length = validate_length(length)?;
        Ok(Self { segments, length })
    }

    /// Builds a chain from a flat list of control points starting at the slider origin.
    ///
    /// Single-point pieces left behind by repeated anchors carry no length and are dropped.
    pub fn from_control_points(points: &[Vector2], length: f64) -> Result<Self, GeometryError> {
        let mut segments = split_segments(points);
        let before = segments.len();
        segments.retain(|segment| segment.len() >= 2);
        if segments.len() != before {
            log::debug!(
                "dropped {} single-point bezier segment(s)",
                before - segments.len()
            );
        }
        Self::new(segments, length)
    }

    #[must_use]
    pub fn segments(&self) -> &[Vec<Vector2>] {
        &self.segments
    }

    #[must_use]
    pub fn origin(&self) -> Vector2 {
        self.segments[0][0]
    }

    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }

    #[must_use]
    pub fn trace(&self) -> BezierTrace<'_> {
        BezierTrace::new(&self.segments, self.length)
    }

    /// Last point of [`Self::trace`].
    #[must_use]
    pub fn endpoint(&self) -> Vector2 {
        self.trace().last().unwrap_or_else(|| self.origin())
    }
}

/// Last point reached when walking `segments` for `length` units.
pub fn bezier_endpoint(segments: &[Vec<Vector2>], length: f64) -> Result<Vector2, GeometryError> {
    check_segments(segments)?;
    let length = validate_length(length)?;
    let origin = segments[0][0];
    Ok(BezierTrace::new(segments, length).last().unwrap_or(origin))
}

fn check_segments(segments: &[Vec<Vector2>]) -> Result<(), GeometryError> {
    if segments.is_empty() {
        return Err(GeometryError::EmptyControlPoints);
    }
    if let Some(index) = segments.iter().position(|segment| segment.len() < 2) {
        return Err(GeometryError::DegenerateSegment { index });
    }
    check_finite(segments.iter().flatten())
}

/// Splits control points into segments wherever two consecutive points are identical.
///
/// The repeated point ends one segment and starts the next.
#[must_use]
pub fn split_segments(points: &[Vector2]) -> Vec<Vec<Vector2>> {
    let mut segments: Vec<Vec<Vector2>> = Vec::new();
    for &point in points {
        match segments.last_mut() {
            Some(current) if current.last() != Some(&point) => current.push(point),
            _ => segments.push(vec![point]),
        }
    }
    segments
}

/// Second-difference flatness test over all interior control points.
#[must_use]
pub fn is_flat_enough(points: &[Vector2]) -> bool {
    let limit = (2.0 * BEZIER_TOLERANCE) * (2.0 * BEZIER_TOLERANCE);
    points
        .windows(3)
        .all(|w| (w[0] - w[1] * 2.0 + w[2]).squared_norm() <= limit)
}

/// Splits a Bézier curve at `t = 0.5` (de Casteljau).
#[must_use]
pub fn subdivide(points: &[Vector2]) -> (Vec<Vector2>, Vec<Vector2>) {
    let count = points.len();
    let mut mid = points.to_vec();
    let mut left = Vec::with_capacity(count);
    let mut right = vec![Vector2::ZERO; count];

    for i in 0..count {
        left.push(mid[0]);
        right[count - i - 1] = mid[count - i - 1];
        for j in 0..count - i - 1 {
            mid[j] = (mid[j] + mid[j + 1]) / 2.0;
        }
    }

    (left, right)
}

/// Flattens one curve into pieces that pass [`is_flat_enough`], in curve order.
///
/// A curve with a non-finite control point never becomes flat and yields no pieces.
#[must_use]
pub fn flatten(points: &[Vector2]) -> Vec<Vec<Vector2>> {
    if check_finite(points).is_err() {
        return Vec::new();
    }
    let mut worklist = vec![points.to_vec()];
    let mut pieces = Vec::new();
    while let Some(piece) = worklist.pop() {
        if is_flat_enough(&piece) {
            pieces.push(piece);
        } else {
            let (left, right) = subdivide(&piece);
            worklist.push(right);
            worklist.push(left);
        }
    }
    pieces
}

/// Points a flat piece adds to the walked path: every other control point, ending on the last.
fn cutdown_points(piece: &[Vector2]) -> impl Iterator<Item = Vector2> + '_ {
    let degree = piece.len() - 1;
    let first = if degree % 2 == 0 { 2 } else { 1 };
    piece.iter().skip(first).step_by(2).copied()
}

/// Lazily walks a Bézier chain until the length budget runs out.
///
/// The first item is always the origin of the chain.
#[derive(Debug, Clone)]
pub struct BezierTrace<'a> {
    segments: std::slice::Iter<'a, Vec<Vector2>>,
    /// Pending halves of the current segment; the back is processed first.
    worklist: Vec<Vec<Vector2>>,
    queue: VecDeque<Vector2>,
    jump: Option<Vector2>,
    finish: Option<Vector2>,
    last: Option<Vector2>,
    remaining: f64,
    exhausted: bool,
}

impl<'a> BezierTrace<'a> {
    fn new(segments: &'a [Vec<Vector2>], length: f64) -> Self {
        Self {
            segments: segments.iter(),
            worklist: Vec::new(),
            queue: VecDeque::new(),
            jump: segments.first().and_then(|segment| segment.first().copied()),
            finish: None,
            last: None,
            remaining: length,
            exhausted: segments.is_empty(),
        }
    }

    fn begin_segment(&mut self, segment: &[Vector2]) {
        let start = segment[0];
        if self.last != Some(start) {
            self.jump = Some(start);
        }

        match segment {
            [_] => {}
            [start, end] => {
                let span = start.distance_to(*end);
                if span > self.remaining {
                    self.finish = Some(start.lerp(*end, self.remaining / span).round());
                } else {
                    self.queue.push_back(*end);
                }
            }
            _ => self.worklist.push(segment.to_vec()),
        }
    }
}

impl Iterator for BezierTrace<'_> {
    type Item = Vector2;

    fn next(&mut self) -> Option<Vector2> {
        loop {
            if self.exhausted {
                return None;
            }

            if let Some(point) = self.jump.take() {
                self.last = Some(point);
                return Some(point);
            }

            if let Some(point) = self.finish.take() {
                self.last = Some(point);
                self.remaining = 0.0;
                self.exhausted = true;
                return Some(point);
            }

            if let Some(candidate) = self.queue.pop_front() {
                let step = self.last.map_or(0.0, |last| last.distance_to(candidate));
                if step > self.remaining {
                    self.exhausted = true;
                    return None;
                }
                self.remaining -= step;
                self.last = Some(candidate);
                return Some(candidate);
            }

            if let Some(piece) = self.worklist.pop() {
                if is_flat_enough(&piece) {
                    self.queue.extend(cutdown_points(&piece));
                } else {
                    let (left, right) = subdivide(&piece);
                    self.worklist.push(right);
                    self.worklist.push(left);
                }
                continue;
            }

            if self.remaining <= 0.0 {
                self.exhausted = true;
                return None;
            }

            match self.segments.next() {
                Some(segment) => self.begin_segment(segment),
                None => {
                    self.exhausted = true;
                    return None;
                }
            }
        }
    }
}
