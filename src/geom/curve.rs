use super::bezier::{BezierPath, BezierTrace};
use super::catmull::{CatmullRomPath, CatmullRomTrace};
use super::circle::PerfectCirclePath;
use super::core::Vector2;
use super::error::GeometryError;
use super::linear::LinearPath;

/// Curve family selected by the leading tag of a slider's curve descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveKind {
    Linear,
    Bezier,
    PerfectCircle,
    CatmullRom,
}

impl CurveKind {
    pub const ALL: [Self; 4] = [
        Self::Linear,
        Self::Bezier,
        Self::PerfectCircle,
        Self::CatmullRom,
    ];

    #[must_use]
    pub const fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'L' => Some(Self::Linear),
            'B' => Some(Self::Bezier),
            'P' => Some(Self::PerfectCircle),
            'C' => Some(Self::CatmullRom),
            _ => None,
        }
    }

    #[must_use]
    pub const fn tag(self) -> char {
        match self {
            Self::Linear => 'L',
            Self::Bezier => 'B',
            Self::PerfectCircle => 'P',
            Self::CatmullRom => 'C',
        }
    }

    /// Builds the model for this family from the origin-prefixed control points.
    pub fn build(self, points: &[Vector2], length: f64) -> Result<CurveModel, GeometryError> {
        Ok(match self {
            Self::Linear => CurveModel::Linear(LinearPath::new(points.to_vec(), length)?),
            Self::Bezier => CurveModel::Bezier(BezierPath::from_control_points(points, length)?),
            Self::PerfectCircle => {
                CurveModel::PerfectCircle(PerfectCirclePath::from_slice(points, length)?)
            }
            Self::CatmullRom => {
                CurveModel::CatmullRom(CatmullRomPath::new(points.to_vec(), length)?)
            }
        })
    }
}

/// A slider path. Immutable once built; every evaluation is a pure function of it.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveModel {
    Linear(LinearPath),
    Bezier(BezierPath),
    PerfectCircle(PerfectCirclePath),
    CatmullRom(CatmullRomPath),
}

impl CurveModel {
    #[must_use]
    pub const fn kind(&self) -> CurveKind {
        match self {
            Self::Linear(_) => CurveKind::Linear,
            Self::Bezier(_) => CurveKind::Bezier,
            Self::PerfectCircle(_) => CurveKind::PerfectCircle,
            Self::CatmullRom(_) => CurveKind::CatmullRom,
        }
    }

    #[must_use]
    pub fn origin(&self) -> Vector2 {
        match self {
            Self::Linear(path) => path.origin(),
            Self::Bezier(path) => path.origin(),
            Self::PerfectCircle(path) => path.origin(),
            Self::CatmullRom(path) => path.origin(),
        }
    }

    /// Declared traversal length of the slider.
    #[must_use]
    pub const fn path_length(&self) -> f64 {
        match self {
            Self::Linear(path) => path.length(),
            Self::Bezier(path) => path.length(),
            Self::PerfectCircle(path) => path.length(),
            Self::CatmullRom(path) => path.length(),
        }
    }

    /// Control points as declared, origin first.
    #[must_use]
    pub fn control_points(&self) -> Vec<Vector2> {
        match self {
            Self::Linear(path) => path.points().to_vec(),
            Self::Bezier(path) => {
                let mut points: Vec<Vector2> = Vec::new();
                for segment in path.segments() {
                    points.extend_from_slice(segment);
                }
                points
            }
            Self::PerfectCircle(path) => path.points().to_vec(),
            Self::CatmullRom(path) => path.knots().to_vec(),
        }
    }

    /// Where the slider ends after covering its path length.
    pub fn endpoint_at_length(&self) -> Result<Vector2, GeometryError> {
        match self {
            Self::Linear(path) => path.endpoint(),
            Self::Bezier(path) => Ok(path.endpoint()),
            Self::PerfectCircle(path) => path.endpoint(),
            Self::CatmullRom(path) => path.endpoint(),
        }
    }

    /// The walked path, origin first.
    pub fn trace_points(&self) -> Result<Trace<'_>, GeometryError> {
        Ok(match self {
            Self::Linear(path) => Trace::Points(path.trace()?.into_iter()),
            Self::Bezier(path) => Trace::Bezier(path.trace()),
            Self::PerfectCircle(path) => Trace::Points(path.trace()?.into_iter()),
            Self::CatmullRom(path) => Trace::CatmullRom(path.interpolated_points()?),
        })
    }
}

/// Point sequence produced by [`CurveModel::trace_points`]. Consumed once.
#[derive(Debug, Clone)]
pub enum Trace<'a> {
    Points(std::vec::IntoIter<Vector2>),
    Bezier(BezierTrace<'a>),
    CatmullRom(CatmullRomTrace),
}

impl Iterator for Trace<'_> {
    type Item = Vector2;

    fn next(&mut self) -> Option<Vector2> {
        match self {
            Self::Points(points) => points.next(),
            Self::Bezier(trace) => trace.next(),
            Self::CatmullRom(trace) => trace.next(),
        }
    }
}
