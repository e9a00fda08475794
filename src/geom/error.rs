use super::core::Vector2;

/// Errors raised while evaluating slider geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("curve has no control points")]
    EmptyControlPoints,
    #[error("curve requires {expected} control points, got {found}")]
    TooFewPoints { expected: usize, found: usize },
    #[error("segment {index} has zero length")]
    DegenerateSegment { index: usize },
    #[error("no circle through collinear points")]
    CollinearPoints,
    #[error("path length must be finite and non-negative, got {0}")]
    InvalidLength(f64),
    #[error("control point {index} is not finite")]
    NonFinitePoint { index: usize },
}

pub(crate) fn validate_length(length: f64) -> Result<f64, GeometryError> {
    if length.is_finite() && length >= 0.0 {
        Ok(length)
    } else {
        Err(GeometryError::InvalidLength(length))
    }
}

/// Rejects the first non-finite point; `index` counts across all of `points`.
pub(crate) fn check_finite<'a>(
    points: impl IntoIterator<Item = &'a Vector2>,
) -> Result<(), GeometryError> {
    match points.into_iter().position(|point| !point.is_finite()) {
        Some(index) => Err(GeometryError::NonFinitePoint { index }),
        None => Ok(()),
    }
}
