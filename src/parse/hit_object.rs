//! Parser voor losse hit-object regels.
//!
//! Een regel heeft de vorm `x,y,tijd,type,geluid,curve,herhalingen,lengte,...`.
//! Alleen de eerste acht velden zijn hier van belang; de rest wordt genegeerd.

use std::num::{ParseFloatError, ParseIntError};

use serde::Serialize;
use thiserror::Error;

use crate::geom::{CurveKind, CurveModel, GeometryError, Vector2};

/// Result type voor het parsen van hit-objects.
pub type ParseResult<T> = Result<T, ParseError>;

const CIRCLE_BIT: u32 = 1;
const SLIDER_BIT: u32 = 1 << 1;
const SPINNER_BIT: u32 = 1 << 3;

const FIELD_X: usize = 0;
const FIELD_Y: usize = 1;
const FIELD_TIME: usize = 2;
const FIELD_TYPE: usize = 3;
const FIELD_CURVE: usize = 5;
const FIELD_LENGTH: usize = 7;

/// Beschrijft fouten tijdens het parsen van een hit-object.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Een verplicht veld ontbreekt in de regel.
    #[error("veld `{0}` ontbreekt")]
    MissingField(&'static str),
    /// Een geheel getal kon niet gelezen worden.
    #[error("ongeldig geheel getal: {0}")]
    Int(#[from] ParseIntError),
    /// Een kommagetal kon niet gelezen worden.
    #[error("ongeldige numerieke waarde: {0}")]
    Float(#[from] ParseFloatError),
    /// Een controlepunt heeft niet de vorm `x:y`.
    #[error("ongeldig controlepunt `{0}`")]
    InvalidPoint(String),
    #[error("onbekend curvetype `{0}`")]
    UnknownCurveType(char),
    #[error("curvebeschrijving zonder type")]
    MissingCurveType,
    #[error("curvebeschrijving zonder controlepunten")]
    MissingControlPoints,
    /// De regel is geldig maar beschrijft geen slider.
    #[error("regel beschrijft geen slider maar een {0:?}")]
    NotASlider(ObjectKind),
    /// Het type-bitmasker bevat geen cirkel, slider of spinner.
    #[error("niet-ondersteund objecttype {0}")]
    UnsupportedObject(u32),
    /// De curve kon niet geëvalueerd worden.
    #[error("ongeldige slidergeometrie: {0}")]
    Geometry(#[from] GeometryError),
}

/// Soort hit-object volgens het type-bitmasker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Circle,
    Slider,
    Spinner,
}

impl ObjectKind {
    /// Bepaalt de soort; spinner gaat voor slider, slider voor cirkel.
    pub fn classify(object_type: u32) -> ParseResult<Self> {
        if object_type & SPINNER_BIT != 0 {
            Ok(Self::Spinner)
        } else if object_type & SLIDER_BIT != 0 {
            Ok(Self::Slider)
        } else if object_type & CIRCLE_BIT != 0 {
            Ok(Self::Circle)
        } else {
            Err(ParseError::UnsupportedObject(object_type))
        }
    }
}

/// Een slider met zijn curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    pub position: Vector2,
    pub time: i64,
    pub object_type: u32,
    pub curve: CurveModel,
}

impl Slider {
    #[must_use]
    pub const fn head(&self) -> Vector2 {
        self.position
    }

    /// Eindpunt van de slider na het afleggen van de opgegeven lengte.
    pub fn tail(&self) -> Result<Vector2, GeometryError> {
        self.curve.endpoint_at_length()
    }

    /// Kop, staart en het afgelegde pad in één structuur.
    pub fn path(&self) -> Result<SliderPath, GeometryError> {
        Ok(SliderPath {
            kind: self.curve.kind().tag(),
            head: self.head(),
            tail: self.tail()?,
            points: self.curve.trace_points()?.collect(),
        })
    }
}

/// Serialiseerbare weergave van een slider voor de frontend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderPath {
    pub kind: char,
    pub head: Vector2,
    pub tail: Vector2,
    pub points: Vec<Vector2>,
}

/// Een geparst hit-object.
#[derive(Debug, Clone, PartialEq)]
pub enum HitObject {
    Circle { position: Vector2, time: i64 },
    Slider(Slider),
    Spinner { time: i64 },
}

impl HitObject {
    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        match self {
            Self::Circle { .. } => ObjectKind::Circle,
            Self::Slider(_) => ObjectKind::Slider,
            Self::Spinner { .. } => ObjectKind::Spinner,
        }
    }

    #[must_use]
    pub const fn time(&self) -> i64 {
        match self {
            Self::Circle { time, .. } | Self::Spinner { time } => *time,
            Self::Slider(slider) => slider.time,
        }
    }

    /// Punten die in de dichtheidskaart terechtkomen: één voor een cirkel,
    /// kop en staart voor een slider, geen voor een spinner.
    pub fn points(&self) -> ParseResult<Vec<Vector2>> {
        match self {
            Self::Circle { position, .. } => Ok(vec![*position]),
            Self::Slider(slider) => Ok(vec![slider.head(), slider.tail()?]),
            Self::Spinner { .. } => Ok(Vec::new()),
        }
    }
}

/// Leest één regel uit de `[HitObjects]` sectie.
pub fn parse_hit_object(line: &str) -> ParseResult<HitObject> {
    let fields: Vec<&str> = line.trim().split(',').collect();
    let field = |index: usize, name: &'static str| {
        fields
            .get(index)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .ok_or(ParseError::MissingField(name))
    };

    let x: i32 = field(FIELD_X, "x")?.parse()?;
    let y: i32 = field(FIELD_Y, "y")?.parse()?;
    let position = Vector2::new(f64::from(x), f64::from(y));
    let time: i64 = field(FIELD_TIME, "time")?.parse()?;
    let object_type: u32 = field(FIELD_TYPE, "type")?.parse()?;

    match ObjectKind::classify(object_type)? {
        ObjectKind::Spinner => Ok(HitObject::Spinner { time }),
        ObjectKind::Circle => Ok(HitObject::Circle { position, time }),
        ObjectKind::Slider => {
            let (kind, declared) = parse_curve(field(FIELD_CURVE, "curve")?)?;
            let length: f64 = field(FIELD_LENGTH, "length")?.parse()?;

            if kind == CurveKind::PerfectCircle && declared.len() != 2 {
                log::debug!(
                    "perfect-circle slider op {time} met {} punten wordt als cirkel behandeld",
                    declared.len()
                );
                return Ok(HitObject::Circle { position, time });
            }

            let mut points = Vec::with_capacity(declared.len() + 1);
            points.push(position);
            points.extend(declared);
            let curve = kind.build(&points, length)?;
            Ok(HitObject::Slider(Slider {
                position,
                time,
                object_type,
                curve,
            }))
        }
    }
}

/// Leest een regel die een slider moet zijn.
pub fn parse_slider(line: &str) -> ParseResult<Slider> {
    match parse_hit_object(line)? {
        HitObject::Slider(slider) => Ok(slider),
        other => Err(ParseError::NotASlider(other.kind())),
    }
}

/// Leest een curvebeschrijving `T|x:y|x:y...` naar het curvetype en de
/// gedeclareerde controlepunten (zonder de sliderpositie). Coördinaten zijn
/// gehele getallen.
pub fn parse_curve(descriptor: &str) -> ParseResult<(CurveKind, Vec<Vector2>)> {
    let mut tokens = descriptor.trim().split('|');
    let tag = tokens
        .next()
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .ok_or(ParseError::MissingCurveType)?;

    let mut chars = tag.chars();
    let kind = match (chars.next(), chars.next()) {
        (Some(first), None) => {
            CurveKind::from_tag(first).ok_or(ParseError::UnknownCurveType(first))?
        }
        (Some(first), Some(_)) => return Err(ParseError::UnknownCurveType(first)),
        (None, _) => return Err(ParseError::MissingCurveType),
    };

    let points = tokens.map(parse_point).collect::<ParseResult<Vec<_>>>()?;
    if points.is_empty() {
        return Err(ParseError::MissingControlPoints);
    }
    Ok((kind, points))
}

fn parse_point(token: &str) -> ParseResult<Vector2> {
    let invalid = || ParseError::InvalidPoint(token.to_owned());
    let (x, y) = token.trim().split_once(':').ok_or_else(invalid)?;
    let x: i32 = x.trim().parse().map_err(|_| invalid())?;
    let y: i32 = y.trim().parse().map_err(|_| invalid())?;
    Ok(Vector2::new(f64::from(x), f64::from(y)))
}
