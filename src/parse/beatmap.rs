//! Verwerking van een volledig `.osu`-bestand tot een dichtheidskaart.

use serde::Serialize;

use crate::geom::Vector2;
use crate::heatmap::DensityGrid;

use super::hit_object::{ObjectKind, ParseResult, parse_hit_object};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const HIT_OBJECTS_HEADER: &str = "[HitObjects]";

/// Tellingen na het verwerken van een beatmap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BeatmapSummary {
    pub circles: usize,
    pub sliders: usize,
    pub spinners: usize,
    /// Regels die niet verwerkt konden worden.
    pub skipped: usize,
    /// Punten die in de kaart terechtkwamen.
    pub points: usize,
}

impl BeatmapSummary {
    #[must_use]
    pub const fn objects(&self) -> usize {
        self.circles + self.sliders + self.spinners
    }
}

/// Getrimde regels uit de `[HitObjects]` sectie, tot de eerste lege regel of
/// de volgende sectiekop.
pub fn hit_object_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .skip_while(|line| *line != HIT_OBJECTS_HEADER)
        .skip(1)
        .take_while(|line| !line.is_empty() && !line.starts_with('['))
}

/// Parseert elke hit-object regel naar zijn soort en de punten voor de kaart.
///
/// Het resultaat blijft per regel staan zodat een fout object de rest niet tegenhoudt.
pub fn locate_hit_objects(text: &str) -> Vec<ParseResult<(ObjectKind, Vec<Vector2>)>> {
    let lines: Vec<&str> = hit_object_lines(text).collect();
    log::debug!("{} hit-object regels gevonden", lines.len());
    locate_lines(lines)
}

fn locate(line: &str) -> ParseResult<(ObjectKind, Vec<Vector2>)> {
    let object = parse_hit_object(line)?;
    Ok((object.kind(), object.points()?))
}

#[cfg(feature = "parallel")]
fn locate_lines(lines: Vec<&str>) -> Vec<ParseResult<(ObjectKind, Vec<Vector2>)>> {
    lines.into_par_iter().map(locate).collect()
}

#[cfg(not(feature = "parallel"))]
fn locate_lines(lines: Vec<&str>) -> Vec<ParseResult<(ObjectKind, Vec<Vector2>)>> {
    lines.into_iter().map(locate).collect()
}

/// Telt de cirkels en slider-uiteinden van `text` op in `grid`.
///
/// Regels die niet geparst of geëvalueerd kunnen worden, worden gelogd en overgeslagen.
pub fn accumulate_beatmap(text: &str, grid: &mut DensityGrid) -> BeatmapSummary {
    let mut summary = BeatmapSummary::default();

    for (index, located) in locate_hit_objects(text).into_iter().enumerate() {
        let (kind, points) = match located {
            Ok(located) => located,
            Err(err) => {
                log::warn!("hit-object {index} overgeslagen: {err}");
                summary.skipped += 1;
                continue;
            }
        };

        match kind {
            ObjectKind::Circle => summary.circles += 1,
            ObjectKind::Slider => summary.sliders += 1,
            ObjectKind::Spinner => summary.spinners += 1,
        }
        for point in points {
            if grid.add_point(point) {
                summary.points += 1;
            }
        }
    }

    summary
}
