#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;
pub mod heatmap;
pub mod parse;

use heatmap::{DensityGrid, GridError, GridOptions};
use parse::{BeatmapSummary, ParseError};
use serde::Serialize;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
#[wasm_bindgen]
pub async fn initialize_parallel(worker_count: Option<u32>) -> Result<(), JsError> {
    let threads = worker_count
        .map(|count| count.max(1) as usize)
        .or_else(|| {
            std::thread::available_parallelism()
                .map(|value| value.get())
                .ok()
        })
        .unwrap_or(1);

    wasm_bindgen_rayon::init_thread_pool(threads)
        .await
        .map_err(|err| JsError::new(&format!("kon rayon threadpool niet initialiseren: {err}")))
}

/// Publiek aanspreekpunt voor de frontend.
#[wasm_bindgen]
pub struct HeatmapEngine {
    grid: DensityGrid,
    summary: Option<BeatmapSummary>,
}

#[wasm_bindgen]
impl HeatmapEngine {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> HeatmapEngine {
        HeatmapEngine {
            grid: DensityGrid::default(),
            summary: None,
        }
    }

    /// Maak een engine met een eigen rasterindeling, bv. `{ columns: 30, rows: 22 }`.
    #[wasm_bindgen]
    pub fn with_options(options: JsValue) -> Result<HeatmapEngine, JsValue> {
        let options: GridOptions = serde_wasm_bindgen::from_value(options)
            .map_err(|err| JsError::new(&format!("ongeldige rasteropties: {err}")))?;
        Self::from_options(options).map_err(to_js_error)
    }

    /// Laad een `.osu`-bestand en tel de hit-objects op in een leeg raster.
    #[wasm_bindgen]
    pub fn load_beatmap(&mut self, text: &str) {
        self.grid.clear();
        let summary = parse::accumulate_beatmap(text, &mut self.grid);
        log::debug!(
            "beatmap geladen: {} objecten, {} overgeslagen",
            summary.objects(),
            summary.skipped
        );
        self.summary = Some(summary);
    }

    /// Haal het raster op als `{ options, cells, dropped }`.
    #[wasm_bindgen]
    pub fn grid(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.grid)
    }

    /// Haal de tellingen van de laatst geladen beatmap op.
    #[wasm_bindgen]
    pub fn summary(&self) -> Result<JsValue, JsValue> {
        let summary = self
            .summary
            .as_ref()
            .ok_or_else(|| js_error("er is geen beatmap geladen"))?;
        to_js_value(summary)
    }

    /// Bereken kop, staart en pad van één slider-regel.
    #[wasm_bindgen]
    pub fn slider_path(&self, line: &str) -> Result<JsValue, JsValue> {
        let path = trace_slider(line).map_err(to_js_error)?;
        to_js_value(&path)
    }
}

impl HeatmapEngine {
    pub fn from_options(options: GridOptions) -> Result<Self, GridError> {
        Ok(Self {
            grid: DensityGrid::new(options)?,
            summary: None,
        })
    }

    #[must_use]
    pub const fn density(&self) -> &DensityGrid {
        &self.grid
    }

    #[must_use]
    pub const fn last_summary(&self) -> Option<&BeatmapSummary> {
        self.summary.as_ref()
    }
}

impl Default for HeatmapEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Parseert een slider-regel en volgt zijn pad.
pub fn trace_slider(line: &str) -> Result<parse::SliderPath, ParseError> {
    Ok(parse::parse_slider(line)?.path()?)
}

fn to_js_value<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsError::new(&err.to_string()).into())
}

fn js_error(message: &str) -> JsValue {
    JsError::new(message).into()
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    js_error(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::ObjectKind;

    #[test]
    fn engine_starts_with_default_grid() {
        let engine = HeatmapEngine::new();
        assert_eq!(engine.density().options(), &GridOptions::default());
        assert!(engine.last_summary().is_none());
    }

    #[test]
    fn reloading_resets_the_grid() {
        let text = "[HitObjects]\n10,10,0,1,0\n";
        let mut engine = HeatmapEngine::new();
        engine.load_beatmap(text);
        engine.load_beatmap(text);
        assert_eq!(engine.density().total(), 1);
        assert_eq!(engine.last_summary().map(|s| s.circles), Some(1));
    }

    #[test]
    fn trace_slider_rejects_circles() {
        assert_eq!(
            trace_slider("10,10,0,1,0").map(|path| path.tail),
            Err(ParseError::NotASlider(ObjectKind::Circle))
        );
    }
}
