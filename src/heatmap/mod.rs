//! Density heatmap over the osu! playfield.

mod grid;
mod render;

pub use grid::{DensityGrid, GridError, GridOptions, MAX_CELLS};
pub use render::render_table;
