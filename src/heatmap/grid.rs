use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geom::Vector2;

/// Upper bound on `columns * rows`.
pub const MAX_CELLS: usize = 1 << 20;

/// Layout of the heatmap grid over the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    pub columns: usize,
    pub rows: usize,
    /// Playfield width in osu! pixels.
    pub width: f64,
    /// Playfield height in osu! pixels.
    pub height: f64,
}

impl GridOptions {
    pub const DEFAULT: Self = Self {
        columns: 15,
        rows: 11,
        width: 513.0,
        height: 385.0,
    };

    #[must_use]
    pub fn cell_width(&self) -> f64 {
        self.width / self.columns as f64
    }

    #[must_use]
    pub fn cell_height(&self) -> f64 {
        self.height / self.rows as f64
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(GridError::EmptyGrid {
                columns: self.columns,
                rows: self.rows,
            });
        }
        match self.columns.checked_mul(self.rows) {
            Some(cells) if cells <= MAX_CELLS => {}
            _ => {
                return Err(GridError::TooManyCells {
                    columns: self.columns,
                    rows: self.rows,
                });
            }
        }
        let positive = |value: f64| value.is_finite() && value > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(GridError::InvalidPlayfield {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for GridOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid needs at least one cell, got {columns}x{rows}")]
    EmptyGrid { columns: usize, rows: usize },
    #[error("grid of {columns}x{rows} cells exceeds the cell limit")]
    TooManyCells { columns: usize, rows: usize },
    #[error("playfield size must be positive, got {width}x{height}")]
    InvalidPlayfield { width: f64, height: f64 },
}

/// Hit counts per cell, row-major with row 0 at the top of the playfield.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityGrid {
    options: GridOptions,
    cells: Vec<Vec<u32>>,
    dropped: usize,
}

impl DensityGrid {
    pub fn new(options: GridOptions) -> Result<Self, GridError> {
        options.validate()?;
        Ok(Self {
            options,
            cells: vec![vec![0; options.columns]; options.rows],
            dropped: 0,
        })
    }

    #[must_use]
    pub const fn options(&self) -> &GridOptions {
        &self.options
    }

    /// Cell containing `point`, if it lies on the grid.
    #[must_use]
    pub fn cell_of(&self, point: Vector2) -> Option<(usize, usize)> {
        let column = bin(point.x, self.options.cell_width(), self.options.columns)?;
        let row = bin(point.y, self.options.cell_height(), self.options.rows)?;
        Some((column, row))
    }

    /// Counts `point` in its cell. Points off the grid only bump [`Self::dropped`].
    pub fn add_point(&mut self, point: Vector2) -> bool {
        match self.cell_of(point) {
            Some((column, row)) => {
                self.cells[row][column] += 1;
                true
            }
            None => {
                log::debug!("point ({}, {}) falls outside the grid", point.x, point.y);
                self.dropped += 1;
                false
            }
        }
    }

    #[must_use]
    pub fn count(&self, column: usize, row: usize) -> Option<u32> {
        self.cells.get(row)?.get(column).copied()
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<u32>] {
        &self.cells
    }

    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Sum over all cells.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.cells.iter().flatten().map(|&count| u64::from(count)).sum()
    }

    #[must_use]
    pub fn max_count(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(0);
        }
        self.dropped = 0;
    }
}

impl Default for DensityGrid {
    fn default() -> Self {
        let options = GridOptions::DEFAULT;
        Self {
            options,
            cells: vec![vec![0; options.columns]; options.rows],
            dropped: 0,
        }
    }
}

fn bin(coordinate: f64, size: f64, count: usize) -> Option<usize> {
    let index = (coordinate / size).floor();
    if !index.is_finite() || index < 0.0 || index >= count as f64 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = index as usize;
    Some(index)
}
