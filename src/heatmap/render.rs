use std::fmt::Write as _;

use super::DensityGrid;

/// Renders the grid as a plain text table with row and column indices.
#[must_use]
pub fn render_table(grid: &DensityGrid) -> String {
    let width = grid.max_count().to_string().len().max(2);
    let columns = grid.options().columns;
    let mut out = String::new();

    let _ = write!(out, "{:>4}", "");
    for column in 0..columns {
        let _ = write!(out, " {column:>width$}");
    }
    out.push('\n');

    for (index, row) in grid.rows().iter().enumerate() {
        let _ = write!(out, "{index:>4}");
        for count in row {
            let _ = write!(out, " {count:>width$}");
        }
        out.push('\n');
    }

    if grid.dropped() > 0 {
        let _ = writeln!(out, "dropped: {}", grid.dropped());
    }
    out
}

impl std::fmt::Display for DensityGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&render_table(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Vector2;
    use crate::heatmap::GridOptions;

    #[test]
    fn renders_indexed_rows() {
        let mut grid = DensityGrid::new(GridOptions {
            columns: 3,
            rows: 2,
            width: 30.0,
            height: 20.0,
        })
        .unwrap();
        grid.add_point(Vector2::new(25.0, 15.0));
        grid.add_point(Vector2::new(25.0, 15.0));

        let expected = "      0  1  2\n   0  0  0  0\n   1  0  0  2\n";
        assert_eq!(render_table(&grid), expected);
        assert_eq!(grid.to_string(), expected);
    }

    #[test]
    fn reports_dropped_points() {
        let mut grid = DensityGrid::new(GridOptions::default()).unwrap();
        grid.add_point(Vector2::new(-10.0, -10.0));
        assert!(render_table(&grid).ends_with("dropped: 1\n"));
    }
}
