//! Text conversions for Game of Life grids
//!
//! Format: each line is a row, `1` for an alive cell and `0` for a dead one.

use super::{CellState, Grid};
use anyhow::Result;

/// Parse a grid from a string representation
pub fn parse_grid_from_string(content: &str) -> Result<Grid> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Grid text is empty or contains no valid rows");
    }

    let width = lines[0].len();
    let mut cells = Vec::with_capacity(lines.len());

    for (row_idx, line) in lines.iter().enumerate() {
        if line.len() != width {
            anyhow::bail!(
                "Row {} has length {}, expected {} (all rows must have the same length)",
                row_idx,
                line.len(),
                width
            );
        }

        let row = line
            .chars()
            .enumerate()
            .map(|(col_idx, ch)| match ch {
                '0' => Ok(CellState::Dead),
                '1' => Ok(CellState::Alive),
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                    ch,
                    row_idx,
                    col_idx
                ),
            })
            .collect::<Result<Vec<_>>>()?;
        cells.push(row);
    }

    Grid::from_cells(cells)
}

/// Convert a grid to its string representation
pub fn grid_to_string(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.height() * (grid.width() + 1));

    for (_, col, state) in grid.cells() {
        result.push(if state.is_alive() { '1' } else { '0' });
        if col + 1 == grid.width() {
            result.push('\n');
        }
    }

    result
}
