//! Conway's transition rule

use super::{CellState, Grid};

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Neighbor counts for every cell, row-major.
    ///
    /// Each living cell increments its in-bounds Moore neighbors, so the counts only
    /// ever reflect the generation passed in.
    pub fn neighbor_counts(grid: &Grid) -> Vec<u8> {
        let mut counts = vec![0u8; grid.width() * grid.height()];

        for (row, col, state) in grid.cells() {
            if !state.is_alive() {
                continue;
            }
            for (r, c) in grid.neighbors(row, col) {
                counts[r * grid.width() + c] += 1;
            }
        }

        counts
    }

    /// Compute the next generation into a fresh buffer
    pub fn evolve(current: &Grid) -> Grid {
        let counts = Self::neighbor_counts(current);

        let next_cells = current
            .raw_cells()
            .iter()
            .zip(counts)
            .map(|(&state, neighbors)| Self::next_state(state, neighbors))
            .collect();

        Grid::from_raw(current.width(), current.height(), next_cells)
    }

    /// State of a cell in the next generation given its current state and neighbor count
    pub fn next_state(current: CellState, neighbor_count: u8) -> CellState {
        match (current, neighbor_count) {
            (CellState::Alive, 2) | (CellState::Alive, 3) | (CellState::Dead, 3) => CellState::Alive,
            _ => CellState::Dead,
        }
    }
}
