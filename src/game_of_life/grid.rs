//! Grid representation and utilities for Game of Life

use super::EngineError;
use anyhow::Result;
use itertools::iproduct;
use std::fmt;

/// Offsets of the eight Moore neighbors, row-major.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// State of a single cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    /// The complementary state
    pub fn toggled(self) -> Self {
        match self {
            CellState::Dead => CellState::Alive,
            CellState::Alive => CellState::Dead,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

/// A fixed-size Game of Life grid, stored row-major.
///
/// Every coordinate inside `[0, height) x [0, width)` always holds exactly one
/// [`CellState`]; the grid never wraps at its edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Create a new grid with every cell dead
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![CellState::Dead; width * height],
        }
    }

    /// Create a grid from rows of cell states
    pub fn from_cells(cells: Vec<Vec<CellState>>) -> Result<Self> {
        if cells.is_empty() {
            anyhow::bail!("Grid cannot be empty");
        }

        let height = cells.len();
        let width = cells[0].len();

        if width == 0 {
            anyhow::bail!("Grid width cannot be zero");
        }

        for (i, row) in cells.iter().enumerate() {
            if row.len() != width {
                anyhow::bail!("Row {} has length {}, expected {}", i, row.len(), width);
            }
        }

        Ok(Self {
            width,
            height,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    fn checked_index(&self, row: usize, col: usize) -> Result<usize, EngineError> {
        if self.contains(row, col) {
            Ok(self.index(row, col))
        } else {
            Err(EngineError::OutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Get the state of a cell
    pub fn get(&self, row: usize, col: usize) -> Result<CellState, EngineError> {
        let idx = self.checked_index(row, col)?;
        Ok(self.cells[idx])
    }

    /// Overwrite the state of a single cell
    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<(), EngineError> {
        let idx = self.checked_index(row, col)?;
        self.cells[idx] = state;
        Ok(())
    }

    /// Flip a cell and return its new state
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<CellState, EngineError> {
        let idx = self.checked_index(row, col)?;
        let next = self.cells[idx].toggled();
        self.cells[idx] = next;
        Ok(next)
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Dead);
    }

    /// An owned copy of the current generation
    pub fn snapshot(&self) -> Grid {
        self.clone()
    }

    /// Lazy row-major sequence of `(row, col, state)` triples.
    ///
    /// The iterator is `Clone`, so a renderer can restart it without touching the grid.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, CellState)> + Clone + '_ {
        iproduct!(0..self.height, 0..self.width)
            .map(move |(row, col)| (row, col, self.cells[self.index(row, col)]))
    }

    /// In-bounds Moore neighbors of a cell; edges are not wrapped
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            self.contains(r, c).then_some((r, c))
        })
    }

    /// Count living neighbors of a cell by inspecting each of them directly
    pub fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        self.neighbors(row, col)
            .filter(|&(r, c)| self.cells[self.index(r, c)].is_alive())
            .count() as u8
    }

    /// Get all living cell coordinates as `(row, col)`
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells()
            .filter(|(_, _, state)| state.is_alive())
            .map(|(row, col, _)| (row, col))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Check if the grid has no living cells
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_alive())
    }

    pub(crate) fn raw_cells(&self) -> &[CellState] {
        &self.cells
    }

    pub(crate) fn from_raw(width: usize, height: usize, cells: Vec<CellState>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self { width, height, cells }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (_, col, state) in self.cells() {
            let symbol = if state.is_alive() { "⬛" } else { "⬜" };
            write!(f, "{}", symbol)?;
            if col + 1 == self.width {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
