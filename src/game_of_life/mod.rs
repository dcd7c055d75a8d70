//! Game of Life core functionality

pub mod engine;
pub mod error;
pub mod grid;
pub mod io;
pub mod presets;
pub mod rules;

pub use engine::Engine;
pub use error::EngineError;
pub use grid::{CellState, Grid};
pub use io::{grid_to_string, parse_grid_from_string};
pub use presets::{Preset, PresetId, PresetRegistry};
pub use rules::GameOfLifeRules;
