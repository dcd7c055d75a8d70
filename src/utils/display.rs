//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::game_of_life::{Engine, Grid};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Serializable view of one generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub generation: u64,
    pub width: usize,
    pub height: usize,
    /// Living cells as `[row, col]`, row-major
    pub alive: Vec<(usize, usize)>,
}

impl GridSnapshot {
    pub fn of(engine: &Engine) -> Self {
        let grid = engine.grid();
        Self {
            generation: engine.generation(),
            width: grid.width(),
            height: grid.height(),
            alive: grid.living_cells(),
        }
    }
}

/// Renders grids for the terminal
pub struct GridFormatter;

impl GridFormatter {
    /// Render the engine's current generation in the requested format
    pub fn render(engine: &Engine, format: OutputFormat) -> Result<String> {
        let grid = engine.grid();
        let output = match format {
            OutputFormat::Text => format!(
                "Generation {} (Living: {}):\n{}",
                engine.generation(),
                grid.living_count(),
                Self::format_grid_compact(grid)
            ),
            OutputFormat::Visual => format!(
                "Generation {} (Living: {}):\n{}",
                engine.generation(),
                grid.living_count(),
                Self::format_grid_with_coords(grid)
            ),
            OutputFormat::Json => Self::format_json(engine)?,
        };
        Ok(output)
    }

    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.height() * (grid.width() + 1));
        for (_, col, state) in grid.cells() {
            output.push(if state.is_alive() { '█' } else { '·' });
            if col + 1 == grid.width() {
                output.push('\n');
            }
        }
        output
    }

    /// Format a grid with row and column numbers
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for x in 0..grid.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for (row, col, state) in grid.cells() {
            if col == 0 {
                output.push_str(&format!("{:2} ", row));
            }
            output.push_str(if state.is_alive() { "██" } else { "··" });
            if col + 1 == grid.width() {
                output.push('\n');
            }
        }

        output
    }

    /// One-line JSON snapshot of the current generation
    pub fn format_json(engine: &Engine) -> Result<String> {
        serde_json::to_string(&GridSnapshot::of(engine)).context("Failed to serialize grid snapshot")
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Wrap text in an ANSI color when the terminal allows it
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var_os("NO_COLOR").is_none()
            && std::env::var("TERM").map_or(true, |term| term != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::CellState;

    fn small_engine() -> Engine {
        let mut engine = Engine::new(3, 2);
        engine.toggle_cell(0, 0).unwrap();
        engine.toggle_cell(1, 2).unwrap();
        engine
    }

    #[test]
    fn test_grid_formatting() {
        let engine = small_engine();

        let compact = GridFormatter::format_grid_compact(engine.grid());
        assert_eq!(compact, "█··\n··█\n");

        let with_coords = GridFormatter::format_grid_with_coords(engine.grid());
        assert!(with_coords.starts_with("    0 1 2\n"));
        assert!(with_coords.contains(" 1 ····██\n"));
    }

    #[test]
    fn test_render_formats() {
        let engine = small_engine();

        let text = GridFormatter::render(&engine, OutputFormat::Text).unwrap();
        assert!(text.starts_with("Generation 0 (Living: 2):"));

        let visual = GridFormatter::render(&engine, OutputFormat::Visual).unwrap();
        assert!(visual.contains("██"));

        let json = GridFormatter::render(&engine, OutputFormat::Json).unwrap();
        let snapshot: GridSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.width, 3);
        assert_eq!(snapshot.height, 2);
        assert_eq!(snapshot.alive, vec![(0, 0), (1, 2)]);
    }

    #[test]
    fn test_snapshot_tracks_generation() {
        let mut engine = small_engine();
        engine.step();
        let snapshot = GridSnapshot::of(&engine);
        assert_eq!(snapshot.generation, 1);
        assert!(snapshot.alive.is_empty());
        assert_eq!(engine.grid().get(0, 0).unwrap(), CellState::Dead);
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));
        assert!(ColorOutput::success("OK").contains("OK"));
    }
}
