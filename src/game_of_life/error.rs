//! Error types for grid and engine operations

use thiserror::Error;

/// Errors raised by the grid, the preset registry and the engine.
///
/// None of these are transient: each one points at a caller or data bug, and the
/// grid is left exactly as it was before the failing call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A cell coordinate outside the grid.
    #[error("cell ({row}, {col}) is out of bounds for a {width}x{height} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },
    /// No preset registered under the given ordinal or name.
    #[error("no preset registered as `{0}`")]
    UnknownPreset(String),
    /// A preset places a cell outside the grid.
    #[error("preset `{name}` places a cell at x={x}, y={y} outside the {width}x{height} grid")]
    PresetOutOfBounds {
        name: String,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EngineError::OutOfBounds { row: 4, col: 7, width: 5, height: 3 };
        assert_eq!(err.to_string(), "cell (4, 7) is out of bounds for a 5x3 grid");

        let err = EngineError::UnknownPreset("#9".to_string());
        assert!(err.to_string().contains("#9"));

        let err = EngineError::PresetOutOfBounds {
            name: "wide".to_string(),
            x: 12,
            y: 0,
            width: 12,
            height: 7,
        };
        assert!(err.to_string().contains("wide"));
        assert!(err.to_string().contains("x=12"));
        assert!(err.to_string().ends_with("outside the 12x7 grid"));
    }
}
