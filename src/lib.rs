//! Conway's Game of Life engine
//!
//! A fixed-size, non-wrapping grid, Conway's transition rule, a registry of named
//! presets, and a thin driver that turns clicks and timer ticks into engine calls.

pub mod config;
pub mod driver;
pub mod game_of_life;
pub mod utils;

pub use config::Settings;
pub use driver::{Action, Driver, Layout};
pub use game_of_life::{CellState, Engine, EngineError, Grid, PresetId};

use anyhow::{Context, Result};

/// Load a preset into a fresh engine and advance it `generations` times
pub fn simulate(settings: &Settings, preset: &str, generations: usize) -> Result<Engine> {
    let mut engine = settings.build_engine();
    let id = engine
        .presets()
        .resolve(preset)
        .with_context(|| format!("Cannot start from preset `{}`", preset))?;
    engine
        .load_preset(id)
        .with_context(|| format!("Cannot load preset `{}`", preset))?;

    for _ in 0..generations {
        engine.step();
    }
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulate_glider_translates() {
        let mut settings = Settings::default();
        settings.grid.width = 10;
        settings.grid.height = 10;

        let start = simulate(&settings, "glider", 0).unwrap();
        let later = simulate(&settings, "glider", 4).unwrap();

        let shifted: Vec<_> = start
            .grid()
            .living_cells()
            .into_iter()
            .map(|(row, col)| (row + 1, col + 1))
            .collect();
        assert_eq!(later.grid().living_cells(), shifted);
        assert_eq!(later.generation(), 4);
    }

    #[test]
    fn test_simulate_rejects_bad_presets() {
        let mut settings = Settings::default();
        settings.grid.width = 10;
        settings.grid.height = 10;

        assert!(simulate(&settings, "pulsar", 1).is_err());
        let err = simulate(&settings, "gliders", 1).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::PresetOutOfBounds { .. })
        ));
    }
}
