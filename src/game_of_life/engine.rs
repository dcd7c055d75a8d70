//! Simulation engine: owns the grid and mediates every change to it

use super::{CellState, EngineError, GameOfLifeRules, Grid, PresetId, PresetRegistry};

/// A simulation session.
///
/// The engine is the only owner of its [`Grid`]. Mutation happens through
/// [`toggle_cell`](Engine::toggle_cell), [`load_preset`](Engine::load_preset),
/// [`step`](Engine::step) and [`clear`](Engine::clear), each of which takes
/// `&mut self` and either completes or leaves the grid as it was.
#[derive(Debug, Clone)]
pub struct Engine {
    grid: Grid,
    presets: PresetRegistry,
    generation: u64,
}

impl Engine {
    /// Create an all-dead engine using the built-in presets
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_presets(width, height, PresetRegistry::builtin())
    }

    pub fn with_presets(width: usize, height: usize, presets: PresetRegistry) -> Self {
        log::debug!("Creating {}x{} engine with {} presets", width, height, presets.len());
        Self {
            grid: Grid::new(width, height),
            presets,
            generation: 0,
        }
    }

    /// Flip one cell and return its new state
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<CellState, EngineError> {
        let state = self.grid.toggle(row, col)?;
        log::debug!("Toggled ({}, {}) to {:?}", row, col, state);
        Ok(state)
    }

    /// Replace the grid with a registered preset.
    ///
    /// Unknown ids and presets that do not fit the grid are rejected before
    /// anything is cleared.
    pub fn load_preset(&mut self, id: PresetId) -> Result<(), EngineError> {
        let preset = self.presets.get(id)?;
        preset.apply(&mut self.grid)?;
        self.generation = 0;
        log::debug!("Loaded preset {} `{}` ({} cells)", id, preset.name, preset.coordinates.len());
        Ok(())
    }

    /// Advance one generation
    pub fn step(&mut self) {
        self.grid = GameOfLifeRules::evolve(&self.grid);
        self.generation += 1;
        log::debug!(
            "Generation {}: {} living cells",
            self.generation,
            self.grid.living_count()
        );
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.grid.clear();
        self.generation = 0;
        log::debug!("Cleared grid");
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn presets(&self) -> &PresetRegistry {
        &self.presets
    }

    /// Number of steps since the last clear or preset load
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::Preset;
    use std::collections::HashSet;

    #[test]
    fn test_new_engine_is_dead() {
        let engine = Engine::new(10, 8);
        assert!(engine.grid().is_empty());
        assert_eq!(engine.grid().width(), 10);
        assert_eq!(engine.grid().height(), 8);
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn test_step_on_empty_grid() {
        let mut engine = Engine::new(10, 10);
        engine.step();
        engine.step();
        assert!(engine.grid().is_empty());
        assert_eq!(engine.generation(), 2);
    }

    #[test]
    fn test_toggle_cell() {
        let mut engine = Engine::new(5, 5);
        assert_eq!(engine.toggle_cell(2, 3).unwrap(), CellState::Alive);
        assert_eq!(engine.grid().get(2, 3).unwrap(), CellState::Alive);
        assert_eq!(engine.toggle_cell(2, 3).unwrap(), CellState::Dead);
        assert!(engine.grid().is_empty());

        assert!(matches!(
            engine.toggle_cell(5, 0),
            Err(EngineError::OutOfBounds { row: 5, col: 0, .. })
        ));
    }

    #[test]
    fn test_blinker_through_engine() {
        let mut engine = Engine::new(5, 5);
        let id = engine.presets().find("blinker").unwrap();
        engine.load_preset(id).unwrap();
        let horizontal = engine.grid().snapshot();

        engine.step();
        assert_eq!(engine.grid().living_cells(), vec![(1, 2), (2, 2), (3, 2)]);
        engine.step();
        assert_eq!(engine.grid(), &horizontal);
    }

    #[test]
    fn test_every_builtin_preset_round_trips() {
        let mut engine = Engine::new(100, 100);
        let presets = engine.presets().clone();

        for (id, preset) in presets.iter() {
            engine.toggle_cell(99, 99).unwrap();
            engine.load_preset(id).unwrap();

            let expected: HashSet<(usize, usize)> =
                preset.coordinates.iter().map(|&(x, y)| (y, x)).collect();
            let alive: HashSet<(usize, usize)> = engine.grid().living_cells().into_iter().collect();
            assert_eq!(alive, expected, "preset {}", preset.name);
        }
    }

    #[test]
    fn test_clear_preset_empties_grid() {
        let mut engine = Engine::new(20, 20);
        engine.load_preset(engine.presets().find("block").unwrap()).unwrap();
        assert_eq!(engine.grid().living_count(), 4);
        engine.load_preset(engine.presets().find("clear").unwrap()).unwrap();
        assert!(engine.grid().is_empty());
    }

    #[test]
    fn test_unknown_preset() {
        let mut engine = Engine::new(5, 5);
        engine.toggle_cell(0, 0).unwrap();
        let result = engine.load_preset(PresetId(99));
        assert_eq!(result, Err(EngineError::UnknownPreset("#99".to_string())));
        assert_eq!(engine.grid().living_cells(), vec![(0, 0)]);
    }

    #[test]
    fn test_invalid_preset_leaves_grid_unchanged() {
        // The gliders formation is 37 columns wide.
        let mut engine = Engine::new(20, 20);
        engine.toggle_cell(3, 3).unwrap();
        engine.step();
        engine.toggle_cell(10, 10).unwrap();
        let before = engine.grid().snapshot();
        let generation = engine.generation();

        let result = engine.load_preset(PresetId(0));
        assert!(matches!(result, Err(EngineError::PresetOutOfBounds { ref name, .. }) if name == "gliders"));
        assert_eq!(engine.grid(), &before);
        assert_eq!(engine.generation(), generation);
    }

    #[test]
    fn test_custom_registry() {
        let registry = PresetRegistry::new(vec![Preset::new("corner", &[(0, 0), (1, 0), (0, 1)])]);
        let mut engine = Engine::with_presets(3, 3, registry);
        engine.load_preset(PresetId(0)).unwrap();
        engine.step();
        // Three corner cells form a block once the missing cell is born.
        assert_eq!(engine.grid().living_cells(), vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_clear_resets_generation() {
        let mut engine = Engine::new(5, 5);
        engine.toggle_cell(1, 1).unwrap();
        engine.step();
        engine.clear();
        assert!(engine.grid().is_empty());
        assert_eq!(engine.generation(), 0);
    }
}
