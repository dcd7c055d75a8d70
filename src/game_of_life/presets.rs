//! Named starting patterns and the registry that holds them

use super::{CellState, EngineError, Grid};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal of a preset inside a [`PresetRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PresetId(pub usize);

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named list of `(x, y)` coordinates that are alive when the preset is loaded.
/// `x` is the column and `y` the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub coordinates: Vec<(usize, usize)>,
}

impl Preset {
    pub fn new(name: impl Into<String>, coordinates: &[(usize, usize)]) -> Self {
        Self {
            name: name.into(),
            coordinates: coordinates.to_vec(),
        }
    }

    /// Check every coordinate against the grid before anything is written
    pub fn validate_for(&self, grid: &Grid) -> Result<(), EngineError> {
        match self.coordinates.iter().find(|&&(x, y)| !grid.contains(y, x)) {
            Some(&(x, y)) => Err(EngineError::PresetOutOfBounds {
                name: self.name.clone(),
                x,
                y,
                width: grid.width(),
                height: grid.height(),
            }),
            None => Ok(()),
        }
    }

    /// Replace the grid contents with this preset.
    ///
    /// Fails without touching the grid if any coordinate is out of range.
    pub fn apply(&self, grid: &mut Grid) -> Result<(), EngineError> {
        self.validate_for(grid)?;
        grid.clear();
        for &(x, y) in &self.coordinates {
            grid.set(y, x, CellState::Alive)?;
        }
        Ok(())
    }
}

/// The gliders formation: two blocks bracketing a shuttle that sheds gliders
const GLIDERS: &[(usize, usize)] = &[
    (1, 5), (1, 6), (2, 5), (2, 6),
    (11, 5), (11, 6), (11, 7),
    (12, 4), (12, 8),
    (13, 3), (13, 9),
    (14, 3), (14, 9),
    (15, 6),
    (16, 4), (16, 9),
    (17, 5), (17, 6), (17, 7),
    (18, 6),
    (21, 3), (21, 4), (21, 5),
    (22, 3), (22, 4), (22, 5),
    (23, 2), (23, 6),
    (25, 1), (25, 2), (25, 6), (25, 7),
    (35, 3), (35, 4), (36, 3), (36, 4),
];

const GLIDER: &[(usize, usize)] = &[(2, 0), (0, 1), (2, 1), (1, 2), (2, 2)];

const BLINKER: &[(usize, usize)] = &[(1, 2), (2, 2), (3, 2)];

const BLOCK: &[(usize, usize)] = &[(1, 1), (2, 1), (1, 2), (2, 2)];

const BEACON: &[(usize, usize)] = &[
    (0, 0), (1, 0), (0, 1), (1, 1),
    (2, 2), (3, 2), (2, 3), (3, 3),
];

/// A fixed, ordered set of presets.
///
/// The registry is built once and offers no way to change its entries afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetRegistry {
    presets: Vec<Preset>,
}

impl PresetRegistry {
    pub fn new(presets: Vec<Preset>) -> Self {
        Self { presets }
    }

    /// The built-in presets, in menu order
    pub fn builtin() -> Self {
        Self::new(vec![
            Preset::new("gliders", GLIDERS),
            Preset::new("clear", &[]),
            Preset::new("glider", GLIDER),
            Preset::new("blinker", BLINKER),
            Preset::new("block", BLOCK),
            Preset::new("beacon", BEACON),
        ])
    }

    /// Built-in presets followed by extra ones
    pub fn with_extra(extra: impl IntoIterator<Item = Preset>) -> Self {
        let mut registry = Self::builtin();
        registry.presets.extend(extra);
        registry
    }

    pub fn get(&self, id: PresetId) -> Result<&Preset, EngineError> {
        self.presets
            .get(id.0)
            .ok_or_else(|| EngineError::UnknownPreset(id.to_string()))
    }

    /// Resolve a preset by its name
    pub fn find(&self, name: &str) -> Result<PresetId, EngineError> {
        self.presets
            .iter()
            .position(|preset| preset.name == name)
            .map(PresetId)
            .ok_or_else(|| EngineError::UnknownPreset(name.to_string()))
    }

    /// Resolve either an ordinal (`"2"`) or a name (`"blinker"`)
    pub fn resolve(&self, key: &str) -> Result<PresetId, EngineError> {
        match key.parse::<usize>() {
            Ok(ordinal) => {
                let id = PresetId(ordinal);
                self.get(id).map(|_| id)
            }
            Err(_) => self.find(key),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PresetId, &Preset)> {
        self.presets
            .iter()
            .enumerate()
            .map(|(i, preset)| (PresetId(i), preset))
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
