//! Configuration settings for the Game of Life engine

use crate::game_of_life::{Engine, Preset, PresetRegistry};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub display: DisplayConfig,
    pub timing: TimingConfig,
    pub output: OutputConfig,
    /// User presets appended after the built-in ones
    #[serde(default)]
    pub presets: Vec<Preset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
}

/// Pixel geometry used to translate clicks into grid and menu actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub cell_size: u32,
    pub right_margin: u32,
    pub menu_item_height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    pub ticks_per_second: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
    Visual,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                width: 100,
                height: 100,
            },
            display: DisplayConfig {
                cell_size: 10,
                right_margin: 200,
                menu_item_height: 50,
            },
            timing: TimingConfig {
                ticks_per_second: 4,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
            },
            presets: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.width == 0 || self.grid.height == 0 {
            anyhow::bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.grid.width,
                self.grid.height
            );
        }

        if self.display.cell_size == 0 {
            anyhow::bail!("Cell size must be positive");
        }

        if self.display.menu_item_height == 0 {
            anyhow::bail!("Menu item height must be positive");
        }

        if self.timing.ticks_per_second == 0 {
            anyhow::bail!("Ticks per second must be positive");
        }

        let builtin = PresetRegistry::builtin();
        let mut seen = HashSet::new();
        for preset in &self.presets {
            if builtin.find(&preset.name).is_ok() {
                anyhow::bail!("Preset `{}` shadows a built-in preset", preset.name);
            }
            if !seen.insert(preset.name.as_str()) {
                anyhow::bail!("Preset `{}` is defined more than once", preset.name);
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(width) = cli_overrides.width {
            self.grid.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.grid.height = height;
        }
        if let Some(ticks) = cli_overrides.ticks_per_second {
            self.timing.ticks_per_second = ticks;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
    }

    /// Time between two generations while the simulation runs
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.timing.ticks_per_second.max(1)
    }

    /// Registry with the built-in presets followed by the configured ones
    pub fn preset_registry(&self) -> PresetRegistry {
        PresetRegistry::with_extra(self.presets.iter().cloned())
    }

    /// Build an all-dead engine sized by these settings
    pub fn build_engine(&self) -> Engine {
        Engine::with_presets(self.grid.width, self.grid.height, self.preset_registry())
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub ticks_per_second: Option<u32>,
    pub format: Option<OutputFormat>,
}
