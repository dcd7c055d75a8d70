//! Input translation and run/pause control around an [`Engine`]
//!
//! The window is laid out as the grid on the left, `width * cell_size` pixels wide,
//! with a menu column to its right. Menu slot 0 toggles play/stop and slot `i`
//! loads preset `i - 1`.

use crate::config::{DisplayConfig, Settings};
use crate::game_of_life::{CellState, Engine, EngineError, PresetId};
use anyhow::{Context, Result};
use std::str::FromStr;
use std::time::Duration;

/// What a click or console command asks the engine to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleCell { row: usize, col: usize },
    LoadPreset(PresetId),
    TogglePlay,
}

/// Pixel geometry of the grid and menu.
///
/// Cell size and menu item height are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    columns: usize,
    rows: usize,
    cell_size: u32,
    menu_item_height: u32,
    right_margin: u32,
}

impl Layout {
    pub fn new(columns: usize, rows: usize, display: &DisplayConfig) -> Result<Self> {
        if display.cell_size == 0 {
            anyhow::bail!("Cell size must be positive");
        }
        if display.menu_item_height == 0 {
            anyhow::bail!("Menu item height must be positive");
        }

        Ok(Self {
            columns,
            rows,
            cell_size: display.cell_size,
            menu_item_height: display.menu_item_height,
            right_margin: display.right_margin,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(settings.grid.width, settings.grid.height, &settings.display)
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn menu_item_height(&self) -> u32 {
        self.menu_item_height
    }

    /// Window size in pixels
    pub fn window_size(&self) -> (u64, u64) {
        let cell = u64::from(self.cell_size);
        (
            self.columns as u64 * cell + u64::from(self.right_margin),
            self.rows as u64 * cell,
        )
    }

    /// Map a pointer position to an action, if the position means anything.
    ///
    /// `preset_count` bounds the menu; slots past the last preset are ignored.
    pub fn translate(&self, x: i64, y: i64, preset_count: usize) -> Option<Action> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u64, y as u64);
        let cell = u64::from(self.cell_size);
        let grid_width = self.columns as u64 * cell;

        if x >= grid_width {
            let slot = usize::try_from(y / u64::from(self.menu_item_height)).ok()?;
            return match slot {
                0 => Some(Action::TogglePlay),
                i if i <= preset_count => Some(Action::LoadPreset(PresetId(i - 1))),
                _ => None,
            };
        }

        let row = usize::try_from(y / cell).ok()?;
        let col = usize::try_from(x / cell).ok()?;
        (row < self.rows).then_some(Action::ToggleCell { row, col })
    }

    /// Menu slot that triggers the given action, if it has one
    pub fn menu_slot(&self, action: Action) -> Option<usize> {
        match action {
            Action::TogglePlay => Some(0),
            Action::LoadPreset(PresetId(i)) => Some(i + 1),
            Action::ToggleCell { .. } => None,
        }
    }
}

/// Drives an engine the way an event loop would: clicks, menu picks and timer ticks
#[derive(Debug)]
pub struct Driver {
    engine: Engine,
    layout: Layout,
    tick_interval: Duration,
    running: bool,
}

impl Driver {
    pub fn new(engine: Engine, layout: Layout, tick_interval: Duration) -> Self {
        Self {
            engine,
            layout,
            tick_interval,
            running: false,
        }
    }

    /// Build a driver from validated settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate().context("Invalid driver settings")?;
        Ok(Self::new(
            settings.build_engine(),
            Layout::from_settings(settings)?,
            settings.tick_interval(),
        ))
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Handle a pointer click; returns the action taken, if any
    pub fn click(&mut self, x: i64, y: i64) -> Result<Option<Action>, EngineError> {
        match self.layout.translate(x, y, self.engine.presets().len()) {
            Some(action) => {
                self.apply(action)?;
                Ok(Some(action))
            }
            None => {
                log::warn!("Ignoring click at ({}, {})", x, y);
                Ok(None)
            }
        }
    }

    pub fn apply(&mut self, action: Action) -> Result<(), EngineError> {
        match action {
            Action::ToggleCell { row, col } => {
                self.engine.toggle_cell(row, col)?;
            }
            Action::LoadPreset(id) => self.engine.load_preset(id)?,
            Action::TogglePlay => self.toggle_running(),
        }
        Ok(())
    }

    pub fn toggle_running(&mut self) {
        self.running = !self.running;
        log::info!("Simulation {}", if self.running { "running" } else { "paused" });
    }

    /// Timer tick: advance one generation while running. Returns whether it stepped.
    pub fn tick(&mut self) -> bool {
        if self.running {
            self.engine.step();
        }
        self.running
    }

    /// Step regardless of the running flag
    pub fn step(&mut self) {
        self.engine.step();
    }

    pub fn clear(&mut self) {
        self.engine.clear();
    }

    /// Labels for the menu column, top to bottom
    pub fn menu_labels(&self) -> Vec<String> {
        let play = if self.running { "stop" } else { "play" };
        std::iter::once(play.to_string())
            .chain(self.engine.presets().iter().map(|(_, preset)| preset.name.clone()))
            .collect()
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<CellState, EngineError> {
        self.engine.grid().get(row, col)
    }
}

/// A line of input for the console driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Click { x: i64, y: i64 },
    Toggle { row: usize, col: usize },
    Preset(String),
    Play,
    Step,
    Tick,
    Clear,
    Show,
    Menu,
    Help,
    Quit,
}

impl ConsoleCommand {
    pub const HELP: &'static str = "\
commands:
  click X Y      click at pixel position (X, Y)
  toggle R C     flip the cell at row R, column C
  preset NAME|N  load a preset by name or ordinal
  play           start or stop the simulation
  tick           advance one generation if running
  step           advance one generation
  clear          kill every cell
  show           print the grid
  menu           print the menu column
  help           print this message
  quit           leave";
}

impl FromStr for ConsoleCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let command = words.next().context("Empty command")?;
        let args: Vec<&str> = words.collect();

        let expect_args = |count: usize| -> Result<()> {
            if args.len() != count {
                anyhow::bail!("`{}` takes {} argument(s), got {}", command, count, args.len());
            }
            Ok(())
        };

        let parsed = match command.to_ascii_lowercase().as_str() {
            "click" => {
                expect_args(2)?;
                ConsoleCommand::Click {
                    x: args[0].parse().with_context(|| format!("Invalid x: {}", args[0]))?,
                    y: args[1].parse().with_context(|| format!("Invalid y: {}", args[1]))?,
                }
            }
            "toggle" => {
                expect_args(2)?;
                ConsoleCommand::Toggle {
                    row: args[0].parse().with_context(|| format!("Invalid row: {}", args[0]))?,
                    col: args[1].parse().with_context(|| format!("Invalid column: {}", args[1]))?,
                }
            }
            "preset" => {
                expect_args(1)?;
                ConsoleCommand::Preset(args[0].to_string())
            }
            other => {
                expect_args(0)?;
                match other {
                    "play" | "stop" | "pause" => ConsoleCommand::Play,
                    "step" => ConsoleCommand::Step,
                    "tick" => ConsoleCommand::Tick,
                    "clear" => ConsoleCommand::Clear,
                    "show" => ConsoleCommand::Show,
                    "menu" => ConsoleCommand::Menu,
                    "help" => ConsoleCommand::Help,
                    "quit" | "exit" => ConsoleCommand::Quit,
                    _ => anyhow::bail!("Unknown command `{}`", command),
                }
            }
        };

        Ok(parsed)
    }
}
