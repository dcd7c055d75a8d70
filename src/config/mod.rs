//! Configuration management for the Game of Life engine

pub mod settings;

pub use settings::{
    CliOverrides, DisplayConfig, GridConfig, OutputConfig, OutputFormat, Settings, TimingConfig,
};
