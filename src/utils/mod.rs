//! Rendering and terminal helpers

pub mod display;

pub use display::{Color, ColorOutput, GridFormatter, GridSnapshot};
