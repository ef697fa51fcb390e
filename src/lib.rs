//! Core library for a bounded Conway's Game of Life canvas.

pub mod driver;
pub mod engine;
pub mod grid;
pub mod pointer;
pub mod pos;
pub mod stats;

pub use driver::{Driver, DriverConfig, RunState};
pub use grid::{CellState, Grid, GridError};
pub use pointer::{CellSize, PaintMode, PointerEditor};
pub use pos::CellPos;
pub use stats::GenerationStats;
