pub mod controller;
pub mod engine;
pub mod error;
pub mod grid;

pub use controller::{Command, Direction, Flow, InteractionController, Mode, Snapshot};
pub use engine::SimulationEngine;
pub use error::{LifeError, validate_tick_interval};
pub use grid::Grid;
