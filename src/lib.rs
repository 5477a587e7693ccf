//! Conway's Game of Life on a toroidal board, with an edit/run controller
//! and a terminal menu shell around it.

pub mod config;
pub mod input;
pub mod life;
pub mod menu;
pub mod render;
pub mod session;
pub mod title;
