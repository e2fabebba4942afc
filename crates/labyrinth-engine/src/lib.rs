//! Labyrinth engine crate.
//!
//! Owns the platform + GPU runtime pieces: device acquisition, the wgpu compute
//! backend for maze generation, the maze renderer, input translation and the
//! winit runtime loop. Maze rules live in `labyrinth-maze`.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod compute;
pub mod render;
pub mod paint;
