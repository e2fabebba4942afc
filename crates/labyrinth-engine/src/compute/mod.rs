//! GPU maze generation.
//!
//! One compute invocation per cell fills a fixed-stride slot of a storage
//! buffer that the renderer later binds directly as a vertex buffer.

mod backend;
mod params;
mod readback;

pub use backend::{GpuBackend, GpuCells};
pub use params::{limits_from_device, ComputeParams, WORKGROUP_SIZE};

/// A maze whose cell buffer lives on the GPU.
pub type GpuMaze = labyrinth_maze::Maze<GpuCells>;
