//! Maze generation core for **Labyrinth**.
//!
//! Everything in this crate is GPU-free. The same rules are mirrored by the
//! WGSL compute shader in `labyrinth-engine`, so CPU and GPU backends produce
//! identical buffers for identical requests.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`seed`] | `Seed`, the per-cell coordinate hash |
//! | [`grid`] | `GridSize`, `CellCoord` |
//! | [`topology`] | binary-tree carve rule, `CellWalls`, `Topology` |
//! | [`geometry`] | wall quads, fixed-stride cell slots, sentinel filtering |
//! | [`border`] | border triangle strip |
//! | [`camera`] | `Camera`, `GridBounds`, `CameraInput` |
//! | [`request`] | `MazeRequest`, buffer sizing, `BackendLimits` |
//! | [`backend`] | `ComputeBackend` trait, rayon `CpuBackend` |
//! | [`pipeline`] | `MazePipeline`, `Maze` |
//! | [`error`] | `MazeError`, `ErrorKind` |
//!
//! # Quick start
//!
//! ```rust
//! use labyrinth_maze::{CpuBackend, GridSize, MazePipeline, MazeRequest, Seed};
//!
//! let request = MazeRequest::new(GridSize::new(3, 3), 0.5, Seed::new(1).unwrap()).unwrap();
//! let maze = MazePipeline::new(CpuBackend::default()).generate(&request).unwrap();
//!
//! assert_eq!(maze.border.len(), 14);
//! assert_eq!(maze.cell_vertex_count(), 3 * 3 * 12);
//! ```

pub mod backend;
pub mod border;
pub mod camera;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod pipeline;
pub mod request;
pub mod seed;
pub mod topology;

pub use backend::{ComputeBackend, CpuBackend};
pub use camera::{Camera, CameraInput, GridBounds};
pub use error::{ErrorKind, MazeError};
pub use geometry::{CellGeometry, Quad};
pub use grid::{CellCoord, GridSize};
pub use pipeline::{Maze, MazePipeline};
pub use request::{BackendLimits, BufferPlan, MazeRequest};
pub use seed::Seed;
pub use topology::{CellWalls, Topology};
