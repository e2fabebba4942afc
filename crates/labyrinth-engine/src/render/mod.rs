//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipelines, buffers) and builds them
//! lazily on first use.
//!
//! Convention: geometry arrives in grid space (cell centres on integer
//! coordinates, +Y up); the vertex shader maps it to NDC with a camera uniform.

mod common;
mod ctx;
pub mod maze;

pub use ctx::{RenderCtx, RenderTarget};
pub use maze::{MazeRenderer, MazeUniform};
