use bytemuck::{Pod, Zeroable};
use labyrinth_maze::{BackendLimits, MazeRequest};

/// Invocations per workgroup; must match `@workgroup_size` in `maze_compute.wgsl`.
pub const WORKGROUP_SIZE: [u32; 2] = [8, 8];

/// Uniform block read by the compute shader.
///
/// The seed travels as `f32`; `Seed` guarantees it is exact.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ComputeParams {
    pub width: u32,
    pub height: u32,
    pub thickness: f32,
    pub seed: f32,
}

impl ComputeParams {
    pub fn from_request(request: &MazeRequest) -> Self {
        let size = request.size();
        Self {
            width: size.width,
            height: size.height,
            thickness: request.thickness(),
            seed: request.seed().as_f32(),
        }
    }
}

/// Maze sizing limits for a device.
///
/// The shader indexes the cell array with `u32`, so the buffer is also capped
/// at `u32::MAX` bytes.
pub fn limits_from_device(limits: &wgpu::Limits) -> BackendLimits {
    let binding = u64::from(limits.max_storage_buffer_binding_size);
    BackendLimits {
        max_buffer_bytes: binding
            .min(limits.max_buffer_size)
            .min(u64::from(u32::MAX)),
        workgroup_size: WORKGROUP_SIZE,
        max_workgroups_per_dimension: limits.max_compute_workgroups_per_dimension,
    }
}
