//! Request parameters and working-buffer sizing.
//!
//! Every check here runs before anything is allocated or dispatched.

use crate::error::{MazeError, Result};
use crate::geometry::{cell_buffer_floats, VERTICES_PER_CELL};
use crate::grid::GridSize;
use crate::seed::Seed;

pub const DEFAULT_THICKNESS: f32 = 0.5;

/// One maze request: grid size, wall thickness, seed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MazeRequest {
    size: GridSize,
    thickness: f32,
    seed: Seed,
}

impl MazeRequest {
    /// Validates `thickness` (must be in `(0, 1]`). Zero-sized grids are allowed
    /// and produce empty geometry.
    pub fn new(size: GridSize, thickness: f32, seed: Seed) -> Result<Self> {
        if !(thickness > 0.0 && thickness <= 1.0) {
            return Err(MazeError::InvalidThickness(thickness));
        }
        Ok(Self {
            size,
            thickness,
            seed,
        })
    }

    /// Default thickness and a random seed.
    pub fn with_size(size: GridSize) -> Self {
        Self {
            size,
            thickness: DEFAULT_THICKNESS,
            seed: Seed::random(),
        }
    }

    /// Same size and thickness, different seed.
    pub fn reseeded(self, seed: Seed) -> Self {
        Self { seed, ..self }
    }

    #[inline]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[inline]
    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    #[inline]
    pub fn seed(&self) -> Seed {
        self.seed
    }
}

/// What a compute backend can address.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BackendLimits {
    /// Largest single working buffer, in bytes.
    pub max_buffer_bytes: u64,
    /// Invocations per workgroup along x and y.
    pub workgroup_size: [u32; 2],
    /// Largest workgroup count along one dispatch dimension.
    pub max_workgroups_per_dimension: u32,
}

impl BackendLimits {
    /// Limits for a backend with no dispatch grid (one "group" per cell).
    pub const fn unbounded_dispatch(max_buffer_bytes: u64) -> Self {
        Self {
            max_buffer_bytes,
            workgroup_size: [1, 1],
            max_workgroups_per_dimension: u32::MAX,
        }
    }
}

/// Validated sizes for one request.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BufferPlan {
    pub size: GridSize,
    /// `f32` count of the cell buffer.
    pub floats: u64,
    pub bytes: u64,
    /// Workgroups along x and y.
    pub workgroups: [u32; 2],
    /// Cell draw vertex count (`cells * 12`, static upper bound).
    pub vertex_count: u32,
}

impl BufferPlan {
    /// Sizes the cell buffer for `size` and checks it against `limits`.
    ///
    /// Checks, in order: buffer bytes, dispatch grid, draw vertex count.
    pub fn new(size: GridSize, limits: &BackendLimits) -> Result<Self> {
        let too_large = |requested: u64| MazeError::BufferTooLarge {
            requested,
            limit: limits.max_buffer_bytes,
        };

        let floats = cell_buffer_floats(size).ok_or_else(|| too_large(u64::MAX))?;
        let bytes = floats
            .checked_mul(std::mem::size_of::<f32>() as u64)
            .ok_or_else(|| too_large(u64::MAX))?;
        if bytes > limits.max_buffer_bytes {
            return Err(too_large(bytes));
        }

        let gx = groups(size.width, limits.workgroup_size[0]);
        let gy = groups(size.height, limits.workgroup_size[1]);
        for (axis, requested) in [('x', gx), ('y', gy)] {
            if requested > u64::from(limits.max_workgroups_per_dimension) {
                return Err(MazeError::DispatchTooLarge {
                    axis,
                    requested,
                    limit: u64::from(limits.max_workgroups_per_dimension),
                });
            }
        }

        let vertices = size.cell_count() * VERTICES_PER_CELL as u64;
        let vertex_count = u32::try_from(vertices).map_err(|_| MazeError::VertexCountTooLarge {
            requested: vertices,
            limit: u64::from(u32::MAX),
        })?;

        Ok(Self {
            size,
            floats,
            bytes,
            // Both fit: they are bounded by `max_workgroups_per_dimension`.
            workgroups: [gx as u32, gy as u32],
            vertex_count,
        })
    }
}

#[inline]
fn groups(cells: u32, per_group: u32) -> u64 {
    u64::from(cells).div_ceil(u64::from(per_group.max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gpu_like() -> BackendLimits {
        BackendLimits {
            max_buffer_bytes: 128 << 20,
            workgroup_size: [8, 8],
            max_workgroups_per_dimension: 65_535,
        }
    }

    #[test]
    fn thickness_must_be_in_unit_interval() {
        let seed = Seed::new(1).unwrap();
        let size = GridSize::new(3, 3);
        for t in [0.0, -0.5, 1.5, f32::NAN, f32::INFINITY] {
            let err = MazeRequest::new(size, t, seed).unwrap_err();
            assert!(err.is_configuration(), "{t}");
        }
        assert!(MazeRequest::new(size, 1.0, seed).is_ok());
    }

    #[test]
    fn reseeding_keeps_size_and_thickness() {
        let r = MazeRequest::new(GridSize::new(4, 5), 0.25, Seed::new(1).unwrap()).unwrap();
        let r2 = r.reseeded(Seed::new(2).unwrap());
        assert_eq!(r2.size(), r.size());
        assert_eq!(r2.thickness(), 0.25);
        assert_eq!(r2.seed().get(), 2);
    }

    #[test]
    fn plan_for_three_by_three() {
        let plan = BufferPlan::new(GridSize::new(3, 3), &gpu_like()).unwrap();
        assert_eq!(plan.floats, 9 * 24);
        assert_eq!(plan.bytes, 9 * 24 * 4);
        assert_eq!(plan.workgroups, [1, 1]);
        assert_eq!(plan.vertex_count, 108);
    }

    #[test]
    fn empty_grid_plans_nothing() {
        let plan = BufferPlan::new(GridSize::new(0, 10), &gpu_like()).unwrap();
        assert_eq!(plan.bytes, 0);
        assert_eq!(plan.workgroups, [0, 2]);
        assert_eq!(plan.vertex_count, 0);
    }

    #[test]
    fn huge_grid_is_rejected_with_both_sizes() {
        let err = BufferPlan::new(GridSize::new(100_000, 100_000), &gpu_like()).unwrap_err();
        match err {
            MazeError::BufferTooLarge { requested, limit } => {
                assert_eq!(requested, 100_000u64 * 100_000 * 24 * 4);
                assert_eq!(limit, 128 << 20);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn dispatch_grid_is_checked() {
        let limits = BackendLimits {
            max_buffer_bytes: u64::MAX,
            workgroup_size: [8, 8],
            max_workgroups_per_dimension: 4,
        };
        let err = BufferPlan::new(GridSize::new(33, 8), &limits).unwrap_err();
        assert!(matches!(err, MazeError::DispatchTooLarge { axis: 'x', requested: 5, limit: 4 }));
    }

    #[test]
    fn overflowing_sizes_do_not_panic() {
        let limits = BackendLimits::unbounded_dispatch(u64::MAX);
        let err = BufferPlan::new(GridSize::new(u32::MAX, u32::MAX), &limits).unwrap_err();
        assert!(err.is_configuration());
    }
}
