//! Compute dispatch capability and the rayon reference backend.

use log::debug;
use rayon::prelude::*;

use crate::error::Result;
use crate::geometry::{emit_cell, FLOATS_PER_CELL};
use crate::request::{BackendLimits, BufferPlan, MazeRequest};
use crate::topology::carve_cell;

/// Runs one data-parallel pass over the grid and hands back the cell buffer.
///
/// Implementations must validate the request against their own
/// [`limits`](ComputeBackend::limits) before allocating, so calling
/// `dispatch` directly is as safe as going through the pipeline.
pub trait ComputeBackend {
    /// Finished cell buffer. Host memory for the CPU, a device buffer for the GPU.
    type Cells;

    fn name(&self) -> &str;

    fn limits(&self) -> BackendLimits;

    /// Fills one fixed-stride slot per cell and returns once the work is
    /// complete.
    fn dispatch(&self, request: &MazeRequest) -> Result<Self::Cells>;
}

impl<B: ComputeBackend + ?Sized> ComputeBackend for &B {
    type Cells = B::Cells;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn limits(&self) -> BackendLimits {
        (**self).limits()
    }

    fn dispatch(&self, request: &MazeRequest) -> Result<Self::Cells> {
        (**self).dispatch(request)
    }
}

/// Default cap on the host working buffer (1 GiB).
pub const DEFAULT_CPU_BUFFER_BYTES: u64 = 1 << 30;

/// Host backend: one rayon task per cell slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CpuBackend {
    pub max_buffer_bytes: u64,
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self {
            max_buffer_bytes: DEFAULT_CPU_BUFFER_BYTES,
        }
    }
}

impl CpuBackend {
    pub fn with_max_buffer_bytes(max_buffer_bytes: u64) -> Self {
        Self { max_buffer_bytes }
    }
}

impl ComputeBackend for CpuBackend {
    type Cells = Vec<f32>;

    fn name(&self) -> &str {
        "cpu"
    }

    fn limits(&self) -> BackendLimits {
        BackendLimits::unbounded_dispatch(self.max_buffer_bytes)
    }

    fn dispatch(&self, request: &MazeRequest) -> Result<Vec<f32>> {
        let plan = BufferPlan::new(request.size(), &self.limits())?;
        let size = request.size();
        let seed = request.seed();
        let t = request.thickness();

        // Fits in usize: bounded by `max_buffer_bytes`, itself a host allocation.
        let mut cells = vec![0.0f32; plan.floats as usize];
        cells
            .par_chunks_mut(FLOATS_PER_CELL)
            .enumerate()
            .for_each(|(i, slot)| {
                let coord = size.coord_of(i);
                emit_cell(carve_cell(size, seed, coord), coord, t, slot);
            });

        debug!(
            "cpu dispatch: {}x{} cells, {} bytes",
            size.width, size.height, plan.bytes
        );
        Ok(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MazeError;
    use crate::geometry::{CellGeometry, FLOATS_PER_CELL, SENTINEL};
    use crate::grid::{CellCoord, GridSize};
    use crate::seed::Seed;
    use crate::topology::Topology;

    fn request(w: u32, h: u32, seed: u32) -> MazeRequest {
        MazeRequest::new(GridSize::new(w, h), 0.5, Seed::new(seed).unwrap()).unwrap()
    }

    #[test]
    fn buffer_has_one_slot_per_cell() {
        let cells = CpuBackend::default().dispatch(&request(4, 3, 9)).unwrap();
        assert_eq!(cells.len(), 12 * FLOATS_PER_CELL);
    }

    #[test]
    fn corner_slot_holds_both_walls() {
        let size = GridSize::new(3, 3);
        let cells = CpuBackend::default().dispatch(&request(3, 3, 1)).unwrap();
        let i = size.index_of(CellCoord::new(2, 2));
        let slot = &cells[i * FLOATS_PER_CELL..(i + 1) * FLOATS_PER_CELL];
        assert!(slot.iter().all(|&f| f != SENTINEL));
    }

    #[test]
    fn quads_match_topology() {
        let r = request(17, 11, 4242);
        let cells = CpuBackend::default().dispatch(&r).unwrap();
        let topo = Topology::generate(r.size(), r.seed()).unwrap();
        assert_eq!(CellGeometry::new(&cells).quad_count(), topo.closed_wall_count());
    }

    #[test]
    fn empty_grid_dispatches_nothing() {
        let cells = CpuBackend::default().dispatch(&request(0, 5, 1)).unwrap();
        assert!(cells.is_empty());
    }

    #[test]
    fn direct_dispatch_checks_limits() {
        let backend = CpuBackend::with_max_buffer_bytes(1024);
        let err = backend.dispatch(&request(10, 10, 1)).unwrap_err();
        assert!(matches!(
            err,
            MazeError::BufferTooLarge { requested: 9600, limit: 1024 }
        ));
    }

    #[test]
    fn borrowed_backend_forwards() {
        let backend = CpuBackend::default();
        let by_ref = &backend;
        assert_eq!(by_ref.name(), "cpu");
        assert_eq!(by_ref.limits(), backend.limits());
    }
}
