//! Request -> sizing -> dispatch -> border.

use log::{debug, info};

use crate::backend::ComputeBackend;
use crate::border::border_strip;
use crate::camera::GridBounds;
use crate::error::Result;
use crate::geometry::{CellGeometry, Quad, VERTICES_PER_CELL};
use crate::request::{BufferPlan, MazeRequest};

/// A generated maze, ready to draw. Replaced as a whole on regeneration.
#[derive(Debug, Clone)]
pub struct Maze<C> {
    pub request: MazeRequest,
    pub bounds: GridBounds,
    /// Backend-owned cell buffer (one fixed-stride slot per cell).
    pub cells: C,
    /// Border triangle strip in grid space.
    pub border: Vec<[f32; 2]>,
}

impl<C> Maze<C> {
    /// Vertex count of the cell draw: `cells * 12`, sentinels included.
    pub fn cell_vertex_count(&self) -> u64 {
        self.request.size().cell_count() * VERTICES_PER_CELL as u64
    }

    pub fn border_vertex_count(&self) -> usize {
        self.border.len()
    }

    /// Same request and border, different cell storage.
    pub fn map_cells<D>(self, f: impl FnOnce(C) -> D) -> Maze<D> {
        Maze {
            request: self.request,
            bounds: self.bounds,
            cells: f(self.cells),
            border: self.border,
        }
    }
}

impl<C: AsRef<[f32]>> Maze<C> {
    pub fn geometry(&self) -> CellGeometry<'_> {
        CellGeometry::new(self.cells.as_ref())
    }

    /// Drawn wall quads, sentinel slots dropped.
    pub fn quads(&self) -> Vec<Quad> {
        self.geometry().quads().collect()
    }
}

/// Drives one backend through whole maze requests.
#[derive(Debug, Clone)]
pub struct MazePipeline<B> {
    backend: B,
}

impl<B: ComputeBackend> MazePipeline<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Sizing is checked before the backend sees the request; a rejected
    /// request allocates nothing.
    pub fn generate(&self, request: &MazeRequest) -> Result<Maze<B::Cells>> {
        let size = request.size();
        let plan = BufferPlan::new(size, &self.backend.limits())?;
        debug!(
            "{} backend: {}x{} cells, {} bytes, {}x{} groups",
            self.backend.name(),
            size.width,
            size.height,
            plan.bytes,
            plan.workgroups[0],
            plan.workgroups[1],
        );

        let cells = self.backend.dispatch(request)?;
        let border = border_strip(size, request.thickness());

        info!(
            "generated {}x{} maze (seed {}) on {}",
            size.width,
            size.height,
            request.seed(),
            self.backend.name()
        );

        Ok(Maze {
            request: *request,
            bounds: GridBounds::new(size, request.thickness()),
            cells,
            border,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;
    use crate::border::BORDER_VERTEX_COUNT;
    use crate::error::MazeError;
    use crate::grid::GridSize;
    use crate::request::BackendLimits;
    use crate::seed::Seed;
    use std::cell::Cell;

    /// Records whether `dispatch` ran.
    struct SpyBackend {
        limits: BackendLimits,
        dispatched: Cell<bool>,
    }

    impl ComputeBackend for SpyBackend {
        type Cells = ();

        fn name(&self) -> &str {
            "spy"
        }

        fn limits(&self) -> BackendLimits {
            self.limits
        }

        fn dispatch(&self, _request: &MazeRequest) -> Result<()> {
            self.dispatched.set(true);
            Ok(())
        }
    }

    fn request(w: u32, h: u32) -> MazeRequest {
        MazeRequest::new(GridSize::new(w, h), 0.5, Seed::new(1).unwrap()).unwrap()
    }

    // ── scenarios ─────────────────────────────────────────────────────────

    #[test]
    fn three_by_three() {
        let maze = MazePipeline::new(CpuBackend::default())
            .generate(&request(3, 3))
            .unwrap();

        assert_eq!(maze.cell_vertex_count(), 108);
        assert_eq!(maze.border_vertex_count(), BORDER_VERTEX_COUNT);

        let quads = maze.quads();
        assert!((9..=18).contains(&quads.len()));
        assert_eq!(quads.len(), 10);
        assert_eq!(maze.bounds.extent, [3.5, 3.5]);
    }

    #[test]
    fn oversized_grid_never_reaches_the_backend() {
        let spy = SpyBackend {
            limits: BackendLimits {
                max_buffer_bytes: 256 << 20,
                workgroup_size: [8, 8],
                max_workgroups_per_dimension: 65_535,
            },
            dispatched: Cell::new(false),
        };
        let pipeline = MazePipeline::new(&spy);

        let err = pipeline.generate(&request(100_000, 100_000)).unwrap_err();
        assert!(err.is_configuration());
        assert!(matches!(err, MazeError::BufferTooLarge { limit, .. } if limit == 256 << 20));
        assert!(!spy.dispatched.get());
    }

    #[test]
    fn accepted_request_dispatches_once() {
        let spy = SpyBackend {
            limits: BackendLimits::unbounded_dispatch(u64::MAX),
            dispatched: Cell::new(false),
        };
        let maze = MazePipeline::new(&spy).generate(&request(2, 2)).unwrap();
        assert!(spy.dispatched.get());
        assert_eq!(maze.border.len(), BORDER_VERTEX_COUNT);
    }

    #[test]
    fn empty_grid_is_empty_geometry() {
        let maze = MazePipeline::new(CpuBackend::default())
            .generate(&request(0, 0))
            .unwrap();
        assert_eq!(maze.cell_vertex_count(), 0);
        assert!(maze.border.is_empty());
        assert!(maze.quads().is_empty());
    }

    #[test]
    fn map_cells_keeps_border() {
        let maze = MazePipeline::new(CpuBackend::default())
            .generate(&request(2, 3))
            .unwrap();
        let len = maze.cells.len();
        let mapped = maze.map_cells(|c| c.len());
        assert_eq!(mapped.cells, len);
        assert_eq!(mapped.border.len(), BORDER_VERTEX_COUNT);
    }
}
