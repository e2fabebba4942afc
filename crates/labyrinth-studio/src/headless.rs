//! One-shot generation without a window.

use std::fmt;

use anyhow::{Context, Result};
use log::info;

use labyrinth_engine::compute::GpuBackend;
use labyrinth_engine::device::GpuInit;
use labyrinth_maze::{CpuBackend, Maze, MazePipeline, MazeRequest};

use crate::cli::BackendChoice;

/// What a headless run reports.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub backend: &'static str,
    pub width: u32,
    pub height: u32,
    pub seed: u32,
    /// Closed walls drawn as quads.
    pub quads: usize,
    /// Open walls between neighbouring cells.
    pub passages: u64,
    pub border_points: usize,
}

impl Summary {
    pub fn of(backend: &'static str, maze: &Maze<Vec<f32>>) -> Self {
        let size = maze.request.size();
        let quads = maze.geometry().quad_count();
        Self {
            backend,
            width: size.width,
            height: size.height,
            seed: maze.request.seed().get(),
            quads,
            passages: (size.cell_count() * 2).saturating_sub(quads as u64),
            border_points: maze.border.len(),
        }
    }

    /// Every cell reachable with no cycles.
    pub fn is_spanning_tree(&self) -> bool {
        let cells = u64::from(self.width) * u64::from(self.height);
        cells == 0 || self.passages == cells - 1
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} maze, seed {} ({}): {} wall quads, {} passages, {} border points",
            self.width,
            self.height,
            self.seed,
            self.backend,
            self.quads,
            self.passages,
            self.border_points
        )
    }
}

/// Generates `request` on the chosen backend and reads the cells back.
pub fn run(request: &MazeRequest, backend: BackendChoice, init: &GpuInit) -> Result<Summary> {
    let summary = match backend {
        BackendChoice::Cpu => {
            let pipeline = MazePipeline::new(CpuBackend::default());
            let maze = pipeline.generate(request)?;
            Summary::of("cpu", &maze)
        }
        BackendChoice::Gpu => {
            let pipeline = MazePipeline::new(
                GpuBackend::headless(init).context("no GPU for headless generation")?,
            );
            let maze = pipeline.generate(request)?;
            let cells = pipeline
                .backend()
                .read_back(&maze.cells)
                .context("failed to read maze cells back from the GPU")?;
            Summary::of("gpu", &maze.map_cells(|_| cells))
        }
    };

    info!("{summary}");
    if !summary.is_spanning_tree() {
        log::warn!("passage count does not form a spanning tree");
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_maze::{GridSize, Seed};

    fn request(w: u32, h: u32) -> MazeRequest {
        MazeRequest::new(GridSize::new(w, h), 0.5, Seed::new(1).unwrap()).unwrap()
    }

    #[test]
    fn cpu_summary_for_three_by_three() {
        let s = run(&request(3, 3), BackendChoice::Cpu, &GpuInit::default()).unwrap();
        assert_eq!(s.quads, 10);
        assert_eq!(s.passages, 8);
        assert_eq!(s.border_points, 14);
        assert!(s.is_spanning_tree());
    }

    #[test]
    fn larger_grids_stay_trees() {
        let s = run(&request(40, 25), BackendChoice::Cpu, &GpuInit::default()).unwrap();
        assert!(s.is_spanning_tree());
        assert_eq!(s.to_string().split(' ').next(), Some("40x25"));
    }

    #[test]
    fn oversized_cpu_request_is_rejected() {
        let err = run(&request(100_000, 100_000), BackendChoice::Cpu, &GpuInit::default())
            .unwrap_err();
        let maze_err = err.downcast_ref::<labyrinth_maze::MazeError>().unwrap();
        assert!(maze_err.is_configuration());
    }
}
