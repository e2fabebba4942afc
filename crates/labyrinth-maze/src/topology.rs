//! Binary-tree carve rule, evaluated per cell with no cross-cell communication.
//!
//! Every cell owns its right and top wall. Each cell opens exactly one of them
//! (or none at the top-right corner), so every cell links toward the top-right
//! corner and the passages form a spanning tree.

use rayon::prelude::*;

use crate::backend::DEFAULT_CPU_BUFFER_BYTES;
use crate::error::{MazeError, Result};
use crate::grid::{CellCoord, GridSize};
use crate::seed::{carves_right, Seed};

/// Open/closed state of the two walls a cell owns.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct CellWalls {
    pub right_open: bool,
    pub top_open: bool,
}

impl CellWalls {
    pub const CLOSED: Self = Self {
        right_open: false,
        top_open: false,
    };

    /// Number of walls that must be drawn (0..=2).
    #[inline]
    pub fn closed_count(self) -> usize {
        usize::from(!self.right_open) + usize::from(!self.top_open)
    }

    #[inline]
    pub fn passage_count(self) -> usize {
        2 - self.closed_count()
    }
}

/// Decides the walls of one cell.
///
/// - top row: top wall closed (outer border), right wall is the only way out;
/// - right column: right wall closed (outer border), top wall is the only way out;
/// - top-right corner: both closed;
/// - anything else: one hashed bit picks right or top.
///
/// Coordinates outside `size` yield [`CellWalls::CLOSED`].
pub fn carve_cell(size: GridSize, seed: Seed, coord: CellCoord) -> CellWalls {
    if !size.contains(coord) {
        return CellWalls::CLOSED;
    }

    let top = size.is_top_row(coord);
    let right = size.is_right_column(coord);

    match (top, right) {
        (true, true) => CellWalls::CLOSED,
        (true, false) => CellWalls {
            right_open: true,
            top_open: false,
        },
        (false, true) => CellWalls {
            right_open: false,
            top_open: true,
        },
        (false, false) => {
            let b = carves_right(seed, coord);
            CellWalls {
                right_open: b,
                top_open: !b,
            }
        }
    }
}

/// Wall decisions for a whole grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    size: GridSize,
    cells: Vec<CellWalls>,
}

impl Topology {
    /// Evaluates every cell in parallel. Output order is independent of
    /// scheduling because each cell is a pure function of `(size, seed, coord)`.
    ///
    /// The wall table is held in host memory and capped at
    /// [`DEFAULT_CPU_BUFFER_BYTES`]; larger grids fail with
    /// [`MazeError::BufferTooLarge`] before anything is allocated.
    pub fn generate(size: GridSize, seed: Seed) -> Result<Self> {
        let requested = size
            .cell_count()
            .saturating_mul(std::mem::size_of::<CellWalls>() as u64);
        if requested > DEFAULT_CPU_BUFFER_BYTES {
            return Err(MazeError::BufferTooLarge {
                requested,
                limit: DEFAULT_CPU_BUFFER_BYTES,
            });
        }

        let n = size.cell_count() as usize;
        let cells = (0..n)
            .into_par_iter()
            .map(|i| carve_cell(size, seed, size.coord_of(i)))
            .collect();
        Ok(Self { size, cells })
    }

    #[inline]
    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn get(&self, coord: CellCoord) -> Option<CellWalls> {
        if !self.size.contains(coord) {
            return None;
        }
        self.cells.get(self.size.index_of(coord)).copied()
    }

    /// `(coord, walls)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellWalls)> + '_ {
        self.size.cells().zip(self.cells.iter().copied())
    }

    pub fn passage_count(&self) -> usize {
        self.cells.iter().map(|w| w.passage_count()).sum()
    }

    pub fn closed_wall_count(&self) -> usize {
        self.cells.iter().map(|w| w.closed_count()).sum()
    }
}
