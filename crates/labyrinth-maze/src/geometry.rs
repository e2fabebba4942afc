//! Wall-to-quad emission into fixed-stride cell slots.
//!
//! Layout of the flat cell buffer (shared with the GPU compute shader):
//! - one slot per cell, row-major, `VERTICES_PER_CELL` vertices of two `f32`s;
//! - closed walls are written first (right, then top), 6 vertices each;
//! - the remaining vertices of the slot hold [`SENTINEL`].
//!
//! A sentinel-filled quad collapses to a single point, so the buffer can be
//! drawn as-is as a triangle list; CPU consumers drop sentinel vertices in one
//! pass with [`CellGeometry`].

use crate::grid::{CellCoord, GridSize};
use crate::topology::CellWalls;

pub const FLOATS_PER_VERTEX: usize = 2;
pub const VERTICES_PER_QUAD: usize = 6;
pub const MAX_QUADS_PER_CELL: usize = 2;
pub const VERTICES_PER_CELL: usize = VERTICES_PER_QUAD * MAX_QUADS_PER_CELL;
pub const FLOATS_PER_CELL: usize = VERTICES_PER_CELL * FLOATS_PER_VERTEX;

/// Coordinate written to unused vertices. Grid geometry never goes below
/// `-0.5 - t/2 >= -1.0` for valid thicknesses.
pub const SENTINEL: f32 = -2.0;

/// Two triangles: `(x0,y0) (x1,y0) (x0,y1)` and `(x1,y0) (x0,y1) (x1,y1)`.
pub type Quad = [[f32; 2]; VERTICES_PER_QUAD];

#[inline]
fn rect_quad(x0: f32, y0: f32, x1: f32, y1: f32) -> Quad {
    [[x0, y0], [x1, y0], [x0, y1], [x1, y0], [x0, y1], [x1, y1]]
}

/// Quad for the right wall of `coord`: centred on `x = cx + 0.5`, width `t`,
/// extended by `t/2` past both cell corners so adjacent walls overlap.
pub fn right_wall_quad(coord: CellCoord, thickness: f32) -> Quad {
    let [cx, cy] = coord.center();
    let h = thickness / 2.0;
    let x = cx + 0.5;
    rect_quad(x - h, cy - 0.5 - h, x + h, cy + 0.5 + h)
}

/// Quad for the top wall of `coord`: centred on `y = cy + 0.5`.
pub fn top_wall_quad(coord: CellCoord, thickness: f32) -> Quad {
    let [cx, cy] = coord.center();
    let h = thickness / 2.0;
    let y = cy + 0.5;
    rect_quad(cx - 0.5 - h, y - h, cx + 0.5 + h, y + h)
}

/// Writes one cell slot. `slot` must hold exactly [`FLOATS_PER_CELL`] floats.
///
/// Returns the number of quads written.
pub fn emit_cell(walls: CellWalls, coord: CellCoord, thickness: f32, slot: &mut [f32]) -> usize {
    debug_assert_eq!(slot.len(), FLOATS_PER_CELL);

    let mut quads = 0;
    let mut put = |quad: &Quad, quads: &mut usize| {
        let base = *quads * VERTICES_PER_QUAD * FLOATS_PER_VERTEX;
        for (i, v) in quad.iter().enumerate() {
            slot[base + i * 2] = v[0];
            slot[base + i * 2 + 1] = v[1];
        }
        *quads += 1;
    };

    if !walls.right_open {
        put(&right_wall_quad(coord, thickness), &mut quads);
    }
    if !walls.top_open {
        put(&top_wall_quad(coord, thickness), &mut quads);
    }

    let used = quads * VERTICES_PER_QUAD * FLOATS_PER_VERTEX;
    slot[used..].fill(SENTINEL);
    quads
}

#[inline]
pub fn is_sentinel(v: [f32; 2]) -> bool {
    v[0] < -1.0
}

/// Total floats needed for `size`, or `None` on overflow.
pub fn cell_buffer_floats(size: GridSize) -> Option<u64> {
    size.cell_count().checked_mul(FLOATS_PER_CELL as u64)
}

/// Read-only view of a flat cell buffer with sentinel filtering.
#[derive(Debug, Clone, Copy)]
pub struct CellGeometry<'a> {
    floats: &'a [f32],
}

impl<'a> CellGeometry<'a> {
    #[inline]
    pub fn new(floats: &'a [f32]) -> Self {
        Self { floats }
    }

    /// Every vertex in the buffer, sentinels included.
    pub fn raw_vertices(&self) -> impl Iterator<Item = [f32; 2]> + 'a {
        self.floats.chunks_exact(2).map(|v| [v[0], v[1]])
    }

    /// Non-sentinel vertices, in buffer order.
    pub fn vertices(&self) -> impl Iterator<Item = [f32; 2]> + 'a {
        self.raw_vertices().filter(|v| !is_sentinel(*v))
    }

    /// Whole quads. Sentinel runs are always quad-aligned.
    pub fn quads(&self) -> impl Iterator<Item = Quad> + 'a {
        self.floats
            .chunks_exact(VERTICES_PER_QUAD * FLOATS_PER_VERTEX)
            .filter(|q| !is_sentinel([q[0], q[1]]))
            .map(|q| std::array::from_fn(|i| [q[i * 2], q[i * 2 + 1]]))
    }

    pub fn quad_count(&self) -> usize {
        self.quads().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::Seed;
    use crate::topology::{carve_cell, Topology};
    use proptest::prelude::*;

    fn bounds(quad: &Quad) -> (f32, f32, f32, f32) {
        let xs = quad.iter().map(|v| v[0]);
        let ys = quad.iter().map(|v| v[1]);
        (
            xs.clone().fold(f32::INFINITY, f32::min),
            ys.clone().fold(f32::INFINITY, f32::min),
            xs.fold(f32::NEG_INFINITY, f32::max),
            ys.fold(f32::NEG_INFINITY, f32::max),
        )
    }

    fn emit_grid(size: GridSize, seed: Seed, t: f32) -> Vec<f32> {
        let topo = Topology::generate(size, seed).unwrap();
        let mut buf = vec![0.0; cell_buffer_floats(size).unwrap() as usize];
        for (slot, (c, w)) in buf.chunks_exact_mut(FLOATS_PER_CELL).zip(topo.iter()) {
            emit_cell(w, c, t, slot);
        }
        buf
    }

    // ── quads ─────────────────────────────────────────────────────────────

    #[test]
    fn right_wall_spans_cell_height_plus_thickness() {
        let (x0, y0, x1, y1) = bounds(&right_wall_quad(CellCoord::new(2, 1), 0.5));
        assert_eq!((x0, x1), (2.25, 2.75));
        assert_eq!((y0, y1), (0.25, 1.75));
    }

    #[test]
    fn top_wall_is_the_transposed_rectangle() {
        let (x0, y0, x1, y1) = bounds(&top_wall_quad(CellCoord::new(2, 1), 0.5));
        assert_eq!((x0, x1), (1.25, 2.75));
        assert_eq!((y0, y1), (1.25, 1.75));
    }

    #[test]
    fn quad_triangles_have_positive_area() {
        let q = right_wall_quad(CellCoord::new(0, 0), 0.1);
        for tri in q.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]];
            let area = (b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1]);
            assert!(area.abs() > 0.0);
        }
    }

    // ── slots ─────────────────────────────────────────────────────────────

    #[test]
    fn corner_cell_fills_its_slot() {
        let mut slot = [0.0; FLOATS_PER_CELL];
        let n = emit_cell(CellWalls::CLOSED, CellCoord::new(2, 2), 0.5, &mut slot);
        assert_eq!(n, 2);
        assert!(!slot.contains(&SENTINEL));
    }

    #[test]
    fn open_walls_leave_sentinels() {
        let mut slot = [0.0; FLOATS_PER_CELL];
        let walls = CellWalls {
            right_open: true,
            top_open: true,
        };
        assert_eq!(emit_cell(walls, CellCoord::new(0, 0), 0.5, &mut slot), 0);
        assert!(slot.iter().all(|&f| f == SENTINEL));
    }

    #[test]
    fn single_closed_wall_fills_first_half() {
        let mut slot = [0.0; FLOATS_PER_CELL];
        let walls = CellWalls {
            right_open: true,
            top_open: false,
        };
        emit_cell(walls, CellCoord::new(0, 0), 0.5, &mut slot);
        let geo = CellGeometry::new(&slot);
        assert_eq!(geo.quads().collect::<Vec<_>>(), vec![top_wall_quad(CellCoord::new(0, 0), 0.5)]);
        assert!(slot[FLOATS_PER_CELL / 2..].iter().all(|&f| f == SENTINEL));
    }

    #[test]
    fn three_by_three_scenario_quad_count() {
        let buf = emit_grid(GridSize::new(3, 3), Seed::new(1).unwrap(), 0.5);
        let n = CellGeometry::new(&buf).quad_count();
        assert!((9..=18).contains(&n));
        assert_eq!(n, 10);
    }

    #[test]
    fn carve_and_emit_agree_on_wall_count() {
        let size = GridSize::new(6, 4);
        let seed = Seed::new(5).unwrap();
        let buf = emit_grid(size, seed, 0.25);
        let expected: usize = size.cells().map(|c| carve_cell(size, seed, c).closed_count()).sum();
        assert_eq!(CellGeometry::new(&buf).quad_count(), expected);
    }

    #[test]
    fn buffer_size_overflow_is_detected() {
        assert_eq!(cell_buffer_floats(GridSize::new(u32::MAX, u32::MAX)), None);
    }

    proptest! {
        #[test]
        fn emitted_vertices_are_whole_quads_within_bound(
            w in 0u32..16,
            h in 0u32..16,
            s in 0u32..100_000,
            t in 0.01f32..=1.0,
        ) {
            let size = GridSize::new(w, h);
            let buf = emit_grid(size, Seed::new(s).unwrap(), t);
            let n = CellGeometry::new(&buf).vertices().count();
            prop_assert!(n as u64 <= size.cell_count() * 12);
            prop_assert_eq!(n % 6, 0);
            prop_assert!(CellGeometry::new(&buf).vertices().all(|v| v[0] >= -1.0 && v[1] >= -1.0));
        }
    }
}
