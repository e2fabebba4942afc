/// Grid dimensions in cells.
///
/// A zero width or height is a valid, empty grid.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of cells; `u64` so `u32::MAX x u32::MAX` cannot overflow.
    #[inline]
    pub fn cell_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn contains(self, coord: CellCoord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Row-major index of `coord` (x fastest), matching the GPU slot layout.
    #[inline]
    pub fn index_of(self, coord: CellCoord) -> usize {
        coord.y as usize * self.width as usize + coord.x as usize
    }

    /// Inverse of [`index_of`](Self::index_of).
    #[inline]
    pub fn coord_of(self, index: usize) -> CellCoord {
        let w = self.width.max(1) as usize;
        CellCoord::new((index % w) as u32, (index / w) as u32)
    }

    #[inline]
    pub fn is_top_row(self, coord: CellCoord) -> bool {
        coord.y + 1 == self.height
    }

    #[inline]
    pub fn is_right_column(self, coord: CellCoord) -> bool {
        coord.x + 1 == self.width
    }

    /// All cell coordinates in row-major order.
    pub fn cells(self) -> impl Iterator<Item = CellCoord> {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| CellCoord::new(x, y)))
    }
}

/// Integer cell coordinate; `(0, 0)` is bottom-left, +Y up.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct CellCoord {
    pub x: u32,
    pub y: u32,
}

impl CellCoord {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Cell centre in grid space.
    #[inline]
    pub fn center(self) -> [f32; 2] {
        [self.x as f32, self.y as f32]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_grids_are_empty() {
        assert!(GridSize::new(0, 5).is_empty());
        assert!(GridSize::new(5, 0).is_empty());
        assert_eq!(GridSize::new(0, 5).cells().count(), 0);
    }

    #[test]
    fn cell_count_does_not_overflow() {
        let size = GridSize::new(u32::MAX, u32::MAX);
        assert_eq!(size.cell_count(), u64::from(u32::MAX) * u64::from(u32::MAX));
    }

    #[test]
    fn index_round_trips_through_coord() {
        let size = GridSize::new(4, 3);
        for (i, c) in size.cells().enumerate() {
            assert_eq!(size.index_of(c), i);
            assert_eq!(size.coord_of(i), c);
        }
    }

    #[test]
    fn edge_predicates() {
        let size = GridSize::new(3, 3);
        assert!(size.is_top_row(CellCoord::new(0, 2)));
        assert!(!size.is_top_row(CellCoord::new(2, 1)));
        assert!(size.is_right_column(CellCoord::new(2, 0)));
        assert!(!size.contains(CellCoord::new(3, 0)));
    }
}
