//! Seed model and the per-cell coordinate hash.
//!
//! Cells never share RNG state. Each cell derives its single random bit from
//! `hash(seed, x, y)`, so cells can be evaluated in any order, on any thread or
//! GPU invocation. `shaders/maze_compute.wgsl` in the engine crate carries the
//! same mixing function; keep the two in lockstep.

use crate::error::{MazeError, Result};
use crate::grid::CellCoord;

/// Exclusive upper bound for seeds: `2^24`, the largest range of integers an
/// `f32` represents exactly. The compute parameter block stores the seed as `f32`.
pub const MAX_SEED: u32 = 1 << 24;

/// Global maze seed in `[0, MAX_SEED)`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Seed(u32);

impl Seed {
    pub fn new(value: u32) -> Result<Self> {
        if value >= MAX_SEED {
            return Err(MazeError::SeedOutOfRange {
                seed: value,
                limit: MAX_SEED,
            });
        }
        Ok(Self(value))
    }

    /// Draws a fresh seed from the thread RNG.
    pub fn random() -> Self {
        Self(rand::random_range(0..MAX_SEED))
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Seed as stored in the GPU parameter block. Exact for every valid seed.
    #[inline]
    pub fn as_f32(self) -> f32 {
        self.0 as f32
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 32-bit integer avalanche mix (xorshift-multiply, two rounds).
#[inline]
pub const fn mix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^= h >> 16;
    h
}

/// Pure hash of `(seed, x, y)`.
#[inline]
pub const fn cell_hash(seed: Seed, coord: CellCoord) -> u32 {
    let h = mix32(coord.y.wrapping_add(0x9e37_79b9));
    let h = mix32(coord.x ^ h);
    mix32(seed.0 ^ h)
}

/// The one random bit a cell draws: `true` carves the right wall.
#[inline]
pub const fn carves_right(seed: Seed, coord: CellCoord) -> bool {
    cell_hash(seed, coord) & 1 == 1
}
