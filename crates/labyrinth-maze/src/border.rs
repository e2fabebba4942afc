//! Border outline as a single triangle strip.
//!
//! Vertex walk (o = outer loop, i = inner loop):
//!
//! ```text
//!  0 o BL   1 i BL   2 o BR   3 i BR   4 o TR   5 i TR
//!  6 bridge 7 bridge
//!  8 o TR   9 i TR  10 o TL  11 i TL  12 o BL  13 i BL
//! ```
//!
//! The bridge pair sits on the wall corner between `o TR` and `i TR`, so every
//! triangle touching it is collinear (zero area). After the bridge the strip
//! restarts on an even index and keeps its winding for the last three corners.

use crate::grid::GridSize;

/// Number of vertices in a non-empty border strip.
pub const BORDER_VERTEX_COUNT: usize = 14;

/// Index of the first vertex of the degenerate bridge pair.
pub const BRIDGE_INDEX: usize = 6;

/// Builds the strip framing `[-0.5 - t/2, w - 0.5 + t/2] x [-0.5 - t/2, h - 0.5 + t/2]`.
///
/// An empty grid yields an empty strip.
pub fn border_strip(size: GridSize, thickness: f32) -> Vec<[f32; 2]> {
    if size.is_empty() {
        return Vec::new();
    }

    let h = thickness / 2.0;
    let left = -0.5;
    let bottom = -0.5;
    let right = size.width as f32 - 0.5;
    let top = size.height as f32 - 0.5;

    let outer_bl = [left - h, bottom - h];
    let inner_bl = [left + h, bottom + h];
    let outer_br = [right + h, bottom - h];
    let inner_br = [right - h, bottom + h];
    let outer_tr = [right + h, top + h];
    let inner_tr = [right - h, top - h];
    let outer_tl = [left - h, top + h];
    let inner_tl = [left + h, top - h];

    let bridge = [right, top];

    vec![
        outer_bl, inner_bl,
        outer_br, inner_br,
        outer_tr, inner_tr,
        bridge, bridge,
        outer_tr, inner_tr,
        outer_tl, inner_tl,
        outer_bl, inner_bl,
    ]
}

/// Twice the signed area of triangle `(a, b, c)`.
#[inline]
pub fn signed_area2(a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> f32 {
    (b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn extents(strip: &[[f32; 2]]) -> [f32; 4] {
        strip.iter().fold(
            [f32::INFINITY, f32::INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY],
            |[x0, y0, x1, y1], v| [x0.min(v[0]), y0.min(v[1]), x1.max(v[0]), y1.max(v[1])],
        )
    }

    #[test]
    fn empty_grid_has_no_border() {
        assert!(border_strip(GridSize::new(0, 3), 0.5).is_empty());
    }

    #[test]
    fn three_by_three_frame() {
        let strip = border_strip(GridSize::new(3, 3), 0.5);
        assert_eq!(strip.len(), BORDER_VERTEX_COUNT);
        assert_eq!(extents(&strip), [-0.75, -0.75, 2.75, 2.75]);
    }

    #[test]
    fn strip_closes_on_its_starting_corner() {
        let strip = border_strip(GridSize::new(4, 2), 0.3);
        assert_eq!(strip[0], strip[12]);
        assert_eq!(strip[1], strip[13]);
    }

    #[test]
    fn bridge_triangles_have_zero_area() {
        let strip = border_strip(GridSize::new(5, 5), 0.5);
        for i in (BRIDGE_INDEX - 2)..=(BRIDGE_INDEX + 1) {
            assert_eq!(signed_area2(strip[i], strip[i + 1], strip[i + 2]), 0.0, "triangle {i}");
        }
    }

    #[test]
    fn visible_triangles_keep_one_winding() {
        let strip = border_strip(GridSize::new(3, 2), 0.5);
        let mut sign = None;
        for i in 0..strip.len() - 2 {
            let area = signed_area2(strip[i], strip[i + 1], strip[i + 2]);
            if area == 0.0 {
                continue;
            }
            // Strips flip orientation on odd triangles.
            let oriented = if i % 2 == 0 { area } else { -area };
            let s = *sign.get_or_insert(oriented.signum());
            assert_eq!(oriented.signum(), s, "triangle {i} flips winding");
        }
        assert!(sign.is_some());
    }

    proptest! {
        #[test]
        fn exactly_one_coincident_pair(w in 1u32..64, h in 1u32..64, t in 0.01f32..=1.0) {
            let strip = border_strip(GridSize::new(w, h), t);
            let pairs: Vec<usize> = (0..strip.len() - 1)
                .filter(|&i| strip[i] == strip[i + 1])
                .collect();
            prop_assert_eq!(pairs, vec![BRIDGE_INDEX]);
        }
    }
}
