//! Grid-to-render-space transform and the pan/zoom camera model.
//!
//! `render = (grid - origin) * zoom * scale + pan`, with `scale = 2 / extent`.
//! The GPU applies this in the vertex shader; the CPU copy below exists for
//! tests and read-back tooling and must match `shaders/maze.wgsl`.

use crate::grid::GridSize;

/// Pan step per input unit before density scaling.
pub const PAN_SPEED: f32 = 0.1;

/// Lower bound for a single zoom step factor (`1 + delta / 100`).
pub const MIN_ZOOM_STEP: f32 = 0.01;

/// Axis-aligned bounding box of the maze (border included) in grid space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridBounds {
    /// Box centre.
    pub origin: [f32; 2],
    /// Box size; strictly positive for non-empty grids.
    pub extent: [f32; 2],
}

impl GridBounds {
    /// Outer rectangle of the border strip:
    /// `[-0.5 - t/2, w - 0.5 + t/2] x [-0.5 - t/2, h - 0.5 + t/2]`.
    pub fn new(size: GridSize, thickness: f32) -> Self {
        let w = size.width as f32;
        let h = size.height as f32;
        Self {
            origin: [(w - 1.0) / 2.0, (h - 1.0) / 2.0],
            extent: [w + thickness, h + thickness],
        }
    }

    /// Per-axis factor mapping the box onto `[-1, 1]`.
    #[inline]
    pub fn scale(&self) -> [f32; 2] {
        [2.0 / self.extent[0].max(f32::EPSILON), 2.0 / self.extent[1].max(f32::EPSILON)]
    }

    /// Grid space to `[-1, 1]`, no camera.
    #[inline]
    pub fn normalize(&self, p: [f32; 2]) -> [f32; 2] {
        let s = self.scale();
        [(p[0] - self.origin[0]) * s[0], (p[1] - self.origin[1]) * s[1]]
    }
}

/// Input fed into the camera between frames.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CameraInput {
    /// Zoom step in percent; positive zooms in.
    Zoom(f32),
    /// Pan delta in input units; scaled by grid density.
    Pan { dx: f32, dy: f32 },
    /// Back to zoom 1, pan 0.
    Reset,
}

/// Pan/zoom state. Owned by the frame loop; generation never touches it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub zoom: f32,
    pub pan: [f32; 2],
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: [0.0, 0.0],
        }
    }
}

impl Camera {
    /// `zoom *= 1 + delta / 100`. The step factor is clamped to
    /// [`MIN_ZOOM_STEP`] so zoom stays strictly positive.
    pub fn zoom_by(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        let step = (1.0 + delta / 100.0).max(MIN_ZOOM_STEP);
        let zoom = self.zoom * step;
        if zoom.is_finite() && zoom > 0.0 {
            self.zoom = zoom;
        }
    }

    /// Adds `(dx, dy) * PAN_SPEED / sqrt(cell_count)` to the pan offset.
    pub fn pan_by(&mut self, dx: f32, dy: f32, cell_count: u64) {
        if cell_count == 0 || !dx.is_finite() || !dy.is_finite() {
            return;
        }
        let k = PAN_SPEED / (cell_count as f64).sqrt() as f32;
        self.pan[0] += dx * k;
        self.pan[1] += dy * k;
    }

    pub fn apply(&mut self, input: CameraInput, cell_count: u64) {
        match input {
            CameraInput::Zoom(delta) => self.zoom_by(delta),
            CameraInput::Pan { dx, dy } => self.pan_by(dx, dy, cell_count),
            CameraInput::Reset => *self = Self::default(),
        }
    }

    /// Folds a frame's queued inputs in arrival order.
    pub fn apply_all<I>(&mut self, inputs: I, cell_count: u64)
    where
        I: IntoIterator<Item = CameraInput>,
    {
        for input in inputs {
            self.apply(input, cell_count);
        }
    }

    /// Grid space to render space.
    #[inline]
    pub fn transform(&self, bounds: &GridBounds, p: [f32; 2]) -> [f32; 2] {
        let n = bounds.normalize(p);
        [n[0] * self.zoom + self.pan[0], n[1] * self.zoom + self.pan[1]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::border::border_strip;
    use proptest::prelude::*;

    // ── bounds ────────────────────────────────────────────────────────────

    #[test]
    fn bounds_match_border_extents() {
        let b = GridBounds::new(GridSize::new(3, 3), 0.5);
        assert_eq!(b.origin, [1.0, 1.0]);
        assert_eq!(b.extent, [3.5, 3.5]);
        assert_eq!(b.normalize([-0.75, -0.75]), [-1.0, -1.0]);
        assert_eq!(b.normalize([2.75, 2.75]), [1.0, 1.0]);
    }

    #[test]
    fn border_fills_the_unit_square() {
        let size = GridSize::new(7, 4);
        let b = GridBounds::new(size, 0.5);
        for v in border_strip(size, 0.5) {
            let [x, y] = b.normalize(v);
            let unit = -1.0 - 1e-6..=1.0 + 1e-6;
            assert!(unit.contains(&x) && unit.contains(&y), "{v:?}");
        }
    }

    // ── zoom ──────────────────────────────────────────────────────────────

    #[test]
    fn zoom_is_multiplicative() {
        let mut cam = Camera::default();
        cam.zoom_by(10.0);
        cam.zoom_by(10.0);
        assert!((cam.zoom - 1.21).abs() < 1e-6);
    }

    #[test]
    fn zoom_stays_positive() {
        let mut cam = Camera::default();
        cam.zoom_by(-100.0);
        cam.zoom_by(-5000.0);
        assert!(cam.zoom > 0.0);
        cam.zoom_by(f32::NAN);
        assert!(cam.zoom > 0.0);
    }

    // ── pan ───────────────────────────────────────────────────────────────

    #[test]
    fn pan_scales_with_grid_density() {
        let mut small = Camera::default();
        let mut large = Camera::default();
        small.pan_by(1.0, 0.0, 4);
        large.pan_by(1.0, 0.0, 400);
        assert!((small.pan[0] - PAN_SPEED / 2.0).abs() < 1e-6);
        assert!((large.pan[0] - PAN_SPEED / 20.0).abs() < 1e-6);
    }

    #[test]
    fn pan_on_empty_grid_is_ignored() {
        let mut cam = Camera::default();
        cam.pan_by(5.0, 5.0, 0);
        assert_eq!(cam, Camera::default());
    }

    #[test]
    fn queued_inputs_apply_in_order() {
        let mut cam = Camera::default();
        cam.apply_all(
            [
                CameraInput::Zoom(100.0),
                CameraInput::Pan { dx: 10.0, dy: -10.0 },
                CameraInput::Reset,
                CameraInput::Zoom(-50.0),
            ],
            100,
        );
        assert_eq!(cam.zoom, 0.5);
        assert_eq!(cam.pan, [0.0, 0.0]);
    }

    // ── transform ─────────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn identity_camera_reproduces_normalized(
            w in 1u32..200, h in 1u32..200,
            x in -1.0f32..200.0, y in -1.0f32..200.0,
        ) {
            let b = GridBounds::new(GridSize::new(w, h), 0.5);
            prop_assert_eq!(Camera::default().transform(&b, [x, y]), b.normalize([x, y]));
        }
    }

    #[test]
    fn transform_applies_zoom_then_pan() {
        let b = GridBounds::new(GridSize::new(3, 3), 0.5);
        let cam = Camera { zoom: 2.0, pan: [0.25, -0.5] };
        assert_eq!(cam.transform(&b, [2.75, 2.75]), [2.25, 1.5]);
    }
}
