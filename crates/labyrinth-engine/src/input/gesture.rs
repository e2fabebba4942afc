//! Pointer drag and wheel to camera inputs.

use labyrinth_maze::CameraInput;

use super::frame::InputFrame;
use super::types::{InputEvent, MouseButton, MouseButtonState, MouseWheelDelta};

#[derive(Debug, Copy, Clone, PartialEq)]
struct GestureConfig {
    /// Button that drags the maze.
    drag_button: MouseButton,
    /// Pan units per logical pixel of drag.
    drag_scale: f32,
    /// Zoom percent per wheel line.
    line_zoom: f32,
    /// Zoom percent per wheel pixel (touchpads).
    pixel_zoom: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_button: MouseButton::Left,
            drag_scale: 0.1,
            line_zoom: 10.0,
            pixel_zoom: 0.1,
        }
    }
}

/// Turns a frame's input events into [`CameraInput`]s.
///
/// Screen space is +Y down, grid space +Y up, so vertical drag is negated.
#[derive(Debug, Default)]
pub struct GestureTracker {
    config: GestureConfig,
    dragging: bool,
    last: Option<(f32, f32)>,
}

impl GestureTracker {
    /// Camera inputs for every event of `frame`, in arrival order.
    pub fn collect(&mut self, frame: &InputFrame) -> Vec<CameraInput> {
        let mut out = Vec::new();
        for ev in &frame.events {
            self.feed(ev, &mut out);
        }
        out
    }

    pub fn feed(&mut self, ev: &InputEvent, out: &mut Vec<CameraInput>) {
        match ev {
            InputEvent::PointerButton(b) if b.button == self.config.drag_button => {
                self.dragging = b.state == MouseButtonState::Pressed;
                self.last = Some((b.x, b.y));
            }

            InputEvent::PointerMoved(m) => {
                if let (true, Some((lx, ly))) = (self.dragging, self.last) {
                    let dx = (m.x - lx) * self.config.drag_scale;
                    let dy = (ly - m.y) * self.config.drag_scale;
                    if dx != 0.0 || dy != 0.0 {
                        out.push(CameraInput::Pan { dx, dy });
                    }
                }
                self.last = Some((m.x, m.y));
            }

            InputEvent::PointerLeft | InputEvent::Focused(false) => {
                self.dragging = false;
                self.last = None;
            }

            InputEvent::MouseWheel { delta, .. } => {
                let percent = match *delta {
                    MouseWheelDelta::Line { y, .. } => y * self.config.line_zoom,
                    MouseWheelDelta::Pixel { y, .. } => y * self.config.pixel_zoom,
                };
                if percent != 0.0 {
                    out.push(CameraInput::Zoom(percent));
                }
            }

            _ => {}
        }
    }
}
