//! Interactive viewer: GPU generation, pan/zoom, regeneration.

use anyhow::Result;
use log::{info, warn};

use labyrinth_engine::compute::{GpuBackend, GpuMaze};
use labyrinth_engine::core::{App, AppControl, FrameCtx};
use labyrinth_engine::device::GpuInit;
use labyrinth_engine::input::{GestureTracker, InputFrame, InputState, Key};
use labyrinth_engine::paint::Color;
use labyrinth_engine::render::MazeRenderer;
use labyrinth_engine::window::{Runtime, RuntimeConfig};
use labyrinth_maze::{Camera, CameraInput, MazeError, MazePipeline, MazeRequest, Seed};

/// Pan units per frame while an arrow key is held.
const KEY_PAN: f32 = 1.0;

/// Zoom percent per `+` / `-` press.
const KEY_ZOOM: f32 = 10.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewerStyle {
    pub clear: Color,
    pub walls: Color,
}

impl Default for ViewerStyle {
    fn default() -> Self {
        Self {
            clear: Color::from_straight(0.07, 0.07, 0.09, 1.0),
            walls: Color::from_straight(0.85, 0.85, 0.8, 1.0),
        }
    }
}

/// Opens the viewer window and blocks until it closes.
pub fn run(request: MazeRequest, style: ViewerStyle) -> Result<()> {
    let config = RuntimeConfig {
        title: title(&request),
        ..Default::default()
    };

    // A failed first generation comes back as the run's error.
    Runtime::run(config, GpuInit::default(), MazeViewer::new(request, style))?;
    Ok(())
}

fn title(request: &MazeRequest) -> String {
    let size = request.size();
    format!(
        "labyrinth {}x{} (seed {})",
        size.width,
        size.height,
        request.seed()
    )
}

/// Keyboard part of the camera feed: `0` resets, arrows pan while held,
/// `+`/`-` zoom per press.
fn keyboard_inputs(input: &InputState, frame: &InputFrame) -> Vec<CameraInput> {
    let mut out = Vec::new();

    if frame.key_pressed(Key::Digit0) {
        out.push(CameraInput::Reset);
    }
    if frame.key_pressed(Key::Equal) {
        out.push(CameraInput::Zoom(KEY_ZOOM));
    }
    if frame.key_pressed(Key::Minus) {
        out.push(CameraInput::Zoom(-KEY_ZOOM));
    }

    let axis = |neg: Key, pos: Key| -> f32 {
        f32::from(u8::from(input.key_down(pos))) - f32::from(u8::from(input.key_down(neg)))
    };
    let dx = axis(Key::ArrowLeft, Key::ArrowRight) * KEY_PAN;
    let dy = axis(Key::ArrowDown, Key::ArrowUp) * KEY_PAN;
    if dx != 0.0 || dy != 0.0 {
        out.push(CameraInput::Pan { dx, dy });
    }

    out
}

struct MazeViewer {
    request: MazeRequest,
    pipeline: Option<MazePipeline<GpuBackend>>,
    maze: Option<GpuMaze>,

    camera: Camera,
    gestures: GestureTracker,
    renderer: MazeRenderer,
    clear: Color,
}

impl MazeViewer {
    fn new(request: MazeRequest, style: ViewerStyle) -> Self {
        Self {
            request,
            pipeline: None,
            maze: None,
            camera: Camera::default(),
            gestures: GestureTracker::default(),
            renderer: MazeRenderer::new(style.walls),
            clear: style.clear,
        }
    }

    /// Generates `request` and swaps it in whole. On failure the previous
    /// maze stays on screen.
    fn generate(&mut self, request: MazeRequest) -> std::result::Result<(), MazeError> {
        let Some(pipeline) = self.pipeline.as_ref() else { return Ok(()) };
        let maze = pipeline.generate(&request)?;
        self.maze = Some(maze);
        self.request = request;
        Ok(())
    }
}

impl App for MazeViewer {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            return AppControl::Exit;
        }

        if self.pipeline.is_none() {
            let backend = GpuBackend::new(ctx.gpu.device(), ctx.gpu.queue());
            self.pipeline = Some(MazePipeline::new(backend));
        }

        if self.maze.is_none() {
            if let Err(e) = self.generate(self.request) {
                ctx.runtime.fail(e);
                return AppControl::Exit;
            }
        } else if ctx.input_frame.key_pressed(Key::R) {
            let request = self.request.reseeded(Seed::random());
            match self.generate(request) {
                Ok(()) => {
                    info!("regenerated with seed {}", request.seed());
                    ctx.runtime.set_title(title(&request));
                }
                Err(e) => warn!("regeneration failed: {e}"),
            }
        }

        // Inputs gathered since the last frame, in order.
        let cells = self.request.size().cell_count();
        let mut inputs = self.gestures.collect(ctx.input_frame);
        inputs.extend(keyboard_inputs(ctx.input, ctx.input_frame));
        self.camera.apply_all(inputs, cells);

        let (renderer, maze, camera) = (&mut self.renderer, self.maze.as_ref(), &self.camera);
        ctx.render(self.clear, |rctx, target| {
            if let Some(maze) = maze {
                renderer.render(rctx, target, maze, camera);
            }
        })
    }
}
