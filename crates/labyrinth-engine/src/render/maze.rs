//! Maze renderer: cell quads as a triangle list, border as a triangle strip.

use bytemuck::{Pod, Zeroable};

use labyrinth_maze::{Camera, GridBounds};

use crate::compute::GpuMaze;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::common::{grid_vertex_layout, premul_alpha_blend, uniform_min_binding_size};

/// Camera + bounds + wall colour, as read by `shaders/maze.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MazeUniform {
    pub origin: [f32; 2],
    pub extent: [f32; 2],
    pub pan: [f32; 2],
    pub zoom: f32,
    pub _pad: f32, // `color` is 16-byte aligned
    pub color: [f32; 4],
}

impl MazeUniform {
    pub fn new(bounds: &GridBounds, camera: &Camera, color: Color) -> Self {
        Self {
            origin: bounds.origin,
            extent: bounds.extent,
            pan: camera.pan,
            zoom: camera.zoom,
            _pad: 0.0,
            color: color.to_array(),
        }
    }
}

/// Draws a [`GpuMaze`] in two submissions per frame.
///
/// The cell buffer is bound straight from the compute output; sentinel slots
/// collapse to zero-area triangles, so the draw uses the static upper bound
/// `cells * 12` and no per-cell counts. The border strip is re-uploaded each
/// frame (14 vertices).
pub struct MazeRenderer {
    color: Color,

    pipeline_format: Option<wgpu::TextureFormat>,
    list_pipeline: Option<wgpu::RenderPipeline>,
    strip_pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    uniform_ubo: Option<wgpu::Buffer>,

    border_vbo: Option<wgpu::Buffer>,
    border_capacity: usize,
}

impl MazeRenderer {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            pipeline_format: None,
            list_pipeline: None,
            strip_pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            uniform_ubo: None,
            border_vbo: None,
            border_capacity: 0,
        }
    }

    /// Encodes the maze into `target` on top of what is already there.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        maze: &GpuMaze,
        camera: &Camera,
    ) {
        let cell_vertices = maze.cells.vertex_count;
        let border_vertices = maze.border.len();
        if cell_vertices == 0 && border_vertices == 0 {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        self.ensure_border_capacity(ctx, border_vertices);

        // Mutating methods must happen before borrowing pipeline/buffers immutably.
        let uniform = MazeUniform::new(&maze.bounds, camera, self.color);
        let Some(ubo) = self.uniform_ubo.as_ref() else { return };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&uniform));

        let Some(border_vbo) = self.border_vbo.as_ref() else { return };
        if border_vertices > 0 {
            ctx.queue
                .write_buffer(border_vbo, 0, bytemuck::cast_slice(&maze.border));
        }

        let Some(list_pipeline) = self.list_pipeline.as_ref() else { return };
        let Some(strip_pipeline) = self.strip_pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.pass("labyrinth maze pass", wgpu::LoadOp::Load);

        rpass.set_bind_group(0, bind_group, &[]);

        if cell_vertices > 0 {
            rpass.set_pipeline(list_pipeline);
            rpass.set_vertex_buffer(0, maze.cells.buffer.slice(..maze.cells.bytes));
            rpass.draw(0..cell_vertices, 0..1);
        }

        if border_vertices > 0 {
            rpass.set_pipeline(strip_pipeline);
            rpass.set_vertex_buffer(0, border_vbo.slice(..));
            rpass.draw(0..border_vertices as u32, 0..1);
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.list_pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("labyrinth maze shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/maze.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("labyrinth maze bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: uniform_min_binding_size::<MazeUniform>(),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("labyrinth maze pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let make = |label: &str, topology: wgpu::PrimitiveTopology| {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[grid_vertex_layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(premul_alpha_blend()),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    // Wall quads and the strip mix windings.
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        let list = make("labyrinth maze cells pipeline", wgpu::PrimitiveTopology::TriangleList);
        let strip = make("labyrinth maze border pipeline", wgpu::PrimitiveTopology::TriangleStrip);

        self.pipeline_format = Some(ctx.surface_format);
        self.list_pipeline = Some(list);
        self.strip_pipeline = Some(strip);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.uniform_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.uniform_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let uniform_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("labyrinth maze camera ubo"),
            size: std::mem::size_of::<MazeUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("labyrinth maze bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_ubo.as_entire_binding(),
            }],
        });

        self.uniform_ubo = Some(uniform_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_border_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.border_capacity && self.border_vbo.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(16);
        let new_size = (new_cap * std::mem::size_of::<[f32; 2]>()) as u64;

        self.border_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("labyrinth maze border vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.border_capacity = new_cap;
    }
}
