use log::debug;
use wgpu::util::DeviceExt;

use labyrinth_maze::error::Result;
use labyrinth_maze::{BackendLimits, BufferPlan, ComputeBackend, MazeError, MazeRequest};

use crate::device::{ComputeDevice, GpuInit};

use super::params::{limits_from_device, ComputeParams};
use super::readback;

/// Cell buffer produced by a GPU dispatch.
///
/// Usable as a vertex buffer as-is (`STORAGE | VERTEX | COPY_SRC`).
#[derive(Debug)]
pub struct GpuCells {
    pub buffer: wgpu::Buffer,
    /// Bytes written by the dispatch (the buffer may be larger).
    pub bytes: u64,
    /// Vertices to draw: `cells * 12`.
    pub vertex_count: u32,
}

/// wgpu compute backend.
///
/// Holds clones of the device/queue handles it runs on, so a windowed app can
/// share its rendering device and draw the result without a copy.
pub struct GpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    limits: BackendLimits,
}

impl GpuBackend {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("labyrinth maze compute shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/maze_compute.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("labyrinth maze compute bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<ComputeParams>() as u64,
                        ),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("labyrinth maze compute pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("labyrinth maze compute pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("cs_main"),
            compilation_options: Default::default(),
            cache: None,
        });

        Self {
            device: device.clone(),
            queue: queue.clone(),
            pipeline,
            bind_group_layout,
            limits: limits_from_device(&device.limits()),
        }
    }

    /// Acquires a surfaceless device and builds the backend on it.
    pub fn headless(init: &GpuInit) -> Result<Self> {
        let cd = ComputeDevice::block_on(init)?;
        Ok(Self::new(&cd.device, &cd.queue))
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Copies the cell buffer back to the host.
    pub fn read_back(&self, cells: &GpuCells) -> Result<Vec<f32>> {
        readback::read_f32s(&self.device, &self.queue, &cells.buffer, cells.bytes)
    }
}

impl ComputeBackend for GpuBackend {
    type Cells = GpuCells;

    fn name(&self) -> &str {
        "gpu"
    }

    fn limits(&self) -> BackendLimits {
        self.limits
    }

    fn dispatch(&self, request: &MazeRequest) -> Result<GpuCells> {
        let plan = BufferPlan::new(request.size(), &self.limits)?;

        // Zero-sized bindings are invalid; an empty grid still gets a
        // minimal buffer so callers never special-case it.
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("labyrinth maze cells"),
            size: plan.bytes.max(wgpu::COPY_BUFFER_ALIGNMENT),
            usage: wgpu::BufferUsages::STORAGE
                | wgpu::BufferUsages::VERTEX
                | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });

        let cells = GpuCells {
            buffer,
            bytes: plan.bytes,
            vertex_count: plan.vertex_count,
        };
        if plan.bytes == 0 {
            return Ok(cells);
        }

        let params = ComputeParams::from_request(request);
        let params_ubo = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("labyrinth maze params ubo"),
                contents: bytemuck::bytes_of(&params),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("labyrinth maze compute bind group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: params_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: cells.buffer.as_entire_binding(),
                },
            ],
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("labyrinth maze compute encoder"),
            });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("labyrinth maze compute pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.dispatch_workgroups(plan.workgroups[0], plan.workgroups[1], 1);
        }
        self.queue.submit(std::iter::once(encoder.finish()));

        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| MazeError::Dispatch(format!("device poll failed: {e}")))?;

        debug!(
            "gpu dispatch: {}x{} groups, {} bytes",
            plan.workgroups[0], plan.workgroups[1], plan.bytes
        );
        Ok(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_maze::seed::MAX_SEED;
    use labyrinth_maze::{CpuBackend, GridSize, Seed};

    /// `None` on machines with no usable adapter.
    fn gpu() -> Option<GpuBackend> {
        match GpuBackend::headless(&GpuInit::default()) {
            Ok(backend) => Some(backend),
            Err(MazeError::BackendUnavailable(reason)) => {
                eprintln!("no GPU adapter, skipping: {reason}");
                None
            }
            Err(e) => panic!("unexpected backend error: {e}"),
        }
    }

    fn request(w: u32, h: u32, seed: u32) -> MazeRequest {
        MazeRequest::new(GridSize::new(w, h), 0.5, Seed::new(seed).unwrap()).unwrap()
    }

    fn bits(floats: &[f32]) -> Vec<u32> {
        floats.iter().map(|f| f.to_bits()).collect()
    }

    #[test]
    fn shader_matches_cpu_backend_bit_for_bit() {
        let Some(gpu) = gpu() else { return };
        let cpu = CpuBackend::default();

        let cases = [
            request(3, 3, 1),
            // Partial workgroups on both axes.
            request(37, 13, MAX_SEED - 1),
            request(1, 9, 5),
            request(9, 1, 5),
            request(64, 64, 12_345),
        ];

        for r in &cases {
            let cells = gpu.dispatch(r).unwrap();
            let size = r.size();
            assert_eq!(
                u64::from(cells.vertex_count),
                size.cell_count() * 12,
                "{}x{}",
                size.width,
                size.height
            );

            let on_gpu = gpu.read_back(&cells).unwrap();
            let on_cpu = cpu.dispatch(r).unwrap();
            assert_eq!(
                bits(&on_gpu),
                bits(&on_cpu),
                "{}x{} seed {}",
                size.width,
                size.height,
                r.seed()
            );
        }
    }

    #[test]
    fn empty_grid_skips_the_dispatch() {
        let Some(gpu) = gpu() else { return };
        let cells = gpu.dispatch(&request(0, 4, 1)).unwrap();
        assert_eq!((cells.bytes, cells.vertex_count), (0, 0));
        assert!(gpu.read_back(&cells).unwrap().is_empty());
    }

    #[test]
    fn oversized_grid_is_rejected_before_allocating() {
        let Some(gpu) = gpu() else { return };
        let err = gpu.dispatch(&request(100_000, 100_000, 1)).unwrap_err();
        assert!(err.is_configuration());
    }
}
