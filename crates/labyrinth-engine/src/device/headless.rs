use labyrinth_maze::MazeError;
use labyrinth_maze::error::Result;

use super::GpuInit;

/// Device and queue without a surface, for headless generation.
pub struct ComputeDevice {
    pub adapter_info: wgpu::AdapterInfo,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl ComputeDevice {
    /// Acquires any adapter that can run compute work.
    ///
    /// Failure is [`MazeError::BackendUnavailable`]; there is no retry.
    pub async fn new(init: &GpuInit) -> Result<Self> {
        let instance = GpuInit::instance();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| MazeError::BackendUnavailable(format!("no GPU adapter: {e}")))?;

        let (device, queue) = init
            .request_device(&adapter, "labyrinth compute device")
            .await
            .map_err(|e| MazeError::BackendUnavailable(format!("device request failed: {e}")))?;

        let adapter_info = adapter.get_info();
        log::info!(
            "headless adapter {:?} ({:?})",
            adapter_info.name,
            adapter_info.backend
        );

        Ok(Self {
            adapter_info,
            device,
            queue,
        })
    }

    /// Blocking variant of [`ComputeDevice::new`].
    pub fn block_on(init: &GpuInit) -> Result<Self> {
        pollster::block_on(Self::new(init))
    }
}
