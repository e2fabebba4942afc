use labyrinth_maze::MazeError;
use labyrinth_maze::error::Result;

/// Copies `source[..bytes]` into a mappable buffer and blocks until it can be
/// read on the host.
pub(super) fn read_f32s(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    source: &wgpu::Buffer,
    bytes: u64,
) -> Result<Vec<f32>> {
    if bytes == 0 {
        return Ok(Vec::new());
    }

    let staging = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("labyrinth readback staging"),
        size: bytes,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("labyrinth readback encoder"),
    });
    encoder.copy_buffer_to_buffer(source, 0, &staging, 0, bytes);
    queue.submit(std::iter::once(encoder.finish()));

    let slice = staging.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |r| {
        let _ = tx.send(r);
    });

    device
        .poll(wgpu::PollType::wait_indefinitely())
        .map_err(|e| MazeError::Dispatch(format!("device poll failed: {e}")))?;

    rx.recv()
        .map_err(|_| MazeError::Dispatch("map callback dropped".into()))?
        .map_err(|e| MazeError::Dispatch(format!("buffer map failed: {e}")))?;

    let floats = {
        let view = slice.get_mapped_range();
        bytemuck::cast_slice::<u8, f32>(&view).to_vec()
    };
    staging.unmap();

    Ok(floats)
}
