//! Shared GPU types and helpers for renderers.

use bytemuck::Pod;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

// ── grid-space vertex ─────────────────────────────────────────────────────

/// Vertex layout of both maze buffers: a bare `vec2<f32>` at location 0.
pub(super) const GRID_VERTEX_ATTRS: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![0 => Float32x2];

pub(super) fn grid_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 2]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &GRID_VERTEX_ATTRS,
    }
}

// ── uniform binding size ──────────────────────────────────────────────────

/// Minimum binding size for a uniform of type `T`. `None` only for ZSTs.
pub(super) fn uniform_min_binding_size<T: Pod>() -> Option<wgpu::BufferSize> {
    wgpu::BufferSize::new(std::mem::size_of::<T>() as u64)
}
