use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

/// First sRGB format when `prefer_srgb` is set, else the adapter's first.
pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let formats = caps.formats.iter().copied();
    formats
        .clone()
        .find(|f| prefer_srgb && f.is_srgb())
        .or_else(|| formats.clone().next())
}

/// The requested mode if supported, then `Opaque` (the maze always clears to
/// an opaque background), then whatever the surface offers first.
pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    let supported = |m: &wgpu::CompositeAlphaMode| caps.alpha_modes.contains(m);
    requested
        .filter(supported)
        .or_else(|| Some(wgpu::CompositeAlphaMode::Opaque).filter(supported))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

#[inline]
pub(crate) fn is_drawable(size: PhysicalSize<u32>) -> bool {
    size.width > 0 && size.height > 0
}

/// Records `new_size` and reconfigures unless the window is minimized.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    *size = new_size;
    if is_drawable(new_size) {
        config.width = new_size.width;
        config.height = new_size.height;
        surface.configure(device, config);
    }
}

/// How the frame loop reacts to each acquire failure.
pub(crate) fn classify(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::OutOfMemory => {
            SurfaceErrorAction::Fatal(format!("surface cannot present the maze: {err}"))
        }
    }
}
