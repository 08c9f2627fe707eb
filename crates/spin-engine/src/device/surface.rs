use winit::dpi::PhysicalSize;

/// What the frame loop should do after failing to acquire a surface texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was configured again; the next frame may succeed.
    Reconfigured,
    /// Transient; drop this frame only.
    SkipFrame,
    /// Unrecoverable (out of memory); the loop must stop with an error.
    Fatal,
}

pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if prefer_srgb {
        if let Some(f) = formats.iter().copied().find(|f| f.is_srgb()) {
            return Some(f);
        }
    }

    formats.first().copied()
}

pub(crate) fn choose_alpha_mode(supported: &[wgpu::CompositeAlphaMode]) -> wgpu::CompositeAlphaMode {
    if supported.contains(&wgpu::CompositeAlphaMode::Opaque) {
        wgpu::CompositeAlphaMode::Opaque
    } else {
        supported.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto)
    }
}

/// wgpu rejects a 0x0 surface; in that case only `size` is updated and
/// configuration is deferred until the window has an area again.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    *size = new_size;

    if new_size.width == 0 || new_size.height == 0 {
        return;
    }

    config.width = new_size.width;
    config.height = new_size.height;

    surface.configure(device, config);
}

pub(crate) fn classify_surface_error(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode, SurfaceError, TextureFormat};

    // ── surface format ────────────────────────────────────────────────────

    #[test]
    fn srgb_format_preferred() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats, true),
            Some(TextureFormat::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn first_format_without_preference() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats, false),
            Some(TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn linear_only_surface_falls_back_to_first() {
        let formats = [TextureFormat::Rgba8Unorm];
        assert_eq!(choose_surface_format(&formats, true), Some(TextureFormat::Rgba8Unorm));
    }

    #[test]
    fn no_formats_is_none() {
        assert_eq!(choose_surface_format(&[], true), None);
    }

    // ── alpha mode ────────────────────────────────────────────────────────

    #[test]
    fn opaque_alpha_preferred() {
        let supported = [CompositeAlphaMode::PreMultiplied, CompositeAlphaMode::Opaque];
        assert_eq!(choose_alpha_mode(&supported), CompositeAlphaMode::Opaque);
    }

    #[test]
    fn alpha_falls_back_to_first_then_auto() {
        let supported = [CompositeAlphaMode::PreMultiplied];
        assert_eq!(choose_alpha_mode(&supported), CompositeAlphaMode::PreMultiplied);
        assert_eq!(choose_alpha_mode(&[]), CompositeAlphaMode::Auto);
    }

    // ── surface errors ────────────────────────────────────────────────────

    #[test]
    fn out_of_memory_is_fatal() {
        assert_eq!(classify_surface_error(&SurfaceError::OutOfMemory), SurfaceErrorAction::Fatal);
    }

    #[test]
    fn lost_and_outdated_reconfigure() {
        assert_eq!(classify_surface_error(&SurfaceError::Lost), SurfaceErrorAction::Reconfigured);
        assert_eq!(classify_surface_error(&SurfaceError::Outdated), SurfaceErrorAction::Reconfigured);
    }

    #[test]
    fn timeout_and_other_skip_the_frame() {
        assert_eq!(classify_surface_error(&SurfaceError::Timeout), SurfaceErrorAction::SkipFrame);
        assert_eq!(classify_surface_error(&SurfaceError::Other), SurfaceErrorAction::SkipFrame);
    }
}
