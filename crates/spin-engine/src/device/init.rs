/// Swapchain latency hint passed to the surface.
pub(crate) const FRAME_LATENCY: u32 = 2;

/// How the renderer should be set up for a window.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GpuInit {
    /// Lock presentation to the display refresh.
    ///
    /// Off means the runtime's frame interval alone paces the loop.
    pub vsync: bool,

    /// Prefer an sRGB surface format when one is offered.
    pub prefer_srgb: bool,
}

impl GpuInit {
    /// Present mode for this setup. Both `Auto*` modes are accepted by every
    /// surface, so no capability check is needed.
    pub(crate) fn present_mode(self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            vsync: true,
            prefer_srgb: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vsync_selects_present_mode() {
        let on = GpuInit::default();
        assert_eq!(on.present_mode(), wgpu::PresentMode::AutoVsync);

        let off = GpuInit { vsync: false, ..on };
        assert_eq!(off.present_mode(), wgpu::PresentMode::AutoNoVsync);
    }
}
