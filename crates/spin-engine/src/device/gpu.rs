use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::init::FRAME_LATENCY;
use super::{GpuInit, SurfaceErrorAction};
use super::surface;

/// A single acquired frame.
///
/// Short-lived: holding the surface texture blocks acquisition of the next one.
/// `Gpu::submit` consumes it and presents.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// Owns wgpu core objects and the surface configuration.
///
/// This type is the accelerated renderer bound to one window:
/// - creates and stores Instance/Adapter/Device/Queue
/// - creates and configures the Surface (swapchain)
/// - acquires frames and provides an encoder + view for rendering
pub struct Gpu<'w> {
    /// Kept alive for the surface.
    _instance: wgpu::Instance,

    /// Surface bound to the window. The window must outlive this value.
    surface: wgpu::Surface<'w>,

    device: wgpu::Device,

    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to a window.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let adapter_info = adapter.get_info();
        log::info!(
            "using adapter \"{}\" ({:?}, {:?})",
            adapter_info.name,
            adapter_info.backend,
            adapter_info.device_type
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("spin-engine device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults().using_resolution(adapter.limits()),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&surface_caps.formats, init.prefer_srgb)
            .context("no supported surface formats")?;
        if init.prefer_srgb && !format.is_srgb() {
            log::warn!("no sRGB surface format offered; encoding colors in the shader ({format:?})");
        }

        let alpha_mode = surface::choose_alpha_mode(&surface_caps.alpha_modes);
        let present_mode = init.present_mode();

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: FRAME_LATENCY,
        };

        surface.configure(&device, &config);
        log::debug!("surface configured: {format:?} {}x{} {present_mode:?}", size.width, size.height);

        Ok(Self {
            _instance: instance,
            surface,
            device,
            queue,
            config,
            size,
        })
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// True when the surface applies sRGB encoding on write. Otherwise linear
    /// colors must be encoded before they reach it.
    pub fn surface_is_srgb(&self) -> bool {
        self.config.format.is_srgb()
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Reconfigures the surface after a resize.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        surface::apply_resize(
            &self.surface,
            &self.device,
            &mut self.config,
            &mut self.size,
            new_size,
        );
    }

    /// Acquires the next surface texture and creates an encoder.
    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("spin frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands for the given frame and presents it.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }

    /// Classifies a failed acquire and reconfigures the surface when that is
    /// the remedy.
    pub fn handle_surface_error(&mut self, err: &SurfaceError) -> SurfaceErrorAction {
        log::debug!("surface error: {err}");
        let action = surface::classify_surface_error(err);
        if action == SurfaceErrorAction::Reconfigured && self.size.width > 0 && self.size.height > 0 {
            self.surface.configure(&self.device, &self.config);
        }
        action
    }
}
