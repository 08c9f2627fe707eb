use anyhow::{Result, bail};
use winit::window::Window;

use crate::coords::Viewport;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::InputFrame;
use crate::paint::Color;
use crate::render::Canvas;
use crate::time::FrameTime;

use super::app::AppControl;

/// Window handle as seen by the application.
pub struct WindowCtx<'a> {
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Current drawable size in physical pixels.
    ///
    /// Queried from the window on every call; the user may resize at any time.
    pub fn pixel_size(&self) -> Viewport {
        let size = self.window.inner_size();
        Viewport::new(size.width as f32, size.height as f32)
    }
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu:    &'a mut Gpu<'w>,
    pub input:  &'a InputFrame,
    pub time:   FrameTime,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Clears the surface with `clear`, calls `draw` with a ready [`Canvas`],
    /// then submits and presents the frame.
    ///
    /// Recoverable surface errors skip the frame. A fatal surface error is
    /// returned as an error.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> Result<AppControl>
    where
        F: FnOnce(&mut Canvas<'_>),
    {
        let viewport = self.window.pixel_size();
        if !viewport.is_valid() {
            // Minimized: nothing to present.
            return Ok(AppControl::Continue);
        }

        // Catch up with a resize whose event has not been delivered yet.
        let size = self.window.window.inner_size();
        if size != self.gpu.size() {
            self.gpu.resize(size);
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => match self.gpu.handle_surface_error(&err) {
                SurfaceErrorAction::Fatal => bail!("fatal surface error: {err}"),
                _ => return Ok(AppControl::Continue),
            },
        };

        let clear = if self.gpu.surface_is_srgb() { clear } else { clear.encoded_srgb() };

        // Clear pass, dropped before the encoder is reused below.
        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("spin clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view:           &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load:  wgpu::LoadOp::Clear(clear.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes:         None,
                occlusion_query_set:      None,
                multiview_mask:           None,
            });
        }

        // Canvas borrows frame.encoder; dropped before submit() takes frame.
        {
            let mut canvas = Canvas {
                device: self.gpu.device(),
                queue: self.gpu.queue(),
                format: self.gpu.surface_format(),
                viewport,
                encoder: &mut frame.encoder,
                view: &frame.view,
            };
            draw(&mut canvas);
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);

        Ok(AppControl::Continue)
    }
}
