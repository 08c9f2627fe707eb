use anyhow::Result;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by programs driven by the runtime.
pub trait App {
    /// Called once per frame.
    ///
    /// `ctx.input` holds every event received since the previous frame.
    /// Returning `AppControl::Exit` stops the runtime after this callback; an
    /// error stops it too and becomes the error of `Runtime::run`.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl>;
}
