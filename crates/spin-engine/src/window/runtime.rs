use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputEvent, InputFrame, Modifiers};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,

    /// Delay between the end of one frame and the start of the next.
    pub frame_interval: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "spin".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            resizable: true,
            frame_interval: Duration::from_millis(16),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, creates the GPU context and drives `app` until it
    /// returns `AppControl::Exit` or an error.
    ///
    /// Window or GPU creation failure ends the loop before the first frame and
    /// is returned as the error, as is an error returned from a frame. The window and GPU context are released before
    /// this function returns, on every path.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_frame: InputFrame,
    modifiers: Modifiers,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    next_frame: Instant,
    exit_requested: bool,
    /// First error that stopped the loop.
    error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            next_frame: Instant::now(),
            exit_requested: false,
            error: None,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let size = window.inner_size();
        log::info!(
            "window \"{}\" created ({}x{} px, scale {:.2})",
            self.config.title,
            size.width,
            size.height,
            window.scale_factor()
        );

        let gpu_init = self.gpu_init;

        let mut entry = WindowEntryTryBuilder {
            input_frame: InputFrame::default(),
            modifiers: Modifiers::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("failed to create renderer")
            },
        }
        .try_build()?;

        // Animation time starts once the renderer is ready.
        entry.with_clock_mut(|clock| clock.reset());

        Ok(entry)
    }

    fn drive_frame(&mut self, event_loop: &ActiveEventLoop) {
        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, window) = (&mut self.app, &mut self.window);
        let Some(entry) = window.as_mut() else { return };

        let mut outcome: Result<AppControl> = Ok(AppControl::Continue);

        entry.with_mut(|fields| {
            let time = fields.clock.tick();

            // Scope to ensure `ctx` is dropped before clearing the batch.
            {
                let mut ctx = FrameCtx {
                    window: WindowCtx { window: fields.window },
                    gpu: fields.gpu,
                    input: fields.input_frame,
                    time,
                };

                outcome = app.on_frame(&mut ctx);
            }

            fields.input_frame.clear();
        });

        if self.finish_frame(outcome) {
            self.request_exit(event_loop);
        }
    }

    /// Schedules the next frame and records why the loop must stop, if it must.
    fn finish_frame(&mut self, outcome: Result<AppControl>) -> bool {
        self.next_frame = Instant::now() + self.config.frame_interval;

        match outcome {
            Ok(AppControl::Continue) => false,
            Ok(AppControl::Exit) => {
                log::debug!("application requested exit");
                true
            }
            Err(err) => {
                self.error.get_or_insert(err);
                true
            }
        }
    }
}

/// Adds `ev` to the pending batch. Returns true when the batch holds a quit,
/// which is handed to the application without waiting for a redraw.
fn buffer_input(frame: &mut InputFrame, modifiers: &mut Modifiers, ev: InputEvent) -> bool {
    if let InputEvent::ModifiersChanged(m) = ev {
        *modifiers = m;
    }
    frame.push_event(ev);
    frame.quit_requested()
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exit_requested {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.window = Some(entry);
                self.next_frame = Instant::now();
            }
            Err(err) => {
                self.error = Some(err);
                self.request_exit(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.window.as_ref() else { return };

        if Instant::now() >= self.next_frame {
            entry.with_window(|w| w.request_redraw());
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.window.as_mut() else { return };

        let quit_pending = entry.with_mut(|fields| {
            match translate_window_event(*fields.modifiers, &event) {
                Some(ev) => buffer_input(fields.input_frame, fields.modifiers, ev),
                None => false,
            }
        });

        match &event {
            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
            }

            WindowEvent::RedrawRequested => self.drive_frame(event_loop),

            // A hidden or minimized window may never be asked to redraw.
            _ if quit_pending => self.drive_frame(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Release the surface and window while the event loop is still alive.
        if self.window.take().is_some() {
            log::debug!("window and renderer released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyState};

    struct IdleApp;

    impl CoreApp for IdleApp {
        fn on_frame(&mut self, _ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
            Ok(AppControl::Continue)
        }
    }

    fn state() -> AppState<IdleApp> {
        AppState::new(RuntimeConfig::default(), GpuInit::default(), IdleApp)
    }

    fn key_down(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            code: 0,
            repeat: false,
        }
    }

    // ── frame outcome ──────────────────────────────────────────────────────

    #[test]
    fn continue_keeps_running() {
        let mut st = state();
        let before = Instant::now();
        assert!(!st.finish_frame(Ok(AppControl::Continue)));
        assert!(st.error.is_none());
        assert!(st.next_frame >= before + st.config.frame_interval);
    }

    #[test]
    fn exit_stops_cleanly() {
        let mut st = state();
        assert!(st.finish_frame(Ok(AppControl::Exit)));
        assert!(st.error.is_none());
    }

    #[test]
    fn frame_error_stops_and_is_kept_for_run() {
        let mut st = state();
        assert!(st.finish_frame(Err(anyhow::anyhow!("fatal surface error: Out of memory"))));
        assert!(st.finish_frame(Err(anyhow::anyhow!("later"))));

        let err = st.error.take().map(|e| e.to_string());
        assert_eq!(err.as_deref(), Some("fatal surface error: Out of memory"));
    }

    // ── input buffering ────────────────────────────────────────────────────

    #[test]
    fn quit_is_delivered_without_a_redraw() {
        let mut frame = InputFrame::default();
        let mut mods = Modifiers::default();

        assert!(!buffer_input(&mut frame, &mut mods, key_down(Key::A)));
        assert!(buffer_input(&mut frame, &mut mods, InputEvent::Quit));
        assert!(buffer_input(&mut frame, &mut mods, InputEvent::Focused(false)));

        frame.clear();
        assert!(!buffer_input(&mut frame, &mut mods, key_down(Key::B)));
    }

    #[test]
    fn modifier_changes_are_tracked() {
        let mut frame = InputFrame::default();
        let mut mods = Modifiers::default();
        let shift = Modifiers { shift: true, ..Modifiers::default() };

        buffer_input(&mut frame, &mut mods, InputEvent::ModifiersChanged(shift));
        assert_eq!(mods, shift);
        assert_eq!(frame.iter().count(), 1);
    }
}
