use anyhow::Result;

use spin_engine::core::{App, AppControl, FrameCtx};
use spin_engine::input::InputEvent;
use spin_engine::paint::Color;
use spin_engine::render::{GeometryRenderer, Vertex};

use crate::geometry::frame_vertices;
use crate::keymap::KeyActionMap;

/// Straight sRGB bytes of the cleared background.
pub const BACKGROUND_RGB: [u8; 3] = [30, 30, 30];

/// Straight sRGB bytes of the triangle fill.
pub const TRIANGLE_RGB: [u8; 3] = [200, 100, 50];

/// Loop lifecycle. `Stopped` is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Running/stopped state machine fed by input-event batches.
#[derive(Debug)]
pub struct FrameState {
    state: LoopState,
}

impl FrameState {
    pub fn new() -> Self {
        Self { state: LoopState::Running }
    }

    /// Applies one batch of events and returns the resulting state.
    ///
    /// A quit event stops the loop. A key press runs its bound action, and an
    /// `Exit` result stops the loop. Everything else is ignored.
    pub fn process_events<'e, I>(&mut self, events: I, keymap: &KeyActionMap) -> LoopState
    where
        I: IntoIterator<Item = &'e InputEvent>,
    {
        for event in events {
            match event {
                InputEvent::Quit => {
                    log::info!("quit requested");
                    self.stop();
                }
                _ => {
                    let Some(key) = event.pressed_key() else { continue };
                    if keymap.dispatch(key) == Some(AppControl::Exit) {
                        log::info!("{key} pressed; stopping");
                        self.stop();
                    }
                }
            }
        }

        self.state
    }

    fn stop(&mut self) {
        self.state = LoopState::Stopped;
    }
}

impl Default for FrameState {
    fn default() -> Self {
        Self::new()
    }
}

/// The demo application: one solid triangle spinning about the window center.
pub struct SpinningTriangle {
    keymap: KeyActionMap,
    frame: FrameState,

    renderer: GeometryRenderer,
    vertices: [Vertex; 3],

    background: Color,
    fill: Color,
}

impl SpinningTriangle {
    pub fn new(keymap: KeyActionMap) -> Self {
        let [br, bg, bb] = BACKGROUND_RGB;
        let [fr, fg, fb] = TRIANGLE_RGB;

        Self {
            keymap,
            frame: FrameState::new(),
            renderer: GeometryRenderer::new(),
            vertices: [Vertex::default(); 3],
            background: Color::from_srgb_u8(br, bg, bb, 255),
            fill: Color::from_srgb_u8(fr, fg, fb, 255),
        }
    }
}

impl App for SpinningTriangle {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
        // ── Input ─────────────────────────────────────────────────────────
        if self.frame.process_events(ctx.input.iter(), &self.keymap) == LoopState::Stopped {
            return Ok(AppControl::Exit);
        }

        // ── Geometry ──────────────────────────────────────────────────────
        self.vertices = frame_vertices(ctx.window.pixel_size(), ctx.time.elapsed, self.fill);

        if ctx.time.frame_index == 0 {
            log::debug!("first frame: {:?}", self.vertices);
        }

        // ── Render ────────────────────────────────────────────────────────
        let renderer = &mut self.renderer;
        let vertices = &self.vertices;

        ctx.render(self.background, |canvas| {
            renderer.render(canvas, vertices);
        })
    }
}

#[cfg(test)]
mod tests {
    use spin_engine::input::{Key, KeyState, Modifiers};

    use super::*;

    fn press(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            code: 0,
            repeat: false,
        }
    }

    fn release(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Released,
            modifiers: Modifiers::default(),
            code: 0,
            repeat: false,
        }
    }

    #[test]
    fn starts_running() {
        let batch: [InputEvent; 0] = [];
        let st = FrameState::new().process_events(&batch, &KeyActionMap::new());
        assert_eq!(st, LoopState::Running);
    }

    #[test]
    fn escape_stops() {
        let mut fs = FrameState::new();
        let st = fs.process_events(&[press(Key::Escape)], &KeyActionMap::with_quit_keys());
        assert_eq!(st, LoopState::Stopped);
    }

    #[test]
    fn q_stops() {
        let mut fs = FrameState::new();
        let st = fs.process_events(&[press(Key::Q)], &KeyActionMap::with_quit_keys());
        assert_eq!(st, LoopState::Stopped);
    }

    #[test]
    fn other_keys_keep_running() {
        let mut fs = FrameState::new();
        let batch = [press(Key::W), press(Key::Space), release(Key::Escape), press(Key::Unknown(7))];
        let st = fs.process_events(&batch, &KeyActionMap::with_quit_keys());
        assert_eq!(st, LoopState::Running);
    }

    #[test]
    fn repeat_of_quit_key_still_stops() {
        let mut fs = FrameState::new();
        let ev = InputEvent::Key {
            key: Key::Q,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            code: 0,
            repeat: true,
        };
        let st = fs.process_events(&[ev], &KeyActionMap::with_quit_keys());
        assert_eq!(st, LoopState::Stopped);
    }

    #[test]
    fn quit_event_stops_regardless_of_keys() {
        let mut fs = FrameState::new();
        let batch = [press(Key::W), InputEvent::Quit, press(Key::A)];
        let st = fs.process_events(&batch, &KeyActionMap::new());
        assert_eq!(st, LoopState::Stopped);
    }

    #[test]
    fn quit_as_first_event_stops_after_one_batch() {
        let mut fs = FrameState::new();
        let keymap = KeyActionMap::with_quit_keys();

        let st = fs.process_events(&[InputEvent::Quit], &keymap);
        assert_eq!(st, LoopState::Stopped);
    }

    #[test]
    fn stopped_is_terminal() {
        let mut fs = FrameState::new();
        let keymap = KeyActionMap::with_quit_keys().bind(Key::R, || AppControl::Continue);

        fs.process_events(&[InputEvent::Quit], &keymap);
        let st = fs.process_events(&[press(Key::R)], &keymap);
        assert_eq!(st, LoopState::Stopped);
    }

    #[test]
    fn empty_batch_keeps_state() {
        let mut fs = FrameState::new();
        let batch: [InputEvent; 0] = [];
        let st = fs.process_events(&batch, &KeyActionMap::with_quit_keys());
        assert_eq!(st, LoopState::Running);
    }

    #[test]
    fn non_key_events_are_ignored() {
        let mut fs = FrameState::new();
        let batch = [InputEvent::Focused(false), InputEvent::ModifiersChanged(Modifiers::default())];
        let st = fs.process_events(&batch, &KeyActionMap::with_quit_keys());
        assert_eq!(st, LoopState::Running);
    }
}
