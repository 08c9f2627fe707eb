use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{Key as LogicalKey, KeyCode, ModifiersState, NamedKey, PhysicalKey};

use crate::input::{InputEvent, Key, KeyState, Modifiers};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// `modifiers` is the last known modifier state; winit 0.30 does not attach it
/// to keyboard events.
///
/// Returns `None` for events not represented by the input subsystem.
pub(crate) fn translate_window_event(
    modifiers: Modifiers,
    event: &WindowEvent,
) -> Option<InputEvent> {
    match event {
        WindowEvent::CloseRequested => Some(InputEvent::Quit),

        WindowEvent::ModifiersChanged(m) => Some(InputEvent::ModifiersChanged(map_modifiers(m.state()))),

        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::KeyboardInput { event, .. } => Some(translate_key_event(modifiers, event)),

        _ => None,
    }
}

fn translate_key_event(modifiers: Modifiers, event: &KeyEvent) -> InputEvent {
    let state = match event.state {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    };

    let code = physical_code(event.physical_key);
    let key = map_logical_key(&event.logical_key)
        .unwrap_or_else(|| map_physical_key(event.physical_key));

    InputEvent::Key {
        key,
        state,
        modifiers,
        code,
        repeat: event.repeat,
    }
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

/// Layout-aware mapping: `Q` is whatever key the active layout labels "q".
pub(crate) fn map_logical_key(key: &LogicalKey) -> Option<Key> {
    match key {
        LogicalKey::Named(named) => {
            let key = match named {
                NamedKey::Escape => Key::Escape,
                NamedKey::Enter => Key::Enter,
                NamedKey::Tab => Key::Tab,
                NamedKey::Backspace => Key::Backspace,
                NamedKey::Space => Key::Space,

                NamedKey::Insert => Key::Insert,
                NamedKey::Delete => Key::Delete,
                NamedKey::Home => Key::Home,
                NamedKey::End => Key::End,
                NamedKey::PageUp => Key::PageUp,
                NamedKey::PageDown => Key::PageDown,

                NamedKey::ArrowUp => Key::ArrowUp,
                NamedKey::ArrowDown => Key::ArrowDown,
                NamedKey::ArrowLeft => Key::ArrowLeft,
                NamedKey::ArrowRight => Key::ArrowRight,

                NamedKey::Shift => Key::Shift,
                NamedKey::Control => Key::Control,
                NamedKey::Alt => Key::Alt,
                NamedKey::Super | NamedKey::Meta => Key::Meta,

                NamedKey::F1 => Key::F1,
                NamedKey::F2 => Key::F2,
                NamedKey::F3 => Key::F3,
                NamedKey::F4 => Key::F4,
                NamedKey::F5 => Key::F5,
                NamedKey::F6 => Key::F6,
                NamedKey::F7 => Key::F7,
                NamedKey::F8 => Key::F8,
                NamedKey::F9 => Key::F9,
                NamedKey::F10 => Key::F10,
                NamedKey::F11 => Key::F11,
                NamedKey::F12 => Key::F12,

                _ => return None,
            };
            Some(key)
        }

        LogicalKey::Character(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::from_char(c),
                _ => None,
            }
        }

        _ => None,
    }
}

/// Position-based fallback for keys the layout does not name.
pub(crate) fn map_physical_key(pk: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = pk else {
        // NativeKeyCode is not a u32 in winit 0.30.
        return Key::Unknown(0);
    };

    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Space => Key::Space,

        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
        KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,

        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,

        KeyCode::Digit0 => Key::Digit0,
        KeyCode::Digit1 => Key::Digit1,
        KeyCode::Digit2 => Key::Digit2,
        KeyCode::Digit3 => Key::Digit3,
        KeyCode::Digit4 => Key::Digit4,
        KeyCode::Digit5 => Key::Digit5,
        KeyCode::Digit6 => Key::Digit6,
        KeyCode::Digit7 => Key::Digit7,
        KeyCode::Digit8 => Key::Digit8,
        KeyCode::Digit9 => Key::Digit9,

        other => Key::Unknown(other as u32),
    }
}

fn physical_code(pk: PhysicalKey) -> u32 {
    match pk {
        PhysicalKey::Code(code) => code as u32,
        PhysicalKey::Unidentified(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_maps_by_name() {
        assert_eq!(map_logical_key(&LogicalKey::Named(NamedKey::Escape)), Some(Key::Escape));
    }

    #[test]
    fn characters_map_case_insensitively() {
        assert_eq!(map_logical_key(&LogicalKey::Character("q".into())), Some(Key::Q));
        assert_eq!(map_logical_key(&LogicalKey::Character("Q".into())), Some(Key::Q));
    }

    #[test]
    fn multi_char_strings_are_unmapped() {
        assert_eq!(map_logical_key(&LogicalKey::Character("qu".into())), None);
    }

    #[test]
    fn physical_fallback() {
        assert_eq!(map_physical_key(PhysicalKey::Code(KeyCode::KeyQ)), Key::Q);
        assert_eq!(map_physical_key(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
        assert!(matches!(
            map_physical_key(PhysicalKey::Code(KeyCode::F24)),
            Key::Unknown(_)
        ));
    }

    #[test]
    fn close_request_is_quit() {
        let ev = translate_window_event(Modifiers::default(), &WindowEvent::CloseRequested);
        assert_eq!(ev, Some(InputEvent::Quit));
    }

    #[test]
    fn unrelated_events_are_dropped() {
        let ev = translate_window_event(Modifiers::default(), &WindowEvent::RedrawRequested);
        assert_eq!(ev, None);
    }
}
