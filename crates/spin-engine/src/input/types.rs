use std::fmt;

/// Keyboard key identifier.
///
/// The runtime maps the layout-aware key into these variants where possible and
/// falls back to the physical key position otherwise.
/// Keys without a variant are reported as `Key::Unknown(code)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    // Common control keys
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Modifiers as keys
    Shift,
    Control,
    Alt,
    Meta,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

impl Key {
    /// Maps a printable character to its key, ignoring case.
    ///
    /// Returns `None` for characters without a dedicated variant.
    pub fn from_char(c: char) -> Option<Key> {
        const LETTERS: [Key; 26] = [
            Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G,
            Key::H, Key::I, Key::J, Key::K, Key::L, Key::M, Key::N,
            Key::O, Key::P, Key::Q, Key::R, Key::S, Key::T, Key::U,
            Key::V, Key::W, Key::X, Key::Y, Key::Z,
        ];
        const DIGITS: [Key; 10] = [
            Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
            Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
        ];

        let c = c.to_ascii_lowercase();
        match c {
            'a'..='z' => Some(LETTERS[(c as u8 - b'a') as usize]),
            '0'..='9' => Some(DIGITS[(c as u8 - b'0') as usize]),
            ' ' => Some(Key::Space),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The user asked to close the window (or the platform asked the app to quit).
    Quit,

    Key {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        /// Stable platform code when available (e.g. scancode).
        code: u32,
        /// True when event is a key-repeat.
        repeat: bool,
    },

    ModifiersChanged(Modifiers),

    /// Window focus change.
    Focused(bool),
}

impl InputEvent {
    /// Returns the key when this is a key press (including repeats).
    pub fn pressed_key(&self) -> Option<Key> {
        match self {
            InputEvent::Key { key, state: KeyState::Pressed, .. } => Some(*key),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_event(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key {
            key,
            state,
            modifiers: Modifiers::default(),
            code: 0,
            repeat: false,
        }
    }

    #[test]
    fn from_char_ignores_case() {
        assert_eq!(Key::from_char('q'), Some(Key::Q));
        assert_eq!(Key::from_char('Q'), Some(Key::Q));
        assert_eq!(Key::from_char('a'), Some(Key::A));
        assert_eq!(Key::from_char('z'), Some(Key::Z));
    }

    #[test]
    fn from_char_digits_and_space() {
        assert_eq!(Key::from_char('0'), Some(Key::Digit0));
        assert_eq!(Key::from_char('9'), Some(Key::Digit9));
        assert_eq!(Key::from_char(' '), Some(Key::Space));
    }

    #[test]
    fn from_char_unmapped() {
        assert_eq!(Key::from_char('é'), None);
        assert_eq!(Key::from_char('/'), None);
    }

    #[test]
    fn pressed_key_only_for_presses() {
        assert_eq!(key_event(Key::Q, KeyState::Pressed).pressed_key(), Some(Key::Q));
        assert_eq!(key_event(Key::Q, KeyState::Released).pressed_key(), None);
        assert_eq!(InputEvent::Quit.pressed_key(), None);
    }
}
