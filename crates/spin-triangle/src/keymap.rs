use std::collections::HashMap;

use spin_engine::core::AppControl;
use spin_engine::input::Key;

/// Zero-argument action bound to a key.
///
/// Actions report what the loop should do next instead of touching loop state.
pub type KeyAction = Box<dyn Fn() -> AppControl>;

/// Key → action bindings.
///
/// Built once before the loop starts and owned by the application for the
/// rest of the run. The loop only reads it.
#[derive(Default)]
pub struct KeyActionMap {
    actions: HashMap<Key, KeyAction>,
}

impl KeyActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings used by the demo: `Escape` and `Q` quit.
    pub fn with_quit_keys() -> Self {
        Self::new()
            .bind(Key::Escape, || AppControl::Exit)
            .bind(Key::Q, || AppControl::Exit)
    }

    /// Binds `action` to `key`, replacing any previous binding.
    pub fn bind(mut self, key: Key, action: impl Fn() -> AppControl + 'static) -> Self {
        if self.actions.insert(key, Box::new(action)).is_some() {
            log::debug!("key binding for {key} replaced");
        }
        self
    }

    /// Runs the action bound to `key`, if any.
    pub fn dispatch(&self, key: Key) -> Option<AppControl> {
        self.actions.get(&key).map(|action| action())
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn quit_keys_exit() {
        let map = KeyActionMap::with_quit_keys();
        assert_eq!(map.len(), 2);
        assert_eq!(map.dispatch(Key::Escape), Some(AppControl::Exit));
        assert_eq!(map.dispatch(Key::Q), Some(AppControl::Exit));
    }

    #[test]
    fn unbound_key_is_none() {
        let map = KeyActionMap::with_quit_keys();
        assert_eq!(map.dispatch(Key::W), None);
        assert_eq!(map.dispatch(Key::Unknown(42)), None);
    }

    #[test]
    fn rebinding_replaces_action() {
        let map = KeyActionMap::with_quit_keys().bind(Key::Q, || AppControl::Continue);
        assert_eq!(map.len(), 2);
        assert_eq!(map.dispatch(Key::Q), Some(AppControl::Continue));
    }

    #[test]
    fn action_runs_once_per_dispatch() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let map = KeyActionMap::new().bind(Key::Space, move || {
            counter.set(counter.get() + 1);
            AppControl::Continue
        });

        map.dispatch(Key::Space);
        map.dispatch(Key::Space);
        map.dispatch(Key::Enter);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn empty_map() {
        let map = KeyActionMap::new();
        assert_eq!(map.len(), 0);
        assert_eq!(map.dispatch(Key::Escape), None);
    }
}
