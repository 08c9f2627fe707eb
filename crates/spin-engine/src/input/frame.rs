use super::types::InputEvent;

/// Input events buffered between two frames.
///
/// The runtime pushes translated events as they arrive; the application drains
/// the whole batch at the start of its frame, and the runtime clears it after.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InputEvent> {
        self.events.iter()
    }

    /// True if the batch contains a quit request.
    pub fn quit_requested(&self) -> bool {
        self.events.iter().any(|e| matches!(e, InputEvent::Quit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_arrival_order() {
        let mut frame = InputFrame::default();
        frame.push_event(InputEvent::Focused(true));
        frame.push_event(InputEvent::Quit);

        let events: Vec<_> = frame.iter().cloned().collect();
        assert_eq!(events, vec![InputEvent::Focused(true), InputEvent::Quit]);
        assert!(frame.quit_requested());
    }

    #[test]
    fn clear_empties_batch() {
        let mut frame = InputFrame::default();
        frame.push_event(InputEvent::Quit);
        frame.clear();
        assert_eq!(frame.iter().count(), 0);
        assert!(!frame.quit_requested());
    }
}
