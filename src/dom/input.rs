//! Input - crossterm key bridging for triggers.
//!
//! Terminal front-ends have no click events; a focused trigger is
//! activated with Enter or Space instead.
//!
//! ```ignore
//! use relapse::dom::input::dispatch_key;
//!
//! if let Event::Key(key) = crossterm::event::read()? {
//!     dispatch_key(&focused_trigger, key);
//! }
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use super::element::Element;
use crate::types::Interaction;

/// Map a crossterm key event to the trigger interaction it performs.
/// Only presses count; repeats and releases are ignored.
pub fn interaction_for_key(event: &KeyEvent) -> Option<Interaction> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    match event.code {
        KeyCode::Enter | KeyCode::Char(' ') => Some(Interaction::Activate),
        _ => None,
    }
}

/// Route a key event to `element`'s listeners.
/// Returns true if the key mapped to an interaction and a listener ran.
pub fn dispatch_key(element: &Element, event: KeyEvent) -> bool {
    match interaction_for_key(&event) {
        Some(interaction) => element.dispatch(interaction),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};
    use std::cell::Cell;
    use std::rc::Rc;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_activation_keys() {
        assert_eq!(
            interaction_for_key(&key(KeyCode::Enter, KeyEventKind::Press)),
            Some(Interaction::Activate)
        );
        assert_eq!(
            interaction_for_key(&key(KeyCode::Char(' '), KeyEventKind::Press)),
            Some(Interaction::Activate)
        );
        assert_eq!(interaction_for_key(&key(KeyCode::Char('a'), KeyEventKind::Press)), None);
        assert_eq!(interaction_for_key(&key(KeyCode::Enter, KeyEventKind::Release)), None);
        assert_eq!(interaction_for_key(&key(KeyCode::Enter, KeyEventKind::Repeat)), None);
    }

    #[test]
    fn test_dispatch_key_reaches_listener() {
        let trigger = Element::new("button");
        let hits = Rc::new(Cell::new(0));
        let hits_clone = hits.clone();
        trigger.add_listener(Interaction::Activate, move || hits_clone.set(hits_clone.get() + 1));

        assert!(dispatch_key(&trigger, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
        assert!(!dispatch_key(&trigger, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert_eq!(hits.get(), 1);
    }
}
