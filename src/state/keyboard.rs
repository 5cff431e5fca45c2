//! Keyboard Module - Keydown events and handler registry
//!
//! The DOM layer converts every `keydown` into a [`KeyboardEvent`] and calls
//! [`dispatch`]. Features subscribe with [`on`] and get a cleanup function
//! back.
//!
//! # Example
//!
//! ```
//! use spark_folio::state::keyboard::{self, KeyboardEvent};
//!
//! let cleanup = keyboard::on(|event| event.key == "Escape");
//! assert!(keyboard::dispatch(KeyboardEvent::new("Escape")));
//! cleanup();
//! assert!(!keyboard::dispatch(KeyboardEvent::new("Escape")));
//! ```

use std::cell::RefCell;

/// A key press, identified by its `KeyboardEvent.key` value
/// (e.g. "a", "Enter", "ArrowUp").
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    pub key: String,
}

impl KeyboardEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Handler for keyboard events. Return true to consume the event.
pub type KeyHandler = Box<dyn Fn(&KeyboardEvent) -> bool>;

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

#[derive(Default)]
struct HandlerRegistry {
    handlers: Vec<(usize, KeyHandler)>,
    next_id: usize,
}

thread_local! {
    static REGISTRY: RefCell<HandlerRegistry> = RefCell::new(HandlerRegistry::default());
}

/// Dispatch a keyboard event to the registered handlers, in registration
/// order, until one consumes it. Returns true if one did.
///
/// Handlers must not register or remove handlers while running.
pub fn dispatch(event: KeyboardEvent) -> bool {
    REGISTRY.with(|reg| reg.borrow().handlers.iter().any(|(_, handler)| handler(&event)))
}

/// Subscribe to all keyboard events.
/// Return true from handler to consume the event.
/// Returns cleanup function.
pub fn on<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&KeyboardEvent) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id;
        reg.next_id += 1;
        reg.handlers.push((id, Box::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            reg.borrow_mut()
                .handlers
                .retain(|(handler_id, _)| *handler_id != id);
        });
    }
}

/// Reset all keyboard state (for testing).
pub fn reset_keyboard_state() {
    REGISTRY.with(|reg| *reg.borrow_mut() = HandlerRegistry::default());
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup() {
        reset_keyboard_state();
    }

    #[test]
    fn test_handler_receives_events() {
        setup();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let _cleanup = on(move |event| {
            log.borrow_mut().push(event.key.clone());
            false
        });

        assert!(!dispatch(KeyboardEvent::new("a")));
        dispatch(KeyboardEvent::new("ArrowUp"));
        assert_eq!(*seen.borrow(), vec!["a", "ArrowUp"]);
    }

    #[test]
    fn test_consumed_event_stops_later_handlers() {
        setup();

        let later = Rc::new(Cell::new(0));
        let hits = later.clone();
        let _first = on(|event| event.key == "Enter");
        let _second = on(move |_| {
            hits.set(hits.get() + 1);
            false
        });

        assert!(dispatch(KeyboardEvent::new("Enter")));
        assert_eq!(later.get(), 0);

        assert!(!dispatch(KeyboardEvent::new("Tab")));
        assert_eq!(later.get(), 1);
    }

    #[test]
    fn test_cleanup_removes_only_its_handler() {
        setup();

        let kept = Rc::new(Cell::new(0));
        let hits = kept.clone();
        let cleanup = on(|_| true);
        let _keep = on(move |_| {
            hits.set(hits.get() + 1);
            false
        });

        assert!(dispatch(KeyboardEvent::new("b")));
        cleanup();
        assert!(!dispatch(KeyboardEvent::new("b")));
        assert_eq!(kept.get(), 1);
    }
}
