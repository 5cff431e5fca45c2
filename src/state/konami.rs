//! Konami code detector.
//!
//! Matches `↑ ↑ ↓ ↓ ← → ← → b a` against keydown keys. A mismatch throws
//! away all progress, and the mismatching key is not re-tested against the
//! start of the sequence.

use std::cell::Cell;
use std::rc::Rc;

use super::keyboard;

/// The secret sequence, as `KeyboardEvent.key` values.
pub const KONAMI_SEQUENCE: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "b",
    "a",
];

/// Progress through [`KONAMI_SEQUENCE`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KonamiDetector {
    index: usize,
}

impl KonamiDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys matched so far.
    pub fn progress(&self) -> usize {
        self.index
    }

    /// Feed one key. Returns true when this key completes the sequence.
    pub fn feed(&mut self, key: &str) -> bool {
        if key != KONAMI_SEQUENCE[self.index] {
            self.index = 0;
            return false;
        }

        self.index += 1;
        if self.index == KONAMI_SEQUENCE.len() {
            self.index = 0;
            return true;
        }
        false
    }
}

/// Subscribe a detector to the keyboard registry; `activate` runs on every
/// completed sequence. Never consumes the event.
///
/// Returns the registry cleanup function.
pub fn listen<F>(activate: F) -> impl FnOnce()
where
    F: Fn() + 'static,
{
    let detector = Rc::new(Cell::new(KonamiDetector::new()));
    keyboard::on(move |event| {
        let mut state = detector.take();
        let complete = state.feed(&event.key);
        detector.set(state);
        if complete {
            log::info!("konami code entered");
            activate();
        }
        false
    })
}
