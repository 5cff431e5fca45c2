//! Loader Sequencer - Initial page reveal.
//!
//! The loading overlay stays up until `load` plus a fixed delay. Then, in
//! order: the overlay is hidden, page scrolling is restored, entrance
//! animations are initialized (exactly once), and the typing effect is
//! scheduled a short moment later.
//!
//! When the page is already complete by the time we start (cache hit, or the
//! module was instantiated after `load`), the same sequence runs immediately.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::PageConfig;
use super::scheduler::SharedScheduler;

// =============================================================================
// HOST
// =============================================================================

/// The page-side effects the loader drives.
pub trait PageHost {
    /// Hide the loading overlay.
    fn hide_loader(&self);
    /// Re-enable page scrolling.
    fn restore_scroll(&self);
    /// Start entrance animations, counters and skill-bar observers.
    fn init_animations(&self);
    /// Start the code-block typing effect.
    fn start_typing(&self);
}

// =============================================================================
// SEQUENCER
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    /// Overlay visible, waiting for `load`.
    Showing,
    /// `load` seen, waiting out the delay.
    Scheduled,
    /// Overlay gone.
    Hidden,
}

pub struct LoaderSequencer {
    phase: Cell<LoaderPhase>,
    animations_started: Cell<bool>,
    delay_ms: u32,
    typing_delay_ms: u32,
}

impl LoaderSequencer {
    pub fn new(config: &PageConfig) -> Rc<Self> {
        Rc::new(Self {
            phase: Cell::new(LoaderPhase::Showing),
            animations_started: Cell::new(false),
            delay_ms: config.loader_delay_ms,
            typing_delay_ms: config.typing_delay_ms,
        })
    }

    pub fn phase(&self) -> LoaderPhase {
        self.phase.get()
    }

    pub fn animations_started(&self) -> bool {
        self.animations_started.get()
    }

    /// Handle the window `load` event: reveal after the configured delay.
    pub fn on_load(self: &Rc<Self>, scheduler: &SharedScheduler, host: Rc<dyn PageHost>) {
        if self.phase.get() != LoaderPhase::Showing {
            return;
        }
        self.phase.set(LoaderPhase::Scheduled);
        log::debug!("page loaded, hiding loader in {}ms", self.delay_ms);

        let this = Rc::clone(self);
        let sched = Rc::clone(scheduler);
        scheduler.set_timeout(
            self.delay_ms,
            Box::new(move || this.reveal(&sched, host)),
        );
    }

    /// The document was already complete at startup: reveal right away.
    pub fn on_already_loaded(self: &Rc<Self>, scheduler: &SharedScheduler, host: Rc<dyn PageHost>) {
        self.reveal(scheduler, host);
    }

    fn reveal(&self, scheduler: &SharedScheduler, host: Rc<dyn PageHost>) {
        if self.phase.get() == LoaderPhase::Hidden {
            return;
        }
        self.phase.set(LoaderPhase::Hidden);
        log::info!("hiding loader");

        host.hide_loader();
        host.restore_scroll();
        if !self.animations_started.replace(true) {
            host.init_animations();
        }

        scheduler.set_timeout(self.typing_delay_ms, Box::new(move || host.start_typing()));
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::VirtualScheduler;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingHost {
        calls: RefCell<Vec<&'static str>>,
    }

    impl PageHost for RecordingHost {
        fn hide_loader(&self) {
            self.calls.borrow_mut().push("hide");
        }
        fn restore_scroll(&self) {
            self.calls.borrow_mut().push("scroll");
        }
        fn init_animations(&self) {
            self.calls.borrow_mut().push("animations");
        }
        fn start_typing(&self) {
            self.calls.borrow_mut().push("typing");
        }
    }

    fn setup() -> (Rc<VirtualScheduler>, SharedScheduler, Rc<RecordingHost>) {
        let clock = VirtualScheduler::new(16);
        let shared: SharedScheduler = clock.clone();
        (clock, shared, Rc::new(RecordingHost::default()))
    }

    #[test]
    fn test_reveal_waits_for_delay() {
        let (clock, shared, host) = setup();
        let loader = LoaderSequencer::new(&PageConfig::default());

        loader.on_load(&shared, host.clone());
        assert_eq!(loader.phase(), LoaderPhase::Scheduled);

        clock.advance(2499);
        assert!(host.calls.borrow().is_empty());

        clock.advance(1);
        assert_eq!(*host.calls.borrow(), vec!["hide", "scroll", "animations"]);
        assert_eq!(loader.phase(), LoaderPhase::Hidden);
    }

    #[test]
    fn test_typing_starts_after_hide() {
        let (clock, shared, host) = setup();
        let loader = LoaderSequencer::new(&PageConfig::default());

        loader.on_load(&shared, host.clone());
        clock.advance(2599);
        assert!(!host.calls.borrow().contains(&"typing"));

        clock.advance(1);
        assert_eq!(host.calls.borrow().last(), Some(&"typing"));
    }

    #[test]
    fn test_already_loaded_reveals_immediately() {
        let (clock, shared, host) = setup();
        let loader = LoaderSequencer::new(&PageConfig::default());

        loader.on_already_loaded(&shared, host.clone());
        assert_eq!(*host.calls.borrow(), vec!["hide", "scroll", "animations"]);

        clock.advance(100);
        assert_eq!(host.calls.borrow().last(), Some(&"typing"));
    }

    #[test]
    fn test_animations_init_exactly_once() {
        let (clock, shared, host) = setup();
        let loader = LoaderSequencer::new(&PageConfig::default());

        loader.on_load(&shared, host.clone());
        loader.on_load(&shared, host.clone());
        loader.on_already_loaded(&shared, host.clone());
        clock.run_until_idle();

        let calls = host.calls.borrow();
        assert_eq!(calls.iter().filter(|c| **c == "animations").count(), 1);
        assert_eq!(calls.iter().filter(|c| **c == "hide").count(), 1);
        assert_eq!(calls.iter().filter(|c| **c == "typing").count(), 1);
        assert!(loader.animations_started());
    }
}
