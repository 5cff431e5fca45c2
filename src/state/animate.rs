//! Animation drivers - Run state machines on the scheduler.
//!
//! The counter and typing state machines only know how to `tick`. These
//! drivers own the loop: tick, hand the output to a display callback, and
//! request the next frame or timeout until the machine completes.
//!
//! Every driven animation is independent. There is no shared clock and no
//! cancellation; an animation runs until its state machine completes.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use spark_folio::pipeline::{SharedScheduler, VirtualScheduler};
//! use spark_folio::state::{animate, CounterAnimation};
//!
//! let clock = VirtualScheduler::new(16);
//! let shared: SharedScheduler = clock.clone();
//! let shown = Rc::new(RefCell::new(0));
//! let sink = shown.clone();
//!
//! animate::drive_counter(&shared, CounterAnimation::new(500), move |v| *sink.borrow_mut() = v);
//! clock.run_until_idle();
//! assert_eq!(*shown.borrow(), 500);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::pipeline::SharedScheduler;
use super::counter::CounterAnimation;
use super::typing::TypingEffect;

// =============================================================================
// COUNTER
// =============================================================================

struct CounterLoop<F> {
    counter: CounterAnimation,
    display: F,
}

/// Animate `counter` once per frame, calling `display` with each value.
///
/// The first frame runs synchronously, the rest on animation frames.
pub fn drive_counter<F>(scheduler: &SharedScheduler, counter: CounterAnimation, display: F)
where
    F: FnMut(u64) + 'static,
{
    let state = Rc::new(RefCell::new(CounterLoop { counter, display }));
    counter_frame(Rc::clone(scheduler), state);
}

fn counter_frame<F>(scheduler: SharedScheduler, state: Rc<RefCell<CounterLoop<F>>>)
where
    F: FnMut(u64) + 'static,
{
    let more = {
        let mut state = state.borrow_mut();
        let CounterLoop { counter, display } = &mut *state;
        match counter.tick() {
            Some(value) => {
                display(value);
                !counter.phase().is_complete()
            }
            None => false,
        }
    };

    if more {
        let next = Rc::clone(&scheduler);
        scheduler.request_frame(Box::new(move || counter_frame(next, state)));
    }
}

/// A statistic element: its `data-count` attribute and its displayed text.
pub trait StatCounter {
    fn data_count(&self) -> Option<String>;
    fn show(&self, value: u64);
}

/// Start one counter per statistic, each reaching its `data-count` in
/// about `duration_ms`. Statistics without a valid count are skipped.
///
/// Returns how many counters started.
pub fn start_counters<S, I>(scheduler: &SharedScheduler, stats: I, duration_ms: u32, frame_ms: u32) -> usize
where
    S: StatCounter + 'static,
    I: IntoIterator<Item = S>,
{
    let mut started = 0;
    for stat in stats {
        let raw = stat.data_count().unwrap_or_default();
        let Some(target) = CounterAnimation::parse_target(&raw) else {
            log::warn!("stat counter skipped, bad data-count {raw:?}");
            continue;
        };
        let counter = CounterAnimation::with_timing(target, duration_ms, frame_ms);
        drive_counter(scheduler, counter, move |value| stat.show(value));
        started += 1;
    }
    started
}

// =============================================================================
// TYPING
// =============================================================================

struct TypingLoop<F> {
    effect: TypingEffect,
    display: F,
    interval_ms: u32,
}

/// Type `effect` out, one character every `interval_ms`.
///
/// `display` is called immediately with the empty start content, then with
/// each longer prefix.
pub fn drive_typing<F>(scheduler: &SharedScheduler, mut effect: TypingEffect, interval_ms: u32, mut display: F)
where
    F: FnMut(&str) + 'static,
{
    display(effect.start());
    let state = Rc::new(RefCell::new(TypingLoop {
        effect,
        display,
        interval_ms,
    }));
    schedule_typing(Rc::clone(scheduler), state);
}

fn schedule_typing<F>(scheduler: SharedScheduler, state: Rc<RefCell<TypingLoop<F>>>)
where
    F: FnMut(&str) + 'static,
{
    let interval = state.borrow().interval_ms;
    let next = Rc::clone(&scheduler);
    scheduler.set_timeout(
        interval,
        Box::new(move || {
            let more = {
                let mut state = state.borrow_mut();
                let TypingLoop { effect, display, .. } = &mut *state;
                match effect.tick() {
                    Some(visible) => {
                        display(visible);
                        true
                    }
                    None => false,
                }
            };
            if more {
                schedule_typing(next, state);
            }
        }),
    );
}

// =============================================================================
// TESTS
// =============================================================================
