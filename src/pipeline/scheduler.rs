//! Scheduler - Timeouts and animation frames behind one seam.
//!
//! Every piece of deferred work on the page (loader delay, counter frames,
//! typing ticks, confetti removal) goes through [`Scheduler`]. The browser
//! implementation lives in `dom::BrowserScheduler`; [`VirtualScheduler`]
//! drives the same code against a virtual clock in tests.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use spark_folio::pipeline::{Scheduler, VirtualScheduler};
//!
//! let clock = VirtualScheduler::new(16);
//! let fired = Rc::new(Cell::new(false));
//! let flag = fired.clone();
//! clock.set_timeout(100, Box::new(move || flag.set(true)));
//!
//! clock.advance(99);
//! assert!(!fired.get());
//! clock.advance(1);
//! assert!(fired.get());
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// Deferred unit of work.
pub type Task = Box<dyn FnOnce()>;

/// Scheduler shared between every component of a page.
pub type SharedScheduler = Rc<dyn Scheduler>;

/// Source of timeouts and animation frames.
///
/// Single-threaded and cooperative: tasks run to completion, one at a time,
/// and may schedule further tasks.
pub trait Scheduler {
    /// Run `task` once, `delay_ms` after now.
    fn set_timeout(&self, delay_ms: u32, task: Task);

    /// Run `task` before the next repaint.
    fn request_frame(&self, task: Task);
}

// =============================================================================
// VIRTUAL SCHEDULER
// =============================================================================

/// Upper bound on tasks run by [`VirtualScheduler::run_until_idle`].
const IDLE_TASK_LIMIT: usize = 1_000_000;

struct Pending {
    due: u64,
    seq: u64,
    task: Task,
}

struct Timeline {
    now: u64,
    next_seq: u64,
    frame_ms: u64,
    queue: Vec<Pending>,
}

impl Timeline {
    fn push(&mut self, due: u64, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Pending { due, seq, task });
    }

    /// Remove the earliest task due at or before `until`.
    fn pop_due(&mut self, until: u64) -> Option<Pending> {
        let index = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(i, _)| i)?;
        Some(self.queue.swap_remove(index))
    }
}

/// Deterministic scheduler driven by explicit `advance` calls.
///
/// Tasks run in due-time order, ties broken by submission order. Frames are
/// due one frame length after they are requested.
pub struct VirtualScheduler {
    timeline: RefCell<Timeline>,
}

impl VirtualScheduler {
    /// Create a scheduler whose frames are `frame_ms` apart.
    pub fn new(frame_ms: u32) -> Rc<Self> {
        Rc::new(Self {
            timeline: RefCell::new(Timeline {
                now: 0,
                next_seq: 0,
                frame_ms: frame_ms.max(1) as u64,
                queue: Vec::new(),
            }),
        })
    }

    /// Move the clock forward by `ms`, running every task that falls due,
    /// including tasks scheduled by those tasks.
    ///
    /// Returns the number of tasks run.
    pub fn advance(&self, ms: u64) -> usize {
        let until = self.timeline.borrow().now + ms;
        let mut ran = 0;
        loop {
            // Borrow released before the task runs so it can reschedule.
            let next = self.timeline.borrow_mut().pop_due(until);
            let Some(pending) = next else { break };
            self.timeline.borrow_mut().now = pending.due;
            (pending.task)();
            ran += 1;
        }
        self.timeline.borrow_mut().now = until;
        ran
    }

    /// Run tasks until the queue is empty, advancing the clock as needed.
    ///
    /// Returns the number of tasks run.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while ran < IDLE_TASK_LIMIT {
            let next = self.timeline.borrow_mut().pop_due(u64::MAX);
            let Some(pending) = next else { break };
            self.timeline.borrow_mut().now = pending.due;
            (pending.task)();
            ran += 1;
        }
        ran
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.timeline.borrow().queue.len()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.timeline.borrow().now
    }
}

impl Scheduler for VirtualScheduler {
    fn set_timeout(&self, delay_ms: u32, task: Task) {
        let mut timeline = self.timeline.borrow_mut();
        let due = timeline.now + delay_ms as u64;
        timeline.push(due, task);
    }

    fn request_frame(&self, task: Task) {
        let mut timeline = self.timeline.borrow_mut();
        let due = timeline.now + timeline.frame_ms;
        timeline.push(due, task);
    }
}

// =============================================================================
// TESTS
// =============================================================================
