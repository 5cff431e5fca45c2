//! Counter Animator - Statistic counters counting up from zero.
//!
//! Each counter adds a fixed increment per frame to a running float and
//! displays its floor. The last frame always displays the exact integer
//! target, whatever rounding error built up on the way.

use crate::types::AnimationPhase;

/// Default total animation time.
pub const COUNTER_DURATION_MS: u32 = 2000;

/// Nominal frame length the increment is computed against.
pub const FRAME_MS: u32 = 16;

/// One statistic counting from 0 to `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: u64,
    increment: f64,
    current: f64,
    phase: AnimationPhase,
}

impl CounterAnimation {
    /// Counter with the site's default timing (~125 frames).
    pub fn new(target: u64) -> Self {
        Self::with_timing(target, COUNTER_DURATION_MS, FRAME_MS)
    }

    /// Counter reaching `target` in about `duration_ms / frame_ms` frames.
    pub fn with_timing(target: u64, duration_ms: u32, frame_ms: u32) -> Self {
        let frames = (duration_ms as f64 / frame_ms.max(1) as f64).max(1.0);
        Self {
            target,
            increment: target as f64 / frames,
            current: 0.0,
            phase: AnimationPhase::Idle,
        }
    }

    /// Parse a `data-count` attribute value.
    ///
    /// Accepts surrounding whitespace and a leading `+`; anything else that
    /// is not a non-negative integer yields None.
    pub fn parse_target(raw: &str) -> Option<u64> {
        raw.trim().parse().ok()
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// Advance one frame.
    ///
    /// Returns the value to display, or None once the counter is complete.
    /// The frame that reaches the target returns exactly the target and
    /// completes the counter.
    pub fn tick(&mut self) -> Option<u64> {
        if self.phase.is_complete() {
            return None;
        }
        self.phase = AnimationPhase::Running;
        self.current += self.increment;

        if self.current < self.target as f64 {
            Some(self.current.floor() as u64)
        } else {
            self.phase = AnimationPhase::Complete;
            Some(self.target)
        }
    }
}

impl Iterator for CounterAnimation {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        self.tick()
    }
}
