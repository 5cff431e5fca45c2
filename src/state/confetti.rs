//! Confetti Emitter - Short-lived falling particles.
//!
//! Each particle gets a random palette color, a random horizontal start and a
//! random fall duration in `[2, 5)` seconds. Particles are detached after a
//! fixed lifetime that ignores their individual fall duration.
//!
//! Randomness is injected as a `FnMut() -> f64` yielding values in `[0, 1)`;
//! the browser passes `Math.random`.

use std::rc::Rc;

use crate::pipeline::SharedScheduler;
use crate::theme::CONFETTI_COLORS;
use crate::types::Rgba;

/// Particles per activation.
pub const CONFETTI_COUNT: usize = 100;

/// Time from attach to detach, regardless of fall duration.
pub const CONFETTI_LIFETIME_MS: u32 = 5000;

/// Particle diameter in CSS pixels.
pub const PARTICLE_SIZE_PX: u32 = 10;

const MIN_FALL_SECS: f64 = 2.0;
const FALL_SPREAD_SECS: f64 = 3.0;

// =============================================================================
// PARTICLE
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub color: Rgba,
    /// Horizontal start, in viewport widths `[0, 100)`.
    pub left_vw: f64,
    /// Duration of the fall animation in seconds, `[2, 5)`.
    pub fall_secs: f64,
}

impl Particle {
    /// Draw a particle from `random`, which must yield values in `[0, 1)`.
    pub fn random(random: &mut impl FnMut() -> f64) -> Self {
        let pick = (random() * CONFETTI_COLORS.len() as f64).floor() as usize;
        let color = CONFETTI_COLORS[pick.min(CONFETTI_COLORS.len() - 1)];
        Self {
            color,
            left_vw: random() * 100.0,
            fall_secs: random() * FALL_SPREAD_SECS + MIN_FALL_SECS,
        }
    }

    /// Inline style for the particle element.
    pub fn css_text(&self) -> String {
        format!(
            "position: fixed; width: {size}px; height: {size}px; background: {color}; \
             left: {left}vw; top: -{size}px; border-radius: 50%; z-index: 10000; \
             pointer-events: none; animation: confettiFall {fall}s linear forwards;",
            size = PARTICLE_SIZE_PX,
            color = self.color.to_css(),
            left = self.left_vw,
            fall = self.fall_secs,
        )
    }
}

// =============================================================================
// EMITTER
// =============================================================================

/// Where particles are shown.
pub trait ParticleSink {
    /// Handle used to remove a shown particle.
    type Handle: 'static;

    fn attach(&self, particle: &Particle) -> Self::Handle;
    fn detach(&self, handle: Self::Handle);
}

/// Attach `count` particles now and schedule each one's removal after
/// `lifetime_ms`.
pub fn launch_confetti<S>(
    scheduler: &SharedScheduler,
    sink: Rc<S>,
    count: usize,
    lifetime_ms: u32,
    random: &mut impl FnMut() -> f64,
) where
    S: ParticleSink + 'static,
{
    for _ in 0..count {
        let particle = Particle::random(random);
        let handle = sink.attach(&particle);
        let sink = Rc::clone(&sink);
        scheduler.set_timeout(lifetime_ms, Box::new(move || sink.detach(handle)));
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::VirtualScheduler;
    use std::cell::{Cell, RefCell};

    /// Deterministic stand-in for Math.random.
    fn sequence(values: &[f64]) -> impl FnMut() -> f64 + '_ {
        let mut i = 0;
        move || {
            let v = values[i % values.len()];
            i += 1;
            v
        }
    }

    #[derive(Default)]
    struct CountingSink {
        next: Cell<u32>,
        live: RefCell<Vec<u32>>,
        attached: Cell<usize>,
    }

    impl ParticleSink for CountingSink {
        type Handle = u32;

        fn attach(&self, _particle: &Particle) -> u32 {
            let id = self.next.get();
            self.next.set(id + 1);
            self.live.borrow_mut().push(id);
            self.attached.set(self.attached.get() + 1);
            id
        }

        fn detach(&self, handle: u32) {
            self.live.borrow_mut().retain(|id| *id != handle);
        }
    }

    #[test]
    fn test_particle_ranges() {
        let mut random = sequence(&[0.0, 0.0, 0.0]);
        let low = Particle::random(&mut random);
        assert_eq!(low.color, CONFETTI_COLORS[0]);
        assert_eq!(low.left_vw, 0.0);
        assert_eq!(low.fall_secs, 2.0);

        let mut random = sequence(&[0.999_999, 0.999_999, 0.999_999]);
        let high = Particle::random(&mut random);
        assert_eq!(high.color, CONFETTI_COLORS[4]);
        assert!(high.left_vw < 100.0);
        assert!(high.fall_secs < 5.0);
    }

    #[test]
    fn test_css_text() {
        let particle = Particle {
            color: Rgba::from_rgb_int(0xff9500),
            left_vw: 42.5,
            fall_secs: 3.25,
        };
        let css = particle.css_text();
        assert!(css.contains("background: #ff9500;"));
        assert!(css.contains("left: 42.5vw;"));
        assert!(css.contains("animation: confettiFall 3.25s linear forwards;"));
        assert!(css.contains("border-radius: 50%;"));
    }

    #[test]
    fn test_burst_attaches_and_expires() {
        let clock = VirtualScheduler::new(16);
        let shared: SharedScheduler = clock.clone();
        let sink = Rc::new(CountingSink::default());
        let mut random = sequence(&[0.1, 0.5, 0.9, 0.3]);

        launch_confetti(&shared, sink.clone(), CONFETTI_COUNT, CONFETTI_LIFETIME_MS, &mut random);
        assert_eq!(sink.attached.get(), 100);
        assert_eq!(sink.live.borrow().len(), 100);

        clock.advance(4999);
        assert_eq!(sink.live.borrow().len(), 100);

        clock.advance(1);
        assert!(sink.live.borrow().is_empty());
    }
}
