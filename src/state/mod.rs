//! State Module - Behavioral core of the page
//!
//! Plain Rust state machines and registries, with no DOM access:
//!
//! - **Keyboard** - Keydown dispatch and handler registry
//! - **Konami** - Secret key sequence detector
//! - **Scroll** - Navbar state, active section, mobile menu
//! - **Observer** - Intersection trigger sets and skill levels
//! - **Counter** / **Typing** - Frame and timer driven animations
//! - **Animate** - Drivers running those animations on a scheduler
//! - **Confetti** - Particle generation and lifetime

pub mod animate;
pub mod confetti;
pub mod counter;
pub mod keyboard;
pub mod konami;
pub mod observer;
pub mod scroll;
pub mod typing;

pub use animate::{start_counters, StatCounter};
pub use confetti::{launch_confetti, Particle, ParticleSink, CONFETTI_COUNT, CONFETTI_LIFETIME_MS};
pub use counter::CounterAnimation;
pub use keyboard::{dispatch, on, reset_keyboard_state, KeyboardEvent};
pub use konami::{KonamiDetector, KONAMI_SEQUENCE};
pub use observer::{fill_skill_bars, reset_skill_bars, SkillBar, SkillLevel, TriggerMode, TriggerSet, TriggerSpec};
pub use scroll::{NavMetrics, NavState, ScrollLock};
pub use typing::{reveal_glyphs, RevealGlyph, TypingEffect};
