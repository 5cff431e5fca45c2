//! # spark-folio
//!
//! Interactive behavior for a single-page portfolio site, compiled to
//! WebAssembly.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! the navigation state, with the DOM reflecting signals through effects.
//!
//! ## Architecture
//!
//! The behavioral core (`state`, `charts`, `pipeline::loader`) is plain Rust
//! driven through a [`pipeline::Scheduler`] seam and tested natively against
//! a virtual clock. The `dom` module is the only place that touches the
//! browser:
//!
//! ```text
//! browser events → PageController → state machines → Scheduler → DOM writes
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (Rgba, SectionBounds, AnimationPhase)
//! - [`config`] - Timing and threshold configuration
//! - [`state`] - Navigation, triggers, counters, typing, konami, confetti
//! - [`charts`] - Static chart configurations
//! - [`pipeline`] - Scheduler, loader sequence, page mount
//! - [`dom`] - Browser bindings

pub mod charts;
pub mod config;
pub mod dom;
pub mod error;
pub mod pipeline;
pub mod state;
pub mod theme;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{AosOptions, PageConfig};
pub use error::{PageError, Result};

pub use pipeline::{
    mount, LoaderPhase, LoaderSequencer, PageController, PageHost, Scheduler, SharedScheduler,
    VirtualScheduler,
};

pub use state::{
    // Keyboard
    dispatch as dispatch_keyboard, on as on_keyboard, reset_keyboard_state, KeyboardEvent,
    // Animations
    CounterAnimation, TypingEffect,
    // Navigation and triggers
    NavMetrics, NavState, TriggerMode, TriggerSet, TriggerSpec,
    // Easter egg
    KonamiDetector, Particle, ParticleSink,
};

pub use theme::Palette;

#[cfg(target_arch = "wasm32")]
mod entry {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(start)]
    pub fn main() {
        console_error_panic_hook::set_once();
        let level = if cfg!(debug_assertions) {
            log::Level::Debug
        } else {
            log::Level::Info
        };
        if console_log::init_with_level(level).is_err() {
            web_sys::console::warn_1(&"logger already initialized".into());
        }

        if let Err(err) = crate::pipeline::start() {
            log::error!("page not mounted: {err}");
        }
    }

    /// Reveal an element's text one glyph at a time.
    #[wasm_bindgen(js_name = revealText)]
    pub fn reveal_text(element: &web_sys::Element) -> Result<(), JsValue> {
        crate::pipeline::mount::reveal_text(element).map_err(|err| JsValue::from_str(&err.to_string()))
    }
}
