//! External library bindings.
//!
//! The page loads three scripts before this module starts: the charting
//! library (`Chart`), the scroll-animation library (`AOS`) and the tween
//! library (`gsap`). Every call is bound with `catch`, so a missing global
//! surfaces as a [`PageError::Js`] instead of a trap.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::charts::ChartConfig;
use crate::config::AosOptions;
use crate::error::{PageError, Result};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Chart)]
    pub type ChartJs;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(item: &JsValue, config: &JsValue) -> std::result::Result<ChartJs, JsValue>;

    #[wasm_bindgen(js_namespace = AOS, js_name = init, catch)]
    fn aos_init(options: &JsValue) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = gsap, js_name = from, catch)]
    fn gsap_from(targets: &str, vars: &JsValue) -> std::result::Result<JsValue, JsValue>;
}

/// Hand a serializable value to JavaScript as a plain object.
pub fn to_js<T: Serialize>(value: &T) -> Result<JsValue> {
    let json = serde_json::to_string(value)?;
    js_sys::JSON::parse(&json).map_err(PageError::js)
}

/// Render `config` into `canvas` (an element or its id).
pub fn render_chart(canvas: &JsValue, config: &ChartConfig) -> Result<ChartJs> {
    ChartJs::new(canvas, &to_js(config)?).map_err(PageError::js)
}

/// Initialize the scroll-animation library.
pub fn init_scroll_animations(options: &AosOptions) -> Result<()> {
    aos_init(&to_js(options)?).map_err(PageError::js)
}

// =============================================================================
// TWEENS
// =============================================================================

/// Starting state of a `gsap.from` tween.
#[derive(Debug, Clone, Serialize)]
pub struct Tween {
    pub opacity: f64,
    pub y: f64,
    pub duration: f64,
    pub delay: f64,
}

impl Tween {
    /// Fade in while rising `y` pixels.
    pub fn rise(y: f64, delay: f64) -> Self {
        Self {
            opacity: 0.0,
            y,
            duration: 0.8,
            delay,
        }
    }
}

/// Tween every element matching `selector` from `tween` to its CSS state.
pub fn tween_from(selector: &str, tween: &Tween) -> Result<()> {
    gsap_from(selector, &to_js(tween)?)
        .map(|_| ())
        .map_err(PageError::js)
}
