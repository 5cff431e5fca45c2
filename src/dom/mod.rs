//! DOM layer - Browser bindings for the behavioral core.
//!
//! Everything that touches `web-sys` lives under this module. The rest of the
//! crate stays plain Rust and is tested natively.
//!
//! - [`BrowserScheduler`] - `Scheduler` over browser timeouts and frames
//! - [`observer`] - `IntersectionObserver` wrapper driving a `TriggerSet`
//! - [`bindings`] - external libraries (charts, scroll animations, tweens)
//! - [`effects`] - confetti sink, text reveal, keyframes, console greeting

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, NodeList};

use crate::pipeline::{Scheduler, Task};
use crate::state::animate::StatCounter;
use crate::state::observer::{SkillBar, SKILL_LEVEL_PROPERTY};

pub mod bindings;
pub mod effects;
pub mod observer;

// =============================================================================
// QUERIES
// =============================================================================

/// Something selectors can be run against: the document or an element.
pub trait Scope {
    fn select(&self, selector: &str) -> std::result::Result<Option<Element>, JsValue>;
    fn select_all(&self, selector: &str) -> std::result::Result<NodeList, JsValue>;
}

impl Scope for Document {
    fn select(&self, selector: &str) -> std::result::Result<Option<Element>, JsValue> {
        self.query_selector(selector)
    }

    fn select_all(&self, selector: &str) -> std::result::Result<NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

impl Scope for Element {
    fn select(&self, selector: &str) -> std::result::Result<Option<Element>, JsValue> {
        self.query_selector(selector)
    }

    fn select_all(&self, selector: &str) -> std::result::Result<NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

/// First element matching `selector`, if any. Invalid selectors match nothing.
pub fn query(root: &impl Scope, selector: &str) -> Option<Element> {
    root.select(selector).ok().flatten()
}

/// Every element matching `selector`, in document order.
pub fn query_all(root: &impl Scope, selector: &str) -> Vec<Element> {
    let Ok(list) = root.select_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// View an element as an `HtmlElement` for style and geometry access.
pub fn html(element: &Element) -> Option<&HtmlElement> {
    element.dyn_ref::<HtmlElement>()
}

// =============================================================================
// PRESENTATION HELPERS
// =============================================================================

/// Add or remove a class. Errors (invalid token) are ignored.
pub fn set_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    let _ = if on { list.add_1(class) } else { list.remove_1(class) };
}

/// Set one inline style property.
pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(el) = html(element) {
        if let Err(err) = el.style().set_property(property, value) {
            log::debug!("style {property} not set: {:?}", err);
        }
    }
}

/// Read one inline style property (including custom properties).
pub fn style_value(element: &Element, property: &str) -> Option<String> {
    html(element)
        .and_then(|el| el.style().get_property_value(property).ok())
        .filter(|v| !v.is_empty())
}

impl SkillBar for Element {
    fn level(&self) -> Option<String> {
        style_value(self, SKILL_LEVEL_PROPERTY)
    }

    fn set_width(&self, width: &str) {
        set_style(self, "width", width);
    }
}

impl StatCounter for Element {
    fn data_count(&self) -> Option<String> {
        self.get_attribute("data-count")
    }

    fn show(&self, value: u64) {
        self.set_text_content(Some(&value.to_string()));
    }
}

// =============================================================================
// BROWSER SCHEDULER
// =============================================================================

/// [`Scheduler`] backed by `setTimeout` and `requestAnimationFrame`.
///
/// Frame handles are held until their callback runs; timeouts are
/// fire-and-forget.
pub struct BrowserScheduler {
    frames: Rc<RefCell<HashMap<u64, AnimationFrame>>>,
    next_frame: Cell<u64>,
}

impl BrowserScheduler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            frames: Rc::new(RefCell::new(HashMap::new())),
            next_frame: Cell::new(0),
        })
    }
}

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay_ms: u32, task: Task) {
        Timeout::new(delay_ms, task).forget();
    }

    fn request_frame(&self, task: Task) {
        let id = self.next_frame.get();
        self.next_frame.set(id + 1);

        let frames = Rc::clone(&self.frames);
        let handle = request_animation_frame(move |_| {
            frames.borrow_mut().remove(&id);
            task();
        });
        self.frames.borrow_mut().insert(id, handle);
    }
}
