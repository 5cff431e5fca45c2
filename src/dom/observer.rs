//! `IntersectionObserver` wrapper.
//!
//! A [`Watcher`] owns one browser observer and the [`TriggerSet`] that decides
//! which entries fire. Targets are keyed by their index in the watched list.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::{PageError, Result};
use crate::state::observer::{TriggerMode, TriggerSet, TriggerSpec};

type EntriesCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

pub struct Watcher {
    observer: IntersectionObserver,
    _callback: EntriesCallback,
}

impl Watcher {
    /// Observe `targets`, calling `on_fire` for each target that fires.
    pub fn new<F>(spec: TriggerSpec, targets: Vec<Element>, mut on_fire: F) -> Result<Self>
    where
        F: FnMut(&Element) + 'static,
    {
        let mut triggers = TriggerSet::new(spec);
        for index in 0..targets.len() {
            triggers.observe(index);
        }
        let triggers = Rc::new(RefCell::new(triggers));
        let targets = Rc::new(targets);

        let watched = Rc::clone(&targets);
        let callback: EntriesCallback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            let batch: Vec<(usize, bool)> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .filter_map(|entry| {
                    let target = entry.target();
                    watched
                        .iter()
                        .position(|el| *el == target)
                        .map(|index| (index, entry.is_intersecting()))
                })
                .collect();

            let fired = triggers.borrow_mut().on_entries(batch);
            for index in fired {
                let target = &watched[index];
                if spec.mode == TriggerMode::Once {
                    observer.unobserve(target);
                }
                on_fire(target);
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(spec.threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(PageError::js)?;

        for target in targets.iter() {
            observer.observe(target);
        }
        log::debug!(
            "observing {} target(s) at threshold {}",
            targets.len(),
            spec.threshold
        );

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for Watcher {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
