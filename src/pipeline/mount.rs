//! Mount API - Wire the page's behavior to the document.
//!
//! [`mount`] looks up the elements the markup guarantees, builds the
//! [`PageController`] and attaches every listener, observer and reactive
//! effect. The controller lives for the page lifetime; there is no teardown.
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::{config::PageConfig, pipeline::mount};
//!
//! let document = web_sys::window().unwrap().document().unwrap();
//! mount::mount(&document, PageConfig::default())?;
//! ```

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions};
use spark_signals::effect;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::charts::{self, ChartConfig};
use crate::config::{PageConfig, CONFIG_ATTRIBUTE};
use crate::dom::bindings::{self, ChartJs};
use crate::dom::effects::{self, BodySink};
use crate::dom::observer::Watcher;
use crate::dom::{self, html, query, query_all, set_class, set_style, BrowserScheduler};
use crate::error::{PageError, Result};
use crate::state::animate::{drive_typing, start_counters};
use crate::state::confetti::launch_confetti;
use crate::state::keyboard::{self, KeyboardEvent};
use crate::state::konami;
use crate::state::observer::{fill_skill_bars, reset_skill_bars, TriggerSpec};
use crate::state::scroll::{anchor_target, NavMetrics, NavState, ScrollLock, OVERFLOW_VISIBLE};
use crate::state::TypingEffect;
use crate::theme::Palette;
use crate::types::SectionBounds;
use super::loader::{LoaderSequencer, PageHost};
use super::scheduler::SharedScheduler;

// =============================================================================
// PAGE CONTROLLER
// =============================================================================

/// Owns every element reference, signal, listener and observer of the page.
pub struct PageController {
    this: Weak<PageController>,
    window: Window,
    document: Document,
    body: HtmlElement,
    loader: Element,
    navbar: Element,
    toggle: Element,
    menu: Element,
    nav_links: Vec<Element>,
    config: PageConfig,
    palette: Palette,
    nav: NavState,
    sequencer: Rc<LoaderSequencer>,
    scheduler: SharedScheduler,
    sink: Rc<BodySink>,
    listeners: RefCell<Vec<EventListener>>,
    watchers: RefCell<Vec<Watcher>>,
    charts: RefCell<Vec<ChartJs>>,
    /// Effect stop functions and registry cleanups.
    cleanups: RefCell<Vec<Box<dyn FnOnce()>>>,
}

/// The elements the page cannot run without.
struct RequiredElements<T> {
    loader: T,
    navbar: T,
    toggle: T,
    menu: T,
}

impl<T> RequiredElements<T> {
    /// Look every required element up; the first one missing is an error.
    fn find(mut find: impl FnMut(&str) -> Option<T>) -> Result<Self> {
        let mut require = |selector: &str| {
            find(selector).ok_or_else(|| PageError::MissingElement(selector.to_string()))
        };
        Ok(Self {
            loader: require(".loader")?,
            navbar: require(".navbar")?,
            toggle: require(".nav-toggle")?,
            menu: require(".mobile-menu")?,
        })
    }
}

thread_local! {
    static PAGE: RefCell<Option<Rc<PageController>>> = const { RefCell::new(None) };
}

/// Read the config override from `<body>` and mount the page.
pub fn start() -> Result<()> {
    let window = web_sys::window().ok_or_else(|| PageError::Js("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| PageError::Js("no document".into()))?;
    let raw = document
        .body()
        .and_then(|body| body.get_attribute(CONFIG_ATTRIBUTE));
    let config = PageConfig::from_attribute(raw.as_deref());
    mount(&document, config).map(|_| ())
}

/// Build the controller and attach all page behavior.
///
/// Fails only when one of the required elements is missing; every other
/// feature degrades silently when its markup is absent.
pub fn mount(document: &Document, config: PageConfig) -> Result<Rc<PageController>> {
    let window = web_sys::window().ok_or_else(|| PageError::Js("no window".into()))?;
    let body = document
        .body()
        .ok_or_else(|| PageError::MissingElement("body".into()))?;

    let RequiredElements {
        loader,
        navbar,
        toggle,
        menu,
    } = RequiredElements::find(|selector| query(document, selector))?;
    let nav_links = query_all(document, ".nav-link, .mobile-link");

    let scheduler: SharedScheduler = BrowserScheduler::new();
    let sink = Rc::new(BodySink::new(document.clone(), body.clone()));
    let nav = NavState::new(NavMetrics::from(&config));
    let sequencer = LoaderSequencer::new(&config);

    let page = Rc::new_cyclic(|this| PageController {
        this: this.clone(),
        window,
        document: document.clone(),
        body,
        loader,
        navbar,
        toggle,
        menu,
        nav_links,
        palette: Palette::sunset(),
        nav,
        sequencer,
        scheduler,
        sink,
        config,
        listeners: RefCell::new(Vec::new()),
        watchers: RefCell::new(Vec::new()),
        charts: RefCell::new(Vec::new()),
        cleanups: RefCell::new(Vec::new()),
    });

    if let Err(err) = effects::inject_keyframes(document) {
        log::warn!("keyframes not injected: {err}");
    }
    page.bind_nav_effects();
    page.bind_nav_listeners();
    page.bind_keyboard();
    page.init_scroll_library();
    page.mount_charts();
    page.watch_fade_ups();
    page.bind_loader();
    effects::greet();

    PAGE.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&page)));
    log::info!("page mounted ({} nav links)", page.nav_links.len());
    Ok(page)
}

/// The mounted page, if any.
pub fn page() -> Option<Rc<PageController>> {
    PAGE.with(|slot| slot.borrow().clone())
}

impl PageController {
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &SharedScheduler {
        &self.scheduler
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn listen(&self, listener: EventListener) {
        self.listeners.borrow_mut().push(listener);
    }

    fn keep(&self, cleanup: impl FnOnce() + 'static) {
        self.cleanups.borrow_mut().push(Box::new(cleanup));
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    /// Reflect the nav signals into classes and styles.
    fn bind_nav_effects(&self) {
        let scrolled = self.nav.scrolled_signal();
        let navbar = self.navbar.clone();
        let stop = effect(move || set_class(&navbar, "scrolled", scrolled.get()));
        self.keep(stop);

        // No highlight until a section matches; the markup's initial one stays.
        let active = self.nav.active_signal();
        let links = self.nav_links.clone();
        let stop = effect(move || {
            let Some(id) = active.get() else {
                return;
            };
            for link in &links {
                let href = link.get_attribute("href").unwrap_or_default();
                set_class(link, "active", anchor_target(&href) == Some(id.as_str()));
            }
        });
        self.keep(stop);

        let open = self.nav.menu_signal();
        let toggle = self.toggle.clone();
        let menu = self.menu.clone();
        let body = self.body.clone();
        let lock = Cell::new(ScrollLock::new());
        let stop = effect(move || {
            let open = open.get();
            set_class(&toggle, "active", open);
            set_class(&menu, "active", open);

            let mut state = lock.get();
            let overflow = state.apply(open);
            lock.set(state);
            if let Some(overflow) = overflow {
                set_style(&body, "overflow", overflow);
            }
        });
        self.keep(stop);
    }

    fn bind_nav_listeners(&self) {
        let this = self.this.clone();
        self.listen(EventListener::new(&self.window, "scroll", move |_| {
            if let Some(page) = this.upgrade() {
                page.on_scroll();
            }
        }));

        let this = self.this.clone();
        self.listen(EventListener::new(&self.toggle, "click", move |_| {
            if let Some(page) = this.upgrade() {
                let open = page.nav.toggle_menu();
                log::debug!("mobile menu {}", if open { "opened" } else { "closed" });
            }
        }));

        for link in &self.nav_links {
            let this = self.this.clone();
            self.listen(EventListener::new(link, "click", move |_| {
                if let Some(page) = this.upgrade() {
                    let overflow = page.nav.follow_link();
                    set_style(&page.body, "overflow", overflow);
                }
            }));
        }

        let options = EventListenerOptions::enable_prevent_default();
        for anchor in query_all(&self.document, "a[href^=\"#\"]") {
            let this = self.this.clone();
            let href = anchor.get_attribute("href").unwrap_or_default();
            self.listen(EventListener::new_with_options(&anchor, "click", options, move |event| {
                event.prevent_default();
                if let Some(page) = this.upgrade() {
                    page.scroll_to_anchor(&href);
                }
            }));
        }
    }

    fn on_scroll(&self) {
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        let sections = self.section_bounds();
        self.nav.on_scroll(scroll_y, &sections);
    }

    fn section_bounds(&self) -> Vec<SectionBounds> {
        query_all(&self.document, "section[id]")
            .iter()
            .filter_map(|section| {
                let el = html(section)?;
                Some(SectionBounds::new(
                    section.id(),
                    el.offset_top() as f64,
                    el.offset_height() as f64,
                ))
            })
            .collect()
    }

    fn scroll_to_anchor(&self, href: &str) {
        let find_top = |id: &str| {
            let target = self.document.get_element_by_id(id)?;
            html(&target).map(|el| el.offset_top() as f64)
        };
        let Some(top) = self.nav.anchor_destination(href, find_top) else {
            log::debug!("anchor {href} has no target");
            return;
        };
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    // =========================================================================
    // KEYBOARD + EASTER EGG
    // =========================================================================

    fn bind_keyboard(&self) {
        self.listen(EventListener::new(&self.document, "keydown", |event| {
            let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                return;
            };
            keyboard::dispatch(KeyboardEvent::new(event.key()));
        }));

        let this = self.this.clone();
        let stop = konami::listen(move || {
            if let Some(page) = this.upgrade() {
                page.activate_easter_egg();
            }
        });
        self.keep(stop);
    }

    /// Rainbow the page for a moment and rain confetti.
    pub fn activate_easter_egg(&self) {
        let duration = self.config.rainbow_ms;
        set_style(&self.body, "animation", &effects::rainbow_animation(duration));
        let body = self.body.clone();
        self.scheduler
            .set_timeout(duration, Box::new(move || set_style(&body, "animation", "")));

        let mut random = js_sys::Math::random;
        launch_confetti(
            &self.scheduler,
            Rc::clone(&self.sink),
            self.config.confetti_count,
            self.config.confetti_lifetime_ms,
            &mut random,
        );
    }

    // =========================================================================
    // LIBRARIES
    // =========================================================================

    fn init_scroll_library(&self) {
        match bindings::init_scroll_animations(&self.config.aos) {
            Ok(()) => log::debug!("scroll animations initialized"),
            Err(err) => log::warn!("scroll animations unavailable: {err}"),
        }
    }

    fn mount_charts(&self) {
        let rendered = charts::bootstrap(
            &self.palette,
            |id| self.document.get_element_by_id(id),
            |canvas, config: &ChartConfig| {
                let chart = bindings::render_chart(&canvas.into(), config)?;
                self.charts.borrow_mut().push(chart);
                Ok(())
            },
        );
        log::debug!("{rendered} chart(s) rendered");
    }

    // =========================================================================
    // OBSERVERS
    // =========================================================================

    fn watch(&self, what: &str, spec: TriggerSpec, targets: Vec<Element>, on_fire: impl FnMut(&Element) + 'static) {
        if targets.is_empty() {
            log::debug!("no {what} on page");
            return;
        }
        match Watcher::new(spec, targets, on_fire) {
            Ok(watcher) => self.watchers.borrow_mut().push(watcher),
            Err(err) => log::warn!("{what} observer not created: {err}"),
        }
    }

    fn watch_fade_ups(&self) {
        let targets = query_all(&self.document, ".fade-up");
        self.watch("fade-up elements", TriggerSpec::fade_up(&self.config), targets, |el| {
            set_class(el, "visible", true)
        });
    }

    fn watch_stats(&self) {
        let targets = query(&self.document, ".stats-row").into_iter().collect();
        let this = self.this.clone();
        self.watch("stats row", TriggerSpec::stats(&self.config), targets, move |_| {
            if let Some(page) = this.upgrade() {
                page.start_counters();
            }
        });
    }

    fn start_counters(&self) {
        let stats = query_all(&self.document, ".stat-number[data-count]");
        let started = start_counters(
            &self.scheduler,
            stats,
            self.config.counter_duration_ms,
            self.config.frame_ms,
        );
        log::debug!("{started} stat counter(s) started");
    }

    fn watch_skill_bars(&self) {
        let Some(grid) = query(&self.document, ".tools-grid") else {
            log::debug!("no tools grid on page");
            return;
        };
        reset_skill_bars(&query_all(&grid, ".tool-level"));
        self.watch("tools grid", TriggerSpec::skill_bars(&self.config), vec![grid], |grid| {
            fill_skill_bars(&query_all(grid, ".tool-level"));
        });
    }

    // =========================================================================
    // LOADER
    // =========================================================================

    fn bind_loader(&self) {
        let Some(host) = self.this.upgrade() else {
            return;
        };
        let host: Rc<dyn PageHost> = host;

        if self.document.ready_state() == "complete" {
            log::debug!("document already complete");
            self.sequencer.on_already_loaded(&self.scheduler, host);
            return;
        }

        let sequencer = Rc::clone(&self.sequencer);
        let scheduler = Rc::clone(&self.scheduler);
        self.listen(EventListener::once(&self.window, "load", move |_| {
            sequencer.on_load(&scheduler, host);
        }));
    }
}

impl PageHost for PageController {
    fn hide_loader(&self) {
        set_class(&self.loader, "hidden", true);
    }

    fn restore_scroll(&self) {
        set_style(&self.body, "overflow", OVERFLOW_VISIBLE);
    }

    fn init_animations(&self) {
        let tweens = effects::hero_intro();
        log::debug!("{tweens} hero tween(s) started");
        self.watch_stats();
        self.watch_skill_bars();
    }

    fn start_typing(&self) {
        let Some(code) = query(&self.document, ".code-block code") else {
            return;
        };
        let effect = TypingEffect::new(code.inner_html());
        drive_typing(
            &self.scheduler,
            effect,
            self.config.typing_interval_ms,
            move |visible| code.set_inner_html(visible),
        );
    }
}

/// Reveal `element`'s text one glyph at a time, using the mounted page's
/// timing. Does nothing before the page is mounted.
pub fn reveal_text(element: &Element) -> Result<()> {
    let Some(page) = page() else {
        return Ok(());
    };
    dom::effects::reveal_text(
        &page.document,
        element,
        &page.scheduler,
        page.config.reveal_stagger_ms,
        page.config.reveal_kickoff_ms,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with<'a>(present: &'a [&'a str]) -> impl FnMut(&str) -> Option<String> + 'a {
        move |selector| present.iter().any(|p| *p == selector).then(|| selector.to_string())
    }

    #[test]
    fn test_required_elements_found() {
        let all = [".loader", ".navbar", ".nav-toggle", ".mobile-menu"];
        let found = RequiredElements::find(page_with(&all)).unwrap();
        assert_eq!(found.loader, ".loader");
        assert_eq!(found.navbar, ".navbar");
        assert_eq!(found.toggle, ".nav-toggle");
        assert_eq!(found.menu, ".mobile-menu");
    }

    #[test]
    fn test_missing_required_element_fails_mount() {
        let without_toggle = [".loader", ".navbar", ".mobile-menu"];
        let err = RequiredElements::find(page_with(&without_toggle)).err();
        assert!(matches!(err, Some(PageError::MissingElement(ref s)) if s == ".nav-toggle"));
    }

    #[test]
    fn test_first_missing_element_is_reported() {
        let err = RequiredElements::find(page_with(&[])).err();
        assert!(matches!(err, Some(PageError::MissingElement(ref s)) if s == ".loader"));
    }
}
