//! Scroll State Module - Navbar style, active link, mobile menu
//!
//! Manages navigation behavior driven by window scroll and clicks:
//! - `scrolled` navbar state past a fixed offset
//! - Active navigation link from section bounds
//! - Mobile menu open/closed (and body scroll lock)
//! - Anchor smooth-scroll target position
//!
//! State is held in signals; the DOM layer reflects it into classes and
//! styles with effects, so every handler here is pure and idempotent.

use spark_signals::{signal, Signal};

use crate::config::PageConfig;
use crate::types::SectionBounds;

// =============================================================================
// SCROLL METRICS
// =============================================================================

/// Pixel offsets used by the navigation logic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavMetrics {
    /// Navbar is `scrolled` strictly above this offset.
    pub scrolled_threshold: f64,
    /// Added to scrollY before testing section bounds.
    pub active_offset: f64,
    /// Kept clear above an anchor target (fixed navbar height).
    pub anchor_offset: f64,
}

impl Default for NavMetrics {
    fn default() -> Self {
        Self::from(&PageConfig::default())
    }
}

impl From<&PageConfig> for NavMetrics {
    fn from(config: &PageConfig) -> Self {
        Self {
            scrolled_threshold: config.scrolled_threshold_px,
            active_offset: config.active_offset_px,
            anchor_offset: config.anchor_offset_px,
        }
    }
}

// =============================================================================
// PURE QUERIES
// =============================================================================

/// Whether the navbar should carry the `scrolled` state.
#[inline]
pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// First section (in document order) containing `scroll_y + offset`.
pub fn active_section(sections: &[SectionBounds], scroll_y: f64, offset: f64) -> Option<&SectionBounds> {
    let position = scroll_y + offset;
    sections.iter().find(|section| section.contains(position))
}

/// Window scroll position that brings an anchor target just below the navbar.
#[inline]
pub fn anchor_scroll_top(target_top: f64, offset: f64) -> f64 {
    target_top - offset
}

/// Section id an in-page link points at (`"#about"` -> `"about"`).
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

// =============================================================================
// BODY SCROLL LOCK
// =============================================================================

pub const OVERFLOW_HIDDEN: &str = "hidden";
pub const OVERFLOW_VISIBLE: &str = "visible";

/// Body `overflow` for a menu state.
#[inline]
pub fn menu_overflow(open: bool) -> &'static str {
    if open { OVERFLOW_HIDDEN } else { OVERFLOW_VISIBLE }
}

/// Reflects the menu state into body `overflow`.
///
/// The initial (closed) state is not applied: the loader owns the body's
/// overflow until it hides.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollLock {
    primed: bool,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overflow to apply for `menu_open`, or None for the initial state.
    pub fn apply(&mut self, menu_open: bool) -> Option<&'static str> {
        if !std::mem::replace(&mut self.primed, true) {
            return None;
        }
        Some(menu_overflow(menu_open))
    }
}

// =============================================================================
// NAV STATE
// =============================================================================

/// Reactive navigation state for the page lifetime.
#[derive(Clone)]
pub struct NavState {
    metrics: NavMetrics,
    scrolled: Signal<bool>,
    active: Signal<Option<String>>,
    menu_open: Signal<bool>,
}

impl NavState {
    pub fn new(metrics: NavMetrics) -> Self {
        Self {
            metrics,
            scrolled: signal(false),
            active: signal(None),
            menu_open: signal(false),
        }
    }

    pub fn metrics(&self) -> NavMetrics {
        self.metrics
    }

    /// Handle a scroll event.
    ///
    /// The active section only changes when some section contains the
    /// probe position; otherwise the previous highlight is kept.
    pub fn on_scroll(&self, scroll_y: f64, sections: &[SectionBounds]) {
        self.scrolled
            .set(is_scrolled(scroll_y, self.metrics.scrolled_threshold));

        if let Some(section) = active_section(sections, scroll_y, self.metrics.active_offset) {
            if self.active.get().as_deref() != Some(section.id.as_str()) {
                self.active.set(Some(section.id.clone()));
            }
        }
    }

    /// Flip the mobile menu. Returns the new open state.
    pub fn toggle_menu(&self) -> bool {
        let open = !self.menu_open.get();
        self.menu_open.set(open);
        open
    }

    /// Close the mobile menu (navigation link clicked).
    pub fn close_menu(&self) {
        self.menu_open.set(false);
    }

    /// A navigation link was clicked: close the menu. Returns the body
    /// overflow to apply, which is always scrollable.
    pub fn follow_link(&self) -> &'static str {
        self.close_menu();
        OVERFLOW_VISIBLE
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled.get()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open.get()
    }

    /// Body scrolling is locked exactly while the mobile menu is open.
    pub fn is_scroll_locked(&self) -> bool {
        self.menu_open.get()
    }

    pub fn active_section(&self) -> Option<String> {
        self.active.get()
    }

    /// Whether the link with this `href` should be highlighted.
    pub fn is_link_active(&self, href: &str) -> bool {
        match (self.active.get(), anchor_target(href)) {
            (Some(active), Some(target)) => active == target,
            _ => false,
        }
    }

    /// Where to scroll for an anchor whose target sits at `target_top`.
    pub fn anchor_scroll_top(&self, target_top: f64) -> f64 {
        anchor_scroll_top(target_top, self.metrics.anchor_offset)
    }

    /// Scroll destination for a click on an in-page link.
    ///
    /// `find_top` looks a section id up and returns its offset from the
    /// document top. None when the href names no element: the click then
    /// does nothing beyond suppressing the default jump.
    pub fn anchor_destination<F>(&self, href: &str, find_top: F) -> Option<f64>
    where
        F: FnOnce(&str) -> Option<f64>,
    {
        anchor_target(href)
            .and_then(find_top)
            .map(|top| self.anchor_scroll_top(top))
    }

    pub fn scrolled_signal(&self) -> Signal<bool> {
        self.scrolled.clone()
    }

    pub fn active_signal(&self) -> Signal<Option<String>> {
        self.active.clone()
    }

    pub fn menu_signal(&self) -> Signal<bool> {
        self.menu_open.clone()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<SectionBounds> {
        vec![
            SectionBounds::new("home", 0.0, 300.0),
            SectionBounds::new("about", 300.0, 500.0),
            SectionBounds::new("projects", 800.0, f64::INFINITY),
        ]
    }

    #[test]
    fn test_scroll_threshold() {
        assert!(!is_scrolled(0.0, 50.0));
        assert!(!is_scrolled(50.0, 50.0));
        assert!(is_scrolled(50.5, 50.0));
        assert!(is_scrolled(51.0, 50.0));
    }

    #[test]
    fn test_scrolled_state_follows_scroll() {
        let nav = NavState::new(NavMetrics::default());

        nav.on_scroll(51.0, &sections());
        assert!(nav.is_scrolled());

        nav.on_scroll(50.0, &sections());
        assert!(!nav.is_scrolled());
    }

    #[test]
    fn test_active_section_uses_offset() {
        let nav = NavState::new(NavMetrics::default());

        // 150 + 200 = 350 falls in [300, 800)
        nav.on_scroll(150.0, &sections());
        assert_eq!(nav.active_section().as_deref(), Some("about"));
        assert!(nav.is_link_active("#about"));
        assert!(!nav.is_link_active("#home"));
        assert!(!nav.is_link_active("#projects"));
    }

    #[test]
    fn test_active_section_boundaries() {
        let s = sections();
        assert_eq!(active_section(&s, 0.0, 200.0).map(|s| s.id.as_str()), Some("home"));
        assert_eq!(active_section(&s, 100.0, 200.0).map(|s| s.id.as_str()), Some("about"));
        assert_eq!(active_section(&s, 600.0, 200.0).map(|s| s.id.as_str()), Some("projects"));
        assert_eq!(active_section(&s, 100_000.0, 200.0).map(|s| s.id.as_str()), Some("projects"));
    }

    #[test]
    fn test_first_matching_section_wins() {
        let overlapping = vec![
            SectionBounds::new("a", 0.0, 1000.0),
            SectionBounds::new("b", 100.0, 1000.0),
        ];
        assert_eq!(active_section(&overlapping, 0.0, 200.0).map(|s| s.id.as_str()), Some("a"));
    }

    #[test]
    fn test_gap_keeps_previous_highlight() {
        let nav = NavState::new(NavMetrics::default());
        let gapped = vec![
            SectionBounds::new("home", 0.0, 300.0),
            SectionBounds::new("contact", 1000.0, 300.0),
        ];

        nav.on_scroll(0.0, &gapped);
        assert_eq!(nav.active_section().as_deref(), Some("home"));

        // 400 + 200 = 600 is between sections
        nav.on_scroll(400.0, &gapped);
        assert_eq!(nav.active_section().as_deref(), Some("home"));
    }

    #[test]
    fn test_menu_toggle_and_close() {
        let nav = NavState::new(NavMetrics::default());
        assert!(!nav.is_menu_open());

        assert!(nav.toggle_menu());
        assert!(nav.is_menu_open());
        assert!(nav.is_scroll_locked());

        assert!(!nav.toggle_menu());
        assert!(!nav.is_scroll_locked());

        nav.toggle_menu();
        nav.close_menu();
        assert!(!nav.is_menu_open());

        // Closing an already closed menu is harmless
        nav.close_menu();
        assert!(!nav.is_menu_open());
    }

    #[test]
    fn test_anchor_offset() {
        let nav = NavState::new(NavMetrics::default());
        assert_eq!(nav.anchor_scroll_top(1000.0), 920.0);
        assert_eq!(anchor_scroll_top(40.0, 80.0), -40.0);
    }

    #[test]
    fn test_anchor_destination() {
        let nav = NavState::new(NavMetrics::default());
        let find = |id: &str| (id == "skills").then_some(1200.0);

        assert_eq!(nav.anchor_destination("#skills", find), Some(1120.0));
        assert_eq!(nav.anchor_destination("#missing", find), None);
        assert_eq!(nav.anchor_destination("#", |_| Some(0.0)), None);
    }

    #[test]
    fn test_scroll_lock_skips_initial_state() {
        let mut lock = ScrollLock::new();
        assert_eq!(lock.apply(false), None);
        assert_eq!(lock.apply(true), Some("hidden"));
        assert_eq!(lock.apply(false), Some("visible"));
    }

    #[test]
    fn test_follow_link_closes_menu_and_unlocks() {
        let nav = NavState::new(NavMetrics::default());
        nav.toggle_menu();

        assert_eq!(nav.follow_link(), "visible");
        assert!(!nav.is_menu_open());
        assert!(!nav.is_scroll_locked());

        // Also unlocks when the menu was never open
        assert_eq!(nav.follow_link(), "visible");
    }

    #[test]
    fn test_anchor_target() {
        assert_eq!(anchor_target("#skills"), Some("skills"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("https://example.com"), None);
    }
}
