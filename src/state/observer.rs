//! Intersection-driven triggers.
//!
//! A [`TriggerSet`] models one intersection observer: a visibility
//! threshold, a firing mode and the set of watched targets. The DOM layer
//! feeds it the observer's entries and acts on the targets that fire.
//!
//! The page runs three of them:
//!
//! | Observer   | Threshold | Mode   | Effect                          |
//! |------------|-----------|--------|---------------------------------|
//! | stats      | 0.5       | Once   | start every statistic counter   |
//! | skill bars | 0.5       | Repeat | set bar widths to their level   |
//! | fade-up    | 0.1       | Repeat | add `visible` to the element    |

use crate::config::PageConfig;

// =============================================================================
// TRIGGER SPEC
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    /// Fire on first intersection, then stop observing.
    Once,
    /// Fire on every intersection; effects must be idempotent.
    Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerSpec {
    /// Intersection ratio that counts as visible.
    pub threshold: f64,
    pub mode: TriggerMode,
}

impl TriggerSpec {
    pub fn stats(config: &PageConfig) -> Self {
        Self {
            threshold: config.stats_threshold,
            mode: TriggerMode::Once,
        }
    }

    pub fn skill_bars(config: &PageConfig) -> Self {
        Self {
            threshold: config.skills_threshold,
            mode: TriggerMode::Repeat,
        }
    }

    pub fn fade_up(config: &PageConfig) -> Self {
        Self {
            threshold: config.fade_threshold,
            mode: TriggerMode::Repeat,
        }
    }
}

// =============================================================================
// TRIGGER SET
// =============================================================================

/// Watched targets of one observer.
#[derive(Debug, Clone)]
pub struct TriggerSet<K> {
    spec: TriggerSpec,
    watched: Vec<K>,
}

impl<K: PartialEq + Clone> TriggerSet<K> {
    pub fn new(spec: TriggerSpec) -> Self {
        Self {
            spec,
            watched: Vec::new(),
        }
    }

    pub fn spec(&self) -> TriggerSpec {
        self.spec
    }

    /// Start watching `target`. Watching twice is a no-op.
    pub fn observe(&mut self, target: K) {
        if !self.watched.contains(&target) {
            self.watched.push(target);
        }
    }

    pub fn unobserve(&mut self, target: &K) {
        self.watched.retain(|k| k != target);
    }

    pub fn is_observed(&self, target: &K) -> bool {
        self.watched.contains(target)
    }

    pub fn observed_count(&self) -> usize {
        self.watched.len()
    }

    /// Feed intersection entries as `(target, is_intersecting)`.
    ///
    /// Returns the targets that fire, in entry order. `Once` targets are
    /// unobserved as they fire, so a later entry for them is ignored.
    pub fn on_entries<I>(&mut self, entries: I) -> Vec<K>
    where
        I: IntoIterator<Item = (K, bool)>,
    {
        let mut fired = Vec::new();
        for (target, intersecting) in entries {
            if !intersecting || !self.is_observed(&target) {
                continue;
            }
            if self.spec.mode == TriggerMode::Once {
                self.unobserve(&target);
            }
            fired.push(target);
        }
        fired
    }
}

// =============================================================================
// SKILL LEVEL
// =============================================================================

/// Width every skill bar starts at before it is revealed.
pub const SKILL_BAR_RESET_WIDTH: &str = "0%";

/// Custom property holding a bar's target width.
pub const SKILL_LEVEL_PROPERTY: &str = "--level";

/// A skill bar's target fill, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillLevel(f64);

impl SkillLevel {
    /// Parse a `--level` value such as `"85%"`. The percentage is kept as
    /// written; CSS decides what an out-of-range width looks like.
    pub fn parse(raw: &str) -> Option<Self> {
        let number = raw.trim().strip_suffix('%')?.trim();
        let value: f64 = number.parse().ok()?;
        value.is_finite().then_some(Self(value))
    }

    pub fn percent(&self) -> f64 {
        self.0
    }

    /// CSS width value.
    pub fn to_css(&self) -> String {
        format!("{}%", self.0)
    }
}

// =============================================================================
// SKILL BARS
// =============================================================================

/// A skill bar's inline style.
pub trait SkillBar {
    /// Raw `--level` custom property, if set.
    fn level(&self) -> Option<String>;
    fn set_width(&self, width: &str);
}

/// Collapse every bar before its grid is first seen.
pub fn reset_skill_bars<B: SkillBar>(bars: &[B]) {
    for bar in bars {
        bar.set_width(SKILL_BAR_RESET_WIDTH);
    }
}

/// Fill every bar to its `--level`. Bars without a usable level are left
/// alone. Returns how many bars were filled.
pub fn fill_skill_bars<B: SkillBar>(bars: &[B]) -> usize {
    let mut filled = 0;
    for bar in bars {
        let raw = bar.level().unwrap_or_default();
        match SkillLevel::parse(&raw) {
            Some(level) => {
                bar.set_width(&level.to_css());
                filled += 1;
            }
            None => log::warn!("skill bar skipped, bad {SKILL_LEVEL_PROPERTY} {raw:?}"),
        }
    }
    filled
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Bar {
        level: Option<&'static str>,
        width: RefCell<String>,
    }

    impl Bar {
        fn new(level: Option<&'static str>) -> Self {
            Self {
                level,
                width: RefCell::new("100%".to_string()),
            }
        }

        fn width(&self) -> String {
            self.width.borrow().clone()
        }
    }

    impl SkillBar for Bar {
        fn level(&self) -> Option<String> {
            self.level.map(str::to_string)
        }

        fn set_width(&self, width: &str) {
            *self.width.borrow_mut() = width.to_string();
        }
    }

    #[test]
    fn test_once_fires_at_most_once() {
        let mut stats = TriggerSet::new(TriggerSpec::stats(&PageConfig::default()));
        stats.observe("stats-row");

        assert_eq!(stats.on_entries([("stats-row", false)]), Vec::<&str>::new());
        assert_eq!(stats.on_entries([("stats-row", true)]), vec!["stats-row"]);
        assert!(!stats.is_observed(&"stats-row"));
        assert!(stats.on_entries([("stats-row", true)]).is_empty());
    }

    #[test]
    fn test_once_ignores_duplicate_entries_in_batch() {
        let mut stats = TriggerSet::new(TriggerSpec::stats(&PageConfig::default()));
        stats.observe(1);
        assert_eq!(stats.on_entries([(1, true), (1, true)]), vec![1]);
    }

    #[test]
    fn test_repeat_refires() {
        let mut bars = TriggerSet::new(TriggerSpec::skill_bars(&PageConfig::default()));
        bars.observe("tools-grid");

        assert_eq!(bars.on_entries([("tools-grid", true)]).len(), 1);
        assert_eq!(bars.on_entries([("tools-grid", false)]).len(), 0);
        assert_eq!(bars.on_entries([("tools-grid", true)]).len(), 1);
        assert!(bars.is_observed(&"tools-grid"));
    }

    #[test]
    fn test_fade_up_only_intersecting_targets() {
        let mut fade = TriggerSet::new(TriggerSpec::fade_up(&PageConfig::default()));
        for i in 0..4 {
            fade.observe(i);
        }
        fade.observe(2);
        assert_eq!(fade.observed_count(), 4);

        let fired = fade.on_entries([(0, true), (1, false), (2, true), (9, true)]);
        assert_eq!(fired, vec![0, 2]);
        assert_eq!(fade.observed_count(), 4);
    }

    #[test]
    fn test_thresholds() {
        let config = PageConfig::default();
        assert_eq!(TriggerSpec::stats(&config).threshold, 0.5);
        assert_eq!(TriggerSpec::skill_bars(&config).threshold, 0.5);
        assert_eq!(TriggerSpec::fade_up(&config).threshold, 0.1);
    }

    #[test]
    fn test_skill_level_parse() {
        assert_eq!(SkillLevel::parse("85%").map(|l| l.percent()), Some(85.0));
        assert_eq!(SkillLevel::parse(" 62.5% ").map(|l| l.to_css()), Some("62.5%".to_string()));
        assert_eq!(SkillLevel::parse("140%").map(|l| l.to_css()), Some("140%".to_string()));
        assert!(SkillLevel::parse("85").is_none());
        assert!(SkillLevel::parse("").is_none());
        assert!(SkillLevel::parse("abc%").is_none());
    }

    #[test]
    fn test_skill_level_css_is_stable() {
        let level = SkillLevel::parse("90%").unwrap();
        assert_eq!(level.to_css(), "90%");
        assert_eq!(SkillLevel::parse(&level.to_css()), Some(level));
    }

    #[test]
    fn test_skill_bars_reset_then_fill() {
        let bars = [Bar::new(Some("85%")), Bar::new(Some("62.5%"))];

        reset_skill_bars(&bars);
        assert!(bars.iter().all(|b| b.width() == "0%"));

        assert_eq!(fill_skill_bars(&bars), 2);
        assert_eq!(bars[0].width(), "85%");
        assert_eq!(bars[1].width(), "62.5%");

        // Refiring is idempotent
        assert_eq!(fill_skill_bars(&bars), 2);
        assert_eq!(bars[0].width(), "85%");
    }

    #[test]
    fn test_bad_skill_level_leaves_bar_collapsed() {
        let bars = [Bar::new(Some("90")), Bar::new(None), Bar::new(Some("70%"))];

        reset_skill_bars(&bars);
        assert_eq!(fill_skill_bars(&bars), 1);
        assert_eq!(bars[0].width(), "0%");
        assert_eq!(bars[1].width(), "0%");
        assert_eq!(bars[2].width(), "70%");
    }
}
