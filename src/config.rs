//! Page configuration.
//!
//! Every timing and threshold the page uses, with defaults matching the
//! shipped site. The markup may override any subset through a JSON
//! `data-folio-config` attribute on `<body>`:
//!
//! ```
//! use spark_folio::config::PageConfig;
//!
//! let config = PageConfig::from_json(r#"{ "loader_delay_ms": 1000 }"#).unwrap();
//! assert_eq!(config.loader_delay_ms, 1000);
//! assert_eq!(config.anchor_offset_px, 80.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{PageError, Result};

/// Attribute on `<body>` holding a JSON config override.
pub const CONFIG_ATTRIBUTE: &str = "data-folio-config";

// =============================================================================
// PageConfig
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Delay between `load` and hiding the loader.
    pub loader_delay_ms: u32,
    /// Delay between the loader hide and the start of the typing effect.
    pub typing_delay_ms: u32,
    /// One character is typed per interval.
    pub typing_interval_ms: u32,
    /// Total counter animation time.
    pub counter_duration_ms: u32,
    /// Nominal animation frame length.
    pub frame_ms: u32,
    /// Navbar gets `scrolled` strictly above this scroll offset.
    pub scrolled_threshold_px: f64,
    /// Added to `scrollY` before testing section bounds.
    pub active_offset_px: f64,
    /// Subtracted from the anchor target's top when smooth scrolling.
    pub anchor_offset_px: f64,
    pub reveal_stagger_ms: u32,
    pub reveal_kickoff_ms: u32,
    pub confetti_count: usize,
    pub confetti_lifetime_ms: u32,
    pub rainbow_ms: u32,
    pub stats_threshold: f64,
    pub skills_threshold: f64,
    pub fade_threshold: f64,
    pub aos: AosOptions,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            loader_delay_ms: 2500,
            typing_delay_ms: 100,
            typing_interval_ms: 30,
            counter_duration_ms: 2000,
            frame_ms: 16,
            scrolled_threshold_px: 50.0,
            active_offset_px: 200.0,
            anchor_offset_px: 80.0,
            reveal_stagger_ms: 30,
            reveal_kickoff_ms: 100,
            confetti_count: 100,
            confetti_lifetime_ms: 5000,
            rainbow_ms: 2000,
            stats_threshold: 0.5,
            skills_threshold: 0.5,
            fade_threshold: 0.1,
            aos: AosOptions::default(),
        }
    }
}

impl PageConfig {
    /// Parse a (possibly partial) JSON override. Missing keys keep defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PageError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall or spin an animation loop.
    pub fn validate(&self) -> Result<()> {
        if self.frame_ms == 0 {
            return Err(PageError::Config("frame_ms must be positive".into()));
        }
        if self.typing_interval_ms == 0 {
            return Err(PageError::Config("typing_interval_ms must be positive".into()));
        }
        for (name, value) in [
            ("stats_threshold", self.stats_threshold),
            ("skills_threshold", self.skills_threshold),
            ("fade_threshold", self.fade_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PageError::Config(format!("{name} must be within 0..=1")));
            }
        }
        Ok(())
    }

    /// Resolve an optional attribute value, falling back to defaults on error.
    pub fn from_attribute(raw: Option<&str>) -> Self {
        match raw {
            None => Self::default(),
            Some(json) => Self::from_json(json).unwrap_or_else(|err| {
                log::warn!("{err}; using default page config");
                Self::default()
            }),
        }
    }
}

// =============================================================================
// AosOptions
// =============================================================================

/// Options handed to the scroll-animation library's `init`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AosOptions {
    pub duration: u32,
    pub easing: String,
    pub once: bool,
    pub offset: u32,
    pub disable: String,
}

impl Default for AosOptions {
    fn default() -> Self {
        Self {
            duration: 500,
            easing: "ease-out".to_string(),
            once: true,
            offset: 50,
            disable: "mobile".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_site() {
        let config = PageConfig::default();
        assert_eq!(config.loader_delay_ms, 2500);
        assert_eq!(config.counter_duration_ms / config.frame_ms, 125);
        assert_eq!(config.confetti_count, 100);
        assert_eq!(config.aos.easing, "ease-out");
    }

    #[test]
    fn test_partial_override() {
        let config = PageConfig::from_json(r#"{"confetti_count": 10, "aos": {"once": false}}"#)
            .unwrap();
        assert_eq!(config.confetti_count, 10);
        assert!(!config.aos.once);
        assert_eq!(config.aos.duration, 500);
        assert_eq!(config.rainbow_ms, 2000);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = PageConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, PageError::Config(_)));
    }

    #[test]
    fn test_zero_frame_rejected() {
        let err = PageConfig::from_json(r#"{"frame_ms": 0}"#).unwrap_err();
        assert!(matches!(err, PageError::Config(_)));
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        assert!(PageConfig::from_json(r#"{"fade_threshold": 1.5}"#).is_err());
    }

    #[test]
    fn test_from_attribute_falls_back() {
        assert_eq!(PageConfig::from_attribute(None), PageConfig::default());
        assert_eq!(PageConfig::from_attribute(Some("[]")), PageConfig::default());
    }

    #[test]
    fn test_aos_serializes_for_library() {
        let value = serde_json::to_value(AosOptions::default()).unwrap();
        assert_eq!(value["duration"], 500);
        assert_eq!(value["disable"], "mobile");
        assert_eq!(value["once"], true);
    }
}
