//! Core types for spark-folio.
//!
//! Colors, section geometry and animation phases shared by the behavioral
//! core and the DOM layer.

use std::fmt;

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Using integers for exact comparison - no floating point epsilon needed.
/// Alpha 255 = fully opaque, 0 = fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create from a packed `0xRRGGBB` integer.
    ///
    /// ```
    /// use spark_folio::types::Rgba;
    ///
    /// assert_eq!(Rgba::from_rgb_int(0xff9500), Rgba::rgb(255, 149, 0));
    /// ```
    pub const fn from_rgb_int(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    /// Same color with a new alpha channel.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Same color with alpha given as a 0.0-1.0 fraction.
    pub fn with_opacity(self, opacity: f32) -> Self {
        self.with_alpha((opacity.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// Check if color is fully opaque.
    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// CSS representation: `#rrggbb` when opaque, `rgba(r, g, b, a)` otherwise.
    pub fn to_css(&self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            let alpha = (self.a as f32 / 255.0 * 100.0).round() / 100.0;
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl serde::Serialize for Rgba {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

// =============================================================================
// Section geometry
// =============================================================================

/// Vertical extent of a page section, as measured in the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    /// Section id, matched against `href="#id"` on navigation links.
    pub id: String,
    /// Distance from the document top in CSS pixels.
    pub top: f64,
    /// Section height in CSS pixels.
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// Half-open containment: `[top, top + height)`.
    #[inline]
    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }

    /// The anchor href that links to this section.
    pub fn href(&self) -> String {
        format!("#{}", self.id)
    }
}

// =============================================================================
// Animation phase
// =============================================================================

/// Lifecycle of a timer- or frame-driven animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationPhase {
    #[default]
    Idle,
    Running,
    Complete,
}

impl AnimationPhase {
    #[inline]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

// =============================================================================
// Tests
// =============================================================================
