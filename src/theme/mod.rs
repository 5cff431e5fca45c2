//! Theme - The site palette.
//!
//! One warm palette shared by the charts and the confetti. Colors are kept
//! as [`Rgba`] and rendered to CSS strings at the edge.
//!
//! # Example
//!
//! ```
//! use spark_folio::theme::Palette;
//!
//! let palette = Palette::sunset();
//! assert_eq!(palette.primary.to_css(), "#ff9500");
//! ```

use crate::types::Rgba;

// =============================================================================
// Palette
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub primary: Rgba,
    pub secondary: Rgba,
    pub tertiary: Rgba,
    pub cyan: Rgba,
    pub pink: Rgba,
    /// Near-black used as the fifth series color.
    pub ink: Rgba,
    /// Tick and legend labels.
    pub text_muted: Rgba,
    pub surface: Rgba,
}

impl Palette {
    /// The site's orange palette.
    pub const fn sunset() -> Self {
        Self {
            primary: Rgba::from_rgb_int(0xff9500),
            secondary: Rgba::from_rgb_int(0xff6b00),
            tertiary: Rgba::from_rgb_int(0xff3b30),
            cyan: Rgba::from_rgb_int(0xffb340),
            pink: Rgba::from_rgb_int(0xff6b00),
            ink: Rgba::from_rgb_int(0x1d1d1f),
            text_muted: Rgba::from_rgb_int(0x6e6e73),
            surface: Rgba::WHITE,
        }
    }

    /// Five series colors, in chart order.
    pub fn series(&self) -> [Rgba; 5] {
        [self.primary, self.secondary, self.tertiary, self.cyan, self.ink]
    }

    /// Gridline color at the given opacity.
    pub fn grid(&self, opacity: f32) -> Rgba {
        Rgba::BLACK.with_opacity(opacity)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::sunset()
    }
}

/// Confetti particle colors.
pub const CONFETTI_COLORS: [Rgba; 5] = [
    Rgba::from_rgb_int(0xff9500),
    Rgba::from_rgb_int(0xff6b00),
    Rgba::from_rgb_int(0xff3b30),
    Rgba::from_rgb_int(0xffb340),
    Rgba::from_rgb_int(0x1d1d1f),
];
