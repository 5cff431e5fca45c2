//! Text Revealer and Typing Effect.
//!
//! - [`TypingEffect`] re-types a block of markup one character per tick.
//! - [`reveal_glyphs`] splits text into per-character glyphs with a linearly
//!   increasing transition delay, for a left-to-right reveal.

use crate::types::AnimationPhase;

/// Default interval between typed characters.
pub const TYPING_INTERVAL_MS: u32 = 30;

/// Default per-character stagger of the text reveal.
pub const REVEAL_STAGGER_MS: u32 = 30;

/// Non-breaking space; a plain space would collapse in an inline-block span.
const NBSP: char = '\u{00A0}';

// =============================================================================
// TYPING EFFECT
// =============================================================================

/// Progressive re-typing of captured markup.
///
/// Prefixes are cut on character boundaries, so multi-byte text never
/// splits mid-character. Markup tags are typed like any other text.
#[derive(Debug, Clone, PartialEq)]
pub struct TypingEffect {
    source: String,
    /// Byte offset after each character.
    ends: Vec<usize>,
    revealed: usize,
    phase: AnimationPhase,
}

impl TypingEffect {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let ends = source
            .char_indices()
            .map(|(i, c)| i + c.len_utf8())
            .collect();
        Self {
            source,
            ends,
            revealed: 0,
            phase: AnimationPhase::Idle,
        }
    }

    /// Begin typing. Returns the initial (empty) content.
    pub fn start(&mut self) -> &str {
        if self.phase == AnimationPhase::Idle {
            self.phase = AnimationPhase::Running;
        }
        self.visible()
    }

    /// Reveal one more character.
    ///
    /// Returns the new visible prefix, or None when there is nothing left to
    /// type; that tick completes the effect.
    pub fn tick(&mut self) -> Option<&str> {
        match self.phase {
            AnimationPhase::Complete => return None,
            AnimationPhase::Idle => self.phase = AnimationPhase::Running,
            AnimationPhase::Running => {}
        }

        if self.revealed < self.ends.len() {
            self.revealed += 1;
            Some(self.visible())
        } else {
            self.phase = AnimationPhase::Complete;
            None
        }
    }

    /// Currently visible prefix.
    pub fn visible(&self) -> &str {
        match self.revealed {
            0 => "",
            n => &self.source[..self.ends[n - 1]],
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// Total number of characters to type.
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }
}

// =============================================================================
// TEXT REVEAL
// =============================================================================

/// One character of a text reveal.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealGlyph {
    /// Rendered text (spaces become non-breaking spaces).
    pub text: String,
    /// Transition delay before this glyph starts moving in.
    pub delay_ms: u32,
}

impl RevealGlyph {
    /// CSS `transition` value for this glyph.
    pub fn transition(&self) -> String {
        format!("all 0.3s ease {}s", self.delay_ms as f64 / 1000.0)
    }
}

/// Split `text` into glyphs staggered by `stagger_ms` each.
pub fn reveal_glyphs(text: &str, stagger_ms: u32) -> Vec<RevealGlyph> {
    text.chars()
        .enumerate()
        .map(|(i, c)| RevealGlyph {
            text: if c == ' ' { NBSP.to_string() } else { c.to_string() },
            delay_ms: i as u32 * stagger_ms,
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn type_all(effect: &mut TypingEffect) -> Vec<String> {
        let mut frames = vec![effect.start().to_string()];
        while let Some(visible) = effect.tick() {
            frames.push(visible.to_string());
        }
        frames
    }

    #[test]
    fn test_types_one_character_per_tick() {
        let mut effect = TypingEffect::new("let x");
        let frames = type_all(&mut effect);

        assert_eq!(frames, vec!["", "l", "le", "let", "let ", "let x"]);
        assert_eq!(effect.phase(), AnimationPhase::Complete);
        assert_eq!(effect.visible(), effect.source());
    }

    #[test]
    fn test_markup_typed_verbatim() {
        let source = "<span class=\"kw\">fn</span>";
        let mut effect = TypingEffect::new(source);
        let frames = type_all(&mut effect);

        assert_eq!(frames.len(), source.len() + 1);
        assert_eq!(frames[1], "<");
        assert_eq!(frames.last().map(String::as_str), Some(source));
    }

    #[test]
    fn test_multibyte_boundaries() {
        let mut effect = TypingEffect::new("é→ü");
        assert_eq!(effect.len(), 3);
        let frames = type_all(&mut effect);
        assert_eq!(frames, vec!["", "é", "é→", "é→ü"]);
    }

    #[test]
    fn test_empty_source_completes() {
        let mut effect = TypingEffect::new("");
        assert!(effect.is_empty());
        assert_eq!(effect.start(), "");
        assert_eq!(effect.tick(), None);
        assert_eq!(effect.phase(), AnimationPhase::Complete);
    }

    #[test]
    fn test_tick_after_complete_is_none() {
        let mut effect = TypingEffect::new("ab");
        type_all(&mut effect);
        assert_eq!(effect.tick(), None);
        assert_eq!(effect.visible(), "ab");
    }

    #[test]
    fn test_reveal_glyph_delays() {
        let glyphs = reveal_glyphs("Hi there", 30);
        assert_eq!(glyphs.len(), 8);
        assert_eq!(glyphs[0].delay_ms, 0);
        assert_eq!(glyphs[1].delay_ms, 30);
        assert_eq!(glyphs[7].delay_ms, 210);
        assert_eq!(glyphs[2].text, "\u{00A0}");
        assert_eq!(glyphs[3].text, "t");
    }

    #[test]
    fn test_reveal_transition_css() {
        let glyphs = reveal_glyphs("abc", 30);
        assert_eq!(glyphs[0].transition(), "all 0.3s ease 0s");
        assert_eq!(glyphs[2].transition(), "all 0.3s ease 0.06s");
    }
}
