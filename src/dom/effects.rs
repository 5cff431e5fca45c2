//! Page effects that create or restyle DOM nodes.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlElement};

use super::bindings::{tween_from, Tween};
use super::set_style;
use crate::error::{PageError, Result};
use crate::pipeline::SharedScheduler;
use crate::state::confetti::{Particle, ParticleSink};
use crate::state::typing::reveal_glyphs;

/// Keyframes used by the confetti particles and the rainbow body animation.
pub const KEYFRAMES_CSS: &str = "
@keyframes confettiFall {
    to {
        transform: translateY(100vh) rotate(720deg);
        opacity: 0;
    }
}
@keyframes rainbow {
    0% { filter: hue-rotate(0deg); }
    100% { filter: hue-rotate(360deg); }
}
";

/// Append the keyframes stylesheet to `<head>`.
pub fn inject_keyframes(document: &Document) -> Result<()> {
    let head = document
        .head()
        .ok_or_else(|| PageError::MissingElement("head".into()))?;
    let style = document.create_element("style").map_err(PageError::js)?;
    style.set_text_content(Some(KEYFRAMES_CSS));
    head.append_child(&style).map_err(PageError::js)?;
    Ok(())
}

/// Body `animation` value for the rainbow hue sweep.
pub fn rainbow_animation(duration_ms: u32) -> String {
    format!("rainbow {}s linear", duration_ms as f64 / 1000.0)
}

// =============================================================================
// CONFETTI
// =============================================================================

/// Shows particles as fixed-position divs appended to `<body>`.
pub struct BodySink {
    document: Document,
    body: HtmlElement,
}

impl BodySink {
    pub fn new(document: Document, body: HtmlElement) -> Self {
        Self { document, body }
    }
}

impl ParticleSink for BodySink {
    type Handle = Option<Element>;

    fn attach(&self, particle: &Particle) -> Option<Element> {
        let div = self.document.create_element("div").ok()?;
        div.set_attribute("style", &particle.css_text()).ok()?;
        self.body.append_child(&div).ok()?;
        Some(div)
    }

    fn detach(&self, handle: Option<Element>) {
        if let Some(div) = handle {
            div.remove();
        }
    }
}

// =============================================================================
// TEXT REVEAL
// =============================================================================

/// Replace `element`'s text with staggered glyph spans and start the reveal
/// after `kickoff_ms`.
pub fn reveal_text(
    document: &Document,
    element: &Element,
    scheduler: &SharedScheduler,
    stagger_ms: u32,
    kickoff_ms: u32,
) -> Result<()> {
    let text = element.text_content().unwrap_or_default();
    element.set_inner_html("");

    for glyph in reveal_glyphs(&text, stagger_ms) {
        let span = document.create_element("span").map_err(PageError::js)?;
        span.set_text_content(Some(&glyph.text));
        set_style(&span, "display", "inline-block");
        set_style(&span, "opacity", "0");
        set_style(&span, "transform", "translateY(20px)");
        set_style(&span, "transition", &glyph.transition());
        element.append_child(&span).map_err(PageError::js)?;

        scheduler.set_timeout(
            kickoff_ms,
            Box::new(move || {
                set_style(&span, "opacity", "1");
                set_style(&span, "transform", "translateY(0)");
            }),
        );
    }
    Ok(())
}

// =============================================================================
// HERO + GREETING
// =============================================================================

const HERO_TWEENS: [(&str, f64, f64); 3] = [
    (".hero-subtitle", 20.0, 0.2),
    (".hero-title .title-line", 30.0, 0.4),
    (".hero-title .title-highlight", 30.0, 0.5),
];

/// Fade the hero copy in. A failing tween is logged and the rest still run.
///
/// Returns how many tweens started.
pub fn hero_intro() -> usize {
    play_tweens(&HERO_TWEENS, |selector, tween| tween_from(selector, tween))
}

fn play_tweens<F>(tweens: &[(&str, f64, f64)], mut play: F) -> usize
where
    F: FnMut(&str, &Tween) -> Result<()>,
{
    let mut started = 0;
    for &(selector, y, delay) in tweens {
        match play(selector, &Tween::rise(y, delay)) {
            Ok(()) => started += 1,
            Err(err) => log::warn!("hero tween {selector} skipped: {err}"),
        }
    }
    started
}

/// Say hello in the devtools console.
pub fn greet() {
    web_sys::console::log_2(
        &JsValue::from_str("%c👋 Hey there, curious developer!"),
        &JsValue::from_str("font-size: 20px; font-weight: bold; color: #6366f1;"),
    );
    web_sys::console::log_2(
        &JsValue::from_str("%c🚀 Want to connect? Check out my GitHub!"),
        &JsValue::from_str("font-size: 14px; color: #a0a0b0;"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rainbow_animation() {
        assert_eq!(rainbow_animation(2000), "rainbow 2s linear");
        assert_eq!(rainbow_animation(1500), "rainbow 1.5s linear");
    }

    #[test]
    fn test_failed_tween_does_not_stop_the_rest() {
        let mut played = Vec::new();
        let started = play_tweens(&HERO_TWEENS, |selector, tween| {
            if selector == ".hero-subtitle" {
                return Err(PageError::Js("gsap is not defined".into()));
            }
            played.push((selector.to_string(), tween.y, tween.delay));
            Ok(())
        });
        assert_eq!(started, 2);
        assert_eq!(
            played,
            vec![
                (".hero-title .title-line".to_string(), 30.0, 0.4),
                (".hero-title .title-highlight".to_string(), 30.0, 0.5),
            ]
        );
    }

    #[test]
    fn test_keyframes_define_both_animations() {
        assert!(KEYFRAMES_CSS.contains("@keyframes confettiFall"));
        assert!(KEYFRAMES_CSS.contains("rotate(720deg)"));
        assert!(KEYFRAMES_CSS.contains("@keyframes rainbow"));
        assert!(KEYFRAMES_CSS.contains("hue-rotate(360deg)"));
    }
}
