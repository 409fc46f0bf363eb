//! Looping type-on text for the hero tagline.

use std::cell::Cell;

use web_sys::Element;

use crate::config::TypewriterConfig;
use crate::error::FxResult;
use crate::frame_loop::FrameLoop;

/// Pure timeline: one more character every `interval_ms`, one idle tick once
/// the text is complete, then `pause_ms` showing the full text before the
/// cycle restarts from empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Typewriter {
    text: String,
    chars: usize,
    interval_ms: f64,
    pause_ms: f64,
}

impl Typewriter {
    pub fn new(config: &TypewriterConfig) -> Self {
        Self {
            text: config.text.clone(),
            chars: config.text.chars().count(),
            interval_ms: config.char_interval_ms,
            pause_ms: config.restart_pause_ms.max(0.0),
        }
    }

    fn typing_ms(&self) -> f64 {
        self.interval_ms * (self.chars + 1) as f64
    }

    pub fn cycle_ms(&self) -> f64 {
        self.typing_ms() + self.pause_ms
    }

    /// Characters visible `elapsed_ms` after the first cycle began.
    pub fn visible_chars(&self, elapsed_ms: f64) -> usize {
        if elapsed_ms <= 0.0 || self.interval_ms <= 0.0 {
            return 0;
        }
        let t = elapsed_ms % self.cycle_ms();
        if t >= self.typing_ms() {
            return self.chars;
        }
        ((t / self.interval_ms).floor() as usize).min(self.chars)
    }

    pub fn visible(&self, elapsed_ms: f64) -> &str {
        let n = self.visible_chars(elapsed_ms);
        match self.text.char_indices().nth(n) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }
}

/// Typewriter bound to an element's text content. Typing stops on drop.
pub struct TypewriterText {
    _frame: FrameLoop,
}

impl TypewriterText {
    pub fn mount(el: Element, config: &TypewriterConfig) -> FxResult<Self> {
        let tw = Typewriter::new(config);
        let start: Cell<Option<f64>> = Cell::new(None);
        let shown = Cell::new(usize::MAX);
        el.set_text_content(Some(""));
        let frame = FrameLoop::start(move |ts| {
            let t0 = match start.get() {
                Some(t0) => t0,
                None => {
                    start.set(Some(ts));
                    ts
                }
            };
            let n = tw.visible_chars(ts - t0);
            if n != shown.get() {
                shown.set(n);
                el.set_text_content(Some(tw.visible(ts - t0)));
            }
        })?;
        Ok(Self { _frame: frame })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tw(text: &str) -> Typewriter {
        Typewriter::new(&TypewriterConfig {
            text: text.into(),
            char_interval_ms: 150.0,
            restart_pause_ms: 5000.0,
        })
    }

    #[test]
    fn types_one_char_per_interval() {
        let t = tw("Design & Development");
        assert_eq!(t.visible(0.0), "");
        assert_eq!(t.visible(149.0), "");
        assert_eq!(t.visible(150.0), "D");
        assert_eq!(t.visible(6.0 * 150.0), "Design");
        assert_eq!(t.visible(20.0 * 150.0), "Design & Development");
    }

    #[test]
    fn holds_full_text_then_restarts_empty() {
        let t = tw("abc");
        // typing lasts 4 ticks (3 chars + idle), then 5s pause
        assert_eq!(t.cycle_ms(), 600.0 + 5000.0);
        assert_eq!(t.visible(599.0), "abc");
        assert_eq!(t.visible(3000.0), "abc");
        assert_eq!(t.visible(5600.0), "");
        assert_eq!(t.visible(5750.0), "a");
    }

    #[test]
    fn slices_on_char_boundaries() {
        let t = tw("汉字!");
        assert_eq!(t.visible(150.0), "汉");
        assert_eq!(t.visible(300.0), "汉字");
        assert_eq!(t.visible(450.0), "汉字!");
    }

    #[test]
    fn empty_text_is_always_empty() {
        let t = tw("");
        for ms in [0.0, 150.0, 4000.0, 9000.0] {
            assert_eq!(t.visible(ms), "");
        }
    }
}
