//! Custom SVG arrow cursor with a normal and an "active" look.
//!
//! Pressing anywhere or hovering an interactive element switches to the active
//! arrow; releasing or leaving switches back.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, window};

use crate::config::CursorConfig;
use crate::error::{FxError, FxResult};
use crate::frame_loop::Listener;

pub const INTERACTIVE_SELECTOR: &str =
    r#"button, a, [role="button"], input, textarea, select, label, [tabindex]:not([tabindex="-1"])"#;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorState {
    #[default]
    Normal,
    Active,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Down,
    Up,
    EnterInteractive,
    LeaveInteractive,
}

impl CursorState {
    pub fn on(self, event: PointerEvent) -> Self {
        match event {
            PointerEvent::Down | PointerEvent::EnterInteractive => CursorState::Active,
            PointerEvent::Up | PointerEvent::LeaveInteractive => CursorState::Normal,
        }
    }
}

/// Arrow polygon SVG for `state` at `size` px.
pub fn cursor_svg(size: u32, state: CursorState) -> String {
    let (from, to, stroke, width) = match state {
        CursorState::Normal => ("#60a5fa", "#3b82f6", "#1e293b", 2),
        CursorState::Active => ("#67e8f9", "#06b6d4", "#06b6d4", 3),
    };
    let s = size as f64;
    let (far, mid) = (s - 4.0, s / 2.0);
    format!(
        concat!(
            r#"<svg width="{s}" height="{s}" viewBox="0 0 {s} {s}" xmlns="http://www.w3.org/2000/svg">"#,
            r#"<defs><linearGradient id="grad" x1="0%" y1="0%" x2="100%" y2="100%">"#,
            r#"<stop offset="0%" stop-color="{from}"/><stop offset="100%" stop-color="{to}"/>"#,
            r#"</linearGradient></defs>"#,
            r#"<polygon points="4,4 {far},{mid} {mid},{mid} {mid},{far} 4,4" fill="url(#grad)" stroke="{stroke}" stroke-width="{width}"/>"#,
            r#"</svg>"#
        ),
        s = size,
        from = from,
        to = to,
        far = far,
        mid = mid,
        stroke = stroke,
        width = width,
    )
}

fn apply(body: &HtmlElement, css: &str) {
    if let Err(err) = body.style().set_property("cursor", css) {
        log::debug!("cursor style rejected: {err:?}");
    }
}

fn cursor_css(size: u32, state: CursorState) -> String {
    let encoded: String = js_sys::encode_uri_component(&cursor_svg(size, state)).into();
    format!("url(\"data:image/svg+xml;utf8,{encoded}\") 0 0, auto")
}

fn interactive_target(event: &Event) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(INTERACTIVE_SELECTOR).ok().flatten())
        .is_some()
}

/// Mounted cursor. Dropping it restores the default cursor and removes the
/// pointer listeners.
pub struct CustomCursor {
    body: HtmlElement,
    state: Rc<Cell<CursorState>>,
    _listeners: Vec<Listener>,
}

impl CustomCursor {
    pub fn mount(config: &CursorConfig) -> FxResult<Self> {
        let win = window().ok_or(FxError::NoWindow)?;
        let doc = win.document().ok_or(FxError::NoDocument)?;
        let body = doc.body().ok_or(FxError::NoDocument)?;
        let size = config.size;
        let state = Rc::new(Cell::new(CursorState::Normal));
        let normal = Rc::new(cursor_css(size, CursorState::Normal));
        let active = Rc::new(cursor_css(size, CursorState::Active));
        apply(&body, &normal);

        let transition = {
            let body = body.clone();
            let state = state.clone();
            move |event: PointerEvent| {
                let next = state.get().on(event);
                if next != state.get() {
                    state.set(next);
                    let css = match next {
                        CursorState::Normal => &normal,
                        CursorState::Active => &active,
                    };
                    apply(&body, css);
                }
            }
        };

        let on_down = transition.clone();
        let on_up = transition.clone();
        let on_over = transition.clone();
        let on_out = transition;
        let listeners = vec![
            Listener::new(&win, "mousedown", move |_| on_down(PointerEvent::Down))?,
            Listener::new(&win, "mouseup", move |_| on_up(PointerEvent::Up))?,
            Listener::new(&doc, "mouseover", move |e| {
                if interactive_target(&e) {
                    on_over(PointerEvent::EnterInteractive);
                }
            })?,
            Listener::new(&doc, "mouseout", move |e| {
                if interactive_target(&e) {
                    on_out(PointerEvent::LeaveInteractive);
                }
            })?,
        ];

        log::debug!("custom cursor mounted ({size}px)");
        Ok(Self {
            body,
            state,
            _listeners: listeners,
        })
    }

    pub fn state(&self) -> CursorState {
        self.state.get()
    }
}

impl Drop for CustomCursor {
    fn drop(&mut self) {
        self.body.style().set_property("cursor", "").ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_events_swap_states() {
        let s = CursorState::default();
        assert_eq!(s, CursorState::Normal);
        let s = s.on(PointerEvent::Down);
        assert_eq!(s, CursorState::Active);
        assert_eq!(s.on(PointerEvent::EnterInteractive), CursorState::Active);
        assert_eq!(s.on(PointerEvent::Up), CursorState::Normal);
        assert_eq!(
            CursorState::Normal.on(PointerEvent::LeaveInteractive),
            CursorState::Normal
        );
    }

    #[test]
    fn svg_scales_arrow_to_size() {
        let svg = cursor_svg(36, CursorState::Normal);
        assert!(svg.starts_with(r#"<svg width="36" height="36" viewBox="0 0 36 36""#));
        assert!(svg.contains(r#"points="4,4 32,18 18,18 18,32 4,4""#));
        assert!(svg.contains("#60a5fa"));
        assert!(svg.contains(r#"stroke-width="2""#));
    }

    #[test]
    fn active_svg_uses_cyan_edge() {
        let svg = cursor_svg(24, CursorState::Active);
        assert!(svg.contains(r##"stroke="#06b6d4""##));
        assert!(svg.contains(r#"stroke-width="3""#));
        assert!(svg.contains("20,12"));
    }
}
