//! Owned `requestAnimationFrame` driver and DOM listener guards.
//!
//! Both release their JS resources on drop, so a mounted effect tears down
//! completely when its handle goes away.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, window};

use crate::error::{FxError, FxResult};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Shared flag checked by a running loop before every frame.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// A per-frame callback chain. The tick runs once per animation frame until
/// [`FrameLoop::cancel`] is called or the loop is dropped.
pub struct FrameLoop {
    token: CancelToken,
    handle: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameLoop {
    pub fn start<F>(mut tick: F) -> FxResult<Self>
    where
        F: FnMut(f64) + 'static,
    {
        let win = window().ok_or(FxError::NoWindow)?;
        let token = CancelToken::new();
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

        let f: FrameCallback = Rc::new(RefCell::new(None));
        let g = f.clone();
        let tick_token = token.clone();
        let tick_handle = handle.clone();
        *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            if tick_token.is_cancelled() {
                return;
            }
            tick(ts);
            if tick_token.is_cancelled() {
                return;
            }
            if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
                tick_handle.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
            }
        }) as Box<dyn FnMut(f64)>));

        let first = match g.borrow().as_ref() {
            Some(cb) => win.request_animation_frame(cb.as_ref().unchecked_ref())?,
            None => return Err(FxError::Js("frame callback missing".into())),
        };
        handle.set(Some(first));

        Ok(Self {
            token,
            handle,
            callback: g,
        })
    }

    /// Handle to this loop's cancellation flag.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Stop the loop: flag the token, cancel the pending frame and free the
    /// closure. Idempotent.
    pub fn cancel(&self) {
        if self.token.is_cancelled() && self.callback.borrow().is_none() {
            return;
        }
        self.token.cancel();
        if let (Some(id), Some(w)) = (self.handle.take(), window()) {
            let _ = w.cancel_animation_frame(id);
        }
        // Breaks the closure -> Rc -> closure cycle.
        self.callback.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// An event listener that is removed from its target when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> FxResult<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}
