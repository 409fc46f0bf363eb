//! Canvas and viewport helpers shared by the background layers.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, Window};

use crate::error::{FxError, FxResult};

/// CSS-pixel viewport plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, dpr: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            dpr: if dpr > 0.0 { dpr } else { 1.0 },
        }
    }

    pub fn of(win: &Window) -> Self {
        let width = win
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let height = win
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        Self::new(width, height, win.device_pixel_ratio())
    }

    /// Backing-store size in device pixels.
    pub fn buffer_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpr).round() as u32,
            (self.height * self.dpr).round() as u32,
        )
    }
}

/// 2D context of `canvas`, or `None` when the browser refuses one.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Find a canvas by id, or create one with `style` and append it to `parent`
/// (the body when `None`).
pub fn find_or_create_canvas(
    doc: &Document,
    id: &str,
    style: &str,
    parent: Option<&Element>,
) -> FxResult<HtmlCanvasElement> {
    if let Some(el) = doc.get_element_by_id(id) {
        return el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| FxError::Js(format!("#{id} is not a canvas")));
    }
    let canvas = doc
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| FxError::Js("created element is not a canvas".into()))?;
    canvas.set_id(id);
    canvas.set_attribute("style", style)?;
    canvas.set_attribute("aria-hidden", "true")?;
    match parent {
        Some(el) => {
            el.append_child(&canvas)?;
        }
        None => {
            if let Some(body) = doc.body() {
                body.append_child(&canvas)?;
            }
        }
    }
    Ok(canvas)
}
