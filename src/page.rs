//! Page-level wiring: mounts every effect onto the portfolio markup and owns
//! the overlay state behind a single `Portfolio` handle.
//!
//! Element ids the page is expected to provide (all optional):
//! - `home`: hero section; hosts the particle canvas and cycles its style on click
//! - `fx-typed`: hero tagline target for the typewriter
//! - `all-projects-scroll`: scroll container of the "view all projects" list
//!
//! Canvases `fx-rain-canvas` and `fx-particle-canvas` are reused when present
//! and created otherwise.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlVideoElement, KeyboardEvent, ScrollBehavior, ScrollToOptions, window};

use crate::config::FxConfig;
use crate::cursor::CustomCursor;
use crate::error::{FxError, FxResult};
use crate::frame_loop::Listener;
use crate::overlay::{Key, KeyAction, Overlays};
use crate::particles::{ParticleBackground, StyleSelector};
use crate::rain::RainBackground;
use crate::surface::find_or_create_canvas;
use crate::typewriter::TypewriterText;

pub const RAIN_CANVAS_ID: &str = "fx-rain-canvas";
pub const PARTICLE_CANVAS_ID: &str = "fx-particle-canvas";
pub const HERO_ID: &str = "home";
pub const TYPED_ID: &str = "fx-typed";
pub const PROJECT_LIST_ID: &str = "all-projects-scroll";
pub const POPUP_VIDEO_SELECTOR: &str = ".project-popup-video";

const RAIN_STYLE: &str =
    "position:fixed; inset:0; width:100vw; height:100vh; display:block; z-index:-1; pointer-events:none;";
const PARTICLE_STYLE: &str =
    "position:absolute; inset:0; z-index:0; pointer-events:none; background:transparent;";

/// Everything mounted on the page. Dropping it (or `unmount`) tears every
/// effect and listener down.
#[wasm_bindgen]
pub struct Portfolio {
    overlays: Rc<RefCell<Overlays>>,
    particles: Option<Rc<ParticleBackground>>,
    _rain: Option<RainBackground>,
    _cursor: Option<CustomCursor>,
    _typewriter: Option<TypewriterText>,
    _listeners: Vec<Listener>,
}

impl Portfolio {
    pub fn mount(config: FxConfig) -> FxResult<Self> {
        config.validate()?;
        let win = window().ok_or(FxError::NoWindow)?;
        let doc = win.document().ok_or(FxError::NoDocument)?;
        let hero = doc.get_element_by_id(HERO_ID);

        let rain_canvas = find_or_create_canvas(&doc, RAIN_CANVAS_ID, RAIN_STYLE, None)?;
        let rain = RainBackground::mount(rain_canvas, config.rain.clone())?;

        let particle_canvas =
            find_or_create_canvas(&doc, PARTICLE_CANVAS_ID, PARTICLE_STYLE, hero.as_ref())?;
        let particles =
            ParticleBackground::mount(particle_canvas, config.particles.clone(), StyleSelector::default())?
                .map(Rc::new);

        let cursor = if config.cursor.enabled {
            Some(CustomCursor::mount(&config.cursor)?)
        } else {
            None
        };

        let typewriter = match doc.get_element_by_id(TYPED_ID) {
            Some(el) => Some(TypewriterText::mount(el, &config.typewriter)?),
            None => None,
        };

        let overlays = Rc::new(RefCell::new(Overlays::new(crate::SHOWCASE_IMAGES.len())));
        let mut listeners = Vec::new();

        let key_overlays = overlays.clone();
        let key_doc = doc.clone();
        listeners.push(Listener::new(&win, "keydown", move |e| {
            let Some(ev) = e.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let key = Key::from_dom(&ev.key(), &ev.code());
            let action = key_overlays.borrow_mut().handle_key(key);
            if action.prevents_default() {
                ev.prevent_default();
            }
            if action.handled() {
                log::debug!("overlay key {key:?} -> {action:?}");
                perform(&key_doc, action);
            }
        })?);

        if let (Some(hero), Some(p)) = (hero.as_ref(), particles.as_ref()) {
            let p = p.clone();
            listeners.push(Listener::new(hero, "click", move |_| {
                p.cycle_style();
            })?);
        }

        log::info!(
            "portfolio mounted (rain: {}, particles: {}, cursor: {}, typewriter: {})",
            rain.is_some(),
            particles.is_some(),
            cursor.is_some(),
            typewriter.is_some()
        );
        Ok(Self {
            overlays,
            particles,
            _rain: rain,
            _cursor: cursor,
            _typewriter: typewriter,
            _listeners: listeners,
        })
    }
}

/// DOM side effects of a routed key. State changes already happened.
fn perform(doc: &Document, action: KeyAction) {
    match action {
        KeyAction::ToggleVideo => {
            let video = doc
                .query_selector(POPUP_VIDEO_SELECTOR)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlVideoElement>().ok());
            if let Some(video) = video {
                if video.paused() {
                    if let Err(err) = video.play() {
                        log::warn!("video play failed: {err:?}");
                    }
                } else if let Err(err) = video.pause() {
                    log::warn!("video pause failed: {err:?}");
                }
            }
        }
        KeyAction::ScrollList(dy) => {
            if let Some(list) = doc.get_element_by_id(PROJECT_LIST_ID) {
                list.scroll_by_with_scroll_to_options(&list_scroll_options(dy));
            }
        }
        _ => {}
    }
}

/// Smooth vertical scroll step for the project list.
pub fn list_scroll_options(dy: f64) -> ScrollToOptions {
    let opts = ScrollToOptions::new();
    opts.set_top(dy);
    opts.set_behavior(ScrollBehavior::Smooth);
    opts
}

#[wasm_bindgen]
impl Portfolio {
    pub fn open_gallery(&self) {
        self.overlays.borrow_mut().showcase.open_gallery();
    }

    pub fn close_gallery(&self) {
        self.overlays.borrow_mut().showcase.close_gallery();
    }

    pub fn is_gallery_open(&self) -> bool {
        self.overlays.borrow().showcase.is_gallery_open()
    }

    /// Open the lightbox on showcase image `index`; false when out of range.
    pub fn open_image(&self, index: usize) -> bool {
        self.overlays.borrow_mut().showcase.open_image(index)
    }

    pub fn close_image(&self) {
        self.overlays.borrow_mut().showcase.close_image();
    }

    pub fn current_image(&self) -> Option<usize> {
        self.overlays.borrow().showcase.lightbox().current()
    }

    pub fn next_image(&self) -> Option<usize> {
        self.overlays.borrow_mut().showcase.next_image()
    }

    pub fn prev_image(&self) -> Option<usize> {
        self.overlays.borrow_mut().showcase.prev_image()
    }

    pub fn open_project(&self, index: usize, has_video: bool) {
        self.overlays.borrow_mut().projects.open_popup(index, has_video);
    }

    pub fn close_project(&self) {
        self.overlays.borrow_mut().projects.close_popup();
    }

    pub fn open_project_list(&self) {
        self.overlays.borrow_mut().projects.open_list();
    }

    pub fn close_project_list(&self) {
        self.overlays.borrow_mut().projects.close_list();
    }

    pub fn current_project(&self) -> Option<usize> {
        self.overlays.borrow().projects.popup().map(|p| p.index)
    }

    pub fn is_project_list_open(&self) -> bool {
        self.overlays.borrow().projects.is_list_open()
    }

    /// Current particle style slot; `None` when the particle layer is not mounted.
    pub fn particle_style(&self) -> Option<u8> {
        self.particles.as_ref().map(|p| p.style())
    }

    pub fn cycle_particle_style(&self) -> Option<u8> {
        self.particles.as_ref().map(|p| p.cycle_style())
    }

    pub fn unmount(self) {
        log::info!("portfolio unmounted");
    }
}
