//! Falling code-glyph background.
//!
//! [`RainField`] is the column model: one vertical offset (in glyph rows) per
//! column. [`RainBackground`] binds it to a canvas, a resize listener and a
//! [`FrameLoop`].

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, window};

use crate::config::RainConfig;
use crate::error::{FxError, FxResult};
use crate::frame_loop::{FrameLoop, Listener};
use crate::rng::{Entropy, FrameRng};
use crate::surface::{Viewport, context_2d};

/// One glyph to paint this frame, centred on `(x, y)` in CSS px.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphDraw {
    pub glyph: char,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug)]
pub struct RainField {
    cell: f64,
    width: f64,
    height: f64,
    glyphs: Vec<char>,
    base_speed: f64,
    speed_jitter: f64,
    reset_chance: f64,
    offsets: Vec<f64>,
}

impl RainField {
    /// Build a field for `width`×`height` with staggered start rows.
    pub fn new(
        config: &RainConfig,
        width: f64,
        height: f64,
        rng: &mut impl Entropy,
    ) -> FxResult<Self> {
        config.validate()?;
        let mut field = Self {
            cell: config.cell_size,
            width: 0.0,
            height: 0.0,
            glyphs: config.glyphs.clone(),
            base_speed: config.base_speed,
            speed_jitter: config.speed_jitter,
            reset_chance: config.reset_chance,
            offsets: Vec::new(),
        };
        field.resize(width, height, rng);
        Ok(field)
    }

    pub fn columns_for(width: f64, cell: f64) -> usize {
        if width <= 0.0 || cell <= 0.0 {
            return 0;
        }
        (width / cell).floor() as usize
    }

    /// Recompute the column count and re-stagger every column.
    pub fn resize(&mut self, width: f64, height: f64, rng: &mut impl Entropy) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        let columns = Self::columns_for(self.width, self.cell);
        let rows = self.height / self.cell;
        self.offsets.clear();
        self.offsets
            .extend((0..columns).map(|_| rng.next_f64() * rows));
    }

    pub fn columns(&self) -> usize {
        self.offsets.len()
    }

    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Advance one frame. Emits one glyph per column at its pre-advance
    /// position, then moves the column down or (rarely, once off-screen)
    /// back to row 0.
    pub fn step(&mut self, rng: &mut impl Entropy, mut emit: impl FnMut(GlyphDraw)) {
        let half = self.cell / 2.0;
        for (i, offset) in self.offsets.iter_mut().enumerate() {
            let glyph = rng.pick(&self.glyphs).copied().unwrap_or(' ');
            let x = i as f64 * self.cell + half;
            let y = *offset * self.cell + half;
            emit(GlyphDraw { glyph, x, y });

            if y > self.height && rng.next_f64() > 1.0 - self.reset_chance {
                *offset = 0.0;
            } else {
                *offset += self.base_speed + rng.next_f64() * self.speed_jitter;
            }
        }
    }
}

struct RainScene {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    config: RainConfig,
    field: RainField,
    rng: FrameRng,
}

impl RainScene {
    fn setup(&mut self, vp: Viewport) {
        let (bw, bh) = vp.buffer_size();
        self.canvas.set_width(bw);
        self.canvas.set_height(bh);
        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", vp.width)).ok();
        style.set_property("height", &format!("{}px", vp.height)).ok();
        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
        self.ctx.scale(vp.dpr, vp.dpr).ok();
        self.field.resize(vp.width, vp.height, &mut self.rng);
        log::debug!(
            "rain setup {}x{} @{} -> {} columns",
            vp.width,
            vp.height,
            vp.dpr,
            self.field.columns()
        );
    }

    fn draw_frame(&mut self) {
        let (w, h) = self.field.size();
        let Self {
            ctx,
            config,
            field,
            rng,
            ..
        } = self;

        ctx.set_fill_style_str(&format!("rgba(0,0,0,{})", config.trail_alpha));
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.save();
        ctx.set_font(&format!("{}px {}", config.cell_size, config.font_family));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_shadow_color(&config.color);
        ctx.set_shadow_blur(config.glow_blur);
        ctx.set_fill_style_str(&config.color);
        ctx.set_global_alpha(config.glyph_alpha);
        let mut buf = [0u8; 4];
        field.step(rng, |g| {
            ctx.fill_text(g.glyph.encode_utf8(&mut buf), g.x, g.y).ok();
        });
        ctx.restore();
    }
}

/// Mounted code-rain layer. Dropping it (or calling `unmount`) stops the
/// frame loop and removes the resize listener.
#[wasm_bindgen]
pub struct RainBackground {
    scene: Rc<RefCell<RainScene>>,
    frame: FrameLoop,
    _resize: Listener,
}

impl RainBackground {
    /// Start the effect on `canvas`. `Ok(None)` when no 2D context is available.
    pub fn mount(canvas: HtmlCanvasElement, config: RainConfig) -> FxResult<Option<Self>> {
        let win = window().ok_or(FxError::NoWindow)?;
        let Some(ctx) = context_2d(&canvas) else {
            log::warn!("rain: 2d context unavailable, skipping");
            return Ok(None);
        };

        let mut rng = FrameRng::from_entropy();
        let vp = Viewport::of(&win);
        let field = RainField::new(&config, vp.width, vp.height, &mut rng)?;
        let scene = Rc::new(RefCell::new(RainScene {
            canvas,
            ctx,
            config,
            field,
            rng,
        }));
        scene.borrow_mut().setup(vp);

        let resize_scene = scene.clone();
        let resize = Listener::new(&win, "resize", move |_| {
            if let Some(w) = window() {
                resize_scene.borrow_mut().setup(Viewport::of(&w));
            }
        })?;

        let frame_scene = scene.clone();
        let frame = FrameLoop::start(move |_ts| {
            frame_scene.borrow_mut().draw_frame();
        })?;

        log::info!("rain mounted ({} columns)", scene.borrow().field.columns());
        Ok(Some(Self {
            scene,
            frame,
            _resize: resize,
        }))
    }
}

#[wasm_bindgen]
impl RainBackground {
    pub fn columns(&self) -> usize {
        self.scene.borrow().field.columns()
    }

    /// Stop animating and detach listeners.
    pub fn unmount(self) {
        self.frame.cancel();
        log::info!("rain unmounted");
    }
}

/// Mount the code rain on an existing canvas with default settings.
#[wasm_bindgen]
pub fn mount_rain(canvas: HtmlCanvasElement) -> Result<Option<RainBackground>, JsValue> {
    Ok(RainBackground::mount(canvas, RainConfig::default())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::testing::Sequence;

    fn field(width: f64, height: f64, rng: &mut impl Entropy) -> RainField {
        RainField::new(&RainConfig::default(), width, height, rng).unwrap()
    }

    #[test]
    fn column_count_is_floor_of_width_over_cell() {
        let mut rng = Sequence::constant(0.5);
        let f = field(800.0, 600.0, &mut rng);
        assert_eq!(f.columns(), 30);
        assert_eq!(f.offsets().len(), 30);

        for w in [0.0, 25.9, 26.0, 51.0, 52.0, 1920.0, 1366.0] {
            assert_eq!(RainField::columns_for(w, 26.0), (w / 26.0).floor() as usize);
        }
    }

    #[test]
    fn resize_keeps_columns_and_offsets_in_step() {
        let mut rng = FrameRng::seeded(3);
        let mut f = field(800.0, 600.0, &mut rng);
        for (w, h) in [(390.0, 844.0), (1920.0, 1080.0), (10.0, 10.0), (0.0, 0.0)] {
            f.resize(w, h, &mut rng);
            assert_eq!(f.columns(), RainField::columns_for(w, 26.0));
            assert_eq!(f.offsets().len(), f.columns());
        }
    }

    #[test]
    fn initial_offsets_are_staggered_within_screen_rows() {
        let mut rng = Sequence::new(&[0.0, 0.25, 0.5, 0.75]);
        let f = field(104.0, 520.0, &mut rng);
        // 520 / 26 = 20 rows
        assert_eq!(f.offsets(), &[0.0, 5.0, 10.0, 15.0]);
    }

    #[test]
    fn step_emits_one_glyph_per_column_at_cell_centres() {
        let mut rng = Sequence::constant(0.0);
        let mut f = field(78.0, 260.0, &mut rng);
        let mut drawn = Vec::new();
        f.step(&mut rng, |g| drawn.push(g));
        assert_eq!(drawn.len(), 3);
        assert_eq!(drawn[0], GlyphDraw { glyph: '{', x: 13.0, y: 13.0 });
        assert_eq!(drawn[2].x, 65.0);
        // constant 0.0 sample -> base speed only
        assert!(f.offsets().iter().all(|&o| (o - 0.08).abs() < 1e-12));
    }

    #[test]
    fn offsets_grow_until_reset_and_reset_to_zero() {
        let mut rng = FrameRng::seeded(11);
        let mut f = field(520.0, 260.0, &mut rng);
        let mut prev = f.offsets().to_vec();
        let mut resets = 0;
        for _ in 0..5_000 {
            f.step(&mut rng, |_| {});
            for (before, &after) in prev.iter().zip(f.offsets()) {
                assert!(after >= 0.0);
                if after < *before {
                    assert_eq!(after, 0.0);
                    resets += 1;
                }
            }
            prev = f.offsets().to_vec();
        }
        assert!(resets > 0, "columns should loop back eventually");
    }

    #[test]
    fn no_reset_while_on_screen() {
        // Samples > 0.975 would reset an off-screen column; on-screen must ignore them.
        let mut rng = Sequence::constant(0.99);
        let mut f = field(26.0, 2600.0, &mut rng);
        let start = f.offsets()[0];
        f.step(&mut rng, |_| {});
        assert!(f.offsets()[0] > start);
    }

    #[test]
    fn off_screen_column_resets_only_on_lucky_draw() {
        let mut rng = Sequence::constant(0.0);
        let mut f = field(26.0, 26.0, &mut rng);
        f.offsets[0] = 5.0;

        // glyph pick, then reset draw 0.5 -> keeps falling
        let mut rng = Sequence::new(&[0.0, 0.5, 0.0]);
        f.step(&mut rng, |_| {});
        assert!((f.offsets()[0] - 5.08).abs() < 1e-12);

        // glyph pick, then reset draw 0.99 -> back to row 0
        let mut rng = Sequence::new(&[0.0, 0.99]);
        f.step(&mut rng, |_| {});
        assert_eq!(f.offsets()[0], 0.0);
    }

    #[test]
    fn empty_glyph_set_is_rejected() {
        let cfg = RainConfig {
            glyphs: vec![],
            ..RainConfig::default()
        };
        let mut rng = Sequence::constant(0.5);
        let err = RainField::new(&cfg, 800.0, 600.0, &mut rng).unwrap_err();
        assert!(matches!(err, FxError::Config(_)));
    }

    #[test]
    fn non_positive_cell_is_rejected() {
        let cfg = RainConfig {
            cell_size: 0.0,
            ..RainConfig::default()
        };
        let mut rng = FrameRng::seeded(1);
        assert!(RainField::new(&cfg, 800.0, 600.0, &mut rng).is_err());
    }
}
