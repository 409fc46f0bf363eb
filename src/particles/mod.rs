//! Floating game-cell particles (coins, blocks, power-ups) behind the hero.
//!
//! The population is fixed at mount time. Every frame each particle drifts by
//! its velocity and wraps toroidally once it is more than `margin` px past an
//! edge, so positions never grow without bound.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, window};

use crate::config::ParticleConfig;
use crate::error::{FxError, FxResult};
use crate::frame_loop::{FrameLoop, Listener};
use crate::rng::{Entropy, FrameRng};
use crate::surface::{Viewport, context_2d};

mod shapes;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Coin,
    Block,
    Powerup,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Coin, ShapeKind::Block, ShapeKind::Powerup];

    /// Round-robin assignment by particle index.
    pub fn for_index(i: usize) -> Self {
        Self::ALL[i % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Coin => "coin",
            ShapeKind::Block => "block",
            ShapeKind::Powerup => "powerup",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Radius for coins, half-edge for blocks and power-ups.
    pub size: f64,
    pub color: String,
    pub kind: ShapeKind,
}

/// Style slot picked by the page (cycled by hero clicks).
///
/// Only stored and reported; drawing does not consult it yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StyleSelector(u8);

impl StyleSelector {
    pub const SLOTS: u8 = 3;

    pub fn new(slot: u8) -> Self {
        Self(slot % Self::SLOTS)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Advance `0 -> 1 -> 2 -> 0` and return the new slot.
    pub fn cycle(&mut self) -> u8 {
        self.0 = (self.0 + 1) % Self::SLOTS;
        self.0
    }
}

/// Wrap one coordinate across a `[-margin, dim + margin]` band.
pub fn wrap_coord(v: f64, dim: f64, margin: f64) -> f64 {
    if v < -margin {
        dim + margin
    } else if v > dim + margin {
        -margin
    } else {
        v
    }
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    margin: f64,
}

impl ParticleField {
    pub fn new(
        config: &ParticleConfig,
        width: f64,
        height: f64,
        rng: &mut impl Entropy,
    ) -> FxResult<Self> {
        config.validate()?;
        let particles = (0..config.count)
            .map(|i| Particle {
                x: rng.next_f64() * width,
                y: rng.next_f64() * height,
                vx: (rng.next_f64() - 0.5) * config.max_speed,
                vy: (rng.next_f64() - 0.5) * config.max_speed,
                size: rng.next_f64() * config.size_spread + config.min_size,
                color: rng.pick(&config.palette).cloned().unwrap_or_default(),
                kind: ShapeKind::for_index(i),
            })
            .collect();
        Ok(Self {
            particles,
            width,
            height,
            margin: config.margin,
        })
    }

    /// Adopt new bounds; particles keep their positions.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn step(&mut self) {
        let (w, h, m) = (self.width, self.height, self.margin);
        for p in &mut self.particles {
            p.x = wrap_coord(p.x + p.vx, w, m);
            p.y = wrap_coord(p.y + p.vy, h, m);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

struct ParticleScene {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    config: ParticleConfig,
    field: ParticleField,
    style: StyleSelector,
}

impl ParticleScene {
    fn setup(&mut self, vp: Viewport) {
        self.canvas.set_width(vp.width as u32);
        self.canvas.set_height(vp.height as u32);
        self.field.resize(vp.width, vp.height);
        log::debug!("particles resized to {}x{}", vp.width, vp.height);
    }

    fn draw_frame(&mut self) {
        let (w, h) = self.field.size();
        self.ctx.clear_rect(0.0, 0.0, w, h);
        self.field.step();
        for p in self.field.particles() {
            shapes::draw_particle(&self.ctx, p, self.config.glow_blur, self.config.alpha);
        }
    }
}

/// Mounted particle layer. Dropping it stops the loop and removes the resize
/// listener.
#[wasm_bindgen]
pub struct ParticleBackground {
    scene: Rc<RefCell<ParticleScene>>,
    frame: FrameLoop,
    _resize: Listener,
}

impl ParticleBackground {
    /// Start the effect on `canvas`. `Ok(None)` when no 2D context is available.
    pub fn mount(
        canvas: HtmlCanvasElement,
        config: ParticleConfig,
        style: StyleSelector,
    ) -> FxResult<Option<Self>> {
        let win = window().ok_or(FxError::NoWindow)?;
        let Some(ctx) = context_2d(&canvas) else {
            log::warn!("particles: 2d context unavailable, skipping");
            return Ok(None);
        };

        let vp = Viewport::of(&win);
        let mut rng = FrameRng::from_entropy();
        let field = ParticleField::new(&config, vp.width, vp.height, &mut rng)?;
        let scene = Rc::new(RefCell::new(ParticleScene {
            canvas,
            ctx,
            config,
            field,
            style,
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

        log::info!("particles mounted ({})", scene.borrow().field.len());
        Ok(Some(Self {
            scene,
            frame,
            _resize: resize,
        }))
    }
}

#[wasm_bindgen]
impl ParticleBackground {
    pub fn particle_count(&self) -> usize {
        self.scene.borrow().field.len()
    }

    pub fn style(&self) -> u8 {
        self.scene.borrow().style.get()
    }

    pub fn set_style(&self, slot: u8) {
        self.scene.borrow_mut().style = StyleSelector::new(slot);
    }

    /// Advance the style slot; returns the new slot.
    pub fn cycle_style(&self) -> u8 {
        let slot = self.scene.borrow_mut().style.cycle();
        log::debug!("particle style -> {slot}");
        slot
    }

    pub fn unmount(self) {
        self.frame.cancel();
        log::info!("particles unmounted");
    }
}

/// Mount the particle layer on an existing canvas with default settings.
#[wasm_bindgen]
pub fn mount_particles(canvas: HtmlCanvasElement) -> Result<Option<ParticleBackground>, JsValue> {
    Ok(ParticleBackground::mount(
        canvas,
        ParticleConfig::default(),
        StyleSelector::default(),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::testing::Sequence;

    fn field(rng: &mut impl Entropy) -> ParticleField {
        ParticleField::new(&ParticleConfig::default(), 800.0, 600.0, rng).unwrap()
    }

    #[test]
    fn wraps_past_left_edge_to_far_right() {
        assert_eq!(wrap_coord(-35.0, 800.0, 30.0), 830.0);
        assert_eq!(wrap_coord(831.0, 800.0, 30.0), -30.0);
        assert_eq!(wrap_coord(-30.0, 800.0, 30.0), -30.0);
        assert_eq!(wrap_coord(830.0, 800.0, 30.0), 830.0);
        assert_eq!(wrap_coord(400.0, 800.0, 30.0), 400.0);
    }

    #[test]
    fn step_wraps_particle_scenario() {
        let mut rng = Sequence::constant(0.5);
        let mut f = field(&mut rng);
        f.particles[0].x = -34.5;
        f.particles[0].vx = -0.5;
        f.particles[0].y = 100.0;
        f.particles[0].vy = 0.0;
        f.step();
        assert_eq!(f.particles()[0].x, 830.0);
        assert_eq!(f.particles()[0].y, 100.0);
    }

    #[test]
    fn population_is_fixed_and_round_robin() {
        let mut rng = FrameRng::seeded(9);
        let mut f = field(&mut rng);
        assert_eq!(f.len(), 50);
        for (i, p) in f.particles().iter().enumerate() {
            assert_eq!(p.kind, ShapeKind::for_index(i));
            assert!((10.0..22.0).contains(&p.size));
            assert!(p.vx.abs() <= 0.5 && p.vy.abs() <= 0.5);
            assert!(crate::PARTICLE_PALETTE.contains(&p.color.as_str()));
        }
        for _ in 0..10_000 {
            f.step();
        }
        assert_eq!(f.len(), 50);
    }

    #[test]
    fn positions_stay_inside_margin_band() {
        let mut rng = FrameRng::seeded(21);
        let cfg = ParticleConfig {
            max_speed: 40.0,
            ..ParticleConfig::default()
        };
        let mut f = ParticleField::new(&cfg, 320.0, 240.0, &mut rng).unwrap();
        for _ in 0..2_000 {
            f.step();
            for p in f.particles() {
                assert!((-30.0..=350.0).contains(&p.x), "x={}", p.x);
                assert!((-30.0..=270.0).contains(&p.y), "y={}", p.y);
            }
        }
    }

    #[test]
    fn empty_palette_is_rejected() {
        let cfg = ParticleConfig {
            palette: vec![],
            ..ParticleConfig::default()
        };
        let mut rng = Sequence::constant(0.5);
        let err = ParticleField::new(&cfg, 800.0, 600.0, &mut rng).unwrap_err();
        assert!(matches!(err, FxError::Config(_)));
    }

    #[test]
    fn zero_count_is_rejected() {
        let cfg = ParticleConfig {
            count: 0,
            ..ParticleConfig::default()
        };
        let mut rng = FrameRng::seeded(4);
        assert!(ParticleField::new(&cfg, 800.0, 600.0, &mut rng).is_err());
    }

    #[test]
    fn resize_keeps_positions() {
        let mut rng = FrameRng::seeded(5);
        let mut f = field(&mut rng);
        let before: Vec<(f64, f64)> = f.particles().iter().map(|p| (p.x, p.y)).collect();
        f.resize(1024.0, 768.0);
        let after: Vec<(f64, f64)> = f.particles().iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(before, after);
        assert_eq!(f.size(), (1024.0, 768.0));
    }

    #[test]
    fn style_selector_cycles_through_three_slots() {
        let mut s = StyleSelector::default();
        assert_eq!(s.get(), 0);
        assert_eq!(s.cycle(), 1);
        assert_eq!(s.cycle(), 2);
        assert_eq!(s.cycle(), 0);
        assert_eq!(StyleSelector::new(7).get(), 1);
    }

    #[test]
    fn shape_names() {
        let names: Vec<&str> = ShapeKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names, ["coin", "block", "powerup"]);
    }
}
