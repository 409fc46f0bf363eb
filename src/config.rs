//! Tunables for every effect. Defaults reproduce the shipped look.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{FxError, FxResult};

/// Code-rain layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RainConfig {
    /// Glyph cell edge in CSS px; also the font size.
    pub cell_size: f64,
    pub glyphs: Vec<char>,
    pub font_family: String,
    pub color: String,
    pub glow_blur: f64,
    pub glyph_alpha: f64,
    /// Alpha of the black wash painted each frame (trail length).
    pub trail_alpha: f64,
    /// Minimum rows advanced per frame.
    pub base_speed: f64,
    /// Extra random rows per frame, drawn fresh each frame.
    pub speed_jitter: f64,
    /// Per-frame chance a column that left the screen restarts at the top.
    pub reset_chance: f64,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            cell_size: 26.0,
            glyphs: crate::CODE_GLYPHS.to_vec(),
            font_family: "'Fira Mono', 'Consolas', monospace".into(),
            color: "hsl(200,100%,70%)".into(),
            glow_blur: 16.0,
            glyph_alpha: 0.2,
            trail_alpha: 0.18,
            base_speed: 0.08,
            speed_jitter: 0.08,
            reset_chance: 0.025,
        }
    }
}

/// Floating game-cell layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParticleConfig {
    pub count: usize,
    /// Overscan past each edge before a particle wraps.
    pub margin: f64,
    /// Velocity components are drawn from `[-max_speed/2, max_speed/2)`.
    pub max_speed: f64,
    pub min_size: f64,
    pub size_spread: f64,
    pub palette: Vec<String>,
    pub glow_blur: f64,
    pub alpha: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 50,
            margin: 30.0,
            max_speed: 1.0,
            min_size: 10.0,
            size_spread: 12.0,
            palette: crate::PARTICLE_PALETTE.iter().map(|c| c.to_string()).collect(),
            glow_blur: 18.0,
            alpha: 0.9,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CursorConfig {
    pub enabled: bool,
    /// Edge of the square SVG cursor in px.
    pub size: u32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            size: 36,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TypewriterConfig {
    pub text: String,
    pub char_interval_ms: f64,
    pub restart_pause_ms: f64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            text: "Design & Development".into(),
            char_interval_ms: 150.0,
            restart_pause_ms: 5000.0,
        }
    }
}

/// Root configuration handed to [`crate::start_portfolio`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FxConfig {
    pub rain: RainConfig,
    pub particles: ParticleConfig,
    pub cursor: CursorConfig,
    pub typewriter: TypewriterConfig,
    pub log_level: String,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            rain: RainConfig::default(),
            particles: ParticleConfig::default(),
            cursor: CursorConfig::default(),
            typewriter: TypewriterConfig::default(),
            log_level: "info".into(),
        }
    }
}

impl FxConfig {
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> FxResult<Self> {
        let cfg: FxConfig =
            serde_json::from_str(json).map_err(|e| FxError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> FxResult<()> {
        self.rain.validate()?;
        self.particles.validate()?;
        self.typewriter.validate()
    }
}

impl RainConfig {
    pub fn validate(&self) -> FxResult<()> {
        if !(self.cell_size > 0.0) {
            return Err(FxError::Config("rain.cell_size must be > 0".into()));
        }
        if self.glyphs.is_empty() {
            return Err(FxError::Config("rain.glyphs must not be empty".into()));
        }
        if self.base_speed < 0.0 || self.speed_jitter < 0.0 {
            return Err(FxError::Config("rain speeds must be >= 0".into()));
        }
        if !(0.0..=1.0).contains(&self.reset_chance) {
            return Err(FxError::Config("rain.reset_chance must be in [0, 1]".into()));
        }
        Ok(())
    }
}

impl ParticleConfig {
    pub fn validate(&self) -> FxResult<()> {
        if self.count == 0 {
            return Err(FxError::Config("particles.count must be > 0".into()));
        }
        if !(self.margin >= 0.0) {
            return Err(FxError::Config("particles.margin must be >= 0".into()));
        }
        if self.palette.is_empty() {
            return Err(FxError::Config("particles.palette must not be empty".into()));
        }
        Ok(())
    }
}

impl TypewriterConfig {
    pub fn validate(&self) -> FxResult<()> {
        if !(self.char_interval_ms > 0.0) {
            return Err(FxError::Config(
                "typewriter.char_interval_ms must be > 0".into(),
            ));
        }
        Ok(())
    }
}
