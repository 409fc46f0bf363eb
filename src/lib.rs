//! Portfolio FX core crate.
//!
//! Canvas backgrounds (code rain, floating game cells), keyboard-driven
//! overlays, the custom cursor and the hero typewriter for the portfolio page.
//! `start_portfolio()` mounts everything and hands back an owned handle; the
//! individual layers can also be mounted alone (`mount_rain`,
//! `mount_particles`).

use wasm_bindgen::prelude::*;

pub mod config;
pub mod cursor;
pub mod error;
pub mod frame_loop;
pub mod logging;
pub mod overlay;
pub mod page;
pub mod particles;
pub mod rain;
pub mod rng;
pub mod surface;
pub mod typewriter;

pub use config::FxConfig;
pub use error::FxError;
pub use page::Portfolio;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}

// -----------------------------------------------------------------------------
// Static data sets
// -----------------------------------------------------------------------------

/// Symbols the code rain draws from.
pub const CODE_GLYPHS: &[char] = &[
    '{', '}', '(', ')', ';', '<', '>', '=', '+', '-', '*', '/', '[', ']', ':', '.', ',', '|', '&',
];

/// Game-cell colours: coin, power-up, enemy, health, bonus, obstacle.
pub const PARTICLE_PALETTE: &[&str] = &[
    "#ffcb05", "#3b4cca", "#e3350d", "#7bcf5e", "#f7b7a3", "#313131",
];

/// About-section showcase gallery, in lightbox order: (image file, title).
pub const SHOWCASE_IMAGES: &[(&str, &str)] = &[
    ("Flutter.jpg", "Flutter >"),
    ("PHP.jpg", "PHP Project"),
    ("Addon - Web Design.jpg", "Addon - Web Design"),
    ("Python.jpg", "Python Project"),
];

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_portfolio() -> Result<Portfolio, JsValue> {
    Ok(Portfolio::mount(FxConfig::default())?)
}

/// Like `start_portfolio`, with a JSON config overriding any defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_portfolio_with_config(json: &str) -> Result<Portfolio, JsValue> {
    let config = FxConfig::from_json(json)?;
    logging::init(logging::parse_level(&config.log_level));
    Ok(Portfolio::mount(config)?)
}
