//! Portfolio page runtime.
//!
//! `start_portfolio()` wires navigation, scroll effects, reveal animations and
//! the hero-name easter egg onto the current document. The easter egg is a
//! matrix-rain canvas overlay whose frame logic lives in [`rain::RainLoop`]
//! and runs natively under test; the browser glue sits in `rain::canvas` and
//! `page`.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod console;
pub mod dom;
pub mod page;
pub mod rain;
pub mod tap;

pub use config::{ConfigError, RainConfig};
pub use rain::{FrameOutcome, GlyphSink, MatrixRain, RainLoop, RainSlot};
pub use tap::TapCounter;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Handle returned to JS once the page is wired. Dropping it on the JS side
/// leaves every behaviour installed.
#[wasm_bindgen]
pub struct Portfolio {
    rain: MatrixRain,
}

#[wasm_bindgen]
impl Portfolio {
    /// Start the rain directly. Returns false when it did not start, e.g.
    /// because an overlay is already running.
    pub fn activate_matrix_mode(&self) -> Result<bool, JsValue> {
        self.rain.activate()
    }

    pub fn matrix_active(&self) -> bool {
        self.rain.is_active()
    }
}

#[wasm_bindgen]
pub fn start_portfolio() -> Result<Portfolio, JsValue> {
    start_with(RainConfig::default())
}

/// Like [`start_portfolio`] with rain settings from a JSON object; unknown
/// fields are ignored and missing ones keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_portfolio_with_config(json: &str) -> Result<Portfolio, JsValue> {
    let config = RainConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    start_with(config)
}

fn start_with(config: RainConfig) -> Result<Portfolio, JsValue> {
    let win = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let rain = MatrixRain::new(config);
    page::install(&win, &doc, &rain)?;
    Ok(Portfolio { rain })
}
