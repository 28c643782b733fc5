//! Triple-tap on the hero name starts the matrix rain.

use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, Window};

use super::PageElements;
use crate::rain::MatrixRain;
use crate::tap::TapCounter;
use crate::{console, dom};

pub const PULSE_TRANSFORM: &str = "scale(1.05)";
pub const PULSE_MS: u32 = 200;

fn pulse(win: &Window, name: &HtmlElement) {
    name.style().set_property("transform", PULSE_TRANSFORM).ok();
    let n = name.clone();
    dom::set_timeout(win, PULSE_MS, move || {
        n.style().set_property("transform", "").ok();
    })
    .ok();
}

pub fn install(win: &Window, els: &PageElements, rain: MatrixRain) -> Result<(), JsValue> {
    let Some(name) = els.hero_name.clone() else {
        return Ok(());
    };
    let style = name.style();
    style.set_property("cursor", "pointer")?;
    style.set_property("transition", "transform 0.2s ease")?;

    let mut taps = TapCounter::default();
    let w = win.clone();
    let target = name.clone();
    dom::listen(&target, "click", move |_evt| {
        if !taps.register(dom::now_ms(&w)) {
            return;
        }
        pulse(&w, &name);
        if let Err(err) = rain.activate() {
            console::warn(&format!("matrix rain failed to start: {:?}", err));
        }
    })
}
