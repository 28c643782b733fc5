//! Thin wrappers over `web_sys::console`.
//!
//! On non-wasm targets these compile to no-ops so the pure modules can be
//! exercised by native `cargo test` without touching JS imports.

/// `console.log("%c…", css)`: one styled banner line.
#[cfg(target_arch = "wasm32")]
pub fn log_styled(msg: &str, css: &str) {
    web_sys::console::log_2(&msg.into(), &css.into());
}

#[cfg(target_arch = "wasm32")]
pub fn debug(msg: &str) {
    web_sys::console::debug_1(&msg.into());
}

#[cfg(target_arch = "wasm32")]
pub fn warn(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_styled(_msg: &str, _css: &str) {}

#[cfg(not(target_arch = "wasm32"))]
pub fn debug(_msg: &str) {}

#[cfg(not(target_arch = "wasm32"))]
pub fn warn(_msg: &str) {}
