// Browser tests: `wasm-pack test --headless --firefox`.
// Compiled only for wasm32; native `cargo test` skips this file.
#![cfg(target_arch = "wasm32")]

use portfolio_wasm::MatrixRain;
use portfolio_wasm::RainConfig;
use portfolio_wasm::rain::canvas::CANVAS_CLASS;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn overlay_count() -> u32 {
    let doc = web_sys::window().unwrap().document().unwrap();
    doc.get_elements_by_class_name(CANVAS_CLASS).length()
}

async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn short_rain() -> MatrixRain {
    MatrixRain::new(RainConfig {
        max_frames: 3,
        fade_frames: 1,
        teardown_ms: 50,
        ..RainConfig::default()
    })
}

#[wasm_bindgen_test]
async fn overlay_is_removed_after_teardown() {
    let rain = short_rain();
    let before = overlay_count();
    assert!(rain.activate().unwrap());
    assert!(rain.is_active());
    assert_eq!(overlay_count(), before + 1);

    // Re-trigger while running is ignored.
    assert!(!rain.activate().unwrap());
    assert_eq!(overlay_count(), before + 1);

    sleep_ms(1000).await;
    assert_eq!(overlay_count(), before);
    assert!(!rain.is_active());

    // The slot is free again once the canvas is gone.
    assert!(rain.activate().unwrap());
    assert_eq!(overlay_count(), before + 1);
    sleep_ms(1000).await;
    assert_eq!(overlay_count(), before);
    assert!(!rain.is_active());
}

#[wasm_bindgen_test]
fn start_portfolio_without_markup_is_harmless() {
    let handle = portfolio_wasm::start_portfolio().unwrap();
    assert!(!handle.matrix_active());
}
