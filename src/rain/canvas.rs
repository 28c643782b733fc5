//! Browser driver for [`RainLoop`]: overlay canvas, frame loop and teardown.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, window};

use super::{FrameOutcome, GlyphSink, RainLoop, RainSlot, RainSlotGuard};
use crate::config::RainConfig;
use crate::{console, dom};

pub const CANVAS_CLASS: &str = "matrix-rain active";

const ACTIVATED_BANNER: &str = "%c🎊 MATRIX MODE ACTIVATED! 🎊";
const ACTIVATED_STYLE: &str =
    "font-size: 20px; color: #00ff00; font-weight: bold; background: #000; padding: 10px;";

/// [`GlyphSink`] over a 2D canvas context.
pub struct CanvasSink {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSink {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl GlyphSink for CanvasSink {
    fn fill_trail(&mut self, color: &str, width: f64, height: f64) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(0.0, 0.0, width, height);
    }

    fn set_glyph_style(&mut self, color: &str, font: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.set_font(font);
    }

    fn draw_glyph(&mut self, glyph: char, x: f64, y: f64) {
        let mut buf = [0u8; 4];
        self.ctx.fill_text(glyph.encode_utf8(&mut buf), x, y).ok();
    }
}

/// Controller for the rain overlay. Cheap to clone; clones share one slot, so
/// at most one overlay exists at a time and a trigger while one is running is
/// ignored.
#[derive(Clone)]
pub struct MatrixRain {
    config: RainConfig,
    slot: RainSlot,
}

impl MatrixRain {
    pub fn new(config: RainConfig) -> Self {
        Self {
            config,
            slot: RainSlot::default(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.slot.is_active()
    }

    /// Start the overlay. `Ok(false)` means nothing was started: an instance
    /// is already running, or the page offers no window, body or 2D context.
    pub fn activate(&self) -> Result<bool, JsValue> {
        let Some(guard) = self.slot.try_acquire() else {
            console::debug("matrix rain already running; trigger ignored");
            return Ok(false);
        };
        let Some(win) = window() else {
            return Ok(false);
        };
        let Some(doc) = win.document() else {
            return Ok(false);
        };
        let Some(body) = doc.body() else {
            return Ok(false);
        };

        let (width, height) = dom::viewport(&win);
        // No surface or no 2D context: the detached canvas is simply dropped.
        let Some((canvas, ctx)) = create_surface(&doc, width, height) else {
            return Ok(false);
        };
        body.append_child(&canvas)?;

        console::log_styled(ACTIVATED_BANNER, ACTIVATED_STYLE);

        start_rain_loop(RainRun {
            rain: RainLoop::new(self.config.clone(), width, height),
            sink: CanvasSink::new(ctx),
            rng: browser_rng(),
            overlay: Some(Overlay {
                canvas,
                _guard: guard,
            }),
        });
        Ok(true)
    }
}

fn create_surface(
    doc: &Document,
    width: f64,
    height: f64,
) -> Option<(HtmlCanvasElement, CanvasRenderingContext2d)> {
    let canvas: HtmlCanvasElement = doc.create_element("canvas").ok()?.dyn_into().ok()?;
    canvas.set_class_name(CANVAS_CLASS);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    let ctx = context_2d(&canvas)?;
    Some((canvas, ctx))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// The attached canvas and the slot it holds. Dropping it removes the canvas
/// from the page and frees the slot, on every exit path.
struct Overlay {
    canvas: HtmlCanvasElement,
    _guard: RainSlotGuard,
}

impl Drop for Overlay {
    fn drop(&mut self) {
        self.canvas.remove();
    }
}

/// Everything one activation owns until the canvas is removed.
struct RainRun {
    rain: RainLoop,
    sink: CanvasSink,
    rng: StdRng,
    overlay: Option<Overlay>,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(f: &FrameCallback) -> Result<i32, JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let cb = f.borrow();
    let cb = cb
        .as_ref()
        .ok_or_else(|| JsValue::from_str("frame callback released"))?;
    win.request_animation_frame(cb.as_ref().unchecked_ref())
}

fn start_rain_loop(mut run: RainRun) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        match run.rain.step(&mut run.rng, &mut run.sink) {
            FrameOutcome::Continue => {
                if let Err(err) = request_frame(&f) {
                    console::warn(&format!("matrix rain stopped: {:?}", err));
                    drop(run.overlay.take());
                    // Freeing a closure mid-call is deferred until it returns.
                    let frame_cb = f.borrow_mut().take();
                    drop(frame_cb);
                }
            }
            FrameOutcome::Finished => {
                // The teardown timer releases the closure along with the canvas.
                let frame_cb = f.borrow_mut().take();
                if let Some(overlay) = run.overlay.take() {
                    teardown(overlay, run.rain.config(), frame_cb);
                }
            }
        }
    }) as Box<dyn FnMut(f64)>));
    if let Err(err) = request_frame(&g) {
        console::warn(&format!("matrix rain not started: {:?}", err));
        // Drops the run, and with it the overlay.
        let frame_cb = g.borrow_mut().take();
        drop(frame_cb);
    }
}

fn teardown(
    overlay: Overlay,
    config: &RainConfig,
    frame_cb: Option<Closure<dyn FnMut(f64)>>,
) {
    let style = overlay.canvas.style();
    style
        .set_property("transition", &config.teardown_transition())
        .ok();
    style.set_property("opacity", "0").ok();

    let finish = move || {
        drop(overlay);
        drop(frame_cb);
    };
    let Some(win) = window() else {
        finish();
        return;
    };
    if let Err(err) = dom::set_timeout_or_run(&win, config.teardown_ms, finish) {
        console::warn(&format!("matrix rain removed without fade: {:?}", err));
    }
}

fn browser_rng() -> StdRng {
    #[cfg(feature = "rng")]
    {
        let mut seed = [0u8; 32];
        if getrandom::getrandom(&mut seed).is_ok() {
            return StdRng::from_seed(seed);
        }
    }
    let now = window().map(|w| dom::now_ms(&w)).unwrap_or(0.0);
    let jitter = (js_sys::Math::random() * u32::MAX as f64) as u64;
    StdRng::seed_from_u64(now.to_bits() ^ (jitter << 32))
}
