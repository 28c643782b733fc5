//! Entrance animations: staggered fade-in of content cards, the hero-title
//! typing effect and the initial body fade.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use super::PageElements;
use crate::dom;

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const HIDDEN_OFFSET: &str = "translateY(30px)";
pub const TYPE_START_DELAY_MS: u32 = 1200;
pub const TYPE_INTERVAL_MS: i32 = 100;
pub const BODY_FADE_DELAY_MS: u32 = 100;

/// Transition for the `index`-th reveal target; each starts 0.1s after the
/// previous one.
pub fn reveal_transition(index: usize) -> String {
    format!("all 0.6s ease {}s", index as f64 / 10.0)
}

/// Progressive reveal of a fixed text, one character per tick.
#[derive(Clone, Debug)]
pub struct Typewriter {
    chars: Vec<char>,
    shown: usize,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            shown: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.chars.len()
    }

    /// Text to display after the next tick, or `None` once fully typed.
    pub fn tick(&mut self) -> Option<String> {
        if self.is_done() {
            return None;
        }
        self.shown += 1;
        Some(self.chars[..self.shown].iter().collect())
    }
}

pub fn install(win: &Window, doc: &Document, els: &Rc<PageElements>) -> Result<(), JsValue> {
    observe_reveals(els)?;
    if let Some(title) = &els.hero_title {
        start_typing(win, title.clone())?;
    }
    fade_in_body(win, doc)?;
    Ok(())
}

fn observe_reveals(els: &PageElements) -> Result<(), JsValue> {
    if els.reveal_targets.is_empty() {
        return Ok(());
    }
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                if let Ok(el) = entry.target().dyn_into::<HtmlElement>() {
                    let style = el.style();
                    style.set_property("opacity", "1").ok();
                    style.set_property("transform", "translateY(0)").ok();
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let opts = IntersectionObserverInit::new();
    opts.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    opts.set_root_margin(REVEAL_ROOT_MARGIN);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &opts)?;
    callback.forget();

    for (i, el) in els.reveal_targets.iter().enumerate() {
        let style = el.style();
        style.set_property("opacity", "0")?;
        style.set_property("transform", HIDDEN_OFFSET)?;
        style.set_property("transition", &reveal_transition(i))?;
        observer.observe(el);
    }
    Ok(())
}

fn start_typing(win: &Window, title: web_sys::Element) -> Result<(), JsValue> {
    let text = title.text_content().unwrap_or_default();
    title.set_text_content(Some(""));
    let typer = Rc::new(RefCell::new(Typewriter::new(&text)));

    let w = win.clone();
    dom::set_timeout(win, TYPE_START_DELAY_MS, move || {
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let mut tick = {
            let handle = handle.clone();
            let w = w.clone();
            move || match typer.borrow_mut().tick() {
                Some(shown) => title.set_text_content(Some(&shown)),
                None => {
                    if let Some(h) = handle.take() {
                        w.clear_interval_with_handle(h);
                    }
                }
            }
        };
        tick();
        let interval = Closure::wrap(Box::new(tick) as Box<dyn FnMut()>);
        let id = w.set_interval_with_callback_and_timeout_and_arguments_0(
            interval.as_ref().unchecked_ref(),
            TYPE_INTERVAL_MS,
        );
        handle.set(id.ok());
        interval.forget();
    })?;
    Ok(())
}

fn fade_in_body(win: &Window, doc: &Document) -> Result<(), JsValue> {
    let Some(body) = doc.body() else {
        return Ok(());
    };
    body.style().set_property("opacity", "0")?;
    let b = body.clone();
    dom::set_timeout(win, BODY_FADE_DELAY_MS, move || {
        let style = b.style();
        style.set_property("transition", "opacity 0.3s ease").ok();
        style.set_property("opacity", "1").ok();
    })?;
    dom::listen(win, "load", move |_evt| dom::add_class(&body, "loaded"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stagger_steps_by_a_tenth() {
        assert_eq!(reveal_transition(0), "all 0.6s ease 0s");
        assert_eq!(reveal_transition(1), "all 0.6s ease 0.1s");
        assert_eq!(reveal_transition(3), "all 0.6s ease 0.3s");
        assert_eq!(reveal_transition(12), "all 0.6s ease 1.2s");
    }

    #[test]
    fn typewriter_reveals_one_char_per_tick() {
        let mut t = Typewriter::new("Hi 世界");
        let frames: Vec<String> = std::iter::from_fn(|| t.tick()).collect();
        assert_eq!(frames, vec!["H", "Hi", "Hi ", "Hi 世", "Hi 世界"]);
        assert!(t.is_done());
        assert_eq!(t.tick(), None);
    }

    #[test]
    fn empty_title_types_nothing() {
        let mut t = Typewriter::new("");
        assert!(t.is_done());
        assert_eq!(t.tick(), None);
    }
}
