//! Small DOM helpers shared by the page handlers and the rain driver.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, Window};

pub fn by_id(doc: &Document, id: &str) -> Option<Element> {
    doc.get_element_by_id(id)
}

/// First match of `selector`; a malformed selector counts as no match.
pub fn query<T: JsCast>(doc: &Document, selector: &str) -> Option<T> {
    doc.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// All matches of `selector` that cast to `T`, in document order.
pub fn query_all<T: JsCast>(doc: &Document, selector: &str) -> Vec<T> {
    let Ok(list) = doc.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

/// Attach a long-lived listener. The closure is leaked, matching the page
/// lifetime of every listener this crate installs.
pub fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// One-shot `setTimeout`; returns the handle for `clear_timeout`.
pub fn set_timeout(win: &Window, ms: u32, f: impl FnOnce() + 'static) -> Result<i32, JsValue> {
    let cb = Closure::once_into_js(f);
    win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms as i32)
}

/// Hand `f` to `schedule`; if scheduling fails, run `f` right away instead.
/// Either way `f` runs at most once.
pub fn schedule_or_run<E>(
    f: impl FnOnce() + 'static,
    schedule: impl FnOnce(Box<dyn FnOnce()>) -> Result<(), E>,
) -> Result<(), E> {
    let slot: Rc<RefCell<Option<Box<dyn FnOnce()>>>> = Rc::new(RefCell::new(Some(Box::new(f))));
    let pending = slot.clone();
    let scheduled = schedule(Box::new(move || {
        let f = pending.borrow_mut().take();
        if let Some(f) = f {
            f();
        }
    }));
    if scheduled.is_err() {
        let f = slot.borrow_mut().take();
        if let Some(f) = f {
            f();
        }
    }
    scheduled
}

/// `set_timeout` that falls back to running `f` immediately.
pub fn set_timeout_or_run(win: &Window, ms: u32, f: impl FnOnce() + 'static) -> Result<(), JsValue> {
    schedule_or_run(f, |cb| set_timeout(win, ms, cb).map(|_| ()))
}

pub fn now_ms(win: &Window) -> f64 {
    win.performance().map(|p| p.now()).unwrap_or(0.0)
}

pub fn viewport(win: &Window) -> (f64, f64) {
    let w = win
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = win
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w, h)
}

pub fn scroll_y(win: &Window) -> f64 {
    win.scroll_y().unwrap_or(0.0)
}

pub fn add_class(el: &Element, class: &str) {
    el.class_list().add_1(class).ok();
}

pub fn remove_class(el: &Element, class: &str) {
    el.class_list().remove_1(class).ok();
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    if on {
        add_class(el, class);
    } else {
        remove_class(el, class);
    }
}
