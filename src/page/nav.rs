//! Navigation bar: mobile menu, scroll shadow and active-section highlight.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, KeyboardEvent, Window};

use super::PageElements;
use crate::dom;

pub const SCROLLED_THRESHOLD: f64 = 50.0;
/// Sections count as current slightly before their top reaches the viewport.
pub const SECTION_LEAD: f64 = 100.0;
pub const MOBILE_BREAKPOINT: f64 = 768.0;
pub const RESIZE_DEBOUNCE_MS: u32 = 250;

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > SCROLLED_THRESHOLD
}

pub fn menu_should_close_on_resize(width: f64) -> bool {
    width > MOBILE_BREAKPOINT
}

/// Layout of one `section[id]` as read from the DOM.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// Id of the section the reader is in. Only sections with a nav link count;
/// when ranges overlap the later one in document order wins.
pub fn active_section<'a>(
    scroll_y: f64,
    sections: &'a [SectionBounds],
    has_link: impl Fn(&str) -> bool,
) -> Option<&'a str> {
    sections
        .iter()
        .rev()
        .find(|s| {
            let top = s.top - SECTION_LEAD;
            scroll_y > top && scroll_y <= top + s.height && has_link(&s.id)
        })
        .map(|s| s.id.as_str())
}

pub fn toggle_menu(els: &PageElements) {
    for el in [&els.nav_toggle, &els.nav_menu].into_iter().flatten() {
        el.class_list().toggle("active").ok();
    }
}

pub fn close_menu(els: &PageElements) {
    for el in [&els.nav_toggle, &els.nav_menu].into_iter().flatten() {
        dom::remove_class(el, "active");
    }
}

pub fn on_scroll(els: &PageElements, scroll_y: f64) {
    if let Some(navbar) = &els.navbar {
        dom::set_class(navbar, "scrolled", is_scrolled(scroll_y));
    }
    highlight_navigation(els, scroll_y);
}

pub fn highlight_navigation(els: &PageElements, scroll_y: f64) {
    let bounds: Vec<SectionBounds> = els
        .sections
        .iter()
        .map(|s| SectionBounds {
            id: s.id(),
            top: s.offset_top() as f64,
            height: s.offset_height() as f64,
        })
        .collect();
    let link_for = |id: &str| {
        let href = format!("#{}", id);
        els.nav_links
            .iter()
            .find(|l| l.get_attribute("href").as_deref() == Some(href.as_str()))
    };
    let Some(current) = active_section(scroll_y, &bounds, |id| link_for(id).is_some())
        .and_then(|id| link_for(id))
    else {
        return;
    };
    for link in &els.nav_links {
        dom::remove_class(link, "active");
    }
    dom::add_class(current, "active");
}

pub fn install(win: &Window, doc: &Document, els: &Rc<PageElements>) -> Result<(), JsValue> {
    if let Some(toggle) = &els.nav_toggle {
        let els = els.clone();
        dom::listen(toggle, "click", move |_evt| toggle_menu(&els))?;
    }
    for link in &els.nav_links {
        let els = els.clone();
        dom::listen(link, "click", move |_evt| close_menu(&els))?;
    }

    {
        let els = els.clone();
        dom::listen(doc, "keydown", move |evt| {
            let is_escape = evt
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|k| k.key() == "Escape");
            if is_escape {
                close_menu(&els);
            }
        })?;
    }

    // Debounced resize: only the last event in a burst is acted on.
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let els = els.clone();
    let w = win.clone();
    dom::listen(win, "resize", move |_evt| {
        if let Some(handle) = pending.take() {
            w.clear_timeout_with_handle(handle);
        }
        let els = els.clone();
        let w2 = w.clone();
        let handle = dom::set_timeout(&w, RESIZE_DEBOUNCE_MS, move || {
            let (width, _) = dom::viewport(&w2);
            if menu_should_close_on_resize(width) {
                close_menu(&els);
            }
        });
        pending.set(handle.ok());
    })
}
