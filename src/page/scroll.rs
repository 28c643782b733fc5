//! Smooth in-page scrolling, back-to-top button and hero parallax.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use super::PageElements;
use crate::dom;

/// Height of the fixed header that anchored sections must clear.
pub const HEADER_OFFSET: f64 = 70.0;
pub const BACK_TO_TOP_THRESHOLD: f64 = 300.0;
pub const PARALLAX_RATE: f64 = 0.5;

pub fn anchor_scroll_top(target_offset_top: f64) -> f64 {
    target_offset_top - HEADER_OFFSET
}

pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_THRESHOLD
}

#[derive(Clone, Debug, PartialEq)]
pub struct Parallax {
    pub translate_y: f64,
    pub opacity: f64,
}

/// Hero offset and fade for the current scroll position; `None` once the
/// hero has scrolled out of the first viewport.
pub fn parallax(scroll_y: f64, viewport_height: f64) -> Option<Parallax> {
    if scroll_y >= viewport_height {
        return None;
    }
    Some(Parallax {
        translate_y: scroll_y * PARALLAX_RATE,
        opacity: 1.0 - scroll_y / viewport_height,
    })
}

pub fn smooth_scroll_to(win: &Window, top: f64) {
    let opts = ScrollToOptions::new();
    opts.set_top(top);
    opts.set_behavior(ScrollBehavior::Smooth);
    win.scroll_to_with_scroll_to_options(&opts);
}

pub fn on_scroll(win: &Window, els: &PageElements, scroll_y: f64) {
    if let Some(btn) = &els.back_to_top {
        dom::set_class(btn, "visible", back_to_top_visible(scroll_y));
    }
    if let Some(hero) = &els.hero_content {
        let (_, height) = dom::viewport(win);
        if let Some(p) = parallax(scroll_y, height) {
            let style = hero.style();
            style
                .set_property("transform", &format!("translateY({}px)", p.translate_y))
                .ok();
            style.set_property("opacity", &p.opacity.to_string()).ok();
        }
    }
}

pub fn install(win: &Window, doc: &Document, els: &Rc<PageElements>) -> Result<(), JsValue> {
    for anchor in &els.anchors {
        let w = win.clone();
        let d = doc.clone();
        let a = anchor.clone();
        dom::listen(anchor, "click", move |evt| {
            evt.prevent_default();
            let Some(href) = a.get_attribute("href") else {
                return;
            };
            // A bare "#" is not a valid selector; there is nothing to scroll to.
            if let Some(target) = dom::query::<HtmlElement>(&d, &href) {
                smooth_scroll_to(&w, anchor_scroll_top(target.offset_top() as f64));
            }
        })?;
    }

    if let Some(btn) = &els.back_to_top {
        let w = win.clone();
        dom::listen(btn, "click", move |_evt| smooth_scroll_to(&w, 0.0))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_clears_header() {
        assert_eq!(anchor_scroll_top(870.0), 800.0);
        assert_eq!(anchor_scroll_top(0.0), -70.0);
    }

    #[test]
    fn back_to_top_threshold() {
        assert!(!back_to_top_visible(300.0));
        assert!(back_to_top_visible(301.0));
    }

    #[test]
    fn parallax_fades_across_first_viewport() {
        assert_eq!(
            parallax(0.0, 800.0),
            Some(Parallax {
                translate_y: 0.0,
                opacity: 1.0
            })
        );
        assert_eq!(
            parallax(400.0, 800.0),
            Some(Parallax {
                translate_y: 200.0,
                opacity: 0.5
            })
        );
        assert_eq!(parallax(800.0, 800.0), None);
        assert_eq!(parallax(10.0, 0.0), None);
    }
}
