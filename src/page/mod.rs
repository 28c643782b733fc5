//! Page behaviours: navigation, scroll effects, reveal animations and the
//! hero-name easter egg.
//!
//! Elements are looked up once into [`PageElements`] and handed to named
//! handlers; every handler is a no-op for elements the page does not have.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::dom;
use crate::rain::MatrixRain;

pub mod banner;
pub mod easter_egg;
pub mod nav;
pub mod reveal;
pub mod scroll;

pub const REVEAL_SELECTOR: &str =
    ".timeline-item, .skill-card, .project-card, .contact-card, .highlight-item";

/// Structural elements the page runtime reads and mutates.
pub struct PageElements {
    pub navbar: Option<Element>,
    pub nav_toggle: Option<Element>,
    pub nav_menu: Option<Element>,
    pub nav_links: Vec<Element>,
    pub sections: Vec<HtmlElement>,
    pub anchors: Vec<Element>,
    pub hero_title: Option<Element>,
    pub hero_content: Option<HtmlElement>,
    pub hero_name: Option<HtmlElement>,
    pub back_to_top: Option<Element>,
    pub year_slot: Option<Element>,
    pub reveal_targets: Vec<HtmlElement>,
}

impl PageElements {
    pub fn lookup(doc: &Document) -> Self {
        Self {
            navbar: dom::by_id(doc, "navbar"),
            nav_toggle: dom::by_id(doc, "navToggle"),
            nav_menu: dom::by_id(doc, "navMenu"),
            nav_links: dom::query_all(doc, ".nav-link"),
            sections: dom::query_all(doc, "section[id]"),
            anchors: dom::query_all(doc, "a[href^=\"#\"]"),
            hero_title: dom::query(doc, ".hero-title"),
            hero_content: dom::query(doc, ".hero-content"),
            hero_name: dom::query(doc, "#hero-name"),
            back_to_top: dom::by_id(doc, "backToTop"),
            year_slot: dom::by_id(doc, "currentYear"),
            reveal_targets: dom::query_all(doc, REVEAL_SELECTOR),
        }
    }
}

/// Wire every behaviour onto the current document.
pub fn install(win: &Window, doc: &Document, rain: &MatrixRain) -> Result<(), JsValue> {
    let els = Rc::new(PageElements::lookup(doc));

    nav::install(win, doc, &els)?;
    scroll::install(win, doc, &els)?;
    install_scroll_listener(win, &els)?;
    reveal::install(win, doc, &els)?;
    banner::install(&els);
    easter_egg::install(win, &els, rain.clone())?;
    Ok(())
}

/// One `scroll` listener fanning out to every scroll-driven rule.
fn install_scroll_listener(win: &Window, els: &Rc<PageElements>) -> Result<(), JsValue> {
    let els = els.clone();
    let w = win.clone();
    dom::listen(win, "scroll", move |_evt| {
        let y = dom::scroll_y(&w);
        nav::on_scroll(&els, y);
        scroll::on_scroll(&w, &els, y);
    })
}
