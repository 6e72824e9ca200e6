//! Mobile navigation toggle.
use onevia_core::NavState;
use onevia_core::constants::{MENU_TOGGLE_SELECTOR, NAV_LINKS_SELECTOR, NAV_OPEN_CLASS};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::dom;

fn apply(toggle: &Element, links: &Element, nav: NavState) {
    let _ = links
        .class_list()
        .toggle_with_force(NAV_OPEN_CLASS, nav.is_open());
    let _ = toggle.set_attribute("aria-expanded", nav.aria_expanded());
}

/// Wire `.menu-toggle` to open and close `.nav-links`, closing again when
/// any link inside is followed. Returns `false` when either element is
/// missing.
///
/// # Errors
/// Returns an error if a listener cannot be attached.
pub fn bind_nav(document: &Document) -> Result<bool, JsValue> {
    let (Some(toggle), Some(links)) = (
        document.query_selector(MENU_TOGGLE_SELECTOR)?,
        document.query_selector(NAV_LINKS_SELECTOR)?,
    ) else {
        return Ok(false);
    };

    {
        let toggle_el = toggle.clone();
        let links = links.clone();
        dom::listen(&toggle, "click", move |_| {
            let mut nav = NavState::from_open(links.class_list().contains(NAV_OPEN_CLASS));
            nav.toggle();
            apply(&toggle_el, &links, nav);
        })?;
    }

    for link in dom::query_all_in(&links, "a") {
        let toggle = toggle.clone();
        let links = links.clone();
        dom::listen(&link, "click", move |_| {
            let mut nav = NavState::from_open(links.class_list().contains(NAV_OPEN_CLASS));
            nav.close();
            apply(&toggle, &links, nav);
        })?;
    }
    Ok(true)
}
