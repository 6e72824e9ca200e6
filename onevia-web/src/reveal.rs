//! Scroll-triggered reveal of `[data-reveal]` elements.
use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Reflect};
use onevia_core::constants::{REVEAL_SELECTOR, REVEAL_VISIBLE_CLASS};
use onevia_core::{RevealAction, RevealTracker};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::dom;

fn mark_visible(element: &Element) {
    let _ = element.class_list().add_1(REVEAL_VISIBLE_CLASS);
}

/// Whether the browser exposes `IntersectionObserver`.
#[must_use]
pub fn observer_supported() -> bool {
    dom::window().is_some_and(|win| {
        Reflect::has(win.as_ref(), &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
    })
}

/// Observe every reveal element and mark it visible once `threshold` of it
/// is in view. Without observer support every element is revealed at once.
/// Returns the number of elements bound.
///
/// # Errors
/// Returns an error if the observer cannot be constructed.
pub fn bind_reveal(document: &Document, threshold: f64) -> Result<usize, JsValue> {
    let elements = dom::query_all(document, REVEAL_SELECTOR);
    let count = elements.len();
    if count == 0 {
        return Ok(0);
    }

    let mut tracker = RevealTracker::new();
    for id in 0..count {
        tracker.observe(id);
    }

    if !observer_supported() {
        log::debug!("IntersectionObserver unavailable, revealing {count} elements");
        for id in tracker.reveal_all() {
            mark_visible(&elements[id]);
        }
        return Ok(count);
    }

    let elements = Rc::new(elements);
    let tracker = Rc::new(RefCell::new(tracker));
    let callback = {
        let elements = Rc::clone(&elements);
        Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    let Some(id) = elements.iter().position(|el| *el == target) else {
                        continue;
                    };
                    let action = tracker
                        .borrow_mut()
                        .on_intersection(id, entry.is_intersecting());
                    if action == RevealAction::Reveal {
                        mark_visible(&target);
                        observer.unobserve(&target);
                    }
                }
            },
        )
    };

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    for element in elements.iter() {
        observer.observe(element);
    }
    Ok(count)
}
