//! Plan display switcher: `[data-plan]` buttons swap the plan description.
use std::rc::Rc;

use onevia_core::constants::{
    ACTIVE_CLASS, PLAN_BUTTON_ATTR, PLAN_BUTTON_SELECTOR, PLAN_FEATURES_ID, PLAN_LABEL_ID,
    PLAN_NOTE_ID, PLAN_PRICE_ID,
};
use onevia_core::{Catalog, PlanEntry, PlanKey};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::dom;

/// Elements the switcher writes into; any of them may be absent.
struct PlanTargets {
    label: Option<Element>,
    price: Option<Element>,
    note: Option<Element>,
    features: Option<Element>,
}

impl PlanTargets {
    fn find(document: &Document) -> Self {
        Self {
            label: document.get_element_by_id(PLAN_LABEL_ID),
            price: document.get_element_by_id(PLAN_PRICE_ID),
            note: document.get_element_by_id(PLAN_NOTE_ID),
            features: document.get_element_by_id(PLAN_FEATURES_ID),
        }
    }

    fn render(&self, document: &Document, plan: &PlanEntry) {
        for (target, text) in [
            (&self.label, &plan.label),
            (&self.price, &plan.price_text),
            (&self.note, &plan.note),
        ] {
            if let Some(el) = target {
                el.set_text_content(Some(text.as_str()));
            }
        }
        if let Some(list) = &self.features {
            let items = plan.features.iter().map(String::as_str);
            if let Err(err) = dom::replace_list_items(document, list, items) {
                log::warn!("could not render plan features: {}", dom::js_error_message(&err));
            }
        }
    }
}

fn set_active(buttons: &[Element], active: &Element) {
    for button in buttons {
        let is_active = button == active;
        let _ = button.class_list().toggle_with_force(ACTIVE_CLASS, is_active);
        let _ = button.set_attribute("aria-selected", if is_active { "true" } else { "false" });
    }
}

/// Bind every plan button and show `default_plan`. Returns the number of
/// buttons bound; with none, nothing is rendered.
///
/// # Errors
/// Returns an error if a click listener cannot be attached.
pub fn bind_plan_switcher(
    document: &Document,
    catalog: Rc<Catalog>,
    default_plan: PlanKey,
) -> Result<usize, JsValue> {
    let buttons = Rc::new(dom::query_all(document, PLAN_BUTTON_SELECTOR));
    if buttons.is_empty() {
        return Ok(0);
    }
    let targets = Rc::new(PlanTargets::find(document));

    for button in buttons.iter() {
        let clicked = button.clone();
        let buttons = Rc::clone(&buttons);
        let targets = Rc::clone(&targets);
        let catalog = Rc::clone(&catalog);
        let document = document.clone();
        dom::listen(button, "click", move |_| {
            set_active(&buttons, &clicked);
            let attr = clicked.get_attribute(PLAN_BUTTON_ATTR).unwrap_or_default();
            match attr.parse::<PlanKey>() {
                Ok(key) => targets.render(&document, catalog.plan(key)),
                Err(err) => log::warn!("plan button ignored: {err}"),
            }
        })?;
    }

    targets.render(document, catalog.plan(default_plan));
    Ok(buttons.len())
}
