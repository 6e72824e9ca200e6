//! Order summary widget: plan radios, add-on checkboxes, the summary list
//! and the add-on price labels.
use std::cell::RefCell;
use std::rc::Rc;

use onevia_core::constants::{
    ADDON_INPUT_ATTR, ADDON_INPUT_SELECTOR, ADDON_PRICE_ATTR, ADDON_PRICE_SELECTOR,
    BASE_PRICE_ATTR, ORDER_ITEMS_ID, ORDER_TOTAL_ID, PLAN_INPUT_ATTR, PLAN_INPUT_SELECTOR,
    PLAN_LABEL_ATTR, PLAN_PRICE_ATTR,
};
use onevia_core::{ClientStorage, MembershipSession};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlInputElement};

use crate::dom;

pub type SharedSession<S> = Rc<RefCell<MembershipSession<S>>>;

/// Re-render `#order-items` and `#order-total`. No-op unless both exist.
///
/// # Errors
/// Returns an error if list items cannot be created or appended.
pub fn render_summary<S: ClientStorage>(
    document: &Document,
    session: &MembershipSession<S>,
) -> Result<(), JsValue> {
    let (Some(items), Some(total)) = (
        document.get_element_by_id(ORDER_ITEMS_ID),
        document.get_element_by_id(ORDER_TOTAL_ID),
    ) else {
        return Ok(());
    };

    let summary = session.summary();
    let format = session.price_format();
    items.set_inner_html("");
    for line in &summary.lines {
        let li = document.create_element("li")?;
        let label = document.create_element("span")?;
        label.set_text_content(Some(line.label.as_str()));
        let price = document.create_element("span")?;
        price.set_text_content(Some(line.price_text(format).as_str()));
        li.append_child(&label)?;
        li.append_child(&price)?;
        items.append_child(&li)?;
    }
    total.set_text_content(Some(session.total_text().as_str()));
    Ok(())
}

/// Refresh every `[data-addon-price]` label for the current plan.
pub fn render_addon_prices<S: ClientStorage>(document: &Document, session: &MembershipSession<S>) {
    for target in dom::query_all(document, ADDON_PRICE_SELECTOR) {
        let key = target.get_attribute(ADDON_PRICE_ATTR).unwrap_or_default();
        let base = target.get_attribute(BASE_PRICE_ATTR);
        let text = session.addon_price_text(&key, base.as_deref());
        target.set_text_content(Some(text.as_str()));
    }
}

fn rerender<S: ClientStorage>(document: &Document, session: &MembershipSession<S>, prices: bool) {
    if let Err(err) = render_summary(document, session) {
        log::warn!("order summary render failed: {}", dom::js_error_message(&err));
    }
    if prices {
        render_addon_prices(document, session);
    }
}

fn inputs(document: &Document, selector: &str) -> Vec<HtmlInputElement> {
    dom::query_all(document, selector)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlInputElement>().ok())
        .collect()
}

/// Sync inputs with the loaded selection, bind their change handlers and
/// render the initial summary.
///
/// # Errors
/// Returns an error if a change listener cannot be attached.
pub fn bind_order_summary<S: ClientStorage + 'static>(
    document: &Document,
    session: &SharedSession<S>,
) -> Result<(), JsValue> {
    let current_plan = session.borrow().membership().plan.key;
    for input in inputs(document, PLAN_INPUT_SELECTOR) {
        let key = input.get_attribute(PLAN_INPUT_ATTR).unwrap_or_default();
        if key == current_plan.as_str() {
            input.set_checked(true);
        }
        let handler_input = input.clone();
        let session = Rc::clone(session);
        let document = document.clone();
        dom::listen(&input, "change", move |_| {
            if !handler_input.checked() {
                return;
            }
            let label = handler_input.get_attribute(PLAN_LABEL_ATTR);
            let price = handler_input.get_attribute(PLAN_PRICE_ATTR);
            let mut session = session.borrow_mut();
            match session.choose_plan(&key, label.as_deref(), price.as_deref()) {
                Ok(plan) => log::debug!("plan changed to {plan}"),
                Err(err) => {
                    log::warn!("plan input ignored: {err}");
                    return;
                }
            }
            rerender(&document, &session, true);
        })?;
    }

    for input in inputs(document, ADDON_INPUT_SELECTOR) {
        let key = input.get_attribute(ADDON_INPUT_ATTR).unwrap_or_default();
        if let Ok(addon) = key.parse() {
            input.set_checked(session.borrow().membership().is_selected(addon));
        }
        let handler_input = input.clone();
        let session = Rc::clone(session);
        let document = document.clone();
        dom::listen(&input, "change", move |_| {
            let mut session = session.borrow_mut();
            match session.set_addon(&key, handler_input.checked()) {
                Ok(addon) => log::debug!("add-on {addon} set to {}", handler_input.checked()),
                Err(err) => {
                    log::debug!("add-on input ignored: {err}");
                    return;
                }
            }
            rerender(&document, &session, false);
        })?;
    }

    rerender(document, &session.borrow(), true);
    Ok(())
}
