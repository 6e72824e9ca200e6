//! Resume links for the multi-page membership flow.
use onevia_core::ClientStorage;
use onevia_core::constants::MEMBERSHIP_LINK_SELECTOR;
use onevia_core::steps::{last_step, record_step};
use web_sys::Document;

use crate::dom;

/// Record the current page when it is a membership step, then point every
/// `[data-membership-link]` at the last recorded step. Returns that step.
pub fn track_membership_step<S: ClientStorage>(
    document: &Document,
    storage: &S,
    step_key: &str,
    path: &str,
) -> Option<String> {
    if let Some(step) = record_step(storage, step_key, path) {
        log::debug!("membership step recorded: {step}");
    }
    let step = last_step(storage, step_key)?;
    for link in dom::query_all(document, MEMBERSHIP_LINK_SELECTOR) {
        let _ = link.set_attribute("href", &step);
    }
    Some(step)
}
