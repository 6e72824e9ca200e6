#![forbid(unsafe_code)]
use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, anyhow};
use onevia_core::{Catalog, MembershipSession};
use wasm_bindgen::prelude::*;
use web_sys::Document;

pub mod config;
pub mod dom;
pub mod nav;
pub mod plans;
pub mod reveal;
pub mod steps;
pub mod storage;
pub mod summary;

use storage::BrowserStorage;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    // A logger may already be installed when the module is re-instantiated.
    let _ = console_log::init_with_level(level);

    if let Err(err) = start_when_ready() {
        log::error!("site scripts failed to start: {err:#}");
    }
}

fn js(err: JsValue) -> anyhow::Error {
    anyhow!(dom::js_error_message(&err))
}

/// Run [`boot`] now, or on `DOMContentLoaded` while the document is still
/// loading.
///
/// # Errors
/// Returns an error if there is no document or the deferred listener cannot
/// be attached.
pub fn start_when_ready() -> anyhow::Result<()> {
    let document = dom::document().context("document unavailable")?;
    if document.ready_state() != "loading" {
        return boot(&document);
    }
    let target = document.clone();
    dom::listen(&document, "DOMContentLoaded", move |_| {
        if let Err(err) = boot(&target) {
            log::error!("site scripts failed to start: {err:#}");
        }
    })
    .map_err(js)
}

/// Report a widget that failed to bind without stopping the others.
fn bind_or_log<T>(widget: &str, result: Result<T, JsValue>) -> Option<T> {
    result
        .map_err(|err| log::error!("{widget} unavailable: {}", dom::js_error_message(&err)))
        .ok()
}

/// Attach every page behaviour once.
///
/// Navigation, reveal and step tracking do not depend on pricing and are
/// bound first; a failure in any one widget is logged and the rest still
/// bind.
///
/// # Errors
/// Returns an error if the bundled catalog is unusable for the configured
/// variant. The pricing widgets are skipped in that case.
pub fn boot(document: &Document) -> anyhow::Result<()> {
    let config = config::load_site_config(document);
    log::info!("starting {:?} site scripts", config.variant);

    let storage = BrowserStorage::new(document, &config);
    let path = dom::window()
        .and_then(|win| win.location().pathname().ok())
        .unwrap_or_default();
    steps::track_membership_step(document, &storage, &config.step_key, &path);

    if bind_or_log("navigation", nav::bind_nav(document)) == Some(false) {
        log::debug!("no navigation toggle on this page");
    }
    if let Some(revealed) = bind_or_log(
        "reveal",
        reveal::bind_reveal(document, config.reveal_threshold),
    ) {
        log::debug!("{revealed} reveal elements bound");
    }

    let catalog = Catalog::bundled(config.variant).context("loading bundled catalog")?;
    catalog
        .check_pricing(config.allow_contact_pricing)
        .context("checking catalog prices")?;

    bind_or_log(
        "plan switcher",
        plans::bind_plan_switcher(document, Rc::new(catalog.clone()), config.default_plan),
    );

    let search = dom::window()
        .and_then(|win| win.location().search().ok())
        .unwrap_or_default();
    let mut session = MembershipSession::open(config, catalog, storage);
    if let Some(addon) = session.apply_query(&search) {
        log::info!("add-on {addon} preselected from query");
    }
    let session = Rc::new(RefCell::new(session));
    bind_or_log("order summary", summary::bind_order_summary(document, &session));
    Ok(())
}
