#![cfg(target_arch = "wasm32")]

use onevia_core::cookie::{find_cookie, set_cookie_string};
use onevia_core::{Catalog, ClientStorage, MembershipSession, PlanKey, SiteConfig, Variant};
use onevia_web::dom;
use onevia_web::storage::BrowserStorage;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlDocument, Storage};

wasm_bindgen_test_configure!(run_in_browser);

fn html_document() -> HtmlDocument {
    dom::document().unwrap().dyn_into().unwrap()
}

fn local() -> Storage {
    dom::window().unwrap().local_storage().unwrap().unwrap()
}

fn cookie(key: &str) -> Option<String> {
    find_cookie(&html_document().cookie().unwrap(), key)
}

fn seed_cookie(key: &str, value: &str) {
    html_document()
        .set_cookie(&set_cookie_string(key, value, 60))
        .unwrap();
}

fn config(variant: Variant, key: &str) -> SiteConfig {
    SiteConfig {
        storage_key: key.to_string(),
        ..SiteConfig::for_variant(variant)
    }
}

#[wasm_bindgen_test]
fn cookie_restores_selection_when_local_storage_is_empty() {
    let key = "oneviaCookieOnly";
    local().remove_item(key).unwrap();
    seed_cookie(key, r#"{"plan":{"key":"family"},"addons":{"rx":{"selected":true}}}"#);

    let config = config(Variant::FamilyDiscount, key);
    let storage = BrowserStorage::new(&html_document(), &config);
    let session = MembershipSession::open(
        config,
        Catalog::bundled(Variant::FamilyDiscount).unwrap(),
        storage,
    );
    assert_eq!(session.membership().plan.key, PlanKey::Family);
    assert_eq!(session.total_text(), "$375 / month");
}

#[wasm_bindgen_test]
fn empty_local_value_falls_through_to_cookie() {
    let key = "oneviaEmptyLocal";
    local().set_item(key, "").unwrap();
    seed_cookie(key, "from-cookie");

    let storage = BrowserStorage::new(&html_document(), &config(Variant::ContactPricing, key));
    assert_eq!(storage.get(key).unwrap().as_deref(), Some("from-cookie"));

    local().set_item(key, "from-local").unwrap();
    assert_eq!(storage.get(key).unwrap().as_deref(), Some("from-local"));
}

#[wasm_bindgen_test]
fn changes_are_written_to_both_stores() {
    let key = "oneviaMirrored";
    local().remove_item(key).unwrap();

    let config = config(Variant::FamilyDiscount, key);
    let storage = BrowserStorage::new(&html_document(), &config);
    let mut session = MembershipSession::open(
        config,
        Catalog::bundled(Variant::FamilyDiscount).unwrap(),
        storage,
    );
    session.set_addon("dental", true).unwrap();

    let stored = local().get_item(key).unwrap().unwrap();
    assert!(stored.contains("dental"));
    assert_eq!(cookie(key).as_deref(), Some(stored.as_str()));
}

#[wasm_bindgen_test]
fn basic_variant_never_touches_cookies() {
    let key = "oneviaLocalOnly";
    local().remove_item(key).unwrap();
    seed_cookie(key, "stale");

    let storage = BrowserStorage::new(&html_document(), &config(Variant::Basic, key));
    assert_eq!(storage.get(key).unwrap(), None);

    storage.set(key, "fresh").unwrap();
    assert_eq!(local().get_item(key).unwrap().as_deref(), Some("fresh"));
    assert_eq!(cookie(key).as_deref(), Some("stale"));
}
