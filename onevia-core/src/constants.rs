//! Storage keys, DOM contract names and pricing constants shared by the
//! core and the browser bindings.

// Persistence ---------------------------------------------------------------
pub const STORAGE_KEY: &str = "oneviaMembership";
pub const STEP_KEY: &str = "oneviaMembershipStep";
pub const COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 30;
pub const STEP_PATH_PREFIX: &str = "membership";

// Pricing -------------------------------------------------------------------
pub const FAMILY_SIZE: u32 = 4;
pub const FAMILY_DISCOUNT_PCT: u32 = 25;
pub const DEFAULT_CONTACT_CTA: &str = "Call for pricing";
pub const FALLBACK_PLAN_LABEL: &str = "Membership";
pub const TOTAL_SUFFIX: &str = " / month";

// Query ---------------------------------------------------------------------
pub const ADD_QUERY_PARAM: &str = "add";

// DOM contract --------------------------------------------------------------
pub const MENU_TOGGLE_SELECTOR: &str = ".menu-toggle";
pub const NAV_LINKS_SELECTOR: &str = ".nav-links";
pub const NAV_OPEN_CLASS: &str = "is-open";
pub const REVEAL_SELECTOR: &str = "[data-reveal]";
pub const REVEAL_VISIBLE_CLASS: &str = "is-visible";
pub const PLAN_BUTTON_SELECTOR: &str = "[data-plan]";
pub const PLAN_BUTTON_ATTR: &str = "data-plan";
pub const ACTIVE_CLASS: &str = "is-active";
pub const PLAN_LABEL_ID: &str = "plan-label";
pub const PLAN_PRICE_ID: &str = "plan-price";
pub const PLAN_NOTE_ID: &str = "plan-note";
pub const PLAN_FEATURES_ID: &str = "plan-features";
pub const PLAN_INPUT_SELECTOR: &str = "[data-plan-key]";
pub const PLAN_INPUT_ATTR: &str = "data-plan-key";
pub const PLAN_LABEL_ATTR: &str = "data-label";
pub const PLAN_PRICE_ATTR: &str = "data-price";
pub const ADDON_INPUT_SELECTOR: &str = "[data-addon-key]";
pub const ADDON_INPUT_ATTR: &str = "data-addon-key";
pub const ADDON_PRICE_SELECTOR: &str = "[data-addon-price]";
pub const ADDON_PRICE_ATTR: &str = "data-addon-price";
pub const BASE_PRICE_ATTR: &str = "data-base-price";
pub const ORDER_ITEMS_ID: &str = "order-items";
pub const ORDER_TOTAL_ID: &str = "order-total";
pub const MEMBERSHIP_LINK_SELECTOR: &str = "[data-membership-link]";
pub const SITE_VARIANT_ATTR: &str = "data-site-variant";
pub const CONFIG_SCRIPT_ID: &str = "onevia-config";
