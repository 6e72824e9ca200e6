//! Page-level configuration read from the markup.
use onevia_core::constants::{CONFIG_SCRIPT_ID, SITE_VARIANT_ATTR};
use onevia_core::{SiteConfig, Variant};
use web_sys::Document;

/// Resolve the config from the body's variant attribute and an optional
/// JSON override block. Invalid overrides are logged and ignored.
#[must_use]
pub fn resolve_config(variant_attr: Option<&str>, overrides: Option<&str>) -> SiteConfig {
    let variant = match variant_attr {
        Some(attr) => Variant::from_attr(attr).unwrap_or_else(|| {
            log::warn!("unknown site variant `{attr}`, using default");
            Variant::default()
        }),
        None => Variant::default(),
    };
    match overrides.map(str::trim).filter(|json| !json.is_empty()) {
        Some(json) => SiteConfig::from_json(json, variant).unwrap_or_else(|err| {
            log::warn!("ignoring #{CONFIG_SCRIPT_ID}: {err}");
            SiteConfig::for_variant(variant)
        }),
        None => SiteConfig::for_variant(variant),
    }
}

/// Read `data-site-variant` from `<body>` and `#onevia-config` overrides.
#[must_use]
pub fn load_site_config(document: &Document) -> SiteConfig {
    let variant_attr = document
        .body()
        .and_then(|body| body.get_attribute(SITE_VARIANT_ATTR));
    let overrides = document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content());
    let config = resolve_config(variant_attr.as_deref(), overrides.as_deref());
    log::debug!("site config: {config:?}");
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_markup_uses_default_variant() {
        assert_eq!(resolve_config(None, None), SiteConfig::default());
    }

    #[test]
    fn attribute_selects_preset() {
        let config = resolve_config(Some("basic"), None);
        assert_eq!(config.variant, Variant::Basic);
        assert!(!config.mirror_to_cookie);
    }

    #[test]
    fn overrides_apply_and_bad_json_is_ignored() {
        let config = resolve_config(Some("contact_pricing"), Some(r#"{"contact_cta": "Call us"}"#));
        assert_eq!(config.contact_cta, "Call us");
        assert!(config.allow_contact_pricing);

        let fallback = resolve_config(Some("contact_pricing"), Some("{oops"));
        assert_eq!(fallback, SiteConfig::for_variant(Variant::ContactPricing));
    }

    #[test]
    fn unknown_variant_falls_back() {
        assert_eq!(resolve_config(Some("v9"), Some("  ")), SiteConfig::default());
    }
}
