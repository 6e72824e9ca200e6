//! Site configuration and the per-variant presets.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::catalog::PlanKey;
use crate::constants::{
    COOKIE_MAX_AGE_SECS, DEFAULT_CONTACT_CTA, FAMILY_DISCOUNT_PCT, FAMILY_SIZE, STEP_KEY,
    STORAGE_KEY,
};
use crate::money::PriceFormat;
use crate::pricing::{FamilyPricing, PricingRules};
use crate::reveal::DEFAULT_REVEAL_THRESHOLD;

/// Which iteration of the site script a page runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// localStorage only, flat add-on pricing.
    Basic,
    /// Cookie mirror, family add-on multiplier, `?add=` preselect.
    #[default]
    FamilyDiscount,
    /// Cookie mirror, contact-priced plans replace family pricing.
    ContactPricing,
}

impl Variant {
    pub const ALL: [Self; 3] = [Self::Basic, Self::FamilyDiscount, Self::ContactPricing];

    /// Parse the value of a `data-site-variant` attribute.
    #[must_use]
    pub fn from_attr(value: &str) -> Option<Self> {
        match value.trim() {
            "basic" => Some(Self::Basic),
            "family_discount" | "family-discount" => Some(Self::FamilyDiscount),
            "contact_pricing" | "contact-pricing" => Some(Self::ContactPricing),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config JSON must be an object")]
    NotAnObject,
    #[error("reveal threshold must be between 0 and 1 (got {0})")]
    RevealThreshold(f64),
    #[error("family size must be at least 1")]
    FamilySize,
    #[error("family discount must be at most 100% (got {0}%)")]
    FamilyDiscount(u32),
    #[error("{0} must not be empty")]
    EmptyKey(&'static str),
}

/// Runtime configuration for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub variant: Variant,
    pub storage_key: String,
    pub step_key: String,
    pub cookie_max_age_secs: u64,
    pub mirror_to_cookie: bool,
    pub reveal_threshold: f64,
    pub default_plan: PlanKey,
    pub family_pricing: Option<FamilyPricing>,
    pub allow_contact_pricing: bool,
    pub price_format: PriceFormat,
    pub preselect_from_query: bool,
    pub contact_cta: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

impl SiteConfig {
    /// Preset for a script variant.
    #[must_use]
    pub fn for_variant(variant: Variant) -> Self {
        let base = Self {
            variant,
            storage_key: STORAGE_KEY.to_string(),
            step_key: STEP_KEY.to_string(),
            cookie_max_age_secs: COOKIE_MAX_AGE_SECS,
            mirror_to_cookie: false,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            default_plan: PlanKey::Individual,
            family_pricing: None,
            allow_contact_pricing: false,
            price_format: PriceFormat::Raw,
            preselect_from_query: false,
            contact_cta: DEFAULT_CONTACT_CTA.to_string(),
        };
        match variant {
            Variant::Basic => base,
            Variant::FamilyDiscount => Self {
                mirror_to_cookie: true,
                family_pricing: Some(FamilyPricing {
                    size: FAMILY_SIZE,
                    discount_pct: FAMILY_DISCOUNT_PCT,
                }),
                price_format: PriceFormat::Rounded,
                preselect_from_query: true,
                ..base
            },
            Variant::ContactPricing => Self {
                mirror_to_cookie: true,
                allow_contact_pricing: true,
                ..base
            },
        }
    }

    /// Overlay a JSON object onto the preset named by its `variant` field
    /// (or `fallback` when absent), then validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, not an object, has
    /// mistyped fields, or produces an invalid configuration.
    pub fn from_json(json: &str, fallback: Variant) -> Result<Self, ConfigError> {
        let overrides: Value = serde_json::from_str(json)?;
        let Value::Object(overrides) = overrides else {
            return Err(ConfigError::NotAnObject);
        };
        let variant = match overrides.get("variant") {
            Some(v) => serde_json::from_value(v.clone())?,
            None => fallback,
        };
        let mut merged = serde_json::to_value(Self::for_variant(variant))?;
        if let Value::Object(fields) = &mut merged {
            fields.extend(overrides);
        }
        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the presets guarantee but overrides might break.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(ConfigError::RevealThreshold(self.reveal_threshold));
        }
        if let Some(family) = self.family_pricing {
            if family.size == 0 {
                return Err(ConfigError::FamilySize);
            }
            if family.discount_pct > 100 {
                return Err(ConfigError::FamilyDiscount(family.discount_pct));
            }
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyKey("storage_key"));
        }
        if self.step_key.trim().is_empty() {
            return Err(ConfigError::EmptyKey("step_key"));
        }
        Ok(())
    }

    #[must_use]
    pub const fn pricing_rules(&self) -> PricingRules {
        PricingRules {
            family: self.family_pricing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_follow_variant_table() {
        let basic = SiteConfig::for_variant(Variant::Basic);
        assert!(!basic.mirror_to_cookie);
        assert!(basic.family_pricing.is_none());
        assert_eq!(basic.price_format, PriceFormat::Raw);

        let family = SiteConfig::for_variant(Variant::FamilyDiscount);
        assert!(family.mirror_to_cookie);
        assert!(family.preselect_from_query);
        assert_eq!(
            family.family_pricing,
            Some(FamilyPricing {
                size: 4,
                discount_pct: 25
            })
        );
        assert_eq!(family.price_format, PriceFormat::Rounded);

        let contact = SiteConfig::for_variant(Variant::ContactPricing);
        assert!(contact.allow_contact_pricing);
        assert!(contact.family_pricing.is_none());
        assert_eq!(contact.storage_key, "oneviaMembership");
        assert_eq!(contact.cookie_max_age_secs, 60 * 60 * 24 * 30);
    }

    #[test]
    fn json_overrides_apply_on_top_of_named_variant() {
        let config = SiteConfig::from_json(
            r#"{"variant": "contact_pricing", "contact_cta": "Call (555) 010-0100"}"#,
            Variant::Basic,
        )
        .unwrap();
        assert_eq!(config.variant, Variant::ContactPricing);
        assert!(config.allow_contact_pricing);
        assert_eq!(config.contact_cta, "Call (555) 010-0100");
    }

    #[test]
    fn json_without_variant_uses_fallback() {
        let config = SiteConfig::from_json(r#"{"reveal_threshold": 0.3}"#, Variant::Basic).unwrap();
        assert_eq!(config.variant, Variant::Basic);
        assert!((config.reveal_threshold - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        assert!(matches!(
            SiteConfig::from_json(r#"{"reveal_threshold": 1.5}"#, Variant::Basic),
            Err(ConfigError::RevealThreshold(_))
        ));
        assert!(matches!(
            SiteConfig::from_json(
                r#"{"family_pricing": {"size": 0, "discount_pct": 25}}"#,
                Variant::Basic
            ),
            Err(ConfigError::FamilySize)
        ));
        assert!(matches!(
            SiteConfig::from_json(r#"{"storage_key": " "}"#, Variant::Basic),
            Err(ConfigError::EmptyKey("storage_key"))
        ));
        assert!(matches!(
            SiteConfig::from_json("[1, 2]", Variant::Basic),
            Err(ConfigError::NotAnObject)
        ));
        assert!(matches!(
            SiteConfig::from_json("{", Variant::Basic),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn variant_attribute_accepts_both_spellings() {
        assert_eq!(Variant::from_attr("contact-pricing"), Some(Variant::ContactPricing));
        assert_eq!(Variant::from_attr("family_discount"), Some(Variant::FamilyDiscount));
        assert_eq!(Variant::from_attr("v4"), None);
    }
}
