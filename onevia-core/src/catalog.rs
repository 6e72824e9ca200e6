//! Plan and add-on catalog.
//!
//! Keys are closed enums and the tables are structs with one field per key,
//! so a lookup is an exhaustive `match` and a catalog missing an entry fails
//! to deserialize instead of silently rendering nothing.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Variant;
use crate::money::Price;

/// A top-level membership tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKey {
    Individual,
    Family,
    Employer,
}

impl PlanKey {
    pub const ALL: [Self; 3] = [Self::Individual, Self::Family, Self::Employer];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Family => "family",
            Self::Employer => "employer",
        }
    }
}

impl fmt::Display for PlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim())
            .ok_or_else(|| CatalogError::UnknownPlan(s.to_string()))
    }
}

/// An optional supplementary service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddonKey {
    Rx,
    Dental,
    Vision,
}

impl AddonKey {
    pub const ALL: [Self; 3] = [Self::Rx, Self::Dental, Self::Vision];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rx => "rx",
            Self::Dental => "dental",
            Self::Vision => "vision",
        }
    }
}

impl fmt::Display for AddonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddonKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim())
            .ok_or_else(|| CatalogError::UnknownAddon(s.to_string()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown plan key `{0}`")]
    UnknownPlan(String),
    #[error("unknown add-on key `{0}`")]
    UnknownAddon(String),
    #[error("{item} is contact-priced but contact pricing is disabled")]
    ContactPriceDisallowed { item: String },
    #[error("catalog JSON is invalid: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Static description of a plan as shown by the plan switcher, plus the
/// label and price that feed the order summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanEntry {
    pub label: String,
    /// Label used on order summary lines; defaults to `label`.
    #[serde(default)]
    pub summary_label: Option<String>,
    pub price: Price,
    pub price_text: String,
    pub note: String,
    #[serde(default)]
    pub features: Vec<String>,
}

impl PlanEntry {
    #[must_use]
    pub fn summary_label(&self) -> &str {
        self.summary_label.as_deref().unwrap_or(&self.label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddonEntry {
    pub label: String,
    pub price: Price,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanTable {
    pub individual: PlanEntry,
    pub family: PlanEntry,
    pub employer: PlanEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddonTable {
    pub rx: AddonEntry,
    pub dental: AddonEntry,
    pub vision: AddonEntry,
}

/// Complete catalog for one site variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    pub plans: PlanTable,
    pub addons: AddonTable,
}

impl Catalog {
    /// Parse a catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the JSON is malformed, has an
    /// unknown key, or is missing any plan or add-on.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load the catalog bundled for `variant`.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded JSON fails to parse.
    pub fn bundled(variant: Variant) -> Result<Self, CatalogError> {
        let json = match variant {
            Variant::Basic => include_str!("../static/catalog/basic.json"),
            Variant::FamilyDiscount => include_str!("../static/catalog/family_discount.json"),
            Variant::ContactPricing => include_str!("../static/catalog/contact_pricing.json"),
        };
        Self::from_json(json)
    }

    #[must_use]
    pub const fn plan(&self, key: PlanKey) -> &PlanEntry {
        match key {
            PlanKey::Individual => &self.plans.individual,
            PlanKey::Family => &self.plans.family,
            PlanKey::Employer => &self.plans.employer,
        }
    }

    #[must_use]
    pub const fn addon(&self, key: AddonKey) -> &AddonEntry {
        match key {
            AddonKey::Rx => &self.addons.rx,
            AddonKey::Dental => &self.addons.dental,
            AddonKey::Vision => &self.addons.vision,
        }
    }

    /// Reject contact-priced entries when the variant cannot render them.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ContactPriceDisallowed`] naming the first
    /// offending plan or add-on.
    pub fn check_pricing(&self, allow_contact: bool) -> Result<(), CatalogError> {
        if allow_contact {
            return Ok(());
        }
        if let Some(key) = PlanKey::ALL
            .into_iter()
            .find(|key| self.plan(*key).price.is_contact())
        {
            return Err(CatalogError::ContactPriceDisallowed {
                item: format!("plan `{key}`"),
            });
        }
        if let Some(key) = AddonKey::ALL
            .into_iter()
            .find(|key| self.addon(*key).price.is_contact())
        {
            return Err(CatalogError::ContactPriceDisallowed {
                item: format!("add-on `{key}`"),
            });
        }
        Ok(())
    }
}
