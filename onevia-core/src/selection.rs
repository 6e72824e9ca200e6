//! The persisted membership selection and its load/normalize rules.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::catalog::{AddonKey, Catalog, CatalogError, PlanKey};
use crate::money::Price;

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("stored selection is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedPlan {
    pub key: PlanKey,
    pub label: String,
    pub price: Price,
}

impl SelectedPlan {
    /// The catalog's summary label and price for `key`.
    #[must_use]
    pub fn from_catalog(catalog: &Catalog, key: PlanKey) -> Self {
        let entry = catalog.plan(key);
        Self {
            key,
            label: entry.summary_label().to_string(),
            price: entry.price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddonSelection {
    pub label: String,
    pub price: Price,
    pub selected: bool,
}

/// Plan plus add-on choices, persisted as
/// `{"plan": {...}, "addons": {"rx": {...}, ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub plan: SelectedPlan,
    pub addons: BTreeMap<AddonKey, AddonSelection>,
}

impl Membership {
    /// Default selection: `default_plan` with every add-on deselected.
    #[must_use]
    pub fn defaults(catalog: &Catalog, default_plan: PlanKey) -> Self {
        Self {
            plan: SelectedPlan::from_catalog(catalog, default_plan),
            addons: AddonKey::ALL
                .into_iter()
                .map(|key| {
                    let entry = catalog.addon(key);
                    (
                        key,
                        AddonSelection {
                            label: entry.label.clone(),
                            price: entry.price,
                            selected: false,
                        },
                    )
                })
                .collect(),
        }
    }

    /// Load from an optional stored string, falling back to defaults when
    /// nothing is stored or the stored text cannot be parsed.
    #[must_use]
    pub fn load(stored: Option<&str>, catalog: &Catalog, default_plan: PlanKey) -> Self {
        let Some(raw) = stored.filter(|raw| !raw.is_empty()) else {
            return Self::defaults(catalog, default_plan);
        };
        Self::parse(raw, catalog, default_plan).unwrap_or_else(|err| {
            log::warn!("discarding stored membership: {err}");
            Self::defaults(catalog, default_plan)
        })
    }

    /// Parse and normalize a stored selection.
    ///
    /// Unknown or missing plan keys fall back to `default_plan`, plan label
    /// and price always come from the catalog, every known add-on is
    /// present with a boolean `selected`, and unknown add-on keys are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::Json`] when `raw` is not valid JSON.
    pub fn parse(
        raw: &str,
        catalog: &Catalog,
        default_plan: PlanKey,
    ) -> Result<Self, SelectionError> {
        let stored: Value = serde_json::from_str(raw)?;
        let mut membership = Self::defaults(catalog, default_plan);
        if !truthy(&stored) {
            return Ok(membership);
        }

        let plan_key = stored
            .pointer("/plan/key")
            .and_then(Value::as_str)
            .and_then(|key| match key.parse::<PlanKey>() {
                Ok(key) => Some(key),
                Err(err) => {
                    log::debug!("stored plan ignored: {err}");
                    None
                }
            })
            .unwrap_or(default_plan);
        membership.plan = SelectedPlan::from_catalog(catalog, plan_key);

        for (key, addon) in &mut membership.addons {
            let pointer = format!("/addons/{}/selected", key.as_str());
            addon.selected = stored.pointer(&pointer).is_some_and(truthy);
        }
        Ok(membership)
    }

    /// Serialize for storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, SelectionError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Set an add-on's selected flag. Returns `false` when the add-on is not
    /// part of the selection.
    pub fn set_addon(&mut self, key: AddonKey, selected: bool) -> bool {
        self.addons.get_mut(&key).is_some_and(|addon| {
            addon.selected = selected;
            true
        })
    }

    #[must_use]
    pub fn is_selected(&self, key: AddonKey) -> bool {
        self.addons.get(&key).is_some_and(|addon| addon.selected)
    }
}

/// Truthiness of a loosely typed stored value.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
