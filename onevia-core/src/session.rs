//! The order summary widget's state, owned in one place.
//!
//! A [`MembershipSession`] holds the loaded selection and writes it back
//! through the injected [`ClientStorage`] after every change. Browser
//! handlers borrow it for the duration of a single event.
use crate::ClientStorage;
use crate::catalog::{AddonKey, Catalog, CatalogError, PlanKey};
use crate::config::SiteConfig;
use crate::constants::FALLBACK_PLAN_LABEL;
use crate::money::{Price, PriceFormat};
use crate::pricing::{OrderSummary, effective_addon_price};
use crate::query::preselected_addon;
use crate::selection::{Membership, SelectedPlan};

pub struct MembershipSession<S: ClientStorage> {
    config: SiteConfig,
    catalog: Catalog,
    membership: Membership,
    storage: S,
}

impl<S: ClientStorage> MembershipSession<S> {
    /// Load the persisted selection, falling back to defaults when storage
    /// is empty, unreadable, or holds malformed JSON.
    pub fn open(config: SiteConfig, catalog: Catalog, storage: S) -> Self {
        let stored = match storage.get(&config.storage_key) {
            Ok(stored) => stored,
            Err(err) => {
                log::warn!("could not read `{}`: {err}", config.storage_key);
                None
            }
        };
        let membership = Membership::load(stored.as_deref(), &catalog, config.default_plan);
        log::debug!(
            "membership loaded: plan={} addons={:?}",
            membership.plan.key,
            membership
                .addons
                .iter()
                .filter(|(_, a)| a.selected)
                .map(|(k, _)| k.as_str())
                .collect::<Vec<_>>()
        );
        Self {
            config,
            catalog,
            membership,
            storage,
        }
    }

    #[must_use]
    pub const fn membership(&self) -> &Membership {
        &self.membership
    }

    #[must_use]
    pub const fn config(&self) -> &SiteConfig {
        &self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Select the add-on named by `?add=` when the variant allows it.
    /// Returns the add-on that was selected.
    pub fn apply_query(&mut self, search: &str) -> Option<AddonKey> {
        if !self.config.preselect_from_query {
            return None;
        }
        let key = preselected_addon(search)?;
        self.membership.set_addon(key, true);
        self.persist();
        Some(key)
    }

    /// Switch plan from a plan input's attributes. A missing label becomes
    /// `Membership`; a missing or non-numeric price becomes zero.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownPlan`] when `key` is not a plan; the
    /// selection is left untouched.
    pub fn choose_plan(
        &mut self,
        key: &str,
        label: Option<&str>,
        price: Option<&str>,
    ) -> Result<PlanKey, CatalogError> {
        let key: PlanKey = key.parse()?;
        let label = label
            .filter(|l| !l.is_empty())
            .unwrap_or(FALLBACK_PLAN_LABEL);
        let price = price.map_or_else(Price::default, |p| {
            Price::parse_text(p, self.config.allow_contact_pricing)
        });
        self.membership.plan = SelectedPlan {
            key,
            label: label.to_string(),
            price,
        };
        self.persist();
        Ok(key)
    }

    /// Switch to a catalog plan with its catalog label and price.
    pub fn choose_catalog_plan(&mut self, key: PlanKey) {
        self.membership.plan = SelectedPlan::from_catalog(&self.catalog, key);
        self.persist();
    }

    /// Follow an add-on checkbox.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownAddon`] when `key` is not an add-on.
    pub fn set_addon(&mut self, key: &str, selected: bool) -> Result<AddonKey, CatalogError> {
        let key: AddonKey = key.parse()?;
        if self.membership.set_addon(key, selected) {
            self.persist();
        }
        Ok(key)
    }

    /// Write the selection to storage. Failures are logged, never raised.
    pub fn persist(&self) {
        let json = match self.membership.to_json() {
            Ok(json) => json,
            Err(err) => {
                log::warn!("could not serialize membership: {err}");
                return;
            }
        };
        if let Err(err) = self.storage.set(&self.config.storage_key, &json) {
            log::warn!("could not persist membership: {err}");
        }
    }

    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::build(&self.membership, self.config.pricing_rules())
    }

    #[must_use]
    pub fn price_format(&self) -> PriceFormat {
        self.config.price_format
    }

    /// Text for the summary footer.
    #[must_use]
    pub fn total_text(&self) -> String {
        self.summary()
            .total
            .display(self.config.price_format, &self.config.contact_cta)
    }

    /// Text for a `[data-addon-price]` label: the add-on's effective price
    /// under the current plan, or `base_price` when the key is unknown or
    /// the effective price is zero.
    #[must_use]
    pub fn addon_price_text(&self, key: &str, base_price: Option<&str>) -> String {
        let base = base_price.map_or_else(Price::default, |p| {
            Price::parse_text(p, self.config.allow_contact_pricing)
        });
        let effective = key
            .parse::<AddonKey>()
            .ok()
            .and_then(|key| self.membership.addons.get(&key))
            .map(|addon| {
                effective_addon_price(
                    addon.price,
                    self.membership.plan.key,
                    self.config.pricing_rules(),
                )
            });
        let shown = match effective {
            Some(Price::Amount(cents)) if cents.is_zero() => base,
            Some(price) => price,
            None => base,
        };
        shown.display(self.config.price_format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use crate::constants::STORAGE_KEY;
    use crate::storage::MemoryStorage;

    fn session(variant: Variant, storage: MemoryStorage) -> MembershipSession<MemoryStorage> {
        MembershipSession::open(
            SiteConfig::for_variant(variant),
            Catalog::bundled(variant).unwrap(),
            storage,
        )
    }

    #[test]
    fn choose_plan_uses_attribute_fallbacks() {
        let mut s = session(Variant::FamilyDiscount, MemoryStorage::new());
        s.choose_plan("family", None, Some("abc")).unwrap();
        assert_eq!(s.membership().plan.label, "Membership");
        assert_eq!(s.membership().plan.price, Price::default());
        assert!(s.storage().item(STORAGE_KEY).is_some());
    }

    #[test]
    fn unknown_plan_leaves_selection_untouched() {
        let mut s = session(Variant::FamilyDiscount, MemoryStorage::new());
        let before = s.membership().clone();
        assert!(s.choose_plan("gold", Some("Gold"), Some("999")).is_err());
        assert_eq!(s.membership(), &before);
        assert!(s.storage().item(STORAGE_KEY).is_none());
    }

    #[test]
    fn contact_attribute_only_counts_in_contact_variant() {
        let mut basic = session(Variant::Basic, MemoryStorage::new());
        basic.choose_plan("employer", Some("Employer"), Some("contact")).unwrap();
        assert_eq!(basic.membership().plan.price, Price::default());

        let mut contact = session(Variant::ContactPricing, MemoryStorage::new());
        contact
            .choose_plan("employer", Some("Employer"), Some("contact"))
            .unwrap();
        assert_eq!(contact.membership().plan.price, Price::Contact);
    }

    #[test]
    fn query_preselect_respects_variant() {
        let mut family = session(Variant::FamilyDiscount, MemoryStorage::new());
        assert_eq!(family.apply_query("?add=dental"), Some(AddonKey::Dental));
        assert!(family.membership().is_selected(AddonKey::Dental));

        let mut basic = session(Variant::Basic, MemoryStorage::new());
        assert_eq!(basic.apply_query("?add=dental"), None);
        assert!(!basic.membership().is_selected(AddonKey::Dental));
    }

    #[test]
    fn addon_price_labels_follow_plan() {
        let mut s = session(Variant::FamilyDiscount, MemoryStorage::new());
        assert_eq!(s.addon_price_text("rx", Some("25")), "$25");
        s.choose_catalog_plan(PlanKey::Family);
        assert_eq!(s.addon_price_text("rx", Some("25")), "$75");
        assert_eq!(s.addon_price_text("dental", Some("40")), "$120");
        assert_eq!(s.addon_price_text("spa", Some("12.5")), "$12.50");
        assert_eq!(s.addon_price_text("spa", None), "$0");
    }

    #[test]
    fn storage_failures_do_not_interrupt_changes() {
        let storage = MemoryStorage::new();
        storage.reject_writes(true);
        let mut s = session(Variant::FamilyDiscount, storage);
        s.set_addon("vision", true).unwrap();
        assert!(s.membership().is_selected(AddonKey::Vision));
        assert_eq!(s.total_text(), "$110 / month");
    }
}
