//! Monthly price computation for the order summary.
use serde::{Deserialize, Serialize};

use crate::catalog::PlanKey;
use crate::constants::TOTAL_SUFFIX;
use crate::money::{Cents, Price, PriceFormat};
use crate::selection::Membership;

/// Add-on multiplier applied while the family plan is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyPricing {
    /// Number of covered members each add-on is charged for.
    pub size: u32,
    /// Discount applied to the multiplied add-on price, in percent.
    pub discount_pct: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PricingRules {
    pub family: Option<FamilyPricing>,
}

/// Effective monthly price of an add-on under the active plan.
#[must_use]
pub fn effective_addon_price(base: Price, plan: PlanKey, rules: PricingRules) -> Price {
    match (base, rules.family) {
        (Price::Amount(cents), Some(family)) if plan == PlanKey::Family => {
            Price::Amount(cents.scaled_with_discount(family.size, family.discount_pct))
        }
        _ => base,
    }
}

/// Computed total for the summary footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Total {
    Amount(Cents),
    /// At least one counted item is contact-priced.
    ContactForPricing,
}

impl Total {
    /// Footer text: `$<total> / month`, or `cta` when pricing is by contact.
    #[must_use]
    pub fn display(self, format: PriceFormat, cta: &str) -> String {
        match self {
            Self::Amount(c) => format!("${}{TOTAL_SUFFIX}", format.render(c)),
            Self::ContactForPricing => cta.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub label: String,
    pub price: Price,
}

impl SummaryLine {
    #[must_use]
    pub fn price_text(&self, format: PriceFormat) -> String {
        self.price.display(format)
    }
}

/// Lines and total rendered into the order summary widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub lines: Vec<SummaryLine>,
    pub total: Total,
}

impl OrderSummary {
    /// Build the summary for a selection: the plan line first, then each
    /// selected add-on in key order at its effective price.
    #[must_use]
    pub fn build(membership: &Membership, rules: PricingRules) -> Self {
        let plan_key = membership.plan.key;
        let mut lines = Vec::with_capacity(1 + membership.addons.len());
        lines.push(SummaryLine {
            label: membership.plan.label.clone(),
            price: membership.plan.price,
        });
        lines.extend(
            membership
                .addons
                .values()
                .filter(|addon| addon.selected)
                .map(|addon| SummaryLine {
                    label: addon.label.clone(),
                    price: effective_addon_price(addon.price, plan_key, rules),
                }),
        );

        let total = lines
            .iter()
            .map(|line| line.price.amount())
            .sum::<Option<Cents>>()
            .map_or(Total::ContactForPricing, Total::Amount);

        Self { lines, total }
    }
}
