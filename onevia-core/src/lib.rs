//! Onevia membership core
//!
//! Platform-agnostic logic behind the Onevia marketing site: the plan and
//! add-on catalog, the persisted membership selection, monthly pricing, and
//! the small state machines the page scripts drive. Nothing here touches the
//! DOM; the browser crate supplies storage through [`ClientStorage`].

pub mod catalog;
pub mod config;
pub mod constants;
pub mod cookie;
pub mod money;
pub mod nav;
pub mod pricing;
pub mod query;
pub mod reveal;
pub mod selection;
pub mod session;
pub mod steps;
pub mod storage;

// Re-export commonly used types
pub use catalog::{AddonEntry, AddonKey, Catalog, CatalogError, PlanEntry, PlanKey};
pub use config::{ConfigError, SiteConfig, Variant};
pub use money::{Cents, Price, PriceFormat};
pub use nav::NavState;
pub use pricing::{FamilyPricing, OrderSummary, PricingRules, SummaryLine, Total};
pub use reveal::{RevealAction, RevealTracker};
pub use selection::{AddonSelection, Membership, SelectedPlan, SelectionError};
pub use session::MembershipSession;
pub use storage::{MemoryStorage, StorageError};

/// Trait for abstracting client-side key/value persistence.
/// Platform-specific implementations should provide this
pub trait ClientStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}
