use sgbridge_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Context(#[from] CoreError),

    /// A catalog collaborator (category or listing lookup) failed.
    #[error("catalog source failed while {context}: {reason}")]
    Source { context: String, reason: String },

    #[error("sales channel {sales_channel_id} has no navigation category to start from")]
    MissingNavigationCategory { sales_channel_id: String },

    #[error("base price is in currency {base_currency_id}, expected active currency {active_currency_id}")]
    CurrencyMismatch {
        base_currency_id: String,
        active_currency_id: String,
    },

    #[error("reduction for advanced price {tier_id} is out of range")]
    ReductionOverflow { tier_id: String },
}
