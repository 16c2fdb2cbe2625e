use sgbridge_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Context(#[from] CoreError),

    /// The incoming customer carries no address to bill to.
    #[error("customer has no addresses")]
    NoAddresses,
}
