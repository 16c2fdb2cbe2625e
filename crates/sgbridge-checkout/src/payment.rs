use sgbridge_core::entities::{OrderTransaction, TransactionState};

/// Whether any transaction of an order reached `paid`.
#[must_use]
pub fn is_paid(transactions: &[OrderTransaction]) -> bool {
    transactions
        .iter()
        .any(|t| t.state == TransactionState::Paid)
}

/// The order's current transaction: Shopware appends a new one on every
/// payment attempt, so it is the last.
#[must_use]
pub fn actual_transaction(transactions: &[OrderTransaction]) -> Option<&OrderTransaction> {
    transactions.last()
}
