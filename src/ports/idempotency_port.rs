use crate::domain::errors::DomainResult;

/// Process-wide idempotency-key store guarding order creation: one payment id
/// yields at most one order for the lifetime of the entries.
///
/// Keys move through two phases. `begin` claims a key as in flight; `commit`
/// upgrades it to completed; `release` drops an in-flight claim without
/// touching completed markers, so a key that produced an order keeps
/// rejecting until the store evicts it.
pub trait IdempotencyStorePort: Send + Sync + 'static {
    /// Claims the key. Fails with `DuplicatePayment` when the key is already
    /// in flight or completed.
    fn begin(&self, key: &str) -> DomainResult<()>;

    /// Marks the key as completed (an order was created for it).
    fn commit(&self, key: &str);

    /// Drops the in-flight claim on the key, if any.
    fn release(&self, key: &str);

    /// Whether the key already produced an order.
    fn is_completed(&self, key: &str) -> bool;
}
