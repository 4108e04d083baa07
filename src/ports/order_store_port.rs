use crate::domain::errors::DomainResult;
use crate::domain::{Order, OrderDraft};
use async_trait::async_trait;

/// Order store collaborator. Owns order persistence and assigns the
/// order identifier.
#[async_trait]
pub trait OrderStorePort: Send + Sync + 'static {
    /// Persists a new order and returns it with its assigned id.
    async fn add_order(&self, draft: OrderDraft) -> DomainResult<Order>;
}
