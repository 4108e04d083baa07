use crate::domain::errors::DomainResult;
use crate::domain::Product;
use async_trait::async_trait;

/// Remote product API collaborator.
#[async_trait]
pub trait ProductApiPort: Send + Sync + 'static {
    /// Fetches the full catalog.
    async fn list_products(&self) -> DomainResult<Vec<Product>>;

    /// Mirrors a locally-created product to the remote API.
    async fn create_product(&self, product: &Product) -> DomainResult<()>;

    /// Mirrors a local edit to the remote API.
    async fn update_product(&self, product: &Product) -> DomainResult<()>;

    /// Mirrors a local removal to the remote API.
    async fn delete_product(&self, id: &str) -> DomainResult<()>;
}
