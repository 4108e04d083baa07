use crate::domain::errors::DomainResult;
use crate::domain::Product;

/// Local persisted mirror of the product catalog, used as a fallback when the
/// remote API is unreachable. Same list shape as the API.
pub trait ProductCachePort: Send + Sync + 'static {
    fn load(&self) -> DomainResult<Vec<Product>>;

    fn save(&self, products: &[Product]) -> DomainResult<()>;
}
