use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::Product;
use crate::ports::ProductCachePort;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Local product mirror persisted as a JSON file, same list shape as the
/// product API. Serves the catalog when the remote API is unreachable.
#[derive(Clone)]
pub struct FileProductCache {
    path: PathBuf,
}

impl FileProductCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ProductCachePort for FileProductCache {
    fn load(&self) -> DomainResult<Vec<Product>> {
        let raw = fs::read_to_string(&self.path).map_err(|err| {
            DomainError::CacheError(format!("cannot read {}: {}", self.path.display(), err))
        })?;

        let products = serde_json::from_str::<Vec<Product>>(&raw).map_err(|err| {
            DomainError::CacheError(format!("corrupt cache {}: {}", self.path.display(), err))
        })?;

        debug!(
            "Loaded {} products from cache {}",
            products.len(),
            self.path.display()
        );
        Ok(products)
    }

    fn save(&self, products: &[Product]) -> DomainResult<()> {
        let raw = serde_json::to_string_pretty(products)?;
        fs::write(&self.path, raw).map_err(|err| {
            DomainError::CacheError(format!("cannot write {}: {}", self.path.display(), err))
        })?;

        debug!(
            "Mirrored {} products to cache {}",
            products.len(),
            self.path.display()
        );
        Ok(())
    }
}
