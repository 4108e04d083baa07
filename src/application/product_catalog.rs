use crate::application::dto::{CreateProductInput, UpdateProductInput};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::Product;
use crate::ports::{ProductApiPort, ProductCachePort};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// Where the catalog is in its fetch cycle. Reachable again from a terminal
/// phase only through an explicit retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogPhase {
    Idle,
    Loading,
    Loaded,
    /// Serving the local mirror after a remote failure (offline mode)
    LoadedFromCache,
}

#[derive(Debug)]
struct CatalogState {
    products: Vec<Product>,
    phase: CatalogPhase,
    offline: bool,
    fetch_attempted: bool,
}

/// In-memory product catalog synchronized with the remote product API, with
/// the local cache as an offline fallback. Mutations are optimistic: the
/// local list and cache change first, the remote mirror is best-effort.
pub struct ProductCatalog<A: ProductApiPort, C: ProductCachePort> {
    api: Arc<A>,
    cache: Arc<C>,
    state: RwLock<CatalogState>,
}

impl<A: ProductApiPort, C: ProductCachePort> ProductCatalog<A, C> {
    pub fn new(api: Arc<A>, cache: Arc<C>) -> Self {
        Self {
            api,
            cache,
            state: RwLock::new(CatalogState {
                products: Vec::new(),
                phase: CatalogPhase::Idle,
                offline: false,
                fetch_attempted: false,
            }),
        }
    }

    /// Fetches the catalog from the remote API, falling back to the local
    /// cache on failure. A no-op once attempted; `retry_fetch` re-arms it.
    pub async fn fetch(&self) -> DomainResult<()> {
        {
            let mut state = self.state.write().await;
            if state.fetch_attempted {
                debug!("Product fetch already attempted, skipping");
                return Ok(());
            }
            state.fetch_attempted = true;
            state.phase = CatalogPhase::Loading;
        }

        match self.api.list_products().await {
            Ok(products) => {
                if let Err(err) = self.cache.save(&products) {
                    warn!("Failed to mirror products to local cache: {}", err);
                }

                let mut state = self.state.write().await;
                info!("Loaded {} products from API", products.len());
                state.products = products;
                state.offline = false;
                state.phase = CatalogPhase::Loaded;
                Ok(())
            }
            Err(api_err) => {
                error!("Error loading products: {}", api_err);

                match self.cache.load() {
                    Ok(cached) => {
                        warn!(
                            "Offline mode: serving {} products from local cache",
                            cached.len()
                        );
                        let mut state = self.state.write().await;
                        state.products = cached;
                        state.offline = true;
                        state.phase = CatalogPhase::LoadedFromCache;
                        Ok(())
                    }
                    Err(cache_err) => {
                        error!("Error loading local products: {}", cache_err);
                        let mut state = self.state.write().await;
                        state.phase = CatalogPhase::Idle;
                        Err(api_err)
                    }
                }
            }
        }
    }

    /// Explicit retry: clears the offline flag and the attempted marker, then
    /// fetches again.
    pub async fn retry_fetch(&self) -> DomainResult<()> {
        {
            let mut state = self.state.write().await;
            state.offline = false;
            state.fetch_attempted = false;
        }
        self.fetch().await
    }

    pub async fn add_product(&self, input: CreateProductInput) -> DomainResult<Product> {
        let product = Product::new(input.name, input.price, input.slug, input.is_digital)?;

        {
            let mut state = self.state.write().await;
            state.products.push(product.clone());
            self.mirror_to_cache(&state.products);
        }

        if let Err(err) = self.api.create_product(&product).await {
            warn!("Remote mirror of product create failed: {}", err);
        }

        info!("Product added: {} ({})", product.name, product.id);
        Ok(product)
    }

    pub async fn update_product(
        &self,
        id: &str,
        input: UpdateProductInput,
    ) -> DomainResult<Product> {
        let updated = {
            let mut state = self.state.write().await;
            let product = state
                .products
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| DomainError::ProductNotFound(id.to_string()))?;

            if let Some(name) = input.name {
                product.name = name;
            }
            if let Some(price) = input.price {
                product.price = price;
            }
            if let Some(slug) = input.slug {
                product.slug = slug;
            }
            if let Some(is_digital) = input.is_digital {
                product.is_digital = is_digital;
            }
            let updated = product.clone();
            self.mirror_to_cache(&state.products);
            updated
        };

        if let Err(err) = self.api.update_product(&updated).await {
            warn!("Remote mirror of product update failed: {}", err);
        }

        Ok(updated)
    }

    pub async fn remove_product(&self, id: &str) -> DomainResult<()> {
        {
            let mut state = self.state.write().await;
            let before = state.products.len();
            state.products.retain(|p| p.id != id);
            if state.products.len() == before {
                return Err(DomainError::ProductNotFound(id.to_string()));
            }
            self.mirror_to_cache(&state.products);
        }

        if let Err(err) = self.api.delete_product(id).await {
            warn!("Remote mirror of product delete failed: {}", err);
        }

        info!("Product removed: {}", id);
        Ok(())
    }

    pub async fn products(&self) -> Vec<Product> {
        self.state.read().await.products.clone()
    }

    pub async fn get_by_id(&self, id: &str) -> Option<Product> {
        self.state
            .read()
            .await
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub async fn get_by_slug(&self, slug: &str) -> Option<Product> {
        self.state
            .read()
            .await
            .products
            .iter()
            .find(|p| p.slug == slug)
            .cloned()
    }

    pub async fn is_offline(&self) -> bool {
        self.state.read().await.offline
    }

    pub async fn phase(&self) -> CatalogPhase {
        self.state.read().await.phase
    }

    fn mirror_to_cache(&self, products: &[Product]) {
        if let Err(err) = self.cache.save(products) {
            warn!("Failed to mirror products to local cache: {}", err);
        }
    }
}
