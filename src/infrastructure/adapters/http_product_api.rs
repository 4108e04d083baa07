use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::Product;
use crate::ports::ProductApiPort;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Product API collaborator over HTTP.
#[derive(Clone)]
pub struct HttpProductApi {
    base_url: String,
    client: Client,
}

impl HttpProductApi {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: Client::new(),
        }
    }

    fn check(status: reqwest::StatusCode, action: &str) -> DomainResult<()> {
        if status.is_success() {
            Ok(())
        } else {
            Err(DomainError::ProductApiError(format!(
                "{} returned {}",
                action, status
            )))
        }
    }
}

#[async_trait]
impl ProductApiPort for HttpProductApi {
    async fn list_products(&self) -> DomainResult<Vec<Product>> {
        let url = format!("{}/products", self.base_url);
        debug!("Fetching products from API: {}", url);

        let response = self.client.get(&url).send().await?;
        Self::check(response.status(), "product list")?;

        Ok(response.json::<Vec<Product>>().await?)
    }

    async fn create_product(&self, product: &Product) -> DomainResult<()> {
        let url = format!("{}/products", self.base_url);
        let response = self.client.post(&url).json(product).send().await?;
        Self::check(response.status(), "product create")
    }

    async fn update_product(&self, product: &Product) -> DomainResult<()> {
        let url = format!("{}/products/{}", self.base_url, product.id);
        let response = self.client.put(&url).json(product).send().await?;
        Self::check(response.status(), "product update")
    }

    async fn delete_product(&self, id: &str) -> DomainResult<()> {
        let url = format!("{}/products/{}", self.base_url, id);
        let response = self.client.delete(&url).send().await?;
        Self::check(response.status(), "product delete")
    }
}
