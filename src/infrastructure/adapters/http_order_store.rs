use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::{Order, OrderDraft};
use crate::ports::OrderStorePort;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Order store collaborator over HTTP. The remote service assigns the order
/// id and returns the persisted order.
#[derive(Clone)]
pub struct HttpOrderStore {
    base_url: String,
    client: Client,
}

impl HttpOrderStore {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl OrderStorePort for HttpOrderStore {
    async fn add_order(&self, draft: OrderDraft) -> DomainResult<Order> {
        let url = format!("{}/orders", self.base_url);
        debug!("Posting order to store: {}", url);

        let response = self.client.post(&url).json(&draft).send().await?;

        if !response.status().is_success() {
            return Err(DomainError::OrderStoreError(format!(
                "order store returned {}",
                response.status()
            )));
        }

        let order = response.json::<Order>().await?;
        debug!("Order store assigned id {}", order.id);
        Ok(order)
    }
}
