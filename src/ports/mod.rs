pub mod idempotency_port;
pub mod order_store_port;
pub mod payment_gateway_port;
pub mod product_api_port;
pub mod product_cache_port;

pub use idempotency_port::IdempotencyStorePort;
pub use order_store_port::OrderStorePort;
pub use payment_gateway_port::PaymentResult;
pub use product_api_port::ProductApiPort;
pub use product_cache_port::ProductCachePort;
