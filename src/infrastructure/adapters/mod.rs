pub mod file_product_cache;
pub mod http_order_store;
pub mod http_product_api;
pub mod memory_idempotency;

pub use file_product_cache::FileProductCache;
pub use http_order_store::HttpOrderStore;
pub use http_product_api::HttpProductApi;
pub use memory_idempotency::InMemoryIdempotencyStore;
