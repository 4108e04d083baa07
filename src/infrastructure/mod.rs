pub mod adapters;
pub mod config;

pub use adapters::{FileProductCache, HttpOrderStore, HttpProductApi, InMemoryIdempotencyStore};
pub use config::AppConfig;
