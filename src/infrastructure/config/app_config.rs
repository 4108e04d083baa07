use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::application::GuardTimings;

/// Service configuration, loaded from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the order store collaborator
    pub order_store_url: String,

    /// Base URL of the product API collaborator
    pub product_api_url: String,

    /// Local product mirror path
    pub product_cache_path: PathBuf,

    pub server_host: String,
    pub server_port: String,

    /// Delay before a submission's guards are released
    pub guard_release_ms: u64,

    /// Hard cap on how long a submission may stay in the processing state
    pub safety_timeout_ms: u64,

    /// How long completed idempotency keys are kept before eviction
    pub idempotency_ttl_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Arc<Self> {
        Arc::new(Self {
            order_store_url: std::env::var("ORDER_STORE_URL")
                .expect("ORDER_STORE_URL must be set"),
            product_api_url: std::env::var("PRODUCT_API_URL")
                .expect("PRODUCT_API_URL must be set"),
            product_cache_path: std::env::var("PRODUCT_CACHE_PATH")
                .unwrap_or_else(|_| "products.json".to_string())
                .into(),
            server_host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: std::env::var("SERVER_PORT").unwrap_or_else(|_| "3000".to_string()),
            guard_release_ms: env_u64("GUARD_RELEASE_MS", 2000),
            safety_timeout_ms: env_u64("SAFETY_TIMEOUT_MS", 30_000),
            idempotency_ttl_secs: env_u64("IDEMPOTENCY_TTL_SECS", 24 * 60 * 60),
        })
    }

    pub fn guard_timings(&self) -> GuardTimings {
        GuardTimings {
            release_delay: Duration::from_millis(self.guard_release_ms),
            safety_timeout: Duration::from_millis(self.safety_timeout_ms),
        }
    }

    pub fn idempotency_ttl(&self) -> Duration {
        Duration::from_secs(self.idempotency_ttl_secs)
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{} must be an integer", name)),
        Err(_) => default,
    }
}
