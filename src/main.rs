mod api;
mod application;
mod domain;
mod infrastructure;
mod ports;

use api::AppState;
use application::{CheckoutService, ProductCatalog};
use infrastructure::{
    AppConfig, FileProductCache, HttpOrderStore, HttpProductApi, InMemoryIdempotencyStore,
};
use std::sync::Arc;
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    dotenvy::dotenv().ok();

    info!("Starting Checkout Service...");

    let config = AppConfig::from_env();
    info!("Order store at {}", config.order_store_url);
    info!("Product API at {}", config.product_api_url);

    let order_store = Arc::new(HttpOrderStore::new(config.order_store_url.clone()));
    let idempotency = Arc::new(InMemoryIdempotencyStore::new(config.idempotency_ttl()));
    let checkout = Arc::new(CheckoutService::with_timings(
        order_store,
        idempotency,
        config.guard_timings(),
    ));

    let product_api = Arc::new(HttpProductApi::new(config.product_api_url.clone()));
    let product_cache = Arc::new(FileProductCache::new(config.product_cache_path.clone()));
    let catalog = Arc::new(ProductCatalog::new(product_api, product_cache));

    // Warm the catalog in the background; offline fallback is handled inside.
    let warmup = catalog.clone();
    tokio::spawn(async move {
        if let Err(err) = warmup.fetch().await {
            warn!("Initial product fetch failed: {}", err);
        }
    });

    let app_state = AppState { checkout, catalog };
    let app = api::create_router(app_state);

    let addr = format!("{}:{}", config.server_host, config.server_port);
    info!("Server listening on {}", addr);
    info!("Available endpoints:");
    info!("  GET    /health - Health check");
    info!("  POST   /api/checkout/card - Card checkout");
    info!("  POST   /api/checkout/pix - PIX checkout");
    info!("  GET    /api/products - List products");
    info!("  POST   /api/products - Create product");
    info!("  PUT    /api/products/:id - Update product");
    info!("  DELETE /api/products/:id - Delete product");
    info!("  POST   /api/products/refresh - Re-fetch products");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
