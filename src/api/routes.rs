use super::handlers::*;
use crate::ports::{IdempotencyStorePort, OrderStorePort, ProductApiPort, ProductCachePort};
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router<S, I, A, C>(state: AppState<S, I, A, C>) -> Router
where
    S: OrderStorePort,
    I: IdempotencyStorePort,
    A: ProductApiPort,
    C: ProductCachePort,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/checkout/card", post(checkout_card::<S, I, A, C>))
        .route("/api/checkout/pix", post(checkout_pix::<S, I, A, C>))
        .route(
            "/api/products",
            get(list_products::<S, I, A, C>).post(create_product::<S, I, A, C>),
        )
        .route("/api/products/refresh", post(refresh_products::<S, I, A, C>))
        .route(
            "/api/products/:id",
            put(update_product::<S, I, A, C>).delete(delete_product::<S, I, A, C>),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
