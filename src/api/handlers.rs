use crate::application::{
    CheckoutRequest, CheckoutResponse, CheckoutService, CompletionHandler, CreateProductInput,
    ErrorResponse, PaymentCompletion, PaymentMethodAdapter, PaymentOutcome, ProductCatalog,
    ProductListResponse, UpdateProductInput,
};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::DeviceType;
use crate::ports::{IdempotencyStorePort, OrderStorePort, ProductApiPort, ProductCachePort};
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use tracing::{error, info};

/// Shared application state.
pub struct AppState<S, I, A, C>
where
    S: OrderStorePort,
    I: IdempotencyStorePort,
    A: ProductApiPort,
    C: ProductCachePort,
{
    pub checkout: Arc<CheckoutService<S, I>>,
    pub catalog: Arc<ProductCatalog<A, C>>,
}

impl<S, I, A, C> Clone for AppState<S, I, A, C>
where
    S: OrderStorePort,
    I: IdempotencyStorePort,
    A: ProductApiPort,
    C: ProductCachePort,
{
    fn clone(&self) -> Self {
        Self {
            checkout: self.checkout.clone(),
            catalog: self.catalog.clone(),
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::ValidationError(_) => StatusCode::BAD_REQUEST,
        DomainError::DuplicatePayment(_) | DomainError::ProcessingInProgress => {
            StatusCode::CONFLICT
        }
        DomainError::ProductNotFound(_) => StatusCode::NOT_FOUND,
        DomainError::OrderStoreError(_) | DomainError::ProductApiError(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn to_api_error(code: &str, err: DomainError) -> ApiError {
    error!("{}: {}", code, err);
    (
        error_status(&err),
        Json(ErrorResponse::new(code.to_string(), err.to_string())),
    )
}

fn not_found(code: &str, message: String) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(code.to_string(), message)),
    )
}

fn device_from_headers(headers: &HeaderMap) -> DeviceType {
    DeviceType::from_user_agent(
        headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok()),
    )
}

fn completion_logger() -> CompletionHandler {
    Box::new(|completion: PaymentCompletion| {
        info!(
            "Checkout completed: order {} is {} via {}",
            completion.order_id,
            completion.status.as_str(),
            completion.payment_method
        );
    })
}

async fn handle_checkout<S, I, A, C>(
    state: AppState<S, I, A, C>,
    headers: HeaderMap,
    request: CheckoutRequest,
    pix: bool,
) -> Result<impl IntoResponse, ApiError>
where
    S: OrderStorePort,
    I: IdempotencyStorePort,
    A: ProductApiPort,
    C: ProductCachePort,
{
    let product = state
        .catalog
        .get_by_id(&request.product_id)
        .await
        .ok_or_else(|| {
            not_found(
                "PRODUCT_NOT_FOUND",
                format!("Product not found: {}", request.product_id),
            )
        })?;

    let device = device_from_headers(&headers);
    let session =
        state
            .checkout
            .begin_session(request.form, product.into(), device, completion_logger());
    let adapter = PaymentMethodAdapter::new(session);

    let outcome = if pix {
        adapter.handle_pix_payment(request.payment).await
    } else {
        adapter.handle_card_payment(request.payment).await
    }
    .map_err(|err| to_api_error("CHECKOUT_ERROR", err))?;

    Ok(match outcome {
        PaymentOutcome::Created(order) => (
            StatusCode::CREATED,
            Json(CheckoutResponse::from_order(&order)),
        ),
        PaymentOutcome::Duplicate => (StatusCode::OK, Json(CheckoutResponse::duplicated())),
    })
}

/// Credit-card checkout submission.
pub async fn checkout_card<S, I, A, C>(
    State(state): State<AppState<S, I, A, C>>,
    headers: HeaderMap,
    Json(request): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: OrderStorePort,
    I: IdempotencyStorePort,
    A: ProductApiPort,
    C: ProductCachePort,
{
    info!("Received card checkout for product {}", request.product_id);
    handle_checkout(state, headers, request, false).await
}

/// PIX checkout submission.
pub async fn checkout_pix<S, I, A, C>(
    State(state): State<AppState<S, I, A, C>>,
    headers: HeaderMap,
    Json(request): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: OrderStorePort,
    I: IdempotencyStorePort,
    A: ProductApiPort,
    C: ProductCachePort,
{
    info!("Received PIX checkout for product {}", request.product_id);
    handle_checkout(state, headers, request, true).await
}

/// Catalog listing; triggers the initial fetch when it has not run yet.
pub async fn list_products<S, I, A, C>(
    State(state): State<AppState<S, I, A, C>>,
) -> Result<impl IntoResponse, ApiError>
where
    S: OrderStorePort,
    I: IdempotencyStorePort,
    A: ProductApiPort,
    C: ProductCachePort,
{
    state
        .catalog
        .fetch()
        .await
        .map_err(|err| to_api_error("PRODUCT_FETCH_ERROR", err))?;

    Ok(Json(ProductListResponse {
        products: state.catalog.products().await,
        offline: state.catalog.is_offline().await,
    }))
}

/// Explicit re-fetch, resetting the offline state.
pub async fn refresh_products<S, I, A, C>(
    State(state): State<AppState<S, I, A, C>>,
) -> Result<impl IntoResponse, ApiError>
where
    S: OrderStorePort,
    I: IdempotencyStorePort,
    A: ProductApiPort,
    C: ProductCachePort,
{
    state
        .catalog
        .retry_fetch()
        .await
        .map_err(|err| to_api_error("PRODUCT_FETCH_ERROR", err))?;

    Ok(Json(ProductListResponse {
        products: state.catalog.products().await,
        offline: state.catalog.is_offline().await,
    }))
}

pub async fn create_product<S, I, A, C>(
    State(state): State<AppState<S, I, A, C>>,
    Json(input): Json<CreateProductInput>,
) -> Result<impl IntoResponse, ApiError>
where
    S: OrderStorePort,
    I: IdempotencyStorePort,
    A: ProductApiPort,
    C: ProductCachePort,
{
    state
        .catalog
        .add_product(input)
        .await
        .map(|product| (StatusCode::CREATED, Json(product)))
        .map_err(|err| to_api_error("PRODUCT_ERROR", err))
}

pub async fn update_product<S, I, A, C>(
    State(state): State<AppState<S, I, A, C>>,
    Path(id): Path<String>,
    Json(input): Json<UpdateProductInput>,
) -> Result<impl IntoResponse, ApiError>
where
    S: OrderStorePort,
    I: IdempotencyStorePort,
    A: ProductApiPort,
    C: ProductCachePort,
{
    state
        .catalog
        .update_product(&id, input)
        .await
        .map(Json)
        .map_err(|err| to_api_error("PRODUCT_ERROR", err))
}

pub async fn delete_product<S, I, A, C>(
    State(state): State<AppState<S, I, A, C>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    S: OrderStorePort,
    I: IdempotencyStorePort,
    A: ProductApiPort,
    C: ProductCachePort,
{
    state
        .catalog
        .remove_product(&id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|err| to_api_error("PRODUCT_ERROR", err))
}

/// Health check.
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}
