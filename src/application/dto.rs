use crate::domain::value_objects::{Money, PaymentMethod, PaymentStatus, PixDetails};
use crate::domain::{Order, Product};
use crate::ports::PaymentResult;
use serde::{Deserialize, Serialize};

/// Checkout form state as filled by the buyer. Address fields are optional;
/// an address block is only attached to the order when a street was given.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub full_name: String,
    pub email: String,
    pub cpf: String,
    pub phone: String,

    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub cep: String,

    /// Manual/simulated processing: the merchant forces the payment outcome
    /// instead of trusting the gateway status.
    #[serde(default)]
    pub use_custom_processing: bool,
    pub manual_card_status: Option<String>,
}

/// Product data the checkout flow needs from the catalog.
#[derive(Debug, Clone)]
pub struct ProductDetails {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub is_digital: bool,
}

impl From<Product> for ProductDetails {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            is_digital: product.is_digital,
        }
    }
}

/// One checkout submission: the form, the product being bought, and the
/// gateway result for the charge attempt.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub form: CheckoutForm,
    pub product_id: String,
    pub payment: PaymentResult,
}

/// Checkout response. `duplicated` mirrors the adapter's silent skip of an
/// already-seen payment id; the order fields are absent in that case.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order_id: Option<i64>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub pix_details: Option<PixDetails>,
    pub duplicated: bool,
}

impl CheckoutResponse {
    pub fn from_order(order: &Order) -> Self {
        Self {
            order_id: Some(order.id),
            payment_status: Some(order.payment_status),
            payment_method: Some(order.payment_method),
            pix_details: order.pix_details.clone(),
            duplicated: false,
        }
    }

    pub fn duplicated() -> Self {
        Self {
            order_id: None,
            payment_status: None,
            payment_method: None,
            pix_details: None,
            duplicated: true,
        }
    }
}

/// New product payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductInput {
    pub name: String,
    pub price: Money,
    pub slug: Option<String>,
    #[serde(default)]
    pub is_digital: bool,
}

/// Partial product edit; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub slug: Option<String>,
    pub is_digital: Option<bool>,
}

/// Catalog listing plus the offline-mode flag.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub offline: bool,
}

/// Error payload for the HTTP surface.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: String, message: String) -> Self {
        Self { error, message }
    }
}
