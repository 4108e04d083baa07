pub mod checkout_service;
pub mod dto;
pub mod payment_adapter;
pub mod product_catalog;

pub use checkout_service::{
    CheckoutService, CheckoutSession, CompletionHandler, GuardTimings, PaymentCompletion,
};
pub use dto::{
    CheckoutForm, CheckoutRequest, CheckoutResponse, CreateProductInput, ErrorResponse,
    ProductDetails, ProductListResponse, UpdateProductInput,
};
pub use payment_adapter::{PaymentMethodAdapter, PaymentOutcome};
pub use product_catalog::{CatalogPhase, ProductCatalog};
