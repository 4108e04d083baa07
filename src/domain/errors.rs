use thiserror::Error;

/// Domain-level error type.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Input failed validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A payment id was submitted more than once
    #[error("Duplicate payment id: {0}")]
    DuplicatePayment(String),

    /// A submission is already in flight for this session
    #[error("Processing in progress. Please wait.")]
    ProcessingInProgress,

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Order store collaborator failure
    #[error("Order store error: {0}")]
    OrderStoreError(String),

    /// Product API collaborator failure
    #[error("Product API error: {0}")]
    ProductApiError(String),

    /// Local product cache failure
    #[error("Product cache error: {0}")]
    CacheError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Domain result type.
pub type DomainResult<T> = Result<T, DomainError>;
