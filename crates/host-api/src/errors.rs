//! # Error Types
//!
//! Errors crossing the host/product boundary.

use thiserror::Error;

/// Boxed error used where the host does not know the product's error type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result of a capability service call.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result of a hook callback.
pub type HookResult<T> = Result<T, HookError>;

/// Errors returned by host capability services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The requested entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The caller is not allowed to perform the operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The host refused the request (e.g. hooks already registered).
    #[error("Rejected by host: {0}")]
    Rejected(String),

    /// The backing service is unavailable.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Error returned from a hook callback, passed back to the host untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HookError {
    /// Human-readable error message.
    pub message: String,
}

impl HookError {
    /// Create a hook error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors from the product catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A product with this name is already registered.
    #[error("Product already registered: {0}")]
    DuplicateProduct(String),

    /// No product with this name is registered.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// The product initializer failed.
    #[error("Failed to initialize product {name}: {source}")]
    Initialization {
        /// Product name.
        name: String,
        /// Initializer error.
        #[source]
        source: BoxError,
    },
}
