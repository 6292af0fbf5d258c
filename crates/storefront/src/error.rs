//! Unified error handling for the storefront library.
//!
//! Store mutations are error-free by construction (pure in-memory updates
//! plus a logged best-effort persist); only network-facing operations and
//! explicit persistence calls can fail, and they fold into `AppError` here.

use thiserror::Error;

use crate::persist::PersistError;
use crate::shopify::ShopifyError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Shopify API operation failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] ShopifyError),

    /// Persistence operation failed.
    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");

        let err = AppError::BadRequest("cart is empty".to_string());
        assert_eq!(err.to_string(), "Bad request: cart is empty");
    }

    #[test]
    fn test_shopify_error_folds_in() {
        let err = AppError::from(ShopifyError::Unconfigured);
        assert!(matches!(err, AppError::Shopify(ShopifyError::Unconfigured)));
    }
}
