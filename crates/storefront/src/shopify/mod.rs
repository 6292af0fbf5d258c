//! Shopify Storefront API client.
//!
//! # Architecture
//!
//! - GraphQL documents are posted as plain `{query, variables}` JSON and the
//!   raw edge/node response payloads are deserialized with `serde`
//! - Shopify is source of truth - NO local sync, direct API calls
//! - In-memory caching via `moka` for catalog reads (5 minute TTL)
//! - Missing store domain or access token puts the client into an
//!   *unconfigured* mode: reads yield empty results, writes fail explicitly
//!
//! # Example
//!
//! ```rust,ignore
//! use driftwood_storefront::shopify::StorefrontClient;
//! use driftwood_storefront::shopify::types::CartLineInput;
//!
//! let client = StorefrontClient::new(&config.shopify);
//!
//! // Get a product
//! let product = client.get_product_by_handle("my-product").await?;
//!
//! // Create an external cart for checkout
//! let cart = client.create_cart(vec![CartLineInput {
//!     merchandise_id: product.unwrap().product.variant_id,
//!     quantity: 1,
//! }]).await?;
//! ```

mod storefront;
pub mod types;

pub use storefront::StorefrontClient;

use thiserror::Error;

/// Errors that can occur when interacting with the Shopify Storefront API.
///
/// Not-found is deliberately absent: a missing product or collection is an
/// absent result (`None`), not an error.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// Store domain or access token is missing; writes cannot proceed.
    #[error("Shopify Storefront API is not configured (missing store domain or access token)")]
    Unconfigured,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status from the API.
    #[error("HTTP {0}: {1}")]
    Status(u16, String),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// User error from a cart mutation (e.g., invalid merchandise id).
    #[error("User error: {0}")]
    UserError(String),
}

/// A GraphQL error returned in the response envelope.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
}

impl GraphQLError {
    /// A synthetic error carrying a single message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .map(|e| {
            if e.message.is_empty() {
                "(no details)".to_string()
            } else {
                e.message.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_error_display() {
        let err = ShopifyError::Unconfigured;
        assert!(err.to_string().contains("not configured"));
    }

    #[test]
    fn test_graphql_error_formatting() {
        let errors = vec![
            GraphQLError::message("Field not found"),
            GraphQLError::message("Invalid ID"),
        ];
        let err = ShopifyError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field not found; Invalid ID"
        );
    }

    #[test]
    fn test_graphql_error_empty_message() {
        let err = ShopifyError::GraphQL(vec![GraphQLError::message("")]);
        assert_eq!(err.to_string(), "GraphQL errors: (no details)");
    }

    #[test]
    fn test_graphql_error_empty_vec() {
        let err = ShopifyError::GraphQL(vec![]);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: (no error details provided)"
        );
    }

    #[test]
    fn test_status_error_display() {
        let err = ShopifyError::Status(502, "bad gateway".to_string());
        assert_eq!(err.to_string(), "HTTP 502: bad gateway");
    }
}
