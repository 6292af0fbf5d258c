//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All Shopify variables are optional: when the store domain or access token
//! is absent the client runs in a recognized *unconfigured* mode (catalog
//! reads return empty results, cart mutations fail explicitly) instead of
//! refusing to start.
//!
//! - `SHOPIFY_STORE` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_STOREFRONT_ACCESS_TOKEN` - Storefront API access token
//! - `SHOPIFY_API_VERSION` - API version (default: 2026-01)
//! - `DRIFTWOOD_STATE_DIR` - Directory for persisted client state
//!   (default: .driftwood/state)

use std::path::PathBuf;

use secrecy::SecretString;
use url::Url;

const DEFAULT_API_VERSION: &str = "2026-01";
const DEFAULT_STATE_DIR: &str = ".driftwood/state";

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Shopify Storefront API configuration
    pub shopify: ShopifyStorefrontConfig,
    /// Directory where persisted client state (cart, favorites) is stored
    pub state_dir: PathBuf,
}

/// Shopify Storefront API configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopifyStorefrontConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store: Option<String>,
    /// Shopify API version (e.g., 2026-01)
    pub api_version: String,
    /// Storefront API access token
    pub storefront_access_token: Option<SecretString>,
}

impl std::fmt::Debug for ShopifyStorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyStorefrontConfig")
            .field("store", &self.store)
            .field("api_version", &self.api_version)
            .field(
                "storefront_access_token",
                &self.storefront_access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present. Never
    /// fails: missing Shopify variables put the client into unconfigured
    /// mode rather than producing an error.
    #[must_use]
    pub fn from_env() -> Self {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self {
            shopify: ShopifyStorefrontConfig::from_env(),
            state_dir: PathBuf::from(get_env_or_default(
                "DRIFTWOOD_STATE_DIR",
                DEFAULT_STATE_DIR,
            )),
        }
    }
}

impl ShopifyStorefrontConfig {
    fn from_env() -> Self {
        Self {
            store: get_optional_env("SHOPIFY_STORE")
                .as_deref()
                .map(normalize_store_domain),
            api_version: get_env_or_default("SHOPIFY_API_VERSION", DEFAULT_API_VERSION),
            storefront_access_token: get_optional_env("SHOPIFY_STOREFRONT_ACCESS_TOKEN")
                .map(SecretString::from),
        }
    }

    /// Whether both the store domain and access token are present.
    ///
    /// When false the client degrades: reads return empty results, writes
    /// fail with [`crate::shopify::ShopifyError::Unconfigured`].
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.store.is_some() && self.storefront_access_token.is_some()
    }

    /// Fingerprint of the configured backend store.
    ///
    /// Persisted alongside the cart; a persisted cart whose fingerprint does
    /// not match the live one belongs to a different store and is discarded
    /// on load. Empty when unconfigured.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        self.store.clone().unwrap_or_default()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Reduce a store setting to a bare domain.
///
/// `SHOPIFY_STORE` is documented as a domain, but a pasted admin URL like
/// `https://your-store.myshopify.com/` is a common mistake; take its host.
fn normalize_store_domain(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.contains("://")
        && let Ok(parsed) = Url::parse(trimmed)
        && let Some(host) = parsed.host_str()
    {
        return host.to_string();
    }
    trimmed.trim_end_matches('/').to_string()
}

/// Get an optional environment variable; empty values count as absent.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn configured() -> ShopifyStorefrontConfig {
        ShopifyStorefrontConfig {
            store: Some("test.myshopify.com".to_string()),
            api_version: DEFAULT_API_VERSION.to_string(),
            storefront_access_token: Some(SecretString::from("token-value")),
        }
    }

    #[test]
    fn test_is_configured_requires_both_settings() {
        assert!(configured().is_configured());

        let mut missing_store = configured();
        missing_store.store = None;
        assert!(!missing_store.is_configured());

        let mut missing_token = configured();
        missing_token.storefront_access_token = None;
        assert!(!missing_token.is_configured());
    }

    #[test]
    fn test_fingerprint_is_store_domain() {
        assert_eq!(configured().fingerprint(), "test.myshopify.com");

        let mut unconfigured = configured();
        unconfigured.store = None;
        assert_eq!(unconfigured.fingerprint(), "");
    }

    #[test]
    fn test_normalize_store_domain() {
        assert_eq!(
            normalize_store_domain("your-store.myshopify.com"),
            "your-store.myshopify.com"
        );
        assert_eq!(
            normalize_store_domain("https://your-store.myshopify.com/"),
            "your-store.myshopify.com"
        );
        assert_eq!(
            normalize_store_domain(" your-store.myshopify.com/ "),
            "your-store.myshopify.com"
        );
    }

    #[test]
    fn test_debug_redacts_access_token() {
        let debug_output = format!("{:?}", configured());
        assert!(debug_output.contains("test.myshopify.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("token-value"));
    }
}
