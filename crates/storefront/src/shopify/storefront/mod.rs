//! Shopify Storefront API client implementation.
//!
//! Posts GraphQL documents as `{query, variables}` JSON with `reqwest` and
//! deserializes the raw edge/node payloads with `serde`. Catalog reads are
//! cached with `moka` (5-minute TTL) and retried twice on transport failure;
//! cart mutations are never cached or retried.

mod cache;
mod conversions;
pub mod queries;
mod raw;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::ShopifyStorefrontConfig;
use crate::shopify::{GraphQLError, ShopifyError};
use crate::shopify::types::{
    CartLineInput, Collection, ProductDetail, ProductPage, RemoteCart, ShopPolicies,
};

use cache::CacheValue;
use conversions::{
    convert_cart, convert_collection, convert_page_info, convert_policies, transform_product,
    transform_product_detail,
};
use queries::{
    AddCartLinesVariables, CartLineVariables, CollectionVariables, CreateCartVariables,
    HandleVariables, NoVariables, ProductsVariables,
};
use raw::{
    CartCreateData, CartLinesAddData, CollectionByHandleData, Envelope, ProductByHandleData,
    ProductsData, ShopPoliciesData,
};

/// Upper bound on catalog page size.
const MAX_PAGE_SIZE: u32 = 50;

/// Automatic retries for catalog reads. Writes are never auto-retried.
const READ_RETRIES: u32 = 2;

const RETRY_BACKOFF: Duration = Duration::from_millis(200);

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Provides typed access to products, collections, policies, and external
/// cart creation. When the store domain or access token is absent the client
/// is *unconfigured*: reads return empty results so the UI renders an
/// empty-but-valid state, and writes fail with
/// [`ShopifyError::Unconfigured`].
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    /// `None` when unconfigured.
    endpoint: Option<String>,
    access_token: Option<String>,
    cache: Cache<String, CacheValue>,
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let endpoint = config.store.as_ref().map(|store| {
            format!(
                "https://{}/api/{}/graphql.json",
                store, config.api_version
            )
        });

        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint,
                access_token: config
                    .storefront_access_token
                    .as_ref()
                    .map(|t| t.expose_secret().to_string()),
                cache,
            }),
        }
    }

    /// Whether both the store domain and access token were configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.inner.endpoint.is_some() && self.inner.access_token.is_some()
    }

    /// Execute a GraphQL document against the configured endpoint.
    async fn request<V, D>(&self, document: &str, variables: &V) -> Result<D, ShopifyError>
    where
        V: Serialize,
        D: DeserializeOwned,
    {
        let (Some(endpoint), Some(access_token)) =
            (&self.inner.endpoint, &self.inner.access_token)
        else {
            return Err(ShopifyError::Unconfigured);
        };

        let response = self
            .inner
            .client
            .post(endpoint)
            .header("X-Shopify-Storefront-Access-Token", access_token)
            .header("Content-Type", "application/json")
            .json(&serde_json::json!({
                "query": document,
                "variables": variables,
            }))
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            warn!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Storefront API returned non-success status"
            );
            return Err(ShopifyError::Status(
                status.as_u16(),
                response_text.chars().take(200).collect(),
            ));
        }

        let envelope: Envelope<D> = serde_json::from_str(&response_text)?;

        if let Some(errors) = envelope.errors
            && !errors.is_empty()
        {
            debug!(?errors, "GraphQL errors in response");
            return Err(ShopifyError::GraphQL(errors));
        }

        envelope.data.ok_or_else(|| {
            ShopifyError::GraphQL(vec![GraphQLError::message("No data in response")])
        })
    }

    /// Execute a read with the bounded retry budget.
    ///
    /// Only transport-level failures are retried; GraphQL errors, parse
    /// errors, and the unconfigured state are returned immediately.
    async fn request_with_retry<V, D>(
        &self,
        document: &str,
        variables: &V,
    ) -> Result<D, ShopifyError>
    where
        V: Serialize,
        D: DeserializeOwned,
    {
        let mut attempt = 0;
        loop {
            match self.request(document, variables).await {
                Ok(data) => return Ok(data),
                Err(e) if attempt < READ_RETRIES && is_transient(&e) => {
                    attempt += 1;
                    warn!(error = %e, attempt, "Retrying Storefront read");
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    // =========================================================================
    // Catalog Reads (cached)
    // =========================================================================

    /// Get a paginated page of products.
    ///
    /// Page size is clamped to the bounded maximum. Unconfigured clients
    /// return an empty page rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails after the retry budget.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        first: u32,
        after: Option<String>,
    ) -> Result<ProductPage, ShopifyError> {
        if !self.is_configured() {
            debug!("Storefront unconfigured; returning empty product page");
            return Ok(ProductPage::default());
        }

        let first = first.clamp(1, MAX_PAGE_SIZE);
        let cache_key = format!("products:{first}:{}", after.as_deref().unwrap_or(""));

        if let Some(CacheValue::Products(page)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(page);
        }

        let variables = ProductsVariables {
            first: i64::from(first),
            after,
        };

        let data: ProductsData = self
            .request_with_retry(queries::GET_PRODUCTS, &variables)
            .await?;

        let page_info = convert_page_info(data.products.page_info);
        let page = ProductPage {
            products: data
                .products
                .edges
                .into_iter()
                .map(|e| transform_product(e.node))
                .collect(),
            page_info,
        };

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(page.clone()))
            .await;

        Ok(page)
    }

    /// Get a product by its handle, with full variant expansion.
    ///
    /// A missing product is `None`, not an error. Unconfigured clients
    /// return `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails after the retry budget.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_product_by_handle(
        &self,
        handle: &str,
    ) -> Result<Option<ProductDetail>, ShopifyError> {
        if !self.is_configured() {
            debug!("Storefront unconfigured; product lookup degrades to None");
            return Ok(None);
        }

        let cache_key = format!("product:{handle}");

        if let Some(CacheValue::Product(detail)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(Some(*detail));
        }

        let variables = HandleVariables {
            handle: handle.to_string(),
        };

        let data: ProductByHandleData = self
            .request_with_retry(queries::GET_PRODUCT_BY_HANDLE, &variables)
            .await?;

        let Some(raw) = data.product else {
            return Ok(None);
        };

        let detail = transform_product_detail(raw);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(detail.clone())))
            .await;

        Ok(Some(detail))
    }

    /// Get a collection by its handle.
    ///
    /// A missing collection is `None`, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails after the retry budget.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_collection_by_handle(
        &self,
        handle: &str,
        product_count: u32,
    ) -> Result<Option<Collection>, ShopifyError> {
        if !self.is_configured() {
            debug!("Storefront unconfigured; collection lookup degrades to None");
            return Ok(None);
        }

        let first = product_count.clamp(1, MAX_PAGE_SIZE);
        let cache_key = collection_cache_key(handle, first);

        if let Some(CacheValue::Collection(collection)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for collection");
            return Ok(Some(*collection));
        }

        let variables = CollectionVariables {
            handle: handle.to_string(),
            first: i64::from(first),
        };

        let data: CollectionByHandleData = self
            .request_with_retry(queries::GET_COLLECTION_BY_HANDLE, &variables)
            .await?;

        let Some(raw) = data.collection else {
            return Ok(None);
        };

        let collection = convert_collection(raw);

        self.inner
            .cache
            .insert(
                cache_key,
                CacheValue::Collection(Box::new(collection.clone())),
            )
            .await;

        Ok(Some(collection))
    }

    /// Get the shop's policy documents.
    ///
    /// Unconfigured clients return the all-`None` set.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails after the retry budget.
    #[instrument(skip(self))]
    pub async fn get_shop_policies(&self) -> Result<ShopPolicies, ShopifyError> {
        if !self.is_configured() {
            debug!("Storefront unconfigured; returning empty policies");
            return Ok(ShopPolicies::default());
        }

        let cache_key = "policies".to_string();

        if let Some(CacheValue::Policies(policies)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for policies");
            return Ok(policies);
        }

        let data: ShopPoliciesData = self
            .request_with_retry(queries::GET_SHOP_POLICIES, &NoVariables {})
            .await?;

        let policies = convert_policies(data.shop);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Policies(policies.clone()))
            .await;

        Ok(policies)
    }

    // =========================================================================
    // Cart Mutations (not cached, not retried)
    // =========================================================================

    /// Create a new external cart and return its checkout URL.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Unconfigured`] when the client is
    /// unconfigured, or an error if the mutation fails or reports
    /// `userErrors`.
    #[instrument(skip(self, lines))]
    pub async fn create_cart(
        &self,
        lines: Vec<CartLineInput>,
    ) -> Result<RemoteCart, ShopifyError> {
        let variables = CreateCartVariables {
            lines: lines.into_iter().map(CartLineVariables::from).collect(),
        };

        let data: CartCreateData = self.request(queries::CREATE_CART, &variables).await?;

        convert_cart(data.cart_create, "cartCreate")
    }

    /// Add lines to an existing external cart.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Unconfigured`] when the client is
    /// unconfigured, or an error if the mutation fails or reports
    /// `userErrors`.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    pub async fn add_cart_lines(
        &self,
        cart_id: &str,
        lines: Vec<CartLineInput>,
    ) -> Result<RemoteCart, ShopifyError> {
        let variables = AddCartLinesVariables {
            cart_id: cart_id.to_string(),
            lines: lines.into_iter().map(CartLineVariables::from).collect(),
        };

        let data: CartLinesAddData = self.request(queries::ADD_CART_LINES, &variables).await?;

        convert_cart(data.cart_lines_add, "cartLinesAdd")
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate a cached product.
    pub async fn invalidate_product(&self, handle: &str) {
        let cache_key = format!("product:{handle}");
        self.inner.cache.invalidate(&cache_key).await;
    }

    /// Invalidate all cached catalog data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

const fn is_transient(error: &ShopifyError) -> bool {
    matches!(error, ShopifyError::Http(_) | ShopifyError::Status(_, _))
}

/// The cached result depends on the requested page size, so the key carries
/// the clamped `first` alongside the handle.
fn collection_cache_key(handle: &str, first: u32) -> String {
    format!("collection:{handle}:{first}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn unconfigured_client() -> StorefrontClient {
        StorefrontClient::new(&ShopifyStorefrontConfig {
            store: None,
            api_version: "2026-01".to_string(),
            storefront_access_token: None,
        })
    }

    #[test]
    fn test_configured_detection() {
        assert!(!unconfigured_client().is_configured());

        let client = StorefrontClient::new(&ShopifyStorefrontConfig {
            store: Some("test.myshopify.com".to_string()),
            api_version: "2026-01".to_string(),
            storefront_access_token: Some(SecretString::from("token")),
        });
        assert!(client.is_configured());
        assert_eq!(
            client.inner.endpoint.as_deref(),
            Some("https://test.myshopify.com/api/2026-01/graphql.json")
        );
    }

    #[tokio::test]
    async fn test_unconfigured_reads_degrade_to_empty() {
        let client = unconfigured_client();

        let page = client.get_products(20, None).await.unwrap();
        assert!(page.products.is_empty());
        assert!(!page.page_info.has_next_page);

        assert!(client.get_product_by_handle("x").await.unwrap().is_none());
        assert!(
            client
                .get_collection_by_handle("x", 20)
                .await
                .unwrap()
                .is_none()
        );

        let policies = client.get_shop_policies().await.unwrap();
        assert!(policies.privacy_policy.is_none());
    }

    #[tokio::test]
    async fn test_unconfigured_writes_fail_explicitly() {
        let client = unconfigured_client();

        let err = client
            .create_cart(vec![CartLineInput {
                merchandise_id: "gid://shopify/ProductVariant/1".to_string(),
                quantity: 1,
            }])
            .await
            .unwrap_err();
        assert!(matches!(err, ShopifyError::Unconfigured));

        let err = client
            .add_cart_lines("gid://shopify/Cart/abc", vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, ShopifyError::Unconfigured));
    }

    #[test]
    fn test_collection_cache_key_varies_with_page_size() {
        // Different page sizes produce different results and must not share
        // a cache slot.
        assert_ne!(
            collection_cache_key("candles", 4),
            collection_cache_key("candles", 50)
        );
        assert_eq!(collection_cache_key("candles", 4), "collection:candles:4");
    }

    #[test]
    fn test_transient_classification() {
        assert!(is_transient(&ShopifyError::Status(
            502,
            "bad gateway".to_string()
        )));
        assert!(!is_transient(&ShopifyError::Unconfigured));
        assert!(!is_transient(&ShopifyError::UserError("x".to_string())));
    }
}
