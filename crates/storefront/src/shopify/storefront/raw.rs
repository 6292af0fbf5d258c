//! Raw wire payloads for the Shopify Storefront API.
//!
//! The Storefront API wraps every list in an edge/node connection and every
//! response in a `{data, errors}` envelope. These types mirror that shape
//! exactly; the flat domain projection lives in [`crate::shopify::types`]
//! and is produced by `conversions`.

use serde::Deserialize;

use crate::shopify::GraphQLError;

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
}

/// Edge/node connection wrapper.
#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
    #[serde(default, rename = "pageInfo")]
    pub page_info: Option<RawPageInfo>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            edges: Vec::new(),
            page_info: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

// =============================================================================
// Catalog payloads
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct RawMoney {
    pub amount: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPriceRange {
    pub min_variant_price: RawMoney,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImage {
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub height: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMediaSource {
    pub url: String,
    pub mime_type: String,
    pub format: String,
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub height: Option<i64>,
}

/// A media node. The `media_content_type` tag discriminates the shape; the
/// remaining fields are each populated only for the matching kind.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMedia {
    pub media_content_type: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub image: Option<RawImage>,
    #[serde(default)]
    pub preview_image: Option<RawImage>,
    #[serde(default)]
    pub sources: Option<Vec<RawMediaSource>>,
    #[serde(default)]
    pub embed_url: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSelectedOption {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVariant {
    pub id: String,
    pub title: String,
    pub available_for_sale: bool,
    pub price: RawMoney,
    #[serde(default)]
    pub compare_at_price: Option<RawMoney>,
    #[serde(default)]
    pub selected_options: Vec<RawSelectedOption>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_html: Option<String>,
    pub available_for_sale: bool,
    pub price_range: RawPriceRange,
    #[serde(default)]
    pub compare_at_price_range: Option<RawPriceRange>,
    #[serde(default)]
    pub images: Connection<RawImage>,
    #[serde(default)]
    pub media: Connection<RawMedia>,
    #[serde(default)]
    pub variants: Connection<RawVariant>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCollection {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<RawImage>,
    #[serde(default)]
    pub products: Connection<RawProduct>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPolicy {
    pub title: String,
    pub body: String,
    pub handle: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawShop {
    #[serde(default)]
    pub privacy_policy: Option<RawPolicy>,
    #[serde(default)]
    pub refund_policy: Option<RawPolicy>,
    #[serde(default)]
    pub shipping_policy: Option<RawPolicy>,
    #[serde(default)]
    pub terms_of_service: Option<RawPolicy>,
}

// =============================================================================
// Response data roots
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ProductsData {
    pub products: Connection<RawProduct>,
}

#[derive(Debug, Deserialize)]
pub struct ProductByHandleData {
    pub product: Option<RawProduct>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionByHandleData {
    pub collection: Option<RawCollection>,
}

#[derive(Debug, Deserialize)]
pub struct ShopPoliciesData {
    pub shop: RawShop,
}

// =============================================================================
// Cart mutation payloads
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCart {
    pub id: String,
    pub checkout_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationPayload {
    pub cart: Option<RawCart>,
    #[serde(default)]
    pub user_errors: Vec<RawUserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCreateData {
    pub cart_create: Option<CartMutationPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesAddData {
    pub cart_lines_add: Option<CartMutationPayload>,
}
