//! Cache value types for the Storefront API client.

use crate::shopify::types::{Collection, ProductDetail, ProductPage, ShopPolicies};

/// Values stored in the client's moka cache.
///
/// Boxed where the payload is large to keep the enum small.
#[derive(Clone)]
pub enum CacheValue {
    /// A single product with variants (product detail page).
    Product(Box<ProductDetail>),
    /// A page of products.
    Products(ProductPage),
    /// A collection with its products.
    Collection(Box<Collection>),
    /// Shop policy documents.
    Policies(ShopPolicies),
}
