//! GraphQL documents and variables for the Shopify Storefront API.
//!
//! Documents are plain string constants posted as `{query, variables}` JSON;
//! the shared product fragment is stitched in at compile time.

use serde::Serialize;

use crate::shopify::types::CartLineInput;

/// Shared product selection used by every catalog query.
macro_rules! product_fields_fragment {
    () => {
        r"
fragment ProductFields on Product {
  id
  handle
  title
  description
  descriptionHtml
  availableForSale
  priceRange {
    minVariantPrice { amount }
  }
  compareAtPriceRange {
    minVariantPrice { amount }
  }
  images(first: 20) {
    edges { node { url altText width height } }
  }
  media(first: 20) {
    edges {
      node {
        mediaContentType
        alt
        previewImage { url }
        ... on MediaImage {
          image { url altText width height }
        }
        ... on Video {
          sources { url mimeType format width height }
        }
        ... on Model3d {
          sources { url mimeType format }
        }
        ... on ExternalVideo {
          embedUrl
          host
        }
      }
    }
  }
  variants(first: 50) {
    edges {
      node {
        id
        title
        availableForSale
        price { amount }
        compareAtPrice { amount }
        selectedOptions { name value }
      }
    }
  }
}"
    };
}

pub const GET_PRODUCTS: &str = concat!(
    r"
query GetProducts($first: Int!, $after: String) {
  products(first: $first, after: $after) {
    edges { node { ...ProductFields } }
    pageInfo { hasNextPage endCursor }
  }
}",
    product_fields_fragment!()
);

pub const GET_PRODUCT_BY_HANDLE: &str = concat!(
    r"
query GetProductByHandle($handle: String!) {
  product(handle: $handle) {
    ...ProductFields
  }
}",
    product_fields_fragment!()
);

pub const GET_COLLECTION_BY_HANDLE: &str = concat!(
    r"
query GetCollectionByHandle($handle: String!, $first: Int!) {
  collection(handle: $handle) {
    id
    handle
    title
    description
    image { url altText width height }
    products(first: $first) {
      edges { node { ...ProductFields } }
      pageInfo { hasNextPage endCursor }
    }
  }
}",
    product_fields_fragment!()
);

pub const GET_SHOP_POLICIES: &str = r"
query GetShopPolicies {
  shop {
    privacyPolicy { title body handle }
    refundPolicy { title body handle }
    shippingPolicy { title body handle }
    termsOfService { title body handle }
  }
}";

pub const CREATE_CART: &str = r"
mutation CreateCart($lines: [CartLineInput!]) {
  cartCreate(input: { lines: $lines }) {
    cart { id checkoutUrl }
    userErrors { field message }
  }
}";

pub const ADD_CART_LINES: &str = r"
mutation AddCartLines($cartId: ID!, $lines: [CartLineInput!]!) {
  cartLinesAdd(cartId: $cartId, lines: $lines) {
    cart { id checkoutUrl }
    userErrors { field message }
  }
}";

// =============================================================================
// Variables
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ProductsVariables {
    pub first: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HandleVariables {
    pub handle: String,
}

#[derive(Debug, Serialize)]
pub struct CollectionVariables {
    pub handle: String,
    pub first: i64,
}

/// Empty variables object for queries that take none.
#[derive(Debug, Serialize)]
pub struct NoVariables {}

/// Wire shape for a cart line (camelCase field names).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineVariables {
    pub merchandise_id: String,
    pub quantity: i64,
}

impl From<CartLineInput> for CartLineVariables {
    fn from(line: CartLineInput) -> Self {
        Self {
            merchandise_id: line.merchandise_id,
            quantity: i64::from(line.quantity),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateCartVariables {
    pub lines: Vec<CartLineVariables>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartLinesVariables {
    pub cart_id: String,
    pub lines: Vec<CartLineVariables>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_carry_product_fragment() {
        for document in [GET_PRODUCTS, GET_PRODUCT_BY_HANDLE, GET_COLLECTION_BY_HANDLE] {
            assert!(document.contains("...ProductFields"));
            assert!(document.contains("fragment ProductFields on Product"));
        }
    }

    #[test]
    fn test_cart_line_variables_are_camel_case() {
        let vars = CreateCartVariables {
            lines: vec![CartLineVariables::from(CartLineInput {
                merchandise_id: "gid://shopify/ProductVariant/1".to_string(),
                quantity: 2,
            })],
        };
        let json = serde_json::to_value(&vars).unwrap();
        assert_eq!(
            json["lines"][0]["merchandiseId"],
            "gid://shopify/ProductVariant/1"
        );
        assert_eq!(json["lines"][0]["quantity"], 2);
    }
}
