//! Collection and shop policy conversion functions.

use crate::shopify::storefront::raw::{RawCollection, RawPolicy, RawShop};
use crate::shopify::types::{Collection, ShopPolicies, ShopPolicy};

use super::products::transform_product;

pub fn convert_collection(raw: RawCollection) -> Collection {
    Collection {
        id: raw.id,
        handle: raw.handle,
        title: raw.title,
        description: raw.description,
        image: raw.image.map(|i| i.url),
        products: raw
            .products
            .edges
            .into_iter()
            .map(|e| transform_product(e.node))
            .collect(),
    }
}

pub fn convert_policies(shop: RawShop) -> ShopPolicies {
    ShopPolicies {
        privacy_policy: shop.privacy_policy.map(convert_policy),
        refund_policy: shop.refund_policy.map(convert_policy),
        shipping_policy: shop.shipping_policy.map(convert_policy),
        terms_of_service: shop.terms_of_service.map(convert_policy),
    }
}

fn convert_policy(p: RawPolicy) -> ShopPolicy {
    ShopPolicy {
        title: p.title,
        body: p.body,
        handle: p.handle,
    }
}
