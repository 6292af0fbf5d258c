//! Product and media conversion functions.

use driftwood_core::format_display_price;

use crate::shopify::storefront::raw::{
    RawMedia, RawPageInfo, RawPriceRange, RawProduct, RawVariant,
};
use crate::shopify::types::{
    MediaItem, ModelSource, PageInfo, Product, ProductDetail, ProductVariant, SelectedOption,
    VideoSource,
};

/// Convert a raw product into the flat UI-ready projection.
///
/// Prices come from the minimum-variant price range; the compare-at price is
/// included only when the backend provided a compare-at range with a
/// non-zero minimum. The default `variant_id` is the first variant's id,
/// falling back to the product id for variant-less products.
pub fn transform_product(raw: RawProduct) -> Product {
    let price = format_display_price(&raw.price_range.min_variant_price.amount);
    let compare_at_price = compare_at_display(raw.compare_at_price_range.as_ref());

    let images: Vec<String> = raw.images.edges.into_iter().map(|e| e.node.url).collect();
    let image = images.first().cloned();

    let media: Vec<MediaItem> = raw
        .media
        .edges
        .into_iter()
        .filter_map(|e| convert_media(e.node))
        .collect();

    let variant_id = raw
        .variants
        .edges
        .first()
        .map_or_else(|| raw.id.clone(), |e| e.node.id.clone());

    Product {
        id: raw.id,
        handle: raw.handle,
        title: raw.title,
        description: raw.description,
        description_html: raw.description_html,
        price,
        compare_at_price,
        image,
        images,
        media,
        variant_id,
        available_for_sale: raw.available_for_sale,
    }
}

/// Convert a raw product into the detail projection with every variant
/// expanded into a flat list.
pub fn transform_product_detail(mut raw: RawProduct) -> ProductDetail {
    let variant_edges = std::mem::take(&mut raw.variants.edges);
    let variants: Vec<ProductVariant> = variant_edges
        .into_iter()
        .map(|e| convert_variant(e.node))
        .collect();

    // transform_product reads the first variant id, which take() removed;
    // restore it from the expanded list.
    let mut product = transform_product(raw);
    if let Some(first) = variants.first() {
        product.variant_id = first.id.clone();
    }

    ProductDetail { product, variants }
}

fn convert_variant(v: RawVariant) -> ProductVariant {
    ProductVariant {
        id: v.id,
        title: v.title,
        price: format_display_price(&v.price.amount),
        compare_at_price: v
            .compare_at_price
            .filter(|p| parses_above_zero(&p.amount))
            .map(|p| format_display_price(&p.amount)),
        available_for_sale: v.available_for_sale,
        selected_options: v
            .selected_options
            .into_iter()
            .map(|o| SelectedOption {
                name: o.name,
                value: o.value,
            })
            .collect(),
    }
}

/// Map a raw media node into the closed media union.
///
/// Dispatch is on the `mediaContentType` tag. Unrecognized tags yield `None`
/// and are dropped by the caller, so future media kinds degrade silently
/// instead of failing the whole product.
pub fn convert_media(media: RawMedia) -> Option<MediaItem> {
    match media.media_content_type.as_str() {
        "IMAGE" => {
            let image = media.image.or(media.preview_image)?;
            Some(MediaItem::Image {
                url: image.url,
                alt_text: image.alt_text.or(media.alt),
                width: image.width,
                height: image.height,
            })
        }
        "VIDEO" => Some(MediaItem::Video {
            preview_url: media.preview_image.map(|p| p.url),
            sources: media
                .sources
                .unwrap_or_default()
                .into_iter()
                .map(|s| VideoSource {
                    url: s.url,
                    mime_type: s.mime_type,
                    format: s.format,
                    width: s.width,
                    height: s.height,
                })
                .collect(),
        }),
        "MODEL_3D" => Some(MediaItem::Model3d {
            preview_url: media.preview_image.map(|p| p.url),
            sources: media
                .sources
                .unwrap_or_default()
                .into_iter()
                .map(|s| ModelSource {
                    url: s.url,
                    mime_type: s.mime_type,
                    format: s.format,
                })
                .collect(),
        }),
        "EXTERNAL_VIDEO" => Some(MediaItem::ExternalVideo {
            embed_url: media.embed_url?,
            host: media.host,
            preview_url: media.preview_image.map(|p| p.url),
        }),
        _ => None,
    }
}

pub fn convert_page_info(page_info: Option<RawPageInfo>) -> PageInfo {
    page_info.map_or_else(PageInfo::default, |p| PageInfo {
        has_next_page: p.has_next_page,
        end_cursor: p.end_cursor,
    })
}

fn compare_at_display(range: Option<&RawPriceRange>) -> Option<String> {
    range
        .filter(|r| parses_above_zero(&r.min_variant_price.amount))
        .map(|r| format_display_price(&r.min_variant_price.amount))
}

fn parses_above_zero(amount: &str) -> bool {
    amount.parse::<f64>().is_ok_and(|v| v > 0.0)
}
