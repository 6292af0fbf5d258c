//! Domain types for the Shopify Storefront API.
//!
//! These types provide a flat, UI-ready representation separate from the raw
//! edge/node wire payloads. They are constructed fresh on every catalog
//! fetch and never mutated in place.

use serde::{Deserialize, Serialize};

// =============================================================================
// Media Types
// =============================================================================

/// A source file for a hosted video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSource {
    /// Source URL.
    pub url: String,
    /// MIME type (e.g., "video/mp4").
    pub mime_type: String,
    /// Container format (e.g., "mp4").
    pub format: String,
    /// Width in pixels.
    pub width: Option<i64>,
    /// Height in pixels.
    pub height: Option<i64>,
}

/// A source file for a 3D model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSource {
    /// Source URL.
    pub url: String,
    /// MIME type (e.g., "model/gltf-binary").
    pub mime_type: String,
    /// File format (e.g., "glb").
    pub format: String,
}

/// A typed media item attached to a product.
///
/// Closed union over the media kinds the storefront renders. Unknown media
/// tags from the backend are dropped at the decode boundary, so adding a new
/// kind here is the only way a new tag becomes visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaItem {
    /// A still image.
    Image {
        /// Image URL.
        url: String,
        /// Alt text for accessibility.
        alt_text: Option<String>,
        /// Width in pixels.
        width: Option<i64>,
        /// Height in pixels.
        height: Option<i64>,
    },
    /// A video hosted by the backend.
    Video {
        /// Preview image URL.
        preview_url: Option<String>,
        /// Available source renditions.
        sources: Vec<VideoSource>,
    },
    /// A 3D model.
    Model3d {
        /// Preview image URL.
        preview_url: Option<String>,
        /// Available source files.
        sources: Vec<ModelSource>,
    },
    /// A video hosted externally (e.g., YouTube, Vimeo).
    ExternalVideo {
        /// Embed URL.
        embed_url: String,
        /// Hosting service name.
        host: Option<String>,
        /// Preview image URL.
        preview_url: Option<String>,
    },
}

// =============================================================================
// Product Types
// =============================================================================

/// UI-ready projection of a catalog product.
///
/// Prices are fixed two-decimal display strings (e.g., `"$12.00"`) derived
/// from the minimum-variant price range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product ID (opaque).
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// HTML description, when the backend provided one.
    pub description_html: Option<String>,
    /// Display price from the minimum variant price.
    pub price: String,
    /// Compare-at display price, only when the backend provided a
    /// compare-at range.
    pub compare_at_price: Option<String>,
    /// First image of the ordered image list.
    pub image: Option<String>,
    /// Full ordered image list.
    pub images: Vec<String>,
    /// Ordered typed media items.
    pub media: Vec<MediaItem>,
    /// First variant's ID - the default purchasable unit when no variant
    /// selection UI is present. Falls back to the product ID if the product
    /// has no variants.
    pub variant_id: String,
    /// Whether any variant is available.
    pub available_for_sale: bool,
}

/// Selected option on a product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    /// Option name (e.g., "Size").
    pub name: String,
    /// Selected value (e.g., "Large").
    pub value: String,
}

/// A purchasable variant with its own price and availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant ID.
    pub id: String,
    /// Variant title (combination of option values).
    pub title: String,
    /// Display price.
    pub price: String,
    /// Compare-at display price, if on sale.
    pub compare_at_price: Option<String>,
    /// Whether this variant is available for sale.
    pub available_for_sale: bool,
    /// Named option values for this variant.
    pub selected_options: Vec<SelectedOption>,
}

/// A product with its full variant expansion, for detail pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetail {
    /// The flat product projection.
    pub product: Product,
    /// Every variant, flattened.
    pub variants: Vec<ProductVariant>,
}

// =============================================================================
// Collection Types
// =============================================================================

/// A curated collection of products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    /// Collection ID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Collection title.
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// Collection image URL.
    pub image: Option<String>,
    /// Products in this collection.
    pub products: Vec<Product>,
}

// =============================================================================
// Policy Types
// =============================================================================

/// A single shop policy document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopPolicy {
    /// Policy title.
    pub title: String,
    /// Policy body (HTML).
    pub body: String,
    /// URL handle.
    pub handle: String,
}

/// The shop's policy documents, each optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopPolicies {
    /// Privacy policy.
    pub privacy_policy: Option<ShopPolicy>,
    /// Refund policy.
    pub refund_policy: Option<ShopPolicy>,
    /// Shipping policy.
    pub shipping_policy: Option<ShopPolicy>,
    /// Terms of service.
    pub terms_of_service: Option<ShopPolicy>,
}

// =============================================================================
// Pagination Types
// =============================================================================

/// Pagination information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Cursor for the last item, for fetching the next page.
    pub end_cursor: Option<String>,
}

/// One page of products.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPage {
    /// Products in this page.
    pub products: Vec<Product>,
    /// Pagination info.
    pub page_info: PageInfo,
}

// =============================================================================
// Cart Types
// =============================================================================

/// Input for one line when creating or extending an external cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineInput {
    /// Product variant ID.
    pub merchandise_id: String,
    /// Quantity to add.
    pub quantity: u32,
}

/// An external checkout cart held by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteCart {
    /// External cart/session ID.
    pub id: String,
    /// Hosted checkout URL.
    pub checkout_url: String,
}
