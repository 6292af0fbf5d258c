//! Conversions from raw wire payloads to flat domain types.
//!
//! All conversions are pure and synchronous; the client calls them on fully
//! deserialized payloads.

mod cart;
mod collections;
mod products;

pub use cart::convert_cart;
pub use collections::{convert_collection, convert_policies};
pub use products::{convert_page_info, transform_product, transform_product_detail};
