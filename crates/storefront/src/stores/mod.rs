//! Persisted client-side state stores.
//!
//! Each store owns one persistence key, guards its in-memory state with a
//! mutex, and writes the full snapshot back synchronously on every mutation
//! (last write wins). A failed save is logged and does not roll back the
//! in-memory mutation.

pub mod cart;
pub mod favorites;
pub mod flags;
pub mod recently_viewed;

pub use cart::{CartItem, CartStore};
pub use favorites::{FavoriteItem, FavoritesStore};
pub use flags::UiFlags;
pub use recently_viewed::{RecentlyViewedEntry, RecentlyViewedStore};

/// Persistence keys, schema-versioned where the value has structure.
pub mod keys {
    /// Cart snapshot: items, checkout URL cache, store fingerprint.
    pub const CART: &str = "cart/v1";
    /// Favorites snapshot.
    pub const FAVORITES: &str = "favorites/v1";
    /// Recently viewed product ring.
    pub const RECENTLY_VIEWED: &str = "recently-viewed/v1";
    /// External checkout session (cart) identifier.
    pub const CHECKOUT_SESSION: &str = "checkout-session";
    /// Prefix for unstructured UI dismissal flags.
    pub const FLAG_PREFIX: &str = "flag/";
}
