//! Application state shared across all UI surfaces.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::persist::Persistence;
use crate::shopify::StorefrontClient;
use crate::stores::{CartStore, FavoritesStore, RecentlyViewedStore, UiFlags};

/// Application state shared across all consumers.
///
/// This struct is cheaply cloneable via `Arc` and provides the single shared
/// instance of every store - one cart, one favorites list per running app.
/// The persistence backend is injected so embedders and tests choose between
/// file-backed and in-memory state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    storefront: StorefrontClient,
    cart: CartStore,
    favorites: FavoritesStore,
    recently_viewed: RecentlyViewedStore,
    flags: UiFlags,
    persistence: Arc<dyn Persistence>,
}

impl AppState {
    /// Create the application state.
    ///
    /// Runs the cart's store-version migration against the live config
    /// fingerprint: a cart persisted against a different backend store is
    /// discarded here, along with its external checkout session.
    #[must_use]
    pub fn new(config: StorefrontConfig, persistence: Arc<dyn Persistence>) -> Self {
        let storefront = StorefrontClient::new(&config.shopify);
        let cart = CartStore::load(persistence.clone(), &config.shopify.fingerprint());
        let favorites = FavoritesStore::load(persistence.clone());
        let recently_viewed = RecentlyViewedStore::load(persistence.clone());
        let flags = UiFlags::new(persistence.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                storefront,
                cart,
                favorites,
                recently_viewed,
                flags,
                persistence,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the Shopify Storefront API client.
    #[must_use]
    pub fn storefront(&self) -> &StorefrontClient {
        &self.inner.storefront
    }

    /// Get a reference to the shared cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the shared favorites store.
    #[must_use]
    pub fn favorites(&self) -> &FavoritesStore {
        &self.inner.favorites
    }

    /// Get a reference to the recently-viewed store.
    #[must_use]
    pub fn recently_viewed(&self) -> &RecentlyViewedStore {
        &self.inner.recently_viewed
    }

    /// Get a reference to the UI flags store.
    #[must_use]
    pub fn flags(&self) -> &UiFlags {
        &self.inner.flags
    }

    /// Get the shared persistence backend.
    #[must_use]
    pub fn persistence(&self) -> &Arc<dyn Persistence> {
        &self.inner.persistence
    }
}
