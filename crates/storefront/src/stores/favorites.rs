//! Persisted saved-favorites store.
//!
//! Favorites are product-level (not variant-specific), unique per product
//! id, and independent of the cart and checkout session lifecycle - no
//! cross-store invalidation applies here.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::persist::Persistence;
use crate::stores::keys;

/// A saved product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteItem {
    /// Product ID - the uniqueness key.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Display price.
    pub price: String,
    /// Product image URL.
    pub image: Option<String>,
    /// Whether the product is currently available.
    pub available_for_sale: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PersistedFavorites {
    items: Vec<FavoriteItem>,
}

/// Shared, persisted favorites list.
pub struct FavoritesStore {
    persistence: Arc<dyn Persistence>,
    state: Mutex<PersistedFavorites>,
}

impl FavoritesStore {
    /// Load favorites from persistence. An unreadable snapshot loads empty.
    pub fn load(persistence: Arc<dyn Persistence>) -> Self {
        let state = match persistence.load(keys::FAVORITES) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_default(),
            Ok(None) => PersistedFavorites::default(),
            Err(e) => {
                warn!(error = %e, "Failed to load persisted favorites");
                PersistedFavorites::default()
            }
        };

        Self {
            persistence,
            state: Mutex::new(state),
        }
    }

    /// Add a favorite; no-op if the product id is already present.
    pub fn add_item(&self, item: FavoriteItem) {
        let mut state = self.lock();
        if !state.items.iter().any(|i| i.id == item.id) {
            state.items.push(item);
            self.persist(&state);
        }
    }

    /// Remove the favorite with the given product id; no-op if absent.
    pub fn remove_item(&self, id: &str) {
        let mut state = self.lock();
        let before = state.items.len();
        state.items.retain(|i| i.id != id);
        if state.items.len() != before {
            self.persist(&state);
        }
    }

    /// Toggle a favorite.
    ///
    /// Returns `true` when the item was added and `false` when it was
    /// removed - the contract the UI depends on to choose between "added"
    /// and "removed" feedback.
    pub fn toggle_item(&self, item: FavoriteItem) -> bool {
        let mut state = self.lock();
        let added = if state.items.iter().any(|i| i.id == item.id) {
            state.items.retain(|i| i.id != item.id);
            false
        } else {
            state.items.push(item);
            true
        };
        self.persist(&state);
        added
    }

    /// Whether the product id is saved.
    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.lock().items.iter().any(|i| i.id == id)
    }

    /// Empty the favorites list.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.items.clear();
        self.persist(&state);
    }

    /// Snapshot of the favorites in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<FavoriteItem> {
        self.lock().items.clone()
    }

    fn persist(&self, state: &PersistedFavorites) {
        match serde_json::to_string(state) {
            Ok(json) => {
                if let Err(e) = self.persistence.save(keys::FAVORITES, &json) {
                    warn!(error = %e, "Failed to persist favorites");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize favorites"),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PersistedFavorites> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
