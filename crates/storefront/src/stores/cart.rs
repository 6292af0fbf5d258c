//! Persisted shopping cart store.
//!
//! One shared instance per running app holds the cart: an insertion-ordered
//! list of items unique per variant id, a cached checkout URL, and the
//! fingerprint of the backend store the cart belongs to. Any mutation to the
//! items invalidates the checkout URL - a stale checkout link must never
//! survive a cart change.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use driftwood_core::parse_display_price;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::persist::Persistence;
use crate::stores::keys;

/// A purchasable variant in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product ID (opaque).
    pub id: String,
    /// Variant ID - the uniqueness key within the cart.
    pub variant_id: String,
    /// Product title.
    pub title: String,
    /// Display price (e.g., `"$12.00"`).
    pub price: String,
    /// Product image URL.
    pub image: Option<String>,
    /// Quantity, at least 1 by caller convention.
    pub quantity: u32,
}

/// Persisted cart snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PersistedCart {
    items: Vec<CartItem>,
    checkout_url: Option<String>,
    store_version: String,
}

/// Shared, persisted shopping cart.
pub struct CartStore {
    persistence: Arc<dyn Persistence>,
    state: Mutex<PersistedCart>,
}

impl CartStore {
    /// Load the cart from persistence, migrating on store mismatch.
    ///
    /// A persisted cart whose `store_version` differs from the live
    /// `fingerprint` belongs to a different, incompatible backend store: the
    /// whole cart is discarded and the dependent external checkout session
    /// identifier is purged with it.
    pub fn load(persistence: Arc<dyn Persistence>, fingerprint: &str) -> Self {
        let persisted = match persistence.load(keys::CART) {
            Ok(Some(json)) => serde_json::from_str::<PersistedCart>(&json).ok(),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to load persisted cart");
                None
            }
        };

        let state = match persisted {
            Some(cart) if cart.store_version == fingerprint => cart,
            Some(_) => {
                // Cart from a different backend store: discard it and the
                // external session tied to it.
                if let Err(e) = persistence.remove(keys::CHECKOUT_SESSION) {
                    warn!(error = %e, "Failed to purge checkout session during migration");
                }
                let fresh = PersistedCart {
                    store_version: fingerprint.to_string(),
                    ..PersistedCart::default()
                };
                save_snapshot(persistence.as_ref(), &fresh);
                fresh
            }
            None => PersistedCart {
                store_version: fingerprint.to_string(),
                ..PersistedCart::default()
            },
        };

        Self {
            persistence,
            state: Mutex::new(state),
        }
    }

    /// Add an item.
    ///
    /// If an item with the same variant id exists only its quantity
    /// accumulates; the other fields keep their original values. Otherwise
    /// the item is appended. Clears the checkout URL.
    pub fn add_item(&self, item: CartItem) {
        let mut state = self.lock();
        if let Some(existing) = state
            .items
            .iter_mut()
            .find(|i| i.variant_id == item.variant_id)
        {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            state.items.push(item);
        }
        state.checkout_url = None;
        self.persist(&state);
    }

    /// Remove the item with the given variant id; no-op if absent. Clears
    /// the checkout URL either way.
    pub fn remove_item(&self, variant_id: &str) {
        let mut state = self.lock();
        state.items.retain(|i| i.variant_id != variant_id);
        state.checkout_url = None;
        self.persist(&state);
    }

    /// Set the quantity for the given variant verbatim; callers clamp to at
    /// least 1 before calling. No-op if the variant is absent. Clears the
    /// checkout URL either way.
    pub fn update_quantity(&self, variant_id: &str, quantity: u32) {
        let mut state = self.lock();
        if let Some(item) = state.items.iter_mut().find(|i| i.variant_id == variant_id) {
            item.quantity = quantity;
        }
        state.checkout_url = None;
        self.persist(&state);
    }

    /// Empty the cart and clear the checkout URL. The store fingerprint is
    /// untouched.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.items.clear();
        state.checkout_url = None;
        self.persist(&state);
    }

    /// Cache the checkout URL issued by the external backend.
    pub fn set_checkout_url(&self, url: Option<String>) {
        let mut state = self.lock();
        state.checkout_url = url;
        self.persist(&state);
    }

    /// Snapshot of the items in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.lock().items.clone()
    }

    /// The cached checkout URL, if the cart is unchanged since it was issued.
    #[must_use]
    pub fn checkout_url(&self) -> Option<String> {
        self.lock().checkout_url.clone()
    }

    /// Fingerprint of the backend store this cart belongs to.
    #[must_use]
    pub fn store_version(&self) -> String {
        self.lock().store_version.clone()
    }

    /// Total quantity across all items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lock().items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of parsed price times quantity across all items.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.lock()
            .items
            .iter()
            .map(|i| parse_display_price(&i.price) * f64::from(i.quantity))
            .sum()
    }

    fn persist(&self, state: &PersistedCart) {
        save_snapshot(self.persistence.as_ref(), state);
    }

    fn lock(&self) -> MutexGuard<'_, PersistedCart> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn save_snapshot(persistence: &dyn Persistence, state: &PersistedCart) {
    match serde_json::to_string(state) {
        Ok(json) => {
            if let Err(e) = persistence.save(keys::CART, &json) {
                warn!(error = %e, "Failed to persist cart");
            }
        }
        Err(e) => warn!(error = %e, "Failed to serialize cart"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::persist::MemoryPersistence;

    use super::*;

    fn item(variant_id: &str, quantity: u32) -> CartItem {
        CartItem {
            id: "gid://shopify/Product/1".to_string(),
            variant_id: variant_id.to_string(),
            title: "Cedar Candle".to_string(),
            price: "$12.50".to_string(),
            image: None,
            quantity,
        }
    }

    fn empty_store() -> (Arc<MemoryPersistence>, CartStore) {
        let persistence = Arc::new(MemoryPersistence::new());
        let store = CartStore::load(persistence.clone(), "store-a");
        (persistence, store)
    }

    #[test]
    fn test_add_item_accumulates_quantity_per_variant() {
        let (_, store) = empty_store();
        store.add_item(item("v1", 1));
        store.add_item(item("v1", 2));

        let items = store.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3);
    }

    #[test]
    fn test_add_item_keeps_existing_fields() {
        let (_, store) = empty_store();
        store.add_item(item("v1", 1));

        let mut changed = item("v1", 1);
        changed.title = "Renamed".to_string();
        changed.price = "$99.00".to_string();
        store.add_item(changed);

        let items = store.items();
        assert_eq!(items[0].title, "Cedar Candle");
        assert_eq!(items[0].price, "$12.50");
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn test_add_item_quantity_saturates() {
        let (_, store) = empty_store();
        store.add_item(item("v1", u32::MAX));
        store.add_item(item("v1", 2));
        assert_eq!(store.items()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let (_, store) = empty_store();
        store.add_item(item("v1", 1));
        store.add_item(item("v2", 1));
        store.add_item(item("v3", 1));
        store.remove_item("v2");

        let order: Vec<String> = store.items().into_iter().map(|i| i.variant_id).collect();
        assert_eq!(order, vec!["v1", "v3"]);
    }

    #[test]
    fn test_every_mutation_clears_checkout_url() {
        let (_, store) = empty_store();
        store.add_item(item("v1", 1));

        for mutate in [
            (|s: &CartStore| s.add_item(item("v2", 1))) as fn(&CartStore),
            |s| s.update_quantity("v1", 5),
            |s| s.remove_item("v2"),
        ] {
            store.set_checkout_url(Some("https://checkout.example/abc".to_string()));
            assert!(store.checkout_url().is_some());
            mutate(&store);
            assert!(store.checkout_url().is_none());
        }
    }

    #[test]
    fn test_update_quantity_is_verbatim_and_noop_when_absent() {
        let (_, store) = empty_store();
        store.add_item(item("v1", 3));

        store.update_quantity("v1", 7);
        assert_eq!(store.items()[0].quantity, 7);

        store.update_quantity("missing", 2);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].quantity, 7);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let (_, store) = empty_store();
        store.add_item(item("v1", 1));
        store.remove_item("missing");
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn test_clear_keeps_store_version() {
        let (_, store) = empty_store();
        store.add_item(item("v1", 1));
        store.set_checkout_url(Some("https://checkout.example/abc".to_string()));

        store.clear();
        assert!(store.items().is_empty());
        assert!(store.checkout_url().is_none());
        assert_eq!(store.store_version(), "store-a");
    }

    #[test]
    fn test_derived_count_and_subtotal() {
        let (_, store) = empty_store();
        store.add_item(item("v1", 2));
        let mut other = item("v2", 1);
        other.price = "$1,000.05".to_string();
        store.add_item(other);

        assert_eq!(store.item_count(), 3);
        assert!((store.subtotal() - (12.5 * 2.0 + 1000.05)).abs() < 1e-9);
    }

    #[test]
    fn test_reload_preserves_cart_for_same_store() {
        let (persistence, store) = empty_store();
        store.add_item(item("v1", 2));
        drop(store);

        let reloaded = CartStore::load(persistence, "store-a");
        assert_eq!(reloaded.items().len(), 1);
        assert_eq!(reloaded.items()[0].quantity, 2);
    }

    #[test]
    fn test_store_mismatch_resets_cart_and_purges_session() {
        let persistence = Arc::new(MemoryPersistence::new());
        persistence.save(keys::CHECKOUT_SESSION, "gid://shopify/Cart/old").unwrap();

        let store = CartStore::load(persistence.clone(), "store-a");
        store.add_item(item("v1", 1));
        store.set_checkout_url(Some("https://checkout.example/old".to_string()));
        drop(store);

        let migrated = CartStore::load(persistence.clone(), "store-b");
        assert!(migrated.items().is_empty());
        assert!(migrated.checkout_url().is_none());
        assert_eq!(migrated.store_version(), "store-b");
        assert!(!persistence.contains(keys::CHECKOUT_SESSION));
    }

    #[test]
    fn test_corrupt_snapshot_loads_empty_cart() {
        let persistence = Arc::new(MemoryPersistence::new());
        persistence.save(keys::CART, "not json").unwrap();

        let store = CartStore::load(persistence, "store-a");
        assert!(store.items().is_empty());
        assert_eq!(store.store_version(), "store-a");
    }
}
