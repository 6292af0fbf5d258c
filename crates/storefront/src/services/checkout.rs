//! Checkout handoff: turn the local cart into a hosted checkout URL.

use tracing::{info, instrument, warn};

use crate::error::AppError;
use crate::persist::Persistence;
use crate::shopify::types::CartLineInput;
use crate::state::AppState;
use crate::stores::keys;

/// Begin checkout for the current cart.
///
/// Creates a fresh external cart from the local cart lines and returns its
/// hosted checkout URL. Any previously stored checkout session is discarded
/// first; Shopify carts are cheap and short-lived, and a fresh cart always
/// reflects the local lines exactly.
///
/// On success the URL is also recorded on the cart store, where it stays
/// valid until the next item mutation.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] when the cart is empty, or a Shopify
/// error when cart creation fails (including the unconfigured state).
#[instrument(skip(state))]
pub async fn begin_checkout(state: &AppState) -> Result<String, AppError> {
    let items = state.cart().items();
    if items.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    if let Err(e) = state.persistence().remove(keys::CHECKOUT_SESSION) {
        warn!(error = %e, "Failed to discard previous checkout session");
    }

    let lines = items
        .iter()
        .map(|item| CartLineInput {
            merchandise_id: item.variant_id.clone(),
            quantity: item.quantity,
        })
        .collect();

    let cart = state.storefront().create_cart(lines).await?;

    if let Err(e) = state.persistence().save(keys::CHECKOUT_SESSION, &cart.id) {
        warn!(error = %e, "Failed to persist checkout session");
    }

    state.cart().set_checkout_url(Some(cart.checkout_url.clone()));
    info!(cart_id = %cart.id, "Checkout session created");

    Ok(cart.checkout_url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use crate::config::{ShopifyStorefrontConfig, StorefrontConfig};
    use crate::persist::MemoryPersistence;
    use crate::shopify::ShopifyError;
    use crate::stores::CartItem;

    use super::*;

    fn unconfigured_state(persistence: Arc<MemoryPersistence>) -> AppState {
        AppState::new(
            StorefrontConfig {
                shopify: ShopifyStorefrontConfig {
                    store: None,
                    api_version: "2026-01".to_string(),
                    storefront_access_token: None,
                },
                state_dir: PathBuf::from(".driftwood/state"),
            },
            persistence,
        )
    }

    fn item(variant: &str) -> CartItem {
        CartItem {
            id: "p1".to_string(),
            variant_id: variant.to_string(),
            title: "Cedar Candle".to_string(),
            price: "$12.50".to_string(),
            image: None,
            quantity: 1,
        }
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected() {
        let state = unconfigured_state(Arc::new(MemoryPersistence::new()));

        let err = begin_checkout(&state).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_stale_session_discarded_even_when_creation_fails() {
        let persistence = Arc::new(MemoryPersistence::new());
        persistence
            .save(keys::CHECKOUT_SESSION, "gid://shopify/Cart/stale")
            .unwrap();

        let state = unconfigured_state(persistence.clone());
        state.cart().add_item(item("v1"));

        let err = begin_checkout(&state).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Shopify(ShopifyError::Unconfigured)
        ));
        // The stale session was purged before the attempt
        assert!(!persistence.contains(keys::CHECKOUT_SESSION));
        assert!(state.cart().checkout_url().is_none());
    }
}
