//! Cart mutation payload conversions.

use crate::shopify::ShopifyError;
use crate::shopify::storefront::raw::{CartMutationPayload, RawUserError};
use crate::shopify::types::RemoteCart;

/// Unpack a cart mutation payload.
///
/// A mutation can fail two ways that a 200 response hides: a `userErrors`
/// list, or a null cart. Both fold into a `ShopifyError` here so callers see
/// a single error path.
pub fn convert_cart(
    payload: Option<CartMutationPayload>,
    operation: &str,
) -> Result<RemoteCart, ShopifyError> {
    let payload = payload.ok_or_else(|| {
        ShopifyError::GraphQL(vec![crate::shopify::GraphQLError::message(format!(
            "No payload in {operation} response"
        ))])
    })?;

    if !payload.user_errors.is_empty() {
        return Err(fold_user_errors(payload.user_errors));
    }

    payload
        .cart
        .map(|cart| RemoteCart {
            id: cart.id,
            checkout_url: cart.checkout_url,
        })
        .ok_or_else(|| {
            ShopifyError::GraphQL(vec![crate::shopify::GraphQLError::message(format!(
                "{operation} returned no cart"
            ))])
        })
}

/// Join mutation user errors into a single `UserError`, prefixing each
/// message with its field path when the API supplied one.
pub fn fold_user_errors(errors: Vec<RawUserError>) -> ShopifyError {
    ShopifyError::UserError(
        errors
            .into_iter()
            .map(|e| match e.field {
                Some(path) if !path.is_empty() => format!("{}: {}", path.join("."), e.message),
                _ => e.message,
            })
            .collect::<Vec<_>>()
            .join("; "),
    )
}
