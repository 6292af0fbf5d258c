//! Tracing subscriber setup for embedding applications.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// Defaults to info level for this crate if `RUST_LOG` is not set. Call once
/// at startup from the embedding binary; library code only emits spans and
/// events and never installs a subscriber on its own.
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "driftwood_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
