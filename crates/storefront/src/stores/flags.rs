//! Lightweight persisted UI dismissal flags.
//!
//! Unstructured string flags (cookie-consent choice, newsletter-popup
//! dismissal). Each flag is its own persistence key; there is no schema to
//! migrate.

use std::sync::Arc;

use tracing::warn;

use crate::persist::Persistence;
use crate::stores::keys;

/// Persisted string flags for one-off UI state.
pub struct UiFlags {
    persistence: Arc<dyn Persistence>,
}

impl UiFlags {
    /// Create a flag store over the shared persistence.
    #[must_use]
    pub fn new(persistence: Arc<dyn Persistence>) -> Self {
        Self { persistence }
    }

    /// Set a flag value (e.g., `set("cookie-consent", "accepted")`).
    pub fn set(&self, name: &str, value: &str) {
        if let Err(e) = self.persistence.save(&flag_key(name), value) {
            warn!(flag = name, error = %e, "Failed to persist flag");
        }
    }

    /// Get a flag value, if set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        match self.persistence.load(&flag_key(name)) {
            Ok(value) => value,
            Err(e) => {
                warn!(flag = name, error = %e, "Failed to load flag");
                None
            }
        }
    }

    /// Whether the flag has any value.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove a flag.
    pub fn clear(&self, name: &str) {
        if let Err(e) = self.persistence.remove(&flag_key(name)) {
            warn!(flag = name, error = %e, "Failed to clear flag");
        }
    }
}

fn flag_key(name: &str) -> String {
    format!("{}{name}", keys::FLAG_PREFIX)
}

#[cfg(test)]
mod tests {
    use crate::persist::MemoryPersistence;

    use super::*;

    #[test]
    fn test_set_get_clear() {
        let flags = UiFlags::new(Arc::new(MemoryPersistence::new()));
        assert!(!flags.is_set("cookie-consent"));

        flags.set("cookie-consent", "accepted");
        assert_eq!(flags.get("cookie-consent").as_deref(), Some("accepted"));
        assert!(flags.is_set("cookie-consent"));

        flags.clear("cookie-consent");
        assert!(!flags.is_set("cookie-consent"));
    }

    #[test]
    fn test_flags_are_independent() {
        let flags = UiFlags::new(Arc::new(MemoryPersistence::new()));
        flags.set("newsletter-dismissed", "true");
        assert!(!flags.is_set("cookie-consent"));
        assert!(flags.is_set("newsletter-dismissed"));
    }
}
