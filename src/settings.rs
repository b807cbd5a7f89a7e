//! Key/value runtime settings.
//!
//! Credentials, the `OneCore` base URL and the persisted bearer token are looked
//! up through [`Settings`] every time they are needed, so a value written with
//! [`Settings::set`] is picked up by the next request or token refresh.

use std::sync::{PoisonError, RwLock};

use mockall::automock;
use rustc_hash::FxHashMap;

/// `OneCore` API user name.
pub const ONECORE_USERNAME: &str = "onecore_username";

/// `OneCore` API password.
pub const ONECORE_PASSWORD: &str = "onecore_password";

/// `OneCore` API base URL, without trailing slash.
pub const ONECORE_BASE_URL: &str = "onecore_base_url";

/// Last bearer token issued by `OneCore`.
pub const ONECORE_API_TOKEN: &str = "onecore_api_token";

/// Bearer token for the external errand webhook.
pub const WEBHOOK_BEARER_TOKEN: &str = "x_webhook_bearer_token";

/// Key/value settings provider.
#[automock]
pub trait Settings: Send + Sync {
    /// Read a value; `None` when the key has never been set.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, overwriting any previous one.
    fn set(&self, key: &str, value: &str);
}

/// Process-local settings.
#[derive(Debug, Default)]
pub struct InMemorySettings {
    values: RwLock<FxHashMap<String, String>>,
}

impl InMemorySettings {
    /// Empty settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed settings from `(key, value)` pairs.
    #[must_use]
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: RwLock::new(
                values
                    .into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
            ),
        }
    }
}

impl Settings for InMemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let settings = InMemorySettings::new();

        assert_eq!(settings.get(ONECORE_API_TOKEN), None);
    }

    #[test]
    fn set_overwrites_previous_value() {
        let settings = InMemorySettings::with_values([(ONECORE_API_TOKEN, "old")]);

        settings.set(ONECORE_API_TOKEN, "new");

        assert_eq!(settings.get(ONECORE_API_TOKEN).as_deref(), Some("new"));
    }
}
