//! Bearer token handling.

use std::{fmt, sync::Arc};

use zeroize::Zeroize;

use crate::settings::{ONECORE_API_TOKEN, Settings};

/// Opaque `OneCore` bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wrap a raw token value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw token value, for building the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(**redacted**)")
    }
}

impl Drop for Token {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Persists the current bearer token in [`Settings`].
#[derive(Clone)]
pub struct TokenStore {
    settings: Arc<dyn Settings>,
}

impl TokenStore {
    /// Store tokens under the `OneCore` API token setting.
    #[must_use]
    pub fn new(settings: Arc<dyn Settings>) -> Self {
        Self { settings }
    }

    /// Current token; an empty stored value counts as no token.
    pub fn get(&self) -> Option<Token> {
        self.settings
            .get(ONECORE_API_TOKEN)
            .filter(|value| !value.is_empty())
            .map(Token)
    }

    /// Replace the stored token.
    pub fn set(&self, token: &Token) {
        self.settings.set(ONECORE_API_TOKEN, token.expose());
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore").finish_non_exhaustive()
    }
}
