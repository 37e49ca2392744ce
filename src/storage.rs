//! Key/value stores holding the operator's directory tokens.

use std::collections::HashMap;

use actix_session::{Session, SessionInsertError};

use crate::domain::auth::LogoutRequest;
use crate::domain::types::{AccessToken, RefreshToken};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

pub trait TokenStore {
    fn get_item(&self, key: &str) -> Option<String>;
}

/// Builds the logout body from whatever refresh token the store holds.
pub fn logout_request(store: &dyn TokenStore) -> LogoutRequest {
    LogoutRequest {
        token: store
            .get_item(REFRESH_TOKEN_KEY)
            .filter(|token| !token.trim().is_empty()),
    }
}

/// Reads the stored access token, if any.
pub fn access_token(store: &dyn TokenStore) -> Option<AccessToken> {
    store
        .get_item(ACCESS_TOKEN_KEY)
        .and_then(|token| AccessToken::new(token).ok())
}

/// Reads the stored refresh token, if any.
pub fn refresh_token(store: &dyn TokenStore) -> Option<RefreshToken> {
    store
        .get_item(REFRESH_TOKEN_KEY)
        .and_then(|token| RefreshToken::new(token).ok())
}

#[derive(Debug, Default, Clone)]
pub struct MemoryTokenStore {
    items: HashMap<String, String>,
}

impl MemoryTokenStore {
    pub fn set_item(&mut self, key: &str, value: impl Into<String>) {
        self.items.insert(key.to_string(), value.into());
    }
}

impl TokenStore for MemoryTokenStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }
}

/// Token store backed by the actix cookie session.
pub struct SessionTokenStore<'a> {
    session: &'a Session,
}

impl<'a> SessionTokenStore<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub fn store_tokens(
        &self,
        access_token: &AccessToken,
        refresh_token: &RefreshToken,
    ) -> Result<(), SessionInsertError> {
        self.session.insert(ACCESS_TOKEN_KEY, access_token.as_str())?;
        self.session.insert(REFRESH_TOKEN_KEY, refresh_token.as_str())?;
        Ok(())
    }

    pub fn clear(&self) {
        self.session.remove(ACCESS_TOKEN_KEY);
        self.session.remove(REFRESH_TOKEN_KEY);
    }
}

impl TokenStore for SessionTokenStore<'_> {
    fn get_item(&self, key: &str) -> Option<String> {
        match self.session.get::<String>(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Failed to read {key} from session: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn logout_body_carries_stored_refresh_token() {
        let mut store = MemoryTokenStore::default();
        store.set_item(REFRESH_TOKEN_KEY, "r-123");

        let body = serde_json::to_value(logout_request(&store)).unwrap();

        assert_eq!(body, json!({"token": "r-123"}));
    }

    #[test]
    fn logout_body_is_empty_without_refresh_token() {
        let store = MemoryTokenStore::default();

        let body = serde_json::to_value(logout_request(&store)).unwrap();

        assert_eq!(body, json!({}));
    }

    #[test]
    fn blank_tokens_are_treated_as_missing() {
        let mut store = MemoryTokenStore::default();
        store.set_item(ACCESS_TOKEN_KEY, " ");
        store.set_item(REFRESH_TOKEN_KEY, "");

        assert!(access_token(&store).is_none());
        assert!(refresh_token(&store).is_none());
        assert_eq!(logout_request(&store), LogoutRequest::default());
    }
}
