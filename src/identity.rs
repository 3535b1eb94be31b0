// Self login storage.
// Persists the normalized login of the visiting user next to the follows cache.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::cache::{KeyValueStore, SELF_LOGIN_KEY};
use crate::error::{MutualsError, Result};
use crate::twitch::normalize_login;

/// Normalize and validate a login typed by a user.
///
/// Twitch logins are lowercase letters, digits and underscores.
pub fn validate_login(raw: &str) -> Result<String> {
    let login = normalize_login(raw);
    let valid = !login.is_empty()
        && login
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if valid {
        Ok(login)
    } else {
        Err(MutualsError::InvalidLogin(raw.to_string()))
    }
}

/// Get/set access to the self login.
#[derive(Clone)]
pub struct Identity {
    store: Arc<dyn KeyValueStore>,
}

impl Identity {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored self login, if any.
    pub async fn get(&self) -> Result<Option<String>> {
        match self.store.get(SELF_LOGIN_KEY).await? {
            Some(Value::String(login)) if !login.is_empty() => Ok(Some(login)),
            Some(Value::String(_)) | None => Ok(None),
            Some(other) => {
                warn!(value = %other, "Ignoring non-string self login");
                Ok(None)
            }
        }
    }

    /// The stored self login, or `NoIdentity`.
    pub async fn require(&self) -> Result<String> {
        self.get().await?.ok_or(MutualsError::NoIdentity)
    }

    /// Validate and store the self login. Returns the normalized value.
    pub async fn set(&self, raw: &str) -> Result<String> {
        let login = validate_login(raw)?;
        self.store
            .set(SELF_LOGIN_KEY, Value::String(login.clone()))
            .await?;
        info!(login = %login, "Self login updated");
        Ok(login)
    }
}
