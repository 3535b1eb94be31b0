// Cache path utilities.
// Locates the on-disk store under the platform cache directory.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::twitch::normalize_login;

/// Key prefix owned by the follows cache.
pub const FOLLOWS_PREFIX: &str = "follows:";

/// Key holding the self login.
pub const SELF_LOGIN_KEY: &str = "self-login";

/// Get the base cache directory (~/.cache/mutuals on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "mutuals").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the default store document.
pub fn store_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("store.json"))
}

/// Store key for a login's cached follow list.
pub fn follows_key(login: &str) -> String {
    format!("{}{}", FOLLOWS_PREFIX, normalize_login(login))
}
