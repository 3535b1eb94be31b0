// Runtime configuration.
// Defaults for the Twitch endpoint, page budgets, cache TTL and retry policy, overridable from the environment.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::{DEFAULT_TTL, store_path};
use crate::error::{MutualsError, Result};

pub const DEFAULT_GQL_URL: &str = "https://gql.twitch.tv/gql";
/// Public client id of the Twitch web player.
pub const DEFAULT_CLIENT_ID: &str = "kd1unb4b3q4t58fwlpcbzcbnm76a8fp";

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gql_url: String,
    pub client_id: String,
    /// Follows requested per page.
    pub page_size: u32,
    /// Page budget for preview requests (about 300 follows).
    pub preview_pages: u32,
    /// Page budget for full requests (about 2000 follows).
    pub full_pages: u32,
    /// Number of mutual follows in the `top` slice.
    pub top_n: usize,
    #[serde(with = "secs")]
    pub cache_ttl: Duration,
    /// Total attempts per request, including the first.
    pub retry_attempts: u32,
    #[serde(with = "millis")]
    pub retry_delay: Duration,
    /// Store document location. `None` keeps everything in memory.
    pub store_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gql_url: DEFAULT_GQL_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            page_size: 100,
            preview_pages: 3,
            full_pages: 20,
            top_n: 6,
            cache_ttl: DEFAULT_TTL,
            retry_attempts: 2,
            retry_delay: Duration::from_secs(1),
            store_path: store_path(),
        }
    }
}

impl Config {
    /// Defaults overlaid with `MUTUALS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config reading overrides through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("MUTUALS_GQL_URL") {
            config.gql_url = url;
        }
        if let Some(id) = lookup("MUTUALS_CLIENT_ID") {
            config.client_id = id;
        }
        if let Some(v) = lookup("MUTUALS_PAGE_SIZE") {
            config.page_size = parse_var("MUTUALS_PAGE_SIZE", &v)?;
        }
        if let Some(v) = lookup("MUTUALS_PREVIEW_PAGES") {
            config.preview_pages = parse_var("MUTUALS_PREVIEW_PAGES", &v)?;
        }
        if let Some(v) = lookup("MUTUALS_FULL_PAGES") {
            config.full_pages = parse_var("MUTUALS_FULL_PAGES", &v)?;
        }
        if let Some(v) = lookup("MUTUALS_TOP_N") {
            config.top_n = parse_var("MUTUALS_TOP_N", &v)?;
        }
        if let Some(v) = lookup("MUTUALS_CACHE_TTL_SECS") {
            config.cache_ttl = Duration::from_secs(parse_var("MUTUALS_CACHE_TTL_SECS", &v)?);
        }
        if let Some(v) = lookup("MUTUALS_RETRY_ATTEMPTS") {
            config.retry_attempts = parse_var("MUTUALS_RETRY_ATTEMPTS", &v)?;
        }
        if let Some(v) = lookup("MUTUALS_RETRY_DELAY_MS") {
            config.retry_delay = Duration::from_millis(parse_var("MUTUALS_RETRY_DELAY_MS", &v)?);
        }
        if let Some(path) = lookup("MUTUALS_STORE") {
            config.store_path = match path.as_str() {
                "" | "memory" => None,
                _ => Some(PathBuf::from(path)),
            };
        }

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| MutualsError::Other(format!("Invalid value for {}: {:?}", name, value)))
}

mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
