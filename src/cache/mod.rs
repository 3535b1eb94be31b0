// Cache module for follow lists and the self login.
// Stores fetched follow lists with a TTL on top of a pluggable key-value store.

pub mod follows;
pub mod paths;
pub mod store;

pub use follows::{CacheEntry, DEFAULT_TTL, FollowsCache};
pub use paths::{FOLLOWS_PREFIX, SELF_LOGIN_KEY, follows_key, store_path};
pub use store::{FileStore, KeyValueStore, MemoryStore};
