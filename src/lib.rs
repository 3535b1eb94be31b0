// Mutual follows between two Twitch users.
// Fetches follow lists page by page, caches them with a TTL, and intersects them.

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod identity;
pub mod logging;
pub mod twitch;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use engine::{MutualsService, Request, Response};
pub use error::{ErrorCode, MutualsError, Result};
