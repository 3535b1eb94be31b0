// Twitch API module.
// Provides the GraphQL client and types for fetching follow lists.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::TwitchClient;
pub use endpoints::{FOLLOWS_QUERY, FollowsApi};
pub use types::*;
