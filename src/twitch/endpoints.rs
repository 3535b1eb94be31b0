// Twitch follow list endpoint.
// Defines the paginated follows query and the trait the fetcher pages through.

use async_trait::async_trait;

use crate::error::{MutualsError, Result};

use super::client::TwitchClient;
use super::types::{FollowsPage, UserData};

/// Paginated follows query. `lookupType: ALL` also resolves suspended users.
pub const FOLLOWS_QUERY: &str = r#"
query fetchUser($login: String, $first: Int = 100, $after: Cursor) {
  user(login: $login, lookupType: ALL) {
    follows(first: $first, after: $after) {
      totalCount
      pageInfo { hasNextPage }
      edges {
        cursor
        followedAt
        node {
          login
          displayName
          profileImageURL(width: 50)
        }
      }
    }
  }
}
"#;

/// Source of follow list pages.
#[async_trait]
pub trait FollowsApi: Send + Sync {
    /// Fetch one page of `login`'s follows after `after`.
    ///
    /// Returns `Ok(None)` when the remote has no such user.
    async fn fetch_follows_page(
        &self,
        login: &str,
        after: Option<&str>,
        first: u32,
    ) -> Result<Option<FollowsPage>>;
}

#[async_trait]
impl FollowsApi for TwitchClient {
    async fn fetch_follows_page(
        &self,
        login: &str,
        after: Option<&str>,
        first: u32,
    ) -> Result<Option<FollowsPage>> {
        let variables = serde_json::json!({
            "login": login,
            "after": after,
            "first": first,
        });
        let data: UserData = self.post_graphql(FOLLOWS_QUERY, variables).await?;
        page_from_user(data)
    }
}

/// Flatten the `user.follows` connection into a page.
pub(crate) fn page_from_user(data: UserData) -> Result<Option<FollowsPage>> {
    let Some(user) = data.user else {
        return Ok(None);
    };

    let follows = user
        .follows
        .ok_or_else(|| MutualsError::MalformedResponse("user has no follows field".to_string()))?;

    Ok(Some(FollowsPage {
        total_count: follows.total_count,
        has_next_page: follows.page_info.unwrap_or_default().has_next_page,
        edges: follows.edges,
    }))
}
