// Twitch follow list types.
// Domain records cached and returned to callers, plus the GraphQL wire shapes they are built from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalize a login for use as a lookup key.
pub fn normalize_login(login: &str) -> String {
    login.trim().to_lowercase()
}

/// A channel followed by some user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowItem {
    pub login: String,
    pub display_name: String,
    pub avatar_url: String,
    pub followed_at: Option<DateTime<Utc>>,
}

impl FollowItem {
    pub fn new(login: impl Into<String>) -> Self {
        let login = normalize_login(&login.into());
        Self {
            display_name: login.clone(),
            login,
            avatar_url: String::new(),
            followed_at: None,
        }
    }
}

/// A user's follow list, possibly truncated by a page budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowListResult {
    pub subject_login: String,
    pub total_count: u64,
    /// Items in cursor order, as returned by the API.
    pub items: Vec<FollowItem>,
    /// True when the page budget ran out before the last page.
    pub is_partial: bool,
}

impl FollowListResult {
    pub fn empty(subject_login: &str) -> Self {
        Self {
            subject_login: normalize_login(subject_login),
            total_count: 0,
            items: Vec::new(),
            is_partial: false,
        }
    }
}

/// One page of a follow list as reported by the API.
#[derive(Debug, Clone, Default)]
pub struct FollowsPage {
    /// Total follows reported for the subject, if present on this page.
    pub total_count: Option<u64>,
    pub has_next_page: bool,
    pub edges: Vec<FollowEdge>,
}

/// GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GqlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GqlError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GqlError {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserData {
    pub user: Option<UserNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserNode {
    pub follows: Option<FollowConnection>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FollowConnection {
    pub total_count: Option<u64>,
    pub page_info: Option<PageInfo>,
    #[serde(default)]
    pub edges: Vec<FollowEdge>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
}

/// Edge of the follows connection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowEdge {
    pub cursor: Option<String>,
    pub followed_at: Option<DateTime<Utc>>,
    pub node: Option<FollowNode>,
}

/// Followed channel as returned by GraphQL.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowNode {
    pub login: Option<String>,
    pub display_name: Option<String>,
    #[serde(rename = "profileImageURL")]
    pub profile_image_url: Option<String>,
}

impl FollowEdge {
    /// Convert to a follow item. Edges without a login are unusable.
    pub fn to_item(&self) -> Option<FollowItem> {
        let node = self.node.as_ref()?;
        let login = node.login.as_deref().map(normalize_login)?;
        if login.is_empty() {
            return None;
        }

        let display_name = node
            .display_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| login.clone());

        Some(FollowItem {
            login,
            display_name,
            avatar_url: node.profile_image_url.clone().unwrap_or_default(),
            followed_at: self.followed_at,
        })
    }
}
