// Paginated follow list fetcher.
// Pages through the follows API up to a page budget, reading through and writing to the cache.

use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::FollowsCache;
use crate::error::{MutualsError, Result};
use crate::twitch::{FollowListResult, FollowsApi, normalize_login};

/// Follows requested per page by default.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Fetches whole follow lists, one page request at a time.
#[derive(Clone)]
pub struct FollowsFetcher {
    api: Arc<dyn FollowsApi>,
    cache: FollowsCache,
    page_size: u32,
}

impl FollowsFetcher {
    pub fn new(api: Arc<dyn FollowsApi>, cache: FollowsCache) -> Self {
        Self {
            api,
            cache,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn cache(&self) -> &FollowsCache {
        &self.cache
    }

    /// Fetch `login`'s follow list using at most `page_budget` page requests.
    ///
    /// A cached list is returned without any request unless `force_refresh` is set.
    /// Every successful aggregation is cached, including partial ones.
    pub async fn fetch_follows(
        &self,
        login: &str,
        page_budget: u32,
        force_refresh: bool,
    ) -> Result<FollowListResult> {
        let login = normalize_login(login);
        if login.is_empty() {
            return Err(MutualsError::InvalidLogin(login));
        }

        if !force_refresh {
            if let Some(cached) = self.cache.get(&login).await? {
                debug!(login = %login, items = cached.items.len(), "Follow list served from cache");
                return Ok(cached);
            }
        }

        let budget = page_budget.max(1);
        let mut result = FollowListResult::empty(&login);
        let mut cursor: Option<String> = None;

        for page in 1..=budget {
            let Some(follows) = self
                .api
                .fetch_follows_page(&login, cursor.as_deref(), self.page_size)
                .await?
            else {
                debug!(login = %login, "Subject missing on remote");
                return Err(MutualsError::UserNotFound(login));
            };

            if let Some(total) = follows.total_count {
                result.total_count = total;
            }

            for edge in &follows.edges {
                if let Some(next) = &edge.cursor {
                    cursor = Some(next.clone());
                }
                if let Some(item) = edge.to_item() {
                    result.items.push(item);
                }
            }

            debug!(login = %login, page, items = result.items.len(), has_next = follows.has_next_page, "Fetched follows page");

            if !follows.has_next_page {
                break;
            }
            if page == budget {
                result.is_partial = true;
            }
        }

        self.cache.put(&login, &result).await?;

        info!(
            login = %login,
            items = result.items.len(),
            total = result.total_count,
            partial = result.is_partial,
            "Fetched follow list"
        );
        Ok(result)
    }
}
