// Request orchestrator.
// Resolves the self login, fetches both follow lists concurrently with retry, and intersects them.

use std::sync::Arc;

use tracing::{info, warn};

use crate::cache::{FileStore, FollowsCache, KeyValueStore, MemoryStore};
use crate::config::Config;
use crate::error::{MutualsError, Result};
use crate::identity::Identity;
use crate::twitch::{FollowListResult, FollowsApi, TwitchClient, normalize_login};

use super::fetcher::FollowsFetcher;
use super::intersect::intersect;
use super::message::{FullIntersection, Payload, PreviewIntersection, Request, Response};
use super::retry::RetryPolicy;

/// Page budgets and preview size used by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budgets {
    pub preview_pages: u32,
    pub full_pages: u32,
    pub top_n: usize,
}

/// Mutual follows service answering [`Request`]s.
pub struct MutualsService {
    fetcher: FollowsFetcher,
    identity: Identity,
    retry: RetryPolicy,
    budgets: Budgets,
}

impl MutualsService {
    /// Wire a service over an API and a store using `config`.
    pub fn new(api: Arc<dyn FollowsApi>, store: Arc<dyn KeyValueStore>, config: &Config) -> Self {
        let cache = FollowsCache::new(store.clone(), config.cache_ttl);
        let fetcher = FollowsFetcher::new(api, cache).with_page_size(config.page_size);

        Self {
            fetcher,
            identity: Identity::new(store),
            retry: RetryPolicy::from_config(config),
            budgets: Budgets {
                preview_pages: config.preview_pages,
                full_pages: config.full_pages,
                top_n: config.top_n,
            },
        }
    }

    /// Build the production service: Twitch client plus file or memory store.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let api: Arc<dyn FollowsApi> = Arc::new(TwitchClient::from_config(config)?);
        let store: Arc<dyn KeyValueStore> = match &config.store_path {
            Some(path) => Arc::new(FileStore::open(path).await?),
            None => Arc::new(MemoryStore::new()),
        };
        Ok(Self::new(api, store, config))
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn budgets(&self) -> Budgets {
        self.budgets
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn cache(&self) -> &FollowsCache {
        self.fetcher.cache()
    }

    /// Dispatch one request and wrap the outcome.
    pub async fn handle(&self, request: Request) -> Response {
        let kind = request.kind();
        let result = match request {
            Request::PreviewIntersection {
                target_login,
                force_refresh,
            } => self
                .preview(&target_login, force_refresh)
                .await
                .map(Payload::Preview),
            Request::FullIntersection {
                target_login,
                force_refresh,
            } => self
                .full(&target_login, force_refresh)
                .await
                .map(Payload::Full),
            Request::InvalidateOne { login } => {
                self.cache().invalidate(&login).await.map(|_| Payload::Done {})
            }
            Request::InvalidateAll => self
                .cache()
                .invalidate_all()
                .await
                .map(|count| Payload::Cleared { count }),
            Request::GetSelfLogin => self
                .identity
                .get()
                .await
                .map(|login| Payload::SelfLogin { login }),
            Request::SetSelfLogin { login } => {
                self.identity.set(&login).await.map(|_| Payload::Done {})
            }
        };

        if let Err(e) = &result {
            warn!(request = kind, error = %e, "Request failed");
        }
        Response::from(result)
    }

    /// Mutual follows over the preview budget. Always reported as partial.
    pub async fn preview(&self, target_login: &str, force_refresh: bool) -> Result<PreviewIntersection> {
        let (me, target) = self
            .fetch_pair(target_login, self.budgets.preview_pages, force_refresh)
            .await?;

        let mutual = intersect(&me.items, &target.items);
        info!(target = %target.subject_login, total = mutual.total, "Preview intersection computed");

        Ok(PreviewIntersection {
            top: mutual.items.iter().take(self.budgets.top_n).cloned().collect(),
            total: mutual.total,
            is_partial: true,
            target_login: target.subject_login,
        })
    }

    /// Mutual follows over the full budget.
    pub async fn full(&self, target_login: &str, force_refresh: bool) -> Result<FullIntersection> {
        let (me, target) = self
            .fetch_pair(target_login, self.budgets.full_pages, force_refresh)
            .await?;

        let mutual = intersect(&me.items, &target.items);
        let is_partial = me.is_partial || target.is_partial;
        info!(
            target = %target.subject_login,
            total = mutual.total,
            partial = is_partial,
            "Full intersection computed"
        );

        Ok(FullIntersection {
            top: mutual.items.iter().take(self.budgets.top_n).cloned().collect(),
            total: mutual.total,
            all_items: mutual.items,
            is_partial,
            target_login: target.subject_login,
        })
    }

    /// Fetch the self and target lists together under the retry policy.
    ///
    /// Both fetches run to completion even if one fails, so each caches its own success.
    async fn fetch_pair(
        &self,
        target_login: &str,
        page_budget: u32,
        force_refresh: bool,
    ) -> Result<(FollowListResult, FollowListResult)> {
        let self_login = self.identity.require().await?;
        let target_login = normalize_login(target_login);
        if target_login.is_empty() {
            return Err(MutualsError::InvalidLogin(target_login));
        }

        let fetcher = &self.fetcher;
        let me = self_login.as_str();
        let target = target_login.as_str();
        let retryable = self.retry.retryable;

        self.retry
            .run(|| async move {
                let (mine, theirs) = tokio::join!(
                    fetcher.fetch_follows(me, page_budget, force_refresh),
                    fetcher.fetch_follows(target, page_budget, force_refresh),
                );
                join_pair(mine, theirs, retryable)
            })
            .await
    }
}

/// Combine the two fetch outcomes of one request.
///
/// When both fail, a final error wins over a retryable one; otherwise the self error is kept.
fn join_pair<A, B>(
    mine: Result<A>,
    theirs: Result<B>,
    retryable: fn(&MutualsError) -> bool,
) -> Result<(A, B)> {
    match (mine, theirs) {
        (Ok(mine), Ok(theirs)) => Ok((mine, theirs)),
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
        (Err(mine), Err(theirs)) => {
            if retryable(&mine) && !retryable(&theirs) {
                Err(theirs)
            } else {
                Err(mine)
            }
        }
    }
}
