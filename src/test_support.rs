// Test helpers.
// A scripted follows API that serves fixed follow lists page by page, and a store that rejects writes.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::cache::{KeyValueStore, MemoryStore};
use crate::error::{MutualsError, Result};
use crate::twitch::{FollowEdge, FollowItem, FollowNode, FollowsApi, FollowsPage};

/// Follow items with the given logins.
pub fn items(logins: &[&str]) -> Vec<FollowItem> {
    logins.iter().map(|login| FollowItem::new(*login)).collect()
}

/// Logins of `items`, in order.
pub fn logins(items: &[FollowItem]) -> Vec<&str> {
    items.iter().map(|item| item.login.as_str()).collect()
}

/// In-memory follows API. Cursors are item offsets.
#[derive(Default)]
pub struct ScriptedApi {
    users: HashMap<String, Vec<FollowEdge>>,
    failures: Mutex<HashMap<String, VecDeque<MutualsError>>>,
    calls: Mutex<HashMap<String, usize>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user following `follows`, in that order.
    pub fn with_user<S: AsRef<str>>(mut self, login: &str, follows: &[S]) -> Self {
        let edges = follows
            .iter()
            .map(|follow| FollowEdge {
                cursor: None,
                followed_at: None,
                node: Some(FollowNode {
                    login: Some(follow.as_ref().to_string()),
                    display_name: Some(follow.as_ref().to_uppercase()),
                    profile_image_url: None,
                }),
            })
            .collect();
        self.users.insert(login.to_string(), edges);
        self
    }

    /// Append an edge without a node to a registered user.
    pub fn with_blank_edge(mut self, login: &str) -> Self {
        self.users
            .entry(login.to_string())
            .or_default()
            .push(FollowEdge::default());
        self
    }

    /// Make the next request for `login` fail with `err`.
    pub fn fail_next(&self, login: &str, err: MutualsError) {
        self.failures
            .lock()
            .unwrap()
            .entry(login.to_string())
            .or_default()
            .push_back(err);
    }

    /// Page requests issued for `login`, failed ones included.
    pub fn calls(&self, login: &str) -> usize {
        self.calls.lock().unwrap().get(login).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl FollowsApi for ScriptedApi {
    async fn fetch_follows_page(
        &self,
        login: &str,
        after: Option<&str>,
        first: u32,
    ) -> Result<Option<FollowsPage>> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(login.to_string())
            .or_default() += 1;

        let failure = self
            .failures
            .lock()
            .unwrap()
            .get_mut(login)
            .and_then(|queue| queue.pop_front());
        if let Some(err) = failure {
            return Err(err);
        }

        let Some(edges) = self.users.get(login) else {
            return Ok(None);
        };

        let start: usize = after.map(|c| c.parse().unwrap()).unwrap_or(0);
        let end = (start + first as usize).min(edges.len());
        let page = edges[start..end]
            .iter()
            .enumerate()
            .map(|(i, edge)| FollowEdge {
                cursor: Some((start + i + 1).to_string()),
                ..edge.clone()
            })
            .collect();

        Ok(Some(FollowsPage {
            total_count: Some(edges.len() as u64),
            has_next_page: end < edges.len(),
            edges: page,
        }))
    }
}

/// Store that serves reads from `inner` and fails every write.
pub struct ReadOnlyStore {
    inner: MemoryStore,
}

impl ReadOnlyStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, _value: Value) -> Result<()> {
        Err(MutualsError::Storage(format!("read-only store, cannot write {key}")))
    }

    async fn remove(&self, key: &str) -> Result<()> {
        Err(MutualsError::Storage(format!("read-only store, cannot remove {key}")))
    }

    async fn keys(&self) -> Result<Vec<String>> {
        self.inner.keys().await
    }
}
