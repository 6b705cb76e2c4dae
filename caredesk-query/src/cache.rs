//! The query cache.
//!
//! Maps [`QueryKey`]s to cached pages, in-flight fetches, or terminal
//! errors. One cache instance is scoped to an owning view context and dies
//! with it; nothing here persists.

use crate::error::{QueryError, QueryResult};
use crate::key::QueryKey;
use crate::page::Page;
use caredesk_types::ResourceKind;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tracing::debug;

type SharedFetch<T> = Shared<BoxFuture<'static, QueryResult<Arc<Page<T>>>>>;

enum Entry<T> {
    /// A fetch is in flight. `generation` ties the eventual write-back to
    /// this particular insertion, so a fetch that completes after its entry
    /// was invalidated cannot resurrect it.
    Pending {
        generation: u64,
        task: SharedFetch<T>,
    },
    Resolved(Arc<Page<T>>),
    Failed(QueryError),
}

/// Observable state of one cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryState {
    /// No entry for the key; the next resolve will fetch.
    Idle,
    Loading,
    Success,
    Error,
}

struct CacheState<T> {
    entries: HashMap<QueryKey, Entry<T>>,
    next_generation: u64,
}

struct CacheInner<T> {
    state: Mutex<CacheState<T>>,
}

/// Request/result cache with single-flight deduplication.
///
/// Concurrent `resolve` calls for structurally equal keys share one
/// underlying fetch and observe the same outcome. A failed fetch is held
/// as terminal state for its key, observed as [`QueryState::Error`],
/// until the key is invalidated or explicitly refetched; the cache never
/// retries on its own.
pub struct QueryCache<T> {
    inner: Arc<CacheInner<T>>,
}

impl<T> Clone for QueryCache<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> QueryCache<T> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(CacheInner {
                state: Mutex::new(CacheState {
                    entries: HashMap::new(),
                    next_generation: 0,
                }),
            }),
        }
    }

    /// Observable state of the entry for `key`.
    pub fn peek(&self, key: &QueryKey) -> QueryState {
        let state = self.inner.state.lock().unwrap();
        match state.entries.get(key) {
            None => QueryState::Idle,
            Some(Entry::Pending { .. }) => QueryState::Loading,
            Some(Entry::Resolved(_)) => QueryState::Success,
            Some(Entry::Failed(_)) => QueryState::Error,
        }
    }

    /// Returns the resolved page for `key`, if any, without fetching.
    pub fn get(&self, key: &QueryKey) -> Option<Arc<Page<T>>> {
        let state = self.inner.state.lock().unwrap();
        match state.entries.get(key) {
            Some(Entry::Resolved(page)) => Some(Arc::clone(page)),
            _ => None,
        }
    }

    /// Drops every entry whose key is of `kind`, regardless of filters or
    /// page. Returns how many entries were dropped.
    pub fn invalidate_kind(&self, kind: ResourceKind) -> usize {
        let mut state = self.inner.state.lock().unwrap();
        let before = state.entries.len();
        state.entries.retain(|key, _| key.kind != kind);
        let dropped = before - state.entries.len();
        if dropped > 0 {
            debug!(%kind, dropped, "invalidated query cache entries");
        }
        dropped
    }

    /// Drops all entries.
    pub fn clear(&self) {
        let mut state = self.inner.state.lock().unwrap();
        state.entries.clear();
    }

    /// Number of entries currently held (any state).
    pub fn len(&self) -> usize {
        self.inner.state.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Send + Sync + 'static> QueryCache<T> {
    /// Resolves `key` from cache, or by running `fetch`.
    ///
    /// `fetch` is only invoked on a cache miss; a caller arriving while an
    /// equal key is already in flight joins that fetch and its closure is
    /// dropped unused. A key held as a terminal error returns that error
    /// without fetching; retrying is [`QueryCache::refetch`]'s job.
    pub async fn resolve<F, Fut>(&self, key: QueryKey, fetch: F) -> QueryResult<Arc<Page<T>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = QueryResult<Page<T>>> + Send + 'static,
    {
        let task = {
            let mut state = self.inner.state.lock().unwrap();
            match state.entries.get(&key) {
                Some(Entry::Resolved(page)) => {
                    debug!(%key, "query cache hit");
                    return Ok(Arc::clone(page));
                }
                Some(Entry::Failed(err)) => {
                    debug!(%key, "query cache holds terminal error");
                    return Err(err.clone());
                }
                Some(Entry::Pending { task, .. }) => {
                    debug!(%key, "joining in-flight query");
                    task.clone()
                }
                None => {
                    let generation = state.next_generation;
                    state.next_generation += 1;
                    debug!(%key, "query cache miss, starting fetch");
                    let task =
                        Self::start_fetch(Arc::clone(&self.inner), key.clone(), generation, fetch());
                    state.entries.insert(
                        key,
                        Entry::Pending {
                            generation,
                            task: task.clone(),
                        },
                    );
                    task
                }
            }
        };
        task.await
    }

    /// Drops any entry for `key` and resolves it afresh. This is the
    /// explicit-retry path; a terminal error entry does not block it.
    pub async fn refetch<F, Fut>(&self, key: QueryKey, fetch: F) -> QueryResult<Arc<Page<T>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = QueryResult<Page<T>>> + Send + 'static,
    {
        {
            let mut state = self.inner.state.lock().unwrap();
            state.entries.remove(&key);
        }
        self.resolve(key, fetch).await
    }

    /// Wraps the fetch future so that, on completion, the outcome is
    /// written back into the map, but only if the pending entry installed
    /// for it is still the current one.
    fn start_fetch<Fut>(
        inner: Arc<CacheInner<T>>,
        key: QueryKey,
        generation: u64,
        fut: Fut,
    ) -> SharedFetch<T>
    where
        Fut: Future<Output = QueryResult<Page<T>>> + Send + 'static,
    {
        async move {
            let outcome = fut.await.map(Arc::new);
            let mut state = inner.state.lock().unwrap();
            let still_current = matches!(
                state.entries.get(&key),
                Some(Entry::Pending { generation: g, .. }) if *g == generation
            );
            if still_current {
                let entry = match &outcome {
                    Ok(page) => Entry::Resolved(Arc::clone(page)),
                    Err(err) => Entry::Failed(err.clone()),
                };
                state.entries.insert(key, entry);
            }
            outcome
        }
        .boxed()
        .shared()
    }
}
