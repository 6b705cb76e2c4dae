//! Lazy relation resolution on entity instances.

use crate::error::{QueryError, QueryResult};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex};

type SharedLoad<T> = Shared<BoxFuture<'static, QueryResult<Arc<T>>>>;

/// Load status of a relation slot, as observed by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Unresolved,
    Pending,
    Resolved,
    Failed,
}

enum SlotState<T> {
    Unresolved,
    Pending {
        generation: u64,
        task: SharedLoad<T>,
    },
    Resolved(Arc<T>),
    Failed(QueryError),
}

struct SlotInner<T> {
    state: SlotState<T>,
    next_generation: u64,
}

/// Per-entity-instance cache cell for one relation field.
///
/// Holds the foreign entity once fetched. At most one fetch is in flight
/// per slot at any time: concurrent loaders join the existing shared
/// future. A resolved slot never refetches through [`RelationSlot::load`];
/// only [`RelationSlot::reload`] resets it. A failed slot stays failed
/// until the caller explicitly loads again; there is no automatic retry.
pub struct RelationSlot<T> {
    inner: Mutex<SlotInner<T>>,
}

impl<T> RelationSlot<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SlotInner {
                state: SlotState::Unresolved,
                next_generation: 0,
            }),
        }
    }

    /// Current load status.
    pub fn status(&self) -> SlotStatus {
        let inner = self.inner.lock().unwrap();
        match inner.state {
            SlotState::Unresolved => SlotStatus::Unresolved,
            SlotState::Pending { .. } => SlotStatus::Pending,
            SlotState::Resolved(_) => SlotStatus::Resolved,
            SlotState::Failed(_) => SlotStatus::Failed,
        }
    }

    /// The resolved foreign entity, or `None` in every other state.
    /// Callers distinguish "not yet loaded" from "loaded" via
    /// [`RelationSlot::status`], never by panicking.
    pub fn get(&self) -> Option<Arc<T>> {
        let inner = self.inner.lock().unwrap();
        match &inner.state {
            SlotState::Resolved(value) => Some(Arc::clone(value)),
            _ => None,
        }
    }
}

impl<T: Send + Sync + 'static> RelationSlot<T> {
    /// Loads the relation, fetching at most once.
    ///
    /// - resolved: returns the stored value, `fetch` is dropped unused;
    /// - pending: joins the in-flight fetch, `fetch` is dropped unused;
    /// - unresolved or failed: installs the pending marker synchronously,
    ///   then runs `fetch` and stores the outcome.
    pub async fn load<F, Fut>(&self, fetch: F) -> QueryResult<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = QueryResult<T>> + Send + 'static,
    {
        let (generation, task) = {
            let mut inner = self.inner.lock().unwrap();
            match &inner.state {
                SlotState::Resolved(value) => return Ok(Arc::clone(value)),
                SlotState::Pending { generation, task } => (*generation, task.clone()),
                SlotState::Unresolved | SlotState::Failed(_) => {
                    let generation = inner.next_generation;
                    inner.next_generation += 1;
                    let task = fetch().map(|r| r.map(Arc::new)).boxed().shared();
                    inner.state = SlotState::Pending {
                        generation,
                        task: task.clone(),
                    };
                    (generation, task)
                }
            }
        };

        let outcome = task.await;

        // Every joiner attempts the write-back; the generation check makes
        // it apply exactly once and never to a slot that was reset or
        // reloaded while the fetch was in flight.
        let mut inner = self.inner.lock().unwrap();
        let still_current = matches!(
            &inner.state,
            SlotState::Pending { generation: g, .. } if *g == generation
        );
        if still_current {
            inner.state = match &outcome {
                Ok(value) => SlotState::Resolved(Arc::clone(value)),
                Err(err) => SlotState::Failed(err.clone()),
            };
        }
        outcome
    }

    /// Explicit reload: resets the slot and fetches again, even when it is
    /// already resolved.
    pub async fn reload<F, Fut>(&self, fetch: F) -> QueryResult<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = QueryResult<T>> + Send + 'static,
    {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.state = SlotState::Unresolved;
        }
        self.load(fetch).await
    }
}

impl<T> Default for RelationSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RelationSlot<T> {
    /// Clones the current state. A clone of a pending slot shares the
    /// in-flight fetch; each clone settles its own state independently.
    fn clone(&self) -> Self {
        let inner = self.inner.lock().unwrap();
        let state = match &inner.state {
            SlotState::Unresolved => SlotState::Unresolved,
            SlotState::Pending { generation, task } => SlotState::Pending {
                generation: *generation,
                task: task.clone(),
            },
            SlotState::Resolved(value) => SlotState::Resolved(Arc::clone(value)),
            SlotState::Failed(err) => SlotState::Failed(err.clone()),
        };
        Self {
            inner: Mutex::new(SlotInner {
                state,
                next_generation: inner.next_generation,
            }),
        }
    }
}

impl<T> fmt::Debug for RelationSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationSlot")
            .field("status", &self.status())
            .finish()
    }
}
