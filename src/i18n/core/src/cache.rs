/* src/i18n/core/src/cache.rs */

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::OnceCell;
use tracing::debug;

use crate::request::RequestId;

type Entry<T> = Arc<OnceCell<Arc<T>>>;

/// Per-request memoization with single-flight semantics.
///
/// The first `memoize` call for a request runs its compute future; concurrent
/// and later calls for the same request await that run and share its `Arc`.
/// If the running future is dropped, nothing is stored and the next caller
/// computes again. Entries live until [`RequestCache::end`].
pub struct RequestCache<T> {
  entries: Mutex<HashMap<RequestId, Entry<T>>>,
}

impl<T> Default for RequestCache<T> {
  fn default() -> Self {
    Self { entries: Mutex::new(HashMap::new()) }
  }
}

impl<T> RequestCache<T> {
  pub fn new() -> Self {
    Self::default()
  }

  // The registry lock is never held across an await point.
  fn lock(&self) -> MutexGuard<'_, HashMap<RequestId, Entry<T>>> {
    self.entries.lock().unwrap_or_else(PoisonError::into_inner)
  }

  pub async fn memoize<F, Fut>(&self, id: RequestId, compute: F) -> Arc<T>
  where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
  {
    let cell = Arc::clone(self.lock().entry(id).or_default());
    if let Some(value) = cell.get() {
      debug!(request = %id, "request cache hit");
      return Arc::clone(value);
    }
    let value = cell
      .get_or_init(|| async {
        debug!(request = %id, "request cache miss, computing");
        Arc::new(compute().await)
      })
      .await;
    Arc::clone(value)
  }

  /// The stored value, if the request has finished computing one.
  pub fn get(&self, id: RequestId) -> Option<Arc<T>> {
    self.lock().get(&id).and_then(|cell| cell.get().cloned())
  }

  /// Drop the entry for a finished request. Returns whether one existed.
  pub fn end(&self, id: RequestId) -> bool {
    let removed = self.lock().remove(&id).is_some();
    if removed {
      debug!(request = %id, "request cache entry evicted");
    }
    removed
  }

  pub fn len(&self) -> usize {
    self.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.lock().is_empty()
  }
}
