//! The query cache, made an explicit injectable service instead of ambient
//! global state. One `CollectionCache` per resource collection; the only
//! writers are the mutation coordinators, and the only write discipline is
//! invalidate-then-refetch.

use std::future::Future;
use std::sync::Mutex;

use crate::error::RemoteError;

pub struct CollectionCache<T> {
    slot: Mutex<Slot<T>>,
}

struct Slot<T> {
    items: Option<Vec<T>>,
    generation: u64,
}

impl<T: Clone> CollectionCache<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                items: None,
                generation: 0,
            }),
        }
    }

    /// The cached collection, or `None` when it was never loaded or has been
    /// invalidated since.
    pub fn read(&self) -> Option<Vec<T>> {
        self.lock().items.clone()
    }

    pub fn store(&self, items: Vec<T>) {
        self.lock().items = Some(items);
    }

    /// Stores only when no `invalidate` ran since `generation` was observed.
    /// Returns whether the value was kept; a stale fetch result is dropped.
    pub fn store_if_current(&self, items: Vec<T>, generation: u64) -> bool {
        let mut slot = self.lock();
        if slot.generation != generation {
            tracing::debug!(
                observed = generation,
                current = slot.generation,
                "dropping stale fetch result"
            );
            return false;
        }
        slot.items = Some(items);
        true
    }

    /// Marks the collection stale: drops the cached value and moves the
    /// generation forward so in-flight fetches that started earlier can no
    /// longer store.
    pub fn invalidate(&self) {
        let mut slot = self.lock();
        slot.items = None;
        slot.generation += 1;
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: Clone> Default for CollectionCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-through access: the cached collection when fresh, otherwise one
/// remote fetch whose result is stored for the next reader. A fetch that
/// settles after an intervening invalidation is returned to this caller but
/// not stored.
pub async fn read_through<T, F, Fut>(
    cache: &CollectionCache<T>,
    fetch: F,
) -> Result<Vec<T>, RemoteError>
where
    T: Clone,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>, RemoteError>>,
{
    if let Some(items) = cache.read() {
        return Ok(items);
    }
    let generation = cache.generation();
    let items = fetch().await?;
    cache.store_if_current(items.clone(), generation);
    Ok(items)
}
