// ── Reference-identity memoization ──
//
// Snapshots are immutable `Arc`s, so identity of the input is a sound
// cache key: a new state tree always means a new allocation. The cache
// holds a `Weak` to the snapshot it was filled from, which also keeps
// that allocation's address from being reused underneath the comparison.

use std::sync::{Arc, Mutex, Weak};

use crate::state::AppState;

/// Single-slot cache keyed on the identity of the input snapshot.
pub struct Memo<O> {
    slot: Mutex<Option<(Weak<AppState>, Arc<O>)>>,
}

impl<O> Memo<O> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Return the cached value when `state` is the snapshot the cache was
    /// filled from; otherwise compute, cache, and return.
    pub fn get_or_compute(
        &self,
        state: &Arc<AppState>,
        compute: impl FnOnce(&AppState) -> O,
    ) -> Arc<O> {
        let mut slot = match self.slot.lock() {
            Ok(guard) => guard,
            // A poisoned lock only means a panic mid-compute; the slot
            // itself is still just a cache.
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some((ref cached_input, ref cached)) = *slot {
            if std::ptr::eq(cached_input.as_ptr(), Arc::as_ptr(state)) {
                return Arc::clone(cached);
            }
        }

        let value = Arc::new(compute(state));
        *slot = Some((Arc::downgrade(state), Arc::clone(&value)));
        value
    }
}

impl<O> Default for Memo<O> {
    fn default() -> Self {
        Self::new()
    }
}

/// A named, memoized projection over the state tree.
///
/// Wraps a pure compute function with a [`Memo`]; the compute function
/// must never mutate its input (enforced by the shared borrow).
pub struct Selector<O> {
    compute: Box<dyn Fn(&AppState) -> O + Send + Sync>,
    memo: Memo<O>,
}

impl<O> Selector<O> {
    pub fn new(compute: impl Fn(&AppState) -> O + Send + Sync + 'static) -> Self {
        Self {
            compute: Box::new(compute),
            memo: Memo::new(),
        }
    }

    pub fn select(&self, state: &Arc<AppState>) -> Arc<O> {
        self.memo.get_or_compute(state, &self.compute)
    }
}
