// ── Central store ──
//
// The single owner of the state tree. Actions go in through `dispatch`,
// which applies the root reducer under a lock (strict FIFO), publishes
// the new snapshot through a `watch` channel, and echoes the action on a
// `broadcast` tap for the effects and the subscription manager. Readers
// only ever see immutable `Arc` snapshots.

use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::{broadcast, watch};
use tokio_stream::wrappers::WatchStream;

use crate::action::Action;
use crate::state::{self, AppState};

const ACTION_TAP_CAPACITY: usize = 256;

/// The composed store for every feature area.
///
/// Cheaply cloneable; all clones share the same state tree.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    current: Mutex<Arc<AppState>>,
    snapshot: watch::Sender<Arc<AppState>>,
    tap: broadcast::Sender<Action>,
}

impl Store {
    pub fn new() -> Self {
        let initial = Arc::new(AppState::default());
        let (snapshot, _) = watch::channel(Arc::clone(&initial));
        let (tap, _) = broadcast::channel(ACTION_TAP_CAPACITY);

        Self {
            inner: Arc::new(StoreInner {
                current: Mutex::new(initial),
                snapshot,
                tap,
            }),
        }
    }

    /// Apply one action to the state tree.
    ///
    /// Applications are serialized: concurrent dispatches queue on the
    /// lock and each sees the tree its predecessor produced. The action
    /// is echoed on the tap *after* the snapshot is published, so a
    /// listener waking on the tap always finds the post-action state.
    pub fn dispatch(&self, action: impl Into<Action>) {
        let action = action.into();

        {
            let mut current = match self.inner.current.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let next = Arc::new(state::reduce(&current, &action));
            *current = Arc::clone(&next);
            // `send_modify` updates unconditionally, even with zero receivers.
            self.inner.snapshot.send_modify(|snap| *snap = next);
        }

        let _ = self.inner.tap.send(action);
    }

    /// The current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<AppState> {
        match self.inner.current.lock() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub fn subscribe(&self) -> watch::Receiver<Arc<AppState>> {
        self.inner.snapshot.subscribe()
    }

    /// Subscribe to the stream of state snapshots.
    pub fn states(&self) -> StateStream {
        StateStream::new(self.inner.snapshot.subscribe())
    }

    /// Tap into the action stream (every dispatched action, in order).
    pub fn actions(&self) -> broadcast::Receiver<Action> {
        self.tap().subscribe()
    }

    pub(crate) fn tap(&self) -> &broadcast::Sender<Action> {
        &self.inner.tap
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

// ── StateStream ──────────────────────────────────────────────────────

/// A subscription to the store's snapshots.
///
/// Provides both point-in-time snapshot access and reactive change
/// notification via the `changed()` method or by converting to a `Stream`.
pub struct StateStream {
    current: Arc<AppState>,
    receiver: watch::Receiver<Arc<AppState>>,
}

impl StateStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<AppState>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// Get the snapshot captured at creation time.
    pub fn current(&self) -> &Arc<AppState> {
        &self.current
    }

    /// Get the latest snapshot (may have changed since creation).
    pub fn latest(&self) -> Arc<AppState> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` if the store has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<AppState>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> StateWatchStream {
        StateWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
///
/// Yields a new `Arc<AppState>` snapshot each time an action lands.
pub struct StateWatchStream {
    inner: WatchStream<Arc<AppState>>,
}

impl Stream for StateWatchStream {
    type Item = Arc<AppState>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
