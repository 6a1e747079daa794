// ── Push subscription manager ──
//
// Keeps exactly one active subscription per topic while the push
// channel's connected flag is true, and tears them down when it goes
// false. Topic callbacks do one thing: reshape the wire payload into an
// update/removal action and dispatch it.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use longbox_api::PushFrame;

use crate::action::{Action, BlockedListAction, ComicListAction, LastReadAction, UserListAction};
use crate::convert::record_from_payload;
use crate::store::Store;

/// Topic names on the push channel, one update/removal pair per
/// synchronized feature area.
pub mod topics {
    pub const COMIC_UPDATE: &str = "comic-list.update";
    pub const COMIC_REMOVAL: &str = "comic-list.removal";
    pub const BLOCKED_HASH_UPDATE: &str = "blocked-hash.update";
    pub const BLOCKED_HASH_REMOVAL: &str = "blocked-hash.removal";
    pub const LAST_READ_UPDATE: &str = "last-read.update";
    pub const LAST_READ_REMOVAL: &str = "last-read.removal";
    pub const USER_UPDATE: &str = "user-list.update";
    pub const USER_REMOVAL: &str = "user-list.removal";

    pub const ALL: &[&str] = &[
        COMIC_UPDATE,
        COMIC_REMOVAL,
        BLOCKED_HASH_UPDATE,
        BLOCKED_HASH_REMOVAL,
        LAST_READ_UPDATE,
        LAST_READ_REMOVAL,
        USER_UPDATE,
        USER_REMOVAL,
    ];
}

/// A held subscription: dropping the guard's token stops the topic task.
struct TopicSubscription {
    cancel: CancellationToken,
}

impl TopicSubscription {
    fn unsubscribe(self) {
        self.cancel.cancel();
    }
}

/// Run the manager until `cancel` fires.
///
/// `connected` is the push channel's live flag; `frames` is any receiver
/// on its frame broadcast (each topic task gets its own via
/// `resubscribe`).
pub(crate) async fn run(
    store: Store,
    mut connected: watch::Receiver<bool>,
    frames: broadcast::Receiver<Arc<PushFrame>>,
    cancel: CancellationToken,
) {
    let mut held: HashMap<&'static str, TopicSubscription> = HashMap::new();

    if *connected.borrow_and_update() {
        subscribe_all(&mut held, &store, &frames);
    }

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            changed = connected.changed() => {
                if changed.is_err() {
                    break;
                }
                if *connected.borrow_and_update() {
                    subscribe_all(&mut held, &store, &frames);
                } else {
                    debug!("push channel down, dropping topic subscriptions");
                    for (_, subscription) in held.drain() {
                        subscription.unsubscribe();
                    }
                }
            }
        }
    }

    for (_, subscription) in held.drain() {
        subscription.unsubscribe();
    }
}

/// Subscribe every topic that isn't already held. The held-handle map is
/// the at-most-one-per-topic guard: a second connect transition finds
/// the handles present and does nothing.
fn subscribe_all(
    held: &mut HashMap<&'static str, TopicSubscription>,
    store: &Store,
    frames: &broadcast::Receiver<Arc<PushFrame>>,
) {
    for &topic in topics::ALL {
        held.entry(topic)
            .or_insert_with(|| subscribe(topic, store.clone(), frames.resubscribe()));
    }
}

fn subscribe(
    topic: &'static str,
    store: Store,
    mut frames: broadcast::Receiver<Arc<PushFrame>>,
) -> TopicSubscription {
    let cancel = CancellationToken::new();
    let task_cancel = cancel.clone();

    tokio::spawn(async move {
        debug!(topic, "topic subscription started");
        loop {
            tokio::select! {
                biased;
                _ = task_cancel.cancelled() => break,
                frame = frames.recv() => {
                    match frame {
                        Ok(frame) if frame.topic == topic => {
                            if let Some(action) = action_for_frame(topic, &frame.payload) {
                                store.dispatch(action);
                            }
                        }
                        Ok(_) => {}
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(topic, skipped, "topic subscription lagged");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            }
        }
        debug!(topic, "topic subscription stopped");
    });

    TopicSubscription { cancel }
}

/// Reshape one frame payload into its action. Pure translation, no
/// other logic; malformed payloads are dropped.
fn action_for_frame(topic: &str, payload: &serde_json::Value) -> Option<Action> {
    use longbox_api::rest::models::{BlockedHashRecord, ComicRecord, LastReadRecord, UserRecord};

    match topic {
        topics::COMIC_UPDATE => record_from_payload::<ComicRecord>(payload)
            .map(|r| Action::ComicList(ComicListAction::Updated { comic: r.into() })),
        topics::COMIC_REMOVAL => record_from_payload::<ComicRecord>(payload)
            .map(|r| Action::ComicList(ComicListAction::Removed { comic: r.into() })),
        topics::BLOCKED_HASH_UPDATE => record_from_payload::<BlockedHashRecord>(payload)
            .map(|r| Action::BlockedList(BlockedListAction::Updated { entry: r.into() })),
        topics::BLOCKED_HASH_REMOVAL => record_from_payload::<BlockedHashRecord>(payload)
            .map(|r| Action::BlockedList(BlockedListAction::Removed { entry: r.into() })),
        topics::LAST_READ_UPDATE => record_from_payload::<LastReadRecord>(payload)
            .map(|r| Action::LastRead(LastReadAction::Updated { entry: r.into() })),
        topics::LAST_READ_REMOVAL => record_from_payload::<LastReadRecord>(payload)
            .map(|r| Action::LastRead(LastReadAction::Removed { entry: r.into() })),
        topics::USER_UPDATE => record_from_payload::<UserRecord>(payload)
            .map(|r| Action::UserList(UserListAction::Updated { user: r.into() })),
        topics::USER_REMOVAL => record_from_payload::<UserRecord>(payload)
            .map(|r| Action::UserList(UserListAction::Removed { user: r.into() })),
        other => {
            debug!(topic = other, "frame for unmanaged topic");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn comic_update_frame_becomes_upsert_action() {
        let payload = json!({ "detail": { "id": 7, "series": "Astro Patrol", "pageCount": 22 } });
        let action = action_for_frame(topics::COMIC_UPDATE, &payload);

        assert!(matches!(
            action,
            Some(Action::ComicList(ComicListAction::Updated { comic })) if comic.id.0 == 7
        ));
    }

    #[test]
    fn blocked_hash_removal_frame_becomes_remove_action() {
        let payload = json!({ "hash": "0a1b" });
        let action = action_for_frame(topics::BLOCKED_HASH_REMOVAL, &payload);

        assert!(matches!(
            action,
            Some(Action::BlockedList(BlockedListAction::Removed { entry })) if entry.hash == "0a1b"
        ));
    }

    #[test]
    fn malformed_payload_is_dropped() {
        let payload = json!("not an object");
        assert!(action_for_frame(topics::COMIC_UPDATE, &payload).is_none());
    }

    #[test]
    fn unmanaged_topic_is_ignored() {
        assert!(action_for_frame("metrics.tick", &json!({})).is_none());
    }

    #[tokio::test]
    async fn connect_transition_subscribes_each_topic_exactly_once() {
        let store = Store::new();
        let (connected_tx, connected_rx) = watch::channel(false);
        let (frame_tx, frame_rx) = broadcast::channel(64);
        let cancel = CancellationToken::new();

        let manager = tokio::spawn(run(
            store.clone(),
            connected_rx,
            frame_rx,
            cancel.clone(),
        ));

        // Two consecutive connect notifications: the guard must keep a
        // single subscription per topic.
        connected_tx.send(true).expect("manager is listening");
        connected_tx.send(true).expect("manager is listening");
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        let mut tap = store.actions();
        frame_tx
            .send(Arc::new(PushFrame {
                topic: topics::BLOCKED_HASH_UPDATE.into(),
                payload: json!({ "hash": "0a1b" }),
            }))
            .expect("topic task is subscribed");
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        let mut dispatched = 0;
        while let Ok(action) = tap.try_recv() {
            if matches!(action, Action::BlockedList(BlockedListAction::Updated { .. })) {
                dispatched += 1;
            }
        }
        assert_eq!(
            dispatched, 1,
            "duplicate subscriptions would have dispatched twice"
        );
        assert_eq!(store.snapshot().blocked_list.list.entries.len(), 1);

        cancel.cancel();
        manager.await.expect("manager task should join");
    }

    #[tokio::test]
    async fn disconnect_transition_drops_subscriptions() {
        let store = Store::new();
        let (connected_tx, connected_rx) = watch::channel(true);
        let (frame_tx, frame_rx) = broadcast::channel(64);
        let cancel = CancellationToken::new();

        let manager = tokio::spawn(run(
            store.clone(),
            connected_rx,
            frame_rx,
            cancel.clone(),
        ));
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        connected_tx.send(false).expect("manager is listening");
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        frame_tx
            .send(Arc::new(PushFrame {
                topic: topics::BLOCKED_HASH_UPDATE.into(),
                payload: json!({ "hash": "0a1b" }),
            }))
            .ok();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        assert!(
            store.snapshot().blocked_list.list.entries.is_empty(),
            "a frame after disconnect must not be dispatched"
        );

        cancel.cancel();
        manager.await.expect("manager task should join");
    }
}
