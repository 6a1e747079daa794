// ── Blocked list effect ──
//
// Two triggers: `LoadRequested` pulls the full block list, and
// `SaveRequested` drives the block/unblock write. A confirmed write
// gets an info alert; failures follow the usual tiering.

use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use longbox_api::rest::models::BlockedHashRecord;

use crate::action::{Action, BlockedListAction};
use crate::alert::Alert;
use crate::model::BlockedHash;

use super::{EffectContext, failure_alert};

pub(super) async fn run(ctx: EffectContext, cancel: CancellationToken) {
    let mut actions = ctx.store.actions();

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            action = actions.recv() => {
                match action {
                    Ok(Action::BlockedList(BlockedListAction::LoadRequested)) => {
                        let ctx = ctx.clone();
                        tokio::spawn(async move { load_list(&ctx).await });
                    }
                    Ok(Action::BlockedList(BlockedListAction::SaveRequested { hash, blocked })) => {
                        let ctx = ctx.clone();
                        tokio::spawn(async move { save_state(&ctx, hash, blocked).await });
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "blocked list effect lagged behind the action tap");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }
}

async fn load_list(ctx: &EffectContext) {
    let result = ctx.client.load_blocked_hashes().await;

    let (action, alert) = map_load_outcome(result);
    ctx.store.dispatch(action);
    if let Some(alert) = alert {
        ctx.alerts.publish(alert);
    }
}

async fn save_state(ctx: &EffectContext, hash: String, blocked: bool) {
    let result = ctx.client.set_blocked_state(&hash, blocked).await;

    let (action, alert) = map_save_outcome(result, hash, blocked);
    ctx.store.dispatch(action);
    ctx.alerts.publish(alert);
}

/// Pure response→action mapping for the list load.
fn map_load_outcome(
    result: Result<Vec<BlockedHashRecord>, longbox_api::Error>,
) -> (Action, Option<Alert>) {
    match result {
        Ok(records) => (
            Action::BlockedList(BlockedListAction::LoadSucceeded {
                hashes: records.into_iter().map(BlockedHash::from).collect(),
            }),
            None,
        ),
        Err(err) => (
            Action::BlockedList(BlockedListAction::LoadFailed),
            Some(failure_alert(
                &err,
                |reason| format!("The library rejected the blocked list load: {reason}"),
                || "Unable to load the blocked page list.".to_owned(),
            )),
        ),
    }
}

/// Pure response→action mapping for the block/unblock write. Every
/// outcome carries an alert: info on success, error otherwise.
fn map_save_outcome(
    result: Result<(), longbox_api::Error>,
    hash: String,
    blocked: bool,
) -> (Action, Alert) {
    match result {
        Ok(()) => {
            let message = if blocked {
                format!("Page hash {hash} blocked.")
            } else {
                format!("Page hash {hash} unblocked.")
            };
            (
                Action::BlockedList(BlockedListAction::SaveSucceeded { hash, blocked }),
                Alert::Info(message),
            )
        }
        Err(err) => (
            Action::BlockedList(BlockedListAction::SaveFailed),
            failure_alert(
                &err,
                |reason| format!("The library refused to change the block state: {reason}"),
                || "Unable to update the page block state.".to_owned(),
            ),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_success_pairs_action_with_info_alert() {
        let (action, alert) = map_save_outcome(Ok(()), "0a1b".into(), true);

        assert_eq!(
            action,
            Action::BlockedList(BlockedListAction::SaveSucceeded {
                hash: "0a1b".into(),
                blocked: true,
            })
        );
        assert_eq!(alert, Alert::Info("Page hash 0a1b blocked.".into()));
    }

    #[test]
    fn save_soft_failure_carries_the_server_reason() {
        let err = longbox_api::Error::Remote {
            message: "hash is not a page hash".into(),
        };
        let (action, alert) = map_save_outcome(Err(err), "zz".into(), true);

        assert_eq!(action, Action::BlockedList(BlockedListAction::SaveFailed));
        assert!(alert.is_error());
        assert!(alert.message().contains("hash is not a page hash"));
    }

    #[test]
    fn load_failure_maps_to_single_failure_action() {
        let (action, alert) =
            map_load_outcome(Err(longbox_api::Error::Timeout { timeout_secs: 30 }));

        assert_eq!(action, Action::BlockedList(BlockedListAction::LoadFailed));
        assert_eq!(
            alert,
            Some(Alert::Error("Unable to load the blocked page list.".into()))
        );
    }
}
