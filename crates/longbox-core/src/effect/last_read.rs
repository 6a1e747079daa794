// ── Last-read effect ──
//
// `LoadRequested` pulls the full read-marker list. The usual feed for
// this slice is the comic-list fan-out; this effect only serves the
// explicit reload.

use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use longbox_api::rest::models::LastReadRecord;

use crate::action::{Action, LastReadAction};
use crate::alert::Alert;

use super::{EffectContext, failure_alert};

pub(super) async fn run(ctx: EffectContext, cancel: CancellationToken) {
    let mut actions = ctx.store.actions();

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            action = actions.recv() => {
                match action {
                    Ok(Action::LastRead(LastReadAction::LoadRequested)) => {
                        let ctx = ctx.clone();
                        tokio::spawn(async move { load_list(&ctx).await });
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "last-read effect lagged behind the action tap");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }
}

async fn load_list(ctx: &EffectContext) {
    let result = ctx.client.load_last_read().await;

    let (action, alert) = map_outcome(result);
    ctx.store.dispatch(action);
    if let Some(alert) = alert {
        ctx.alerts.publish(alert);
    }
}

fn map_outcome(
    result: Result<Vec<LastReadRecord>, longbox_api::Error>,
) -> (Action, Option<Alert>) {
    match result {
        Ok(records) => (
            Action::LastRead(LastReadAction::LoadSucceeded {
                entries: records.into_iter().map(Into::into).collect(),
            }),
            None,
        ),
        Err(err) => (
            Action::LastRead(LastReadAction::LoadFailed),
            Some(failure_alert(
                &err,
                |reason| format!("The library rejected the last-read load: {reason}"),
                || "Unable to load read markers.".to_owned(),
            )),
        ),
    }
}
