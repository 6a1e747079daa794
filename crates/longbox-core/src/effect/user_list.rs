// ── User list effect ──

use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use longbox_api::rest::models::UserRecord;

use crate::action::{Action, UserListAction};
use crate::alert::Alert;
use crate::model::User;

use super::{EffectContext, failure_alert};

pub(super) async fn run(ctx: EffectContext, cancel: CancellationToken) {
    let mut actions = ctx.store.actions();

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            action = actions.recv() => {
                match action {
                    Ok(Action::UserList(UserListAction::LoadRequested)) => {
                        let ctx = ctx.clone();
                        tokio::spawn(async move { load_list(&ctx).await });
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "user list effect lagged behind the action tap");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }
}

async fn load_list(ctx: &EffectContext) {
    let result = ctx.client.load_users().await;

    let (action, alert) = map_outcome(result);
    ctx.store.dispatch(action);
    if let Some(alert) = alert {
        ctx.alerts.publish(alert);
    }
}

fn map_outcome(result: Result<Vec<UserRecord>, longbox_api::Error>) -> (Action, Option<Alert>) {
    match result {
        Ok(records) => (
            Action::UserList(UserListAction::LoadSucceeded {
                users: records.into_iter().map(User::from).collect(),
            }),
            None,
        ),
        Err(err) => (
            Action::UserList(UserListAction::LoadFailed),
            Some(failure_alert(
                &err,
                |reason| format!("The library rejected the account list load: {reason}"),
                || "Unable to load accounts.".to_owned(),
            )),
        ),
    }
}
