// ── Effects ──
//
// Long-lived background tasks bridging dispatched actions to backend
// calls. Each effect idles on the store's action tap; a trigger action
// spawns an independent call chain that runs to completion regardless
// of later triggers (merge semantics -- nothing cancels a superseded
// call, and the last response to arrive wins).
//
// Every chain ends in pure response→action mapping followed by an
// explicit alert step, never a thrown error: soft server rejections,
// transport failures, and anything else each carry their own alert
// text, but the reducer sees one failure action regardless.

mod blocked_list;
mod comic_list;
mod last_read;
mod user_list;

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use longbox_api::LibraryClient;

use crate::alert::{Alert, AlertChannel};
use crate::error::FailureTier;
use crate::store::Store;

/// Feature-agnostic message for failures outside the expected paths.
pub(crate) const GENERAL_FAILURE_ALERT: &str = "Something went wrong. Please try again.";

/// Everything an effect needs to run a call chain.
#[derive(Clone)]
pub(crate) struct EffectContext {
    pub store: Store,
    pub alerts: AlertChannel,
    pub client: Arc<LibraryClient>,
}

/// Spawn every effect task. Each one idles until `cancel` fires.
pub(crate) fn spawn_all(ctx: &EffectContext, cancel: &CancellationToken) -> Vec<JoinHandle<()>> {
    vec![
        tokio::spawn(comic_list::run(ctx.clone(), cancel.clone())),
        tokio::spawn(blocked_list::run(ctx.clone(), cancel.clone())),
        tokio::spawn(last_read::run(ctx.clone(), cancel.clone())),
        tokio::spawn(user_list::run(ctx.clone(), cancel.clone())),
    ]
}

/// Choose the failure alert for an API error: the soft and transport
/// tiers get the feature's specific message, everything else gets the
/// generic one.
pub(crate) fn failure_alert(
    err: &longbox_api::Error,
    soft_message: impl FnOnce(&str) -> String,
    transport_message: impl FnOnce() -> String,
) -> Alert {
    match FailureTier::classify(err) {
        FailureTier::Soft => {
            let reason = match err {
                longbox_api::Error::Remote { message } => message.as_str(),
                _ => "",
            };
            Alert::Error(soft_message(reason))
        }
        FailureTier::Transport => Alert::Error(transport_message()),
        FailureTier::General => Alert::Error(GENERAL_FAILURE_ALERT.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soft_failures_use_the_specific_message_with_reason() {
        let err = longbox_api::Error::Remote {
            message: "unknown hash".into(),
        };
        let alert = failure_alert(
            &err,
            |reason| format!("Server said no: {reason}"),
            || "unreachable".into(),
        );
        assert_eq!(alert, Alert::Error("Server said no: unknown hash".into()));
    }

    #[test]
    fn unexpected_failures_use_the_generic_message() {
        let err = longbox_api::Error::Deserialization {
            message: "eof".into(),
            body: String::new(),
        };
        let alert = failure_alert(&err, |_| "soft".into(), || "transport".into());
        assert_eq!(alert, Alert::Error(GENERAL_FAILURE_ALERT.to_owned()));
    }
}
