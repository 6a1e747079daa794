//! `longbox hashes` -- manage blocked page hashes.

use tabled::Tabled;

use longbox_core::{BlockedHash, BlockedListAction, Session};

use crate::cli::{GlobalOpts, HashesCommand};
use crate::error::CliError;
use crate::output;

use super::{build_server_config, wait_until};

pub async fn handle(command: HashesCommand, global: &GlobalOpts) -> Result<(), CliError> {
    match command {
        HashesCommand::List => list(global).await,
        HashesCommand::Block { hash } => set_blocked(global, hash, true).await,
        HashesCommand::Unblock { hash } => set_blocked(global, hash, false).await,
    }
}

async fn list(global: &GlobalOpts) -> Result<(), CliError> {
    let config = build_server_config(global)?;
    let format = global.output.clone();

    let hashes = Session::oneshot(config, |session| async move {
        session.dispatch(BlockedListAction::LoadRequested);
        let snapshot = wait_until(&session, |s| !s.blocked_list.list.loading)
            .await
            .map_err(|e| longbox_core::CoreError::OperationFailed {
                message: e.to_string(),
            })?;
        Ok(snapshot.blocked_list.list.entries.clone())
    })
    .await?;

    println!(
        "{}",
        output::render_list(&format, &hashes, |h| HashRow::from(h), |h| h.hash.clone())
    );
    Ok(())
}

async fn set_blocked(global: &GlobalOpts, hash: String, blocked: bool) -> Result<(), CliError> {
    let config = build_server_config(global)?;

    Session::oneshot(config, |session| async move {
        let mut alerts = session.alerts();
        session.dispatch(BlockedListAction::SaveRequested { hash, blocked });
        wait_until(&session, |s| !s.blocked_list.saving)
            .await
            .map_err(|e| longbox_core::CoreError::OperationFailed {
                message: e.to_string(),
            })?;

        // The effect always publishes exactly one alert for a save; it
        // lands just after the state settles.
        let alert = tokio::time::timeout(std::time::Duration::from_secs(5), alerts.recv())
            .await
            .ok()
            .and_then(Result::ok);
        if let Some(alert) = alert {
            if alert.is_error() {
                return Err(longbox_core::CoreError::OperationFailed {
                    message: alert.message().to_owned(),
                });
            }
            println!("{}", alert.message());
        }
        Ok(())
    })
    .await?;

    Ok(())
}

// ── Table row ────────────────────────────────────────────────────────

#[derive(Tabled)]
struct HashRow {
    #[tabled(rename = "Hash")]
    hash: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Comics")]
    comics: u32,
}

impl From<&BlockedHash> for HashRow {
    fn from(entry: &BlockedHash) -> Self {
        Self {
            hash: entry.hash.clone(),
            label: entry.label.clone().unwrap_or_else(|| "-".into()),
            comics: entry.comic_count,
        }
    }
}
