//! `longbox watch` -- stay connected and print live activity.
//!
//! Connects with the push channel enabled, seeds the synchronized
//! slices, and prints a line per state change or alert until Ctrl-C.

use owo_colors::OwoColorize;

use longbox_core::{BlockedListAction, ComicFilter, ComicListAction, Session, UserListAction};

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::build_server_config;

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let config = build_server_config(global)?;

    let session = Session::new(config);
    session.connect().await.map_err(CliError::from)?;

    // Seed every synchronized slice once; pushes keep them live.
    session.dispatch(ComicListAction::LoadRequested(ComicFilter::default()));
    session.dispatch(BlockedListAction::LoadRequested);
    session.dispatch(UserListAction::LoadRequested);

    let mut states = session.states();
    let mut alerts = session.alerts();

    eprintln!("watching (Ctrl-C to stop)");
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            snapshot = states.changed() => {
                let Some(snapshot) = snapshot else { break };
                println!(
                    "comics: {:>5}  blocked: {:>4}  accounts: {:>3}",
                    snapshot.comic_list.list.entries.len(),
                    snapshot.blocked_list.list.entries.len(),
                    snapshot.user_list.entries.len(),
                );
            }
            alert = alerts.recv() => {
                match alert {
                    Ok(alert) if alert.is_error() => {
                        eprintln!("{} {}", "error:".red().bold(), alert.message());
                    }
                    Ok(alert) => {
                        eprintln!("{} {}", "info:".green().bold(), alert.message());
                    }
                    Err(_) => break,
                }
            }
        }
    }

    session.disconnect().await;
    Ok(())
}
