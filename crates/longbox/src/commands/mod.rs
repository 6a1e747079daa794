//! Command handlers.
//!
//! Each handler runs a one-shot session (connect → dispatch → settle →
//! render) except `watch`, which stays connected for live updates.

pub mod comics;
pub mod hashes;
pub mod users;
pub mod watch;

use std::time::Duration;

use secrecy::SecretString;

use longbox_core::{AppState, AuthCredentials, ServerConfig, Session, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// How long a command waits for its load to settle before giving up.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Build a `ServerConfig` from the config file, profile, and CLI overrides.
pub fn build_server_config(global: &GlobalOpts) -> Result<ServerConfig, CliError> {
    let cfg = longbox_config::load_config_or_default();

    // Flags alone are enough when --server is given.
    if let Some(ref url_str) = global.server {
        let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
            field: "server".into(),
            reason: format!("invalid URL: {url_str}"),
        })?;

        let auth = match global.token {
            Some(ref token) => AuthCredentials::Token(SecretString::from(token.clone())),
            None => {
                return Err(CliError::NoCredentials {
                    profile: "<flags>".into(),
                });
            }
        };

        return Ok(ServerConfig {
            url,
            auth,
            tls: tls_from_flags(global),
            timeout: Duration::from_secs(global.timeout),
            push_enabled: true,
        });
    }

    let (name, profile) = longbox_config::select_profile(&cfg, global.profile.as_deref())?;
    let mut server = longbox_config::profile_to_server_config(profile, name)?;

    // CLI flags override the profile.
    if let Some(ref token) = global.token {
        server.auth = AuthCredentials::Token(SecretString::from(token.clone()));
    }
    if global.insecure {
        server.tls = TlsVerification::DangerAcceptInvalid;
    }
    server.timeout = Duration::from_secs(global.timeout);

    Ok(server)
}

fn tls_from_flags(global: &GlobalOpts) -> TlsVerification {
    if global.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    }
}

/// Block until the store publishes a snapshot satisfying `pred`.
pub async fn wait_until(
    session: &Session,
    pred: impl Fn(&AppState) -> bool,
) -> Result<std::sync::Arc<AppState>, CliError> {
    let mut states = session.states();
    if pred(states.current()) {
        return Ok(std::sync::Arc::clone(states.current()));
    }

    tokio::time::timeout(SETTLE_TIMEOUT, async {
        loop {
            match states.changed().await {
                Some(snapshot) if pred(&snapshot) => return Ok(snapshot),
                Some(_) => {}
                None => {
                    return Err(CliError::Operation {
                        message: "session closed before the load settled".into(),
                    });
                }
            }
        }
    })
    .await
    .map_err(|_| CliError::Timeout)?
}
