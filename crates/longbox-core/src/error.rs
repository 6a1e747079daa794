// ── Core error types ──
//
// User-facing errors from longbox-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<longbox_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to library server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Library server disconnected")]
    ServerDisconnected,

    #[error("Library server timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Operation errors ─────────────────────────────────────────────
    /// The server itself rejected the request (soft domain failure).
    #[error("Operation rejected by server: {message}")]
    Rejected { message: String },

    #[error("Operation failed: {message}")]
    OperationFailed { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Failure tiers ────────────────────────────────────────────────────

/// How an effect classifies a failed backend call when choosing the
/// user-facing alert. Reducers never see this -- they only receive the
/// area's single failure action regardless of tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureTier {
    /// Transport worked; the server said no (`success: false`).
    Soft,
    /// HTTP / TLS / socket level failure.
    Transport,
    /// Anything else escaping the call site (bad URL, unparseable body).
    General,
}

impl FailureTier {
    /// Classify an API error into the alert tier it belongs to.
    pub fn classify(err: &longbox_api::Error) -> Self {
        match err {
            longbox_api::Error::Remote { .. } => Self::Soft,
            longbox_api::Error::Transport(_)
            | longbox_api::Error::Timeout { .. }
            | longbox_api::Error::Tls(_)
            | longbox_api::Error::Authentication { .. }
            | longbox_api::Error::SessionExpired
            | longbox_api::Error::PushConnect(_)
            | longbox_api::Error::PushClosed { .. } => Self::Transport,
            longbox_api::Error::InvalidUrl(_) | longbox_api::Error::Deserialization { .. } => {
                Self::General
            }
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<longbox_api::Error> for CoreError {
    fn from(err: longbox_api::Error) -> Self {
        match err {
            longbox_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            longbox_api::Error::SessionExpired => CoreError::AuthenticationFailed {
                message: "Session expired -- re-authentication required".into(),
            },
            longbox_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::OperationFailed {
                        message: e.to_string(),
                    }
                }
            }
            longbox_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            longbox_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            longbox_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            longbox_api::Error::Remote { message } => CoreError::Rejected { message },
            longbox_api::Error::PushConnect(reason) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("push channel connection failed: {reason}"),
            },
            longbox_api::Error::PushClosed { code, reason } => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("push channel closed (code {code}): {reason}"),
            },
            longbox_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_rejection_classifies_soft() {
        let err = longbox_api::Error::Remote {
            message: "no".into(),
        };
        assert_eq!(FailureTier::classify(&err), FailureTier::Soft);
    }

    #[test]
    fn timeout_classifies_transport() {
        let err = longbox_api::Error::Timeout { timeout_secs: 30 };
        assert_eq!(FailureTier::classify(&err), FailureTier::Transport);
    }

    #[test]
    fn deserialization_classifies_general() {
        let err = longbox_api::Error::Deserialization {
            message: "eof".into(),
            body: String::new(),
        };
        assert_eq!(FailureTier::classify(&err), FailureTier::General);
    }

    #[test]
    fn remote_converts_to_rejected() {
        let err: CoreError = longbox_api::Error::Remote {
            message: "hash unknown".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Rejected { .. }));
    }
}
