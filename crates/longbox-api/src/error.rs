use thiserror::Error;

/// Top-level error type for the `longbox-api` crate.
///
/// Covers every failure mode across both API surfaces: authentication,
/// transport, server-reported (soft) failures, and the push channel.
/// `longbox-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login failed (wrong credentials, account locked, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Session token has expired or been revoked.
    #[error("Session expired -- re-authentication required")]
    SessionExpired,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Server-reported ─────────────────────────────────────────────
    /// The server answered at the transport level but signalled failure
    /// in the response payload (`success: false`). Distinct from a
    /// transport error so callers can surface it differently.
    #[error("Server rejected the request: {message}")]
    Remote { message: String },

    // ── Push channel ────────────────────────────────────────────────
    /// WebSocket connection failed.
    #[error("Push channel connection failed: {0}")]
    PushConnect(String),

    /// WebSocket closed unexpectedly.
    #[error("Push channel closed (code {code}): {reason}")]
    PushClosed { code: u16, reason: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates auth has expired
    /// and re-authentication might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::SessionExpired)
    }

    /// Returns `true` if the server itself rejected the request
    /// (a soft domain failure rather than a transport problem).
    pub fn is_remote_rejection(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } | Self::PushConnect(_) => true,
            _ => false,
        }
    }
}
