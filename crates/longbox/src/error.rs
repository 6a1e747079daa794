//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and config failures into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use longbox_core::CoreError;

/// Exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the library server at {url}: {reason}")]
    #[diagnostic(
        code(longbox::connection_failed),
        help(
            "Check that the server is running and accessible.\n\
             Try: longbox --insecure comics list"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(longbox::auth_failed),
        help(
            "Verify your token or credentials.\n\
             Set LONGBOX_TOKEN, or configure a profile in the config file."
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(longbox::no_credentials),
        help("Add a token or username/password to the profile, or set LONGBOX_TOKEN.")
    )]
    NoCredentials { profile: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(longbox::validation))]
    Validation { field: String, reason: String },

    #[error("Unknown profile '{profile}'")]
    #[diagnostic(
        code(longbox::unknown_profile),
        help("List configured profiles in the config file, or pass --server directly.")
    )]
    UnknownProfile { profile: String },

    // ── Operations ───────────────────────────────────────────────────
    #[error("The server timed out")]
    #[diagnostic(code(longbox::timeout))]
    Timeout,

    #[error("{message}")]
    #[diagnostic(code(longbox::operation_failed))]
    Operation { message: String },
}

impl CliError {
    /// Map this error to its process exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Validation { .. } | Self::UnknownProfile { .. } => exit_code::USAGE,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Operation { .. } => exit_code::GENERAL,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::Timeout { .. } => Self::Timeout,
            other => Self::Operation {
                message: other.to_string(),
            },
        }
    }
}

impl From<longbox_config::ConfigError> for CliError {
    fn from(err: longbox_config::ConfigError) -> Self {
        match err {
            longbox_config::ConfigError::NoCredentials { profile } => {
                Self::NoCredentials { profile }
            }
            longbox_config::ConfigError::UnknownProfile { profile } => {
                Self::UnknownProfile { profile }
            }
            longbox_config::ConfigError::Validation { field, reason } => {
                Self::Validation { field, reason }
            }
            other => Self::Operation {
                message: other.to_string(),
            },
        }
    }
}
