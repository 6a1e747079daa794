// ── Runtime connection configuration ──
//
// These types describe *how* to connect to a library server.
// They carry credential data and connection tuning, but never touch disk.
// The CLI constructs a `ServerConfig` and hands it in.

use secrecy::SecretString;
use url::Url;

/// How to authenticate with a library server.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// Pre-issued API token (preferred for scripted use).
    Token(SecretString),
    /// Username + password login; the session token is obtained at connect.
    Credentials {
        username: String,
        password: SecretString,
    },
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default)]
pub enum TlsVerification {
    /// System CA store (strict). Default.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs on home servers).
    DangerAcceptInvalid,
}

impl PartialEq for TlsVerification {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::SystemDefaults, Self::SystemDefaults)
            | (Self::DangerAcceptInvalid, Self::DangerAcceptInvalid) => true,
            (Self::CustomCa(a), Self::CustomCa(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for TlsVerification {}

/// Configuration for connecting to a single library server.
///
/// Built by the CLI, passed to `Session` -- core never reads config files.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server URL (e.g., `https://library.example.org:7171`).
    pub url: Url,
    /// Authentication method and credentials.
    pub auth: AuthCredentials,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: std::time::Duration,
    /// Enable the push channel (live incremental updates).
    pub push_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:7171"
                .parse()
                .unwrap_or_else(|_| unreachable!("static URL is valid")),
            auth: AuthCredentials::Credentials {
                username: "reader".into(),
                password: SecretString::from(String::new()),
            },
            tls: TlsVerification::default(),
            timeout: std::time::Duration::from_secs(30),
            push_enabled: true,
        }
    }
}
