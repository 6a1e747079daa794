//! Shared configuration for the longbox CLI.
//!
//! TOML profiles, credential resolution (env + plaintext), and
//! translation to `longbox_core::ServerConfig`. The CLI owns flag
//! overrides on top; this crate owns files and environment.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use longbox_core::{AuthCredentials, ServerConfig, TlsVerification};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("unknown profile '{profile}'")]
    UnknownProfile { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named library-server profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named library-server profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Server base URL (e.g., "https://library.example.org:7171").
    pub server: String,

    /// API token (plaintext -- prefer the env var).
    pub token: Option<String>,

    /// Environment variable name containing the API token.
    pub token_env: Option<String>,

    /// Username for credential login.
    pub username: Option<String>,

    /// Password for credential login (plaintext -- prefer `LONGBOX_PASSWORD`).
    pub password: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,

    /// Disable the push channel for this profile.
    pub push: Option<bool>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "longbox", "longbox").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("longbox");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load a Config from an explicit path + environment. Split out so
/// tests can point at a temp file.
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("LONGBOX_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Profile lookup ──────────────────────────────────────────────────

/// Find the named profile, or the config's default when `name` is `None`.
pub fn select_profile<'a>(
    config: &'a Config,
    name: Option<&'a str>,
) -> Result<(&'a str, &'a Profile), ConfigError> {
    let name = name
        .or(config.default_profile.as_deref())
        .unwrap_or("default");

    config
        .profiles
        .get(name)
        .map(|profile| (name, profile))
        .ok_or_else(|| ConfigError::UnknownProfile {
            profile: name.to_owned(),
        })
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve an API token from the credential chain: profile's
/// `token_env` → `LONGBOX_TOKEN` → plaintext in config.
pub fn resolve_token(profile: &Profile) -> Option<SecretString> {
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    if let Ok(val) = std::env::var("LONGBOX_TOKEN") {
        return Some(SecretString::from(val));
    }

    profile
        .token
        .as_ref()
        .map(|token| SecretString::from(token.clone()))
}

/// Resolve username + password: profile username (or `LONGBOX_USERNAME`)
/// plus `LONGBOX_PASSWORD` or the plaintext config value.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<(String, SecretString), ConfigError> {
    let username = profile
        .username
        .clone()
        .or_else(|| std::env::var("LONGBOX_USERNAME").ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })?;

    if let Ok(pw) = std::env::var("LONGBOX_PASSWORD") {
        return Ok((username, SecretString::from(pw)));
    }

    if let Some(ref pw) = profile.password {
        return Ok((username, SecretString::from(pw.clone())));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Resolve `AuthCredentials`: a token wins over username/password.
pub fn resolve_auth(profile: &Profile, profile_name: &str) -> Result<AuthCredentials, ConfigError> {
    if let Some(token) = resolve_token(profile) {
        return Ok(AuthCredentials::Token(token));
    }

    let (username, password) = resolve_credentials(profile, profile_name)?;
    Ok(AuthCredentials::Credentials { username, password })
}

// ── Translation to core config ──────────────────────────────────────

/// Build a `ServerConfig` from a profile.
pub fn profile_to_server_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<ServerConfig, ConfigError> {
    let url: url::Url = profile.server.parse().map_err(|_| ConfigError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {}", profile.server),
    })?;

    let auth = resolve_auth(profile, profile_name)?;

    let tls = if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(default_timeout()));

    Ok(ServerConfig {
        url,
        auth,
        tls,
        timeout,
        push_enabled: profile.push.unwrap_or(true),
    })
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn profile(server: &str) -> Profile {
        Profile {
            server: server.into(),
            token: None,
            token_env: None,
            username: None,
            password: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
            push: None,
        }
    }

    #[test]
    fn token_wins_over_credentials() {
        let mut p = profile("http://127.0.0.1:7171");
        p.token = Some("tok-123".into());
        p.username = Some("admin".into());
        p.password = Some("hunter2".into());

        let auth = resolve_auth(&p, "default").expect("token resolves");
        match auth {
            AuthCredentials::Token(token) => assert_eq!(token.expose_secret(), "tok-123"),
            AuthCredentials::Credentials { .. } => panic!("token should win"),
        }
    }

    #[test]
    fn missing_credentials_is_an_error() {
        let p = profile("http://127.0.0.1:7171");
        assert!(matches!(
            resolve_auth(&p, "default"),
            Err(ConfigError::NoCredentials { .. })
        ));
    }

    #[test]
    fn profile_translates_to_server_config() {
        let mut p = profile("https://library.example.org:7171");
        p.token = Some("tok".into());
        p.timeout = Some(5);
        p.push = Some(false);

        let cfg = profile_to_server_config(&p, "default").expect("profile is valid");
        assert_eq!(cfg.url.as_str(), "https://library.example.org:7171/");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert!(!cfg.push_enabled);
        assert_eq!(cfg.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn invalid_server_url_is_a_validation_error() {
        let mut p = profile("not a url");
        p.token = Some("tok".into());
        assert!(matches!(
            profile_to_server_config(&p, "default"),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn select_profile_falls_back_to_default_name() {
        let mut config = Config::default();
        config
            .profiles
            .insert("default".into(), profile("http://127.0.0.1:7171"));

        let (name, _) = select_profile(&config, None).expect("default profile exists");
        assert_eq!(name, "default");

        assert!(matches!(
            select_profile(&config, Some("missing")),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn config_file_round_trips_through_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "home"

[profiles.home]
server = "http://127.0.0.1:7171"
token = "tok-123"
"#,
        )
        .expect("write config");

        let config = load_config_from(&path).expect("config loads");
        assert_eq!(config.default_profile.as_deref(), Some("home"));
        let (name, profile) = select_profile(&config, None).expect("profile resolves");
        assert_eq!(name, "home");
        assert_eq!(profile.server, "http://127.0.0.1:7171");
    }
}
