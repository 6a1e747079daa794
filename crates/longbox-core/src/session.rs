// ── Session facade ──
//
// Full lifecycle management for a library server connection: token
// acquisition, effect tasks, the push channel, and the subscription
// manager, all wired to one store and one alert channel.

use std::sync::Arc;

use secrecy::ExposeSecret;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use url::Url;

use longbox_api::transport::{TlsMode, TransportConfig};
use longbox_api::{LibraryClient, PushClient, ReconnectConfig};

use crate::action::Action;
use crate::alert::{Alert, AlertChannel};
use crate::config::{AuthCredentials, ServerConfig, TlsVerification};
use crate::effect::{self, EffectContext};
use crate::error::CoreError;
use crate::store::{StateStream, Store};
use crate::sync;

// ── ConnectionState ──────────────────────────────────────────────

/// Connection state observable by consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

// ── Session ──────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<SessionInner>`. Owns the store, the alert
/// channel, the effect tasks, and the push subscription manager.
/// Consumers read through snapshots/selectors and write through
/// [`dispatch`](Self::dispatch) -- raw state is never handed out.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    config: ServerConfig,
    store: Store,
    alerts: AlertChannel,
    connection_state: watch::Sender<ConnectionState>,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Session {
    /// Create a new Session from configuration. Does NOT connect --
    /// call [`connect()`](Self::connect) to authenticate and start
    /// background tasks.
    pub fn new(config: ServerConfig) -> Self {
        let (connection_state, _) = watch::channel(ConnectionState::Disconnected);

        Self {
            inner: Arc::new(SessionInner {
                config,
                store: Store::new(),
                alerts: AlertChannel::new(),
                connection_state,
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Access the session configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Access the underlying store.
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// Dispatch one action into the store.
    pub fn dispatch(&self, action: impl Into<Action>) {
        self.inner.store.dispatch(action);
    }

    /// Subscribe to the stream of state snapshots.
    pub fn states(&self) -> StateStream {
        self.inner.store.states()
    }

    /// Subscribe to user-facing alerts.
    pub fn alerts(&self) -> tokio::sync::broadcast::Receiver<Arc<Alert>> {
        self.inner.alerts.subscribe()
    }

    /// Subscribe to connection state changes.
    pub fn connection_state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.connection_state.subscribe()
    }

    // ── Connection lifecycle ─────────────────────────────────────

    /// Connect to the library server.
    ///
    /// Resolves a bearer token (logging in when configured with
    /// credentials), spawns the effect tasks, and -- when enabled --
    /// starts the push channel plus its subscription manager.
    pub async fn connect(&self) -> Result<(), CoreError> {
        let _ = self
            .inner
            .connection_state
            .send(ConnectionState::Connecting);

        match self.connect_inner().await {
            Ok(()) => {
                let _ = self.inner.connection_state.send(ConnectionState::Connected);
                info!("connected to library server");
                Ok(())
            }
            Err(e) => {
                let _ = self.inner.connection_state.send(ConnectionState::Failed);
                Err(e)
            }
        }
    }

    async fn connect_inner(&self) -> Result<(), CoreError> {
        let config = &self.inner.config;
        let transport = build_transport(config);

        // Resolve the bearer token
        let token = match &config.auth {
            AuthCredentials::Token(token) => token.expose_secret().to_owned(),
            AuthCredentials::Credentials { username, password } => {
                let anonymous = LibraryClient::new(config.url.clone(), &transport)?;
                let (token, _user) = anonymous.login(username, password).await?;
                debug!("session authentication successful");
                token
            }
        };

        let client = Arc::new(LibraryClient::with_token(
            config.url.clone(),
            &transport,
            &token,
        )?);

        // Spawn the effect tasks
        let ctx = EffectContext {
            store: self.inner.store.clone(),
            alerts: self.inner.alerts.clone(),
            client,
        };
        let mut handles = self.inner.task_handles.lock().await;
        handles.extend(effect::spawn_all(&ctx, &self.inner.cancel));

        // Start the push channel and its subscription manager
        if config.push_enabled {
            let ws_url = push_url(&config.url)?;
            let push = PushClient::connect(
                ws_url,
                ReconnectConfig::default(),
                self.inner.cancel.clone(),
                Some(token),
            );

            handles.push(tokio::spawn(sync::run(
                self.inner.store.clone(),
                push.connected(),
                push.subscribe(),
                self.inner.cancel.clone(),
            )));
        }

        Ok(())
    }

    /// Disconnect from the library server.
    ///
    /// Cancels background tasks, resets the state tree, and returns the
    /// connection state to [`Disconnected`](ConnectionState::Disconnected).
    pub async fn disconnect(&self) {
        self.inner.cancel.cancel();

        // Join all background tasks
        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }

        self.inner.store.dispatch(Action::ResetAll);
        let _ = self
            .inner
            .connection_state
            .send(ConnectionState::Disconnected);
        debug!("disconnected");
    }

    // ── One-shot convenience ─────────────────────────────────────

    /// One-shot: connect, run closure, disconnect.
    ///
    /// Optimized for CLI use: disables the push channel since a single
    /// request-response cycle has nothing to keep live.
    pub async fn oneshot<F, Fut, T>(config: ServerConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Session) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let mut cfg = config;
        cfg.push_enabled = false;

        let session = Session::new(cfg);
        session.connect().await?;
        let result = f(session.clone()).await;
        session.disconnect().await;
        result
    }
}

// ── Helpers ──────────────────────────────────────────────────────

/// Build a [`TransportConfig`] from the session configuration.
fn build_transport(config: &ServerConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}

/// Derive the push endpoint from the server base URL: same host, `ws`
/// scheme family, `/ws` path.
fn push_url(base: &Url) -> Result<Url, CoreError> {
    let mut url = base.join("/ws").map_err(|e| CoreError::Config {
        message: format!("cannot derive push URL: {e}"),
    })?;

    let scheme = match url.scheme() {
        "https" | "wss" => "wss",
        _ => "ws",
    };
    url.set_scheme(scheme).map_err(|()| CoreError::Config {
        message: format!("cannot set push URL scheme on {url}"),
    })?;

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_url_upgrades_scheme_and_path() {
        let base: Url = "https://library.example.org:7171/".parse().expect("valid");
        let ws = push_url(&base).expect("push URL should derive");
        assert_eq!(ws.as_str(), "wss://library.example.org:7171/ws");
    }

    #[test]
    fn push_url_keeps_plain_ws_for_http() {
        let base: Url = "http://127.0.0.1:7171".parse().expect("valid");
        let ws = push_url(&base).expect("push URL should derive");
        assert_eq!(ws.scheme(), "ws");
    }

    #[tokio::test]
    async fn session_exposes_store_before_connect() {
        let session = Session::new(ServerConfig::default());
        assert!(session.store().snapshot().comic_list.list.entries.is_empty());
        assert_eq!(
            *session.connection_state().borrow(),
            ConnectionState::Disconnected
        );
    }
}
