//! Push channel with auto-reconnect.
//!
//! Connects to the library server's WebSocket endpoint and streams topic
//! frames through a [`tokio::sync::broadcast`] channel. Handles
//! reconnection with exponential backoff + jitter automatically, and
//! exposes a `connected` watch flag that flips on every connect and
//! disconnect -- subscription management upstream keys off that flag.
//!
//! # Example
//!
//! ```rust,ignore
//! use longbox_api::push::{PushClient, ReconnectConfig};
//! use tokio_util::sync::CancellationToken;
//! use url::Url;
//!
//! let cancel = CancellationToken::new();
//! let ws_url = Url::parse("wss://library.example.org/ws")?;
//!
//! let client = PushClient::connect(ws_url, ReconnectConfig::default(), cancel.clone(), None);
//! let mut rx = client.subscribe();
//!
//! while let Ok(frame) = rx.recv().await {
//!     println!("{}: {}", frame.topic, frame.payload);
//! }
//!
//! client.shutdown();
//! ```

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tokio_tungstenite::tungstenite::{self, ClientRequestBuilder};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::Error;

// ── Broadcast channel capacity ───────────────────────────────────────

const FRAME_CHANNEL_CAPACITY: usize = 1024;

// ── PushFrame ────────────────────────────────────────────────────────

/// One frame from the push channel: a topic name plus its payload.
///
/// The payload stays as raw JSON here -- `longbox-core` reshapes it into
/// domain updates per topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushFrame {
    /// Topic name, e.g. `"comic-list.update"`.
    pub topic: String,

    /// Topic-specific payload, untouched.
    #[serde(default)]
    pub payload: serde_json::Value,
}

// ── ReconnectConfig ──────────────────────────────────────────────────

/// Exponential backoff configuration for push-channel reconnection.
#[derive(Debug, Clone)]
pub struct ReconnectConfig {
    /// Delay before the first reconnection attempt. Default: 1s.
    pub initial_delay: Duration,

    /// Upper bound on backoff delay. Default: 30s.
    pub max_delay: Duration,

    /// Maximum reconnection attempts before giving up.
    /// `None` means retry forever.
    pub max_retries: Option<u32>,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            max_retries: None,
        }
    }
}

// ── PushClient ───────────────────────────────────────────────────────

/// Handle to a running push-channel stream.
///
/// Spawns a background reconnection loop on construction. Drop all frame
/// receivers and call [`shutdown`](Self::shutdown) to tear it down.
pub struct PushClient {
    frame_rx: broadcast::Receiver<Arc<PushFrame>>,
    connected_rx: watch::Receiver<bool>,
    cancel: CancellationToken,
}

impl PushClient {
    /// Connect to the server's push endpoint and spawn the reconnection loop.
    ///
    /// Returns immediately once the background task is spawned. The first
    /// connection attempt happens asynchronously -- watch
    /// [`connected`](Self::connected) to learn when the channel is live.
    /// If `token` is provided it is sent as a bearer `Authorization`
    /// header on the upgrade request.
    pub fn connect(
        ws_url: Url,
        reconnect: ReconnectConfig,
        cancel: CancellationToken,
        token: Option<String>,
    ) -> Self {
        let (frame_tx, frame_rx) = broadcast::channel(FRAME_CHANNEL_CAPACITY);
        let (connected_tx, connected_rx) = watch::channel(false);

        let task_cancel = cancel.clone();
        tokio::spawn(async move {
            ws_loop(ws_url, frame_tx, connected_tx, reconnect, task_cancel, token).await;
        });

        Self {
            frame_rx,
            connected_rx,
            cancel,
        }
    }

    /// Get a new broadcast receiver for the frame stream.
    ///
    /// Multiple consumers can subscribe concurrently. If a consumer falls
    /// behind, it receives [`broadcast::error::RecvError::Lagged`].
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<PushFrame>> {
        self.frame_rx.resubscribe()
    }

    /// Watch the connected flag: `true` while a WebSocket session is live.
    pub fn connected(&self) -> watch::Receiver<bool> {
        self.connected_rx.clone()
    }

    /// Signal the background task to shut down gracefully.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

// ── Background reconnection loop ─────────────────────────────────────

/// Main loop: connect → read → on error, backoff → reconnect.
async fn ws_loop(
    ws_url: Url,
    frame_tx: broadcast::Sender<Arc<PushFrame>>,
    connected_tx: watch::Sender<bool>,
    reconnect: ReconnectConfig,
    cancel: CancellationToken,
    token: Option<String>,
) {
    let mut attempt: u32 = 0;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            result = connect_and_read(&ws_url, &frame_tx, &connected_tx, &cancel, token.as_deref()) => {
                let _ = connected_tx.send(false);
                match result {
                    // Clean disconnect (server close frame or stream ended).
                    // Reset attempt counter and reconnect immediately.
                    Ok(()) => {
                        tracing::info!("push channel disconnected cleanly, reconnecting");
                        attempt = 0;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, attempt, "push channel error");

                        if let Some(max) = reconnect.max_retries {
                            if attempt >= max {
                                tracing::error!(
                                    max_retries = max,
                                    "push channel reconnection limit reached, giving up"
                                );
                                break;
                            }
                        }

                        let delay = calculate_backoff(attempt, &reconnect);
                        tracing::info!(
                            delay_ms = delay.as_millis() as u64,
                            attempt,
                            "waiting before reconnect"
                        );

                        tokio::select! {
                            biased;
                            _ = cancel.cancelled() => break,
                            _ = tokio::time::sleep(delay) => {}
                        }

                        attempt += 1;
                    }
                }
            }
        }
    }

    let _ = connected_tx.send(false);
}

// ── Single connection lifecycle ──────────────────────────────────────

/// Establish a single WebSocket connection, read frames until it drops.
///
/// Flips the connected flag to `true` once the upgrade completes; the
/// caller flips it back to `false` when this returns.
async fn connect_and_read(
    url: &Url,
    frame_tx: &broadcast::Sender<Arc<PushFrame>>,
    connected_tx: &watch::Sender<bool>,
    cancel: &CancellationToken,
    token: Option<&str>,
) -> Result<(), Error> {
    tracing::info!(url = %url, "connecting to push channel");

    let uri: tungstenite::http::Uri = url
        .as_str()
        .parse()
        .map_err(|e: tungstenite::http::uri::InvalidUri| Error::PushConnect(e.to_string()))?;

    let mut request = ClientRequestBuilder::new(uri);
    if let Some(token_val) = token {
        request = request.with_header("Authorization", format!("Bearer {token_val}"));
    }

    let (ws_stream, _response) = tokio_tungstenite::connect_async(request)
        .await
        .map_err(|e| Error::PushConnect(e.to_string()))?;

    tracing::info!("push channel connected");
    let _ = connected_tx.send(true);

    let (_write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(()),
            frame = read.next() => {
                match frame {
                    Some(Ok(tungstenite::Message::Text(text))) => {
                        parse_and_broadcast(&text, frame_tx);
                    }
                    Some(Ok(tungstenite::Message::Ping(_))) => {
                        // tungstenite handles pong replies automatically
                        tracing::trace!("push channel ping");
                    }
                    Some(Ok(tungstenite::Message::Close(frame))) => {
                        if let Some(ref cf) = frame {
                            tracing::info!(
                                code = %cf.code,
                                reason = %cf.reason,
                                "push channel close frame received"
                            );
                        } else {
                            tracing::info!("push channel close frame received (no payload)");
                        }
                        return Ok(());
                    }
                    Some(Err(e)) => {
                        return Err(Error::PushConnect(e.to_string()));
                    }
                    None => {
                        // Stream ended without a close frame
                        tracing::info!("push channel stream ended");
                        return Ok(());
                    }
                    _ => {
                        // Binary, Pong, Frame -- ignore
                    }
                }
            }
        }
    }
}

// ── Frame parsing ────────────────────────────────────────────────────

/// Parse a text frame and broadcast it if it carries a topic.
///
/// Frames without a `topic` field (heartbeats, acks) are dropped after a
/// debug log -- consumers only ever see well-formed topic frames.
fn parse_and_broadcast(text: &str, frame_tx: &broadcast::Sender<Arc<PushFrame>>) {
    let frame: PushFrame = match serde_json::from_str(text) {
        Ok(f) => f,
        Err(e) => {
            tracing::debug!(error = %e, "failed to parse push frame");
            return;
        }
    };

    if frame.topic.is_empty() {
        tracing::debug!("push frame without a topic, skipping");
        return;
    }

    // Ignore send errors -- just means no active subscribers right now
    let _ = frame_tx.send(Arc::new(frame));
}

// ── Backoff calculation ──────────────────────────────────────────────

/// Exponential backoff with jitter.
///
/// `delay = min(initial * 2^attempt, max) + jitter`
///
/// Jitter is +-25% to spread out reconnection storms from multiple clients.
fn calculate_backoff(attempt: u32, config: &ReconnectConfig) -> Duration {
    let base = config.initial_delay.as_secs_f64() * 2.0_f64.powi(attempt as i32);
    let capped = base.min(config.max_delay.as_secs_f64());

    // Deterministic "jitter" seeded from the attempt number.
    // Not cryptographically random, but good enough for backoff spread.
    let jitter_factor = 1.0 + 0.25 * ((attempt as f64 * 7.3).sin());
    let with_jitter = (capped * jitter_factor).max(0.0);

    Duration::from_secs_f64(with_jitter)
}

// ── Tests ────────────────────────────────────────────────────────────
