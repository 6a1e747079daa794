// ── User-facing alert channel ──
//
// Effects publish exactly one alert per failure (and one info per
// confirmed write). Consumers subscribe and render however they like;
// only the pre-rendered message text crosses this boundary.

use std::sync::Arc;

use tokio::sync::broadcast;

const ALERT_CHANNEL_CAPACITY: usize = 256;

/// One toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    Info(String),
    Error(String),
}

impl Alert {
    pub fn message(&self) -> &str {
        match self {
            Self::Info(msg) | Self::Error(msg) => msg,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Broadcast fan-out for alerts.
///
/// Cheaply cloneable; send errors (no subscribers) are ignored on
/// purpose -- alerts are fire-and-forget.
#[derive(Clone)]
pub struct AlertChannel {
    tx: broadcast::Sender<Arc<Alert>>,
}

impl AlertChannel {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(ALERT_CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn publish(&self, alert: Alert) {
        let _ = self.tx.send(Arc::new(alert));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.publish(Alert::Info(message.into()));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publish(Alert::Error(message.into()));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<Alert>> {
        self.tx.subscribe()
    }
}

impl Default for AlertChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn alerts_reach_subscribers() {
        let channel = AlertChannel::new();
        let mut rx = channel.subscribe();

        channel.info("page blocked");
        channel.error("load failed");

        let first = rx.recv().await.expect("first alert");
        assert_eq!(*first, Alert::Info("page blocked".into()));
        assert!(!first.is_error());

        let second = rx.recv().await.expect("second alert");
        assert!(second.is_error());
        assert_eq!(second.message(), "load failed");
    }

    #[test]
    fn send_without_subscribers_is_silent() {
        let channel = AlertChannel::new();
        channel.info("nobody listening");
    }
}
