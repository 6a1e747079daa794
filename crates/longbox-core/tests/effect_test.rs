// End-to-end effect tests: dispatch → HTTP (wiremock) → reducer → snapshot.
//
// Sessions run with token auth and the push channel disabled, so the
// only traffic is what the effects generate.

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use longbox_core::{
    Action, Alert, AppState, AuthCredentials, BlockedListAction, ComicFilter, ComicListAction,
    ServerConfig, Session, UserListAction,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn connected_session(server: &MockServer) -> Session {
    let config = ServerConfig {
        url: server.uri().parse().expect("mock server URI is valid"),
        auth: AuthCredentials::Token(SecretString::from("tok-123")),
        push_enabled: false,
        ..ServerConfig::default()
    };

    let session = Session::new(config);
    session.connect().await.expect("connect should succeed");
    session
}

/// Wait until the store publishes a snapshot satisfying `pred`.
async fn wait_for(session: &Session, pred: impl Fn(&AppState) -> bool) -> Arc<AppState> {
    let mut states = session.states();
    if pred(states.current()) {
        return Arc::clone(states.current());
    }

    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let snapshot = states.changed().await.expect("store is alive");
            if pred(&snapshot) {
                return snapshot;
            }
        }
    })
    .await
    .expect("condition should be reached before the timeout")
}

// ── Comic page load ─────────────────────────────────────────────────

#[tokio::test]
async fn comic_page_load_populates_entries_and_last_read() {
    let server = MockServer::start().await;

    let body = json!({
        "comics": [
            { "id": 1, "series": "Astro Patrol", "issueNumber": "1", "pageCount": 22 },
            { "id": 2, "series": "Astro Patrol", "issueNumber": "2", "pageCount": 24 }
        ],
        "totalCount": 2,
        "filteredCount": 2,
        "coverYears": [2019],
        "coverMonths": [3],
        "lastReadEntries": [
            { "comicId": 1, "lastRead": "2026-01-15T20:00:00Z" }
        ]
    });
    Mock::given(method("POST"))
        .and(path("/api/library/comics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let session = connected_session(&server).await;
    session.dispatch(ComicListAction::LoadRequested(ComicFilter {
        page_size: 25,
        page_index: 0,
        ..ComicFilter::default()
    }));

    let snapshot = wait_for(&session, |s| {
        !s.comic_list.list.loading && !s.comic_list.list.entries.is_empty()
    })
    .await;

    assert_eq!(snapshot.comic_list.list.entries.len(), 2);
    assert_eq!(snapshot.comic_list.list.total_count, 2);
    assert_eq!(snapshot.comic_list.cover_years, vec![2019]);
    // The same response fanned out into the last-read slice.
    assert_eq!(snapshot.last_read.entries.len(), 1);
    assert_eq!(snapshot.last_read.entries[0].comic_id.0, 1);

    session.disconnect().await;
}

// ── Page block save ─────────────────────────────────────────────────

#[tokio::test]
async fn page_block_save_toggles_saving_and_raises_info_alert() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/pages/blocked/state"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true }))
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&server)
        .await;

    let session = connected_session(&server).await;
    let mut alerts = session.alerts();

    session.dispatch(BlockedListAction::SaveRequested {
        hash: "0a1b".into(),
        blocked: true,
    });

    // The reducer flips `saving` on the trigger itself, before the
    // response lands.
    let in_flight = wait_for(&session, |s| s.blocked_list.saving).await;
    assert!(in_flight.blocked_list.saving);

    let settled = wait_for(&session, |s| !s.blocked_list.saving).await;
    assert_eq!(settled.blocked_list.list.entries.len(), 1);
    assert_eq!(settled.blocked_list.list.entries[0].hash, "0a1b");

    let alert = tokio::time::timeout(Duration::from_secs(5), alerts.recv())
        .await
        .expect("alert should arrive")
        .expect("alert channel is open");
    assert_eq!(*alert, Alert::Info("Page hash 0a1b blocked.".into()));

    session.disconnect().await;
}

#[tokio::test]
async fn page_block_soft_failure_raises_specific_error_alert() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/pages/blocked/state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "hash is not a page hash"
        })))
        .mount(&server)
        .await;

    let session = connected_session(&server).await;
    let mut alerts = session.alerts();

    session.dispatch(BlockedListAction::SaveRequested {
        hash: "zz".into(),
        blocked: true,
    });

    let settled = wait_for(&session, |s| !s.blocked_list.saving).await;
    assert!(settled.blocked_list.list.entries.is_empty());

    let alert = tokio::time::timeout(Duration::from_secs(5), alerts.recv())
        .await
        .expect("alert should arrive")
        .expect("alert channel is open");
    assert!(alert.is_error());
    assert!(alert.message().contains("hash is not a page hash"));

    session.disconnect().await;
}

// ── Failure tiers ───────────────────────────────────────────────────

#[tokio::test]
async fn transport_failure_keeps_stale_entries_for_incremental_area() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "login": "admin", "admin": true }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let session = connected_session(&server).await;
    session.dispatch(UserListAction::LoadRequested);
    wait_for(&session, |s| !s.user_list.entries.is_empty()).await;

    // Second load fails at the transport level.
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut alerts = session.alerts();
    session.dispatch(UserListAction::LoadRequested);

    let snapshot = wait_for(&session, |s| !s.user_list.loading).await;
    // Stale data is never rolled back; the busy flag never sticks.
    assert_eq!(snapshot.user_list.entries.len(), 1);

    let alert = tokio::time::timeout(Duration::from_secs(5), alerts.recv())
        .await
        .expect("alert should arrive")
        .expect("alert channel is open");
    assert_eq!(*alert, Alert::Error("Unable to load accounts.".into()));

    session.disconnect().await;
}

#[tokio::test]
async fn unexpected_failure_emits_one_failure_action_and_one_generic_alert() {
    let server = MockServer::start().await;

    // A body the effect cannot deserialize: the outer boundary catches
    // it, not the expected-failure path.
    Mock::given(method("GET"))
        .and(path("/api/pages/blocked"))
        .respond_with(ResponseTemplate::new(200).set_body_string("surprise!"))
        .mount(&server)
        .await;

    let session = connected_session(&server).await;
    let mut tap = session.store().actions();
    let mut alerts = session.alerts();

    session.dispatch(BlockedListAction::LoadRequested);
    wait_for(&session, |s| !s.blocked_list.list.loading).await;
    // Give any (erroneous) extra dispatch a chance to land.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let mut failures = 0;
    while let Ok(action) = tap.try_recv() {
        if action == Action::BlockedList(BlockedListAction::LoadFailed) {
            failures += 1;
        }
    }
    assert_eq!(failures, 1, "exactly one failure action per failed call");

    let alert = tokio::time::timeout(Duration::from_secs(5), alerts.recv())
        .await
        .expect("alert should arrive")
        .expect("alert channel is open");
    assert_eq!(
        *alert,
        Alert::Error("Something went wrong. Please try again.".into())
    );
    assert!(alerts.try_recv().is_err(), "exactly one alert per failure");

    session.disconnect().await;
}

// ── Credential login path ───────────────────────────────────────────

#[tokio::test]
async fn connect_with_credentials_logs_in_first() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "token": "tok-456",
            "user": { "id": 1, "login": "admin", "admin": true }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ServerConfig {
        url: server.uri().parse().expect("mock server URI is valid"),
        auth: AuthCredentials::Credentials {
            username: "admin".into(),
            password: SecretString::from("hunter2"),
        },
        push_enabled: false,
        ..ServerConfig::default()
    };

    let session = Session::new(config);
    session.connect().await.expect("connect should log in");
    session.disconnect().await;
}
