// REST API HTTP client
//
// Wraps `reqwest::Client` with library-server URL construction, bearer
// auth, and status-body checking. All endpoint modules (comics, hashes,
// users) are implemented as inherent methods via separate files to keep
// this module focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::rest::models::StatusResponse;
use crate::transport::TransportConfig;

/// Raw HTTP client for the longbox library server's REST API.
///
/// Handles base-URL construction and bearer-token auth. Methods on the
/// endpoint modules return deserialized payloads; write-style endpoints
/// check the `{ success, error }` status body and translate a
/// `success: false` answer into [`Error::Remote`].
pub struct LibraryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl LibraryClient {
    /// Create a new unauthenticated client from a `TransportConfig`.
    ///
    /// The `base_url` should be the server root, e.g.
    /// `https://library.example.org:7171`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client whose requests carry `Authorization: Bearer {token}`.
    ///
    /// Use this after [`login`](Self::login) to build the authenticated
    /// client the rest of the application talks through.
    pub fn with_token(
        base_url: Url,
        transport: &TransportConfig,
        token: &str,
    ) -> Result<Self, Error> {
        let mut headers = reqwest::header::HeaderMap::new();
        let value = reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| Error::Authentication {
                message: format!("token is not a valid header value: {e}"),
            })?;
        headers.insert(reqwest::header::AUTHORIZATION, value);

        let http = transport.build_client_with_headers(headers)?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
        })
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let full = format!(
            "{}/api/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path
        );
        Ok(Url::parse(&full)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and deserialize the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        Self::parse_body(resp).await
    }

    /// Send a POST request with a JSON body and deserialize the response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_body(resp).await
    }

    /// POST a JSON body to a write-style endpoint and check the
    /// `{ success, error }` status body.
    pub(crate) async fn post_status(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<(), Error> {
        let status: StatusResponse = self.post(url, body).await?;
        if status.success {
            Ok(())
        } else {
            Err(Error::Remote {
                message: status
                    .error
                    .unwrap_or_else(|| "request rejected without a reason".into()),
            })
        }
    }

    /// Check the HTTP status and deserialize the body, keeping the raw
    /// text around for error diagnostics.
    async fn parse_body<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::SessionExpired);
        }
        if let Err(e) = resp.error_for_status_ref() {
            return Err(Error::Transport(e));
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
