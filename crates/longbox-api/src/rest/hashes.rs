// Blocked page-hash endpoints
//
// Reads return the full blocked list; the block/unblock write goes
// through the `{ success, error }` status body so a server-side
// rejection surfaces as `Error::Remote`.

use tracing::debug;

use crate::error::Error;
use crate::rest::client::LibraryClient;
use crate::rest::models::{BlockedHashRecord, SetBlockedStateRequest};

impl LibraryClient {
    /// List every blocked page hash.
    ///
    /// `GET /api/pages/blocked`
    pub async fn load_blocked_hashes(&self) -> Result<Vec<BlockedHashRecord>, Error> {
        let url = self.api_url("pages/blocked")?;
        self.get(url).await
    }

    /// Block or unblock a single page hash.
    ///
    /// `POST /api/pages/blocked/state`
    pub async fn set_blocked_state(&self, hash: &str, blocked: bool) -> Result<(), Error> {
        let url = self.api_url("pages/blocked/state")?;
        debug!(hash, blocked, "setting page block state");
        self.post_status(
            url,
            &SetBlockedStateRequest {
                hash: hash.to_owned(),
                blocked,
            },
        )
        .await
    }
}
