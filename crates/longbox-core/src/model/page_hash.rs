// ── Blocked page hash entity ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Keyed;

/// A page hash on the server's block list.
///
/// Keyed by the hash string itself; the rest is display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockedHash {
    pub hash: String,
    pub label: Option<String>,
    pub comic_count: u32,
    pub created_on: Option<DateTime<Utc>>,
}

impl BlockedHash {
    /// A bare entry for a hash with no metadata yet -- what the delta
    /// form (`"+HASH"`) carries.
    pub fn bare(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            label: None,
            comic_count: 0,
            created_on: None,
        }
    }
}

impl Keyed for BlockedHash {
    type Key = String;

    fn key(&self) -> String {
        self.hash.clone()
    }
}
