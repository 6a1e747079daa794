// ── Last-read entity ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ComicId, Keyed};

/// The caller's read marker for one comic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastReadEntry {
    pub comic_id: ComicId,
    pub last_read: DateTime<Utc>,
}

impl Keyed for LastReadEntry {
    type Key = ComicId;

    fn key(&self) -> ComicId {
        self.comic_id
    }
}
