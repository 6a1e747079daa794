// ── User account entity ──

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Keyed;

/// Stable numeric identifier for a user account.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One account on the library server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub login: String,
    pub email: Option<String>,
    pub admin: bool,
}

impl Keyed for User {
    type Key = UserId;

    fn key(&self) -> UserId {
        self.id
    }
}
