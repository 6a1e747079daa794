// Wire types for the library server's REST API.
//
// All payloads are camelCase JSON. These structs mirror the wire shape
// exactly -- longbox-core owns the domain model and converts at the edge.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ── Status envelope ─────────────────────────────────────────────────

/// Status body returned by write-style endpoints.
///
/// `success: false` with an optional `error` message is a soft failure:
/// the transport worked but the server rejected the request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

// ── Auth ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserRecord>,
}

// ── Comics ──────────────────────────────────────────────────────────

/// Filter, sort, and paging parameters for a comic page load.
///
/// Every field is optional except paging; `None` means "no constraint".
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadComicsRequest {
    pub page_size: u32,
    pub page_index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<String>,
}

/// One comic book as the server serializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicRecord {
    pub id: u64,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub issue_number: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub cover_date: Option<NaiveDate>,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub archive_type: Option<String>,
    #[serde(default)]
    pub added_date: Option<DateTime<Utc>>,
}

/// Response to a comic page load. Carries the page itself, the counts,
/// the cover-date facets, and the caller's last-read entries for the page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadComicsResponse {
    pub comics: Vec<ComicRecord>,
    pub total_count: u64,
    pub filtered_count: u64,
    #[serde(default)]
    pub cover_years: Vec<i32>,
    #[serde(default)]
    pub cover_months: Vec<u32>,
    #[serde(default)]
    pub last_read_entries: Vec<LastReadRecord>,
}

// ── Last read ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastReadRecord {
    pub comic_id: u64,
    pub last_read: DateTime<Utc>,
}

// ── Blocked hashes ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedHashRecord {
    pub hash: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub comic_count: u32,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBlockedStateRequest {
    pub hash: String,
    pub blocked: bool,
}

// ── Users ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: u64,
    pub login: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub admin: bool,
}
