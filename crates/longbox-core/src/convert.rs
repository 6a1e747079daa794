// ── Wire ↔ domain conversions ──
//
// Field-by-field reshaping between longbox-api wire types and the
// domain model. Nothing in here contains logic beyond renaming and the
// `detail` unwrapping some push topics use.

use serde::de::DeserializeOwned;
use serde_json::Value;

use longbox_api::rest::models::{
    BlockedHashRecord, ComicRecord, LastReadRecord, LoadComicsRequest, UserRecord,
};

use crate::action::{ComicFilter, SortDirection, SortField};
use crate::model::{BlockedHash, Comic, ComicId, LastReadEntry, User, UserId};

// ── Wire → domain ───────────────────────────────────────────────────

impl From<ComicRecord> for Comic {
    fn from(record: ComicRecord) -> Self {
        Self {
            id: ComicId(record.id),
            publisher: record.publisher,
            series: record.series,
            volume: record.volume,
            issue_number: record.issue_number,
            title: record.title,
            cover_date: record.cover_date,
            page_count: record.page_count,
            archive_type: record.archive_type,
            added_date: record.added_date,
        }
    }
}

impl From<BlockedHashRecord> for BlockedHash {
    fn from(record: BlockedHashRecord) -> Self {
        Self {
            hash: record.hash,
            label: record.label,
            comic_count: record.comic_count,
            created_on: record.created_on,
        }
    }
}

impl From<LastReadRecord> for LastReadEntry {
    fn from(record: LastReadRecord) -> Self {
        Self {
            comic_id: ComicId(record.comic_id),
            last_read: record.last_read,
        }
    }
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: UserId(record.id),
            login: record.login,
            email: record.email,
            admin: record.admin,
        }
    }
}

// ── Domain → wire ───────────────────────────────────────────────────

impl From<&ComicFilter> for LoadComicsRequest {
    fn from(filter: &ComicFilter) -> Self {
        Self {
            page_size: filter.page_size,
            page_index: filter.page_index,
            cover_year: filter.cover_year,
            cover_month: filter.cover_month,
            archive_type: filter.archive_type.clone(),
            publisher: filter.publisher.clone(),
            series: filter.series.clone(),
            search_text: filter.search_text.clone(),
            unread_only: filter.unread_only.then_some(true),
            sort_by: filter.sort_by.map(|f| sort_field_name(f).to_owned()),
            sort_direction: Some(sort_direction_name(filter.sort_direction).to_owned()),
        }
    }
}

fn sort_field_name(field: SortField) -> &'static str {
    match field {
        SortField::AddedDate => "added-date",
        SortField::CoverDate => "cover-date",
        SortField::IssueNumber => "issue-number",
        SortField::Series => "series",
    }
}

fn sort_direction_name(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => "asc",
        SortDirection::Descending => "desc",
    }
}

// ── Push payload reshaping ──────────────────────────────────────────

/// Some topics wrap the entity in a `{ "detail": … }` envelope; others
/// send it bare. Callers always get the entity value.
pub(crate) fn unwrap_detail(payload: &Value) -> &Value {
    payload.get("detail").unwrap_or(payload)
}

/// Deserialize a push payload into a wire record, unwrapping `detail`
/// first. Returns `None` (after a debug log) for malformed payloads --
/// a bad frame never takes the subscription down.
pub(crate) fn record_from_payload<T: DeserializeOwned>(payload: &Value) -> Option<T> {
    match serde_json::from_value(unwrap_detail(payload).clone()) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::debug!(error = %e, "discarding malformed push payload");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn filter_maps_onto_request_shape() {
        let filter = ComicFilter {
            page_size: 50,
            page_index: 2,
            publisher: Some("Nova Press".into()),
            unread_only: true,
            sort_by: Some(SortField::CoverDate),
            sort_direction: SortDirection::Descending,
            ..ComicFilter::default()
        };

        let request = LoadComicsRequest::from(&filter);
        assert_eq!(request.page_size, 50);
        assert_eq!(request.page_index, 2);
        assert_eq!(request.publisher.as_deref(), Some("Nova Press"));
        assert_eq!(request.unread_only, Some(true));
        assert_eq!(request.sort_by.as_deref(), Some("cover-date"));
        assert_eq!(request.sort_direction.as_deref(), Some("desc"));
    }

    #[test]
    fn unread_flag_is_omitted_when_false() {
        let request = LoadComicsRequest::from(&ComicFilter::default());
        assert_eq!(request.unread_only, None);
    }

    #[test]
    fn record_from_payload_unwraps_detail() {
        let payload = json!({ "detail": { "id": 7, "pageCount": 22 } });
        let comic: ComicRecord =
            record_from_payload(&payload).expect("payload should deserialize");
        assert_eq!(comic.id, 7);
        assert_eq!(comic.page_count, 22);
    }

    #[test]
    fn record_from_payload_accepts_bare_entities() {
        let payload = json!({ "comicId": 7, "lastRead": "2026-01-15T20:00:00Z" });
        let entry: LastReadRecord =
            record_from_payload(&payload).expect("payload should deserialize");
        assert_eq!(entry.comic_id, 7);
    }

    #[test]
    fn record_from_payload_rejects_garbage() {
        let payload = json!({ "detail": "not an object" });
        assert!(record_from_payload::<ComicRecord>(&payload).is_none());
    }
}
