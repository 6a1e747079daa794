// ── Comic book entity ──

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Keyed;

/// Stable numeric identifier for a comic book.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ComicId(pub u64);

impl fmt::Display for ComicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ComicId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// One comic book in the library.
///
/// A value object: push updates and page loads always replace the whole
/// record, never merge fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comic {
    pub id: ComicId,
    pub publisher: Option<String>,
    pub series: Option<String>,
    pub volume: Option<String>,
    pub issue_number: Option<String>,
    pub title: Option<String>,
    pub cover_date: Option<NaiveDate>,
    pub page_count: u32,
    pub archive_type: Option<String>,
    pub added_date: Option<DateTime<Utc>>,
}

impl Comic {
    /// Display name: "{series} #{issue}" with fallbacks for bare records.
    pub fn display_name(&self) -> String {
        match (self.series.as_deref(), self.issue_number.as_deref()) {
            (Some(series), Some(issue)) => format!("{series} #{issue}"),
            (Some(series), None) => series.to_owned(),
            (None, _) => self
                .title
                .clone()
                .unwrap_or_else(|| format!("comic {}", self.id)),
        }
    }
}

impl Keyed for Comic {
    type Key = ComicId;

    fn key(&self) -> ComicId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(id: u64) -> Comic {
        Comic {
            id: ComicId(id),
            publisher: None,
            series: None,
            volume: None,
            issue_number: None,
            title: None,
            cover_date: None,
            page_count: 0,
            archive_type: None,
            added_date: None,
        }
    }

    #[test]
    fn display_name_prefers_series_and_issue() {
        let comic = Comic {
            series: Some("Astro Patrol".into()),
            issue_number: Some("7".into()),
            ..bare(1)
        };
        assert_eq!(comic.display_name(), "Astro Patrol #7");
    }

    #[test]
    fn display_name_falls_back_to_id() {
        assert_eq!(bare(42).display_name(), "comic 42");
    }

    #[test]
    fn key_is_the_id() {
        assert_eq!(bare(9).key(), ComicId(9));
    }
}
