// ── View projections ──
//
// The plain pure functions behind the memoized selectors. Each one
// borrows a snapshot and computes view-ready data without touching it.

use indexmap::IndexSet;

use crate::model::{BlockedHash, Comic};
use crate::state::AppState;

/// Placeholder shown for comics whose display field is blank.
pub const UNKNOWN_LABEL: &str = "(unknown)";

// ── Comic list ──────────────────────────────────────────────────────

/// Every comic in the current page, in list order.
pub fn comics(state: &AppState) -> &[Comic] {
    &state.comic_list.list.entries
}

/// The comics whose ids are in the selection, in list order.
pub fn selected_comics(state: &AppState) -> Vec<Comic> {
    state
        .comic_list
        .list
        .entries
        .iter()
        .filter(|c| state.comic_list.list.selection.contains(&c.id))
        .cloned()
        .collect()
}

/// Busy flag for the comic list.
pub fn comic_list_busy(state: &AppState) -> bool {
    state.comic_list.list.loading
}

/// Distinct publisher names in first-seen order; blank publishers
/// collapse into [`UNKNOWN_LABEL`].
pub fn distinct_publishers(state: &AppState) -> Vec<String> {
    distinct_display_field(state, |c| c.publisher.as_deref())
}

/// Distinct series names in first-seen order; blank series collapse
/// into [`UNKNOWN_LABEL`].
pub fn distinct_series(state: &AppState) -> Vec<String> {
    distinct_display_field(state, |c| c.series.as_deref())
}

fn distinct_display_field(
    state: &AppState,
    field: impl Fn(&Comic) -> Option<&str>,
) -> Vec<String> {
    let mut seen: IndexSet<String> = IndexSet::new();
    for comic in &state.comic_list.list.entries {
        let value = match field(comic) {
            Some(v) if !v.trim().is_empty() => v.to_owned(),
            _ => UNKNOWN_LABEL.to_owned(),
        };
        seen.insert(value);
    }
    seen.into_iter().collect()
}

// ── Blocked hashes ──────────────────────────────────────────────────

/// Every blocked hash entry, in list order.
pub fn blocked_hashes(state: &AppState) -> &[BlockedHash] {
    &state.blocked_list.list.entries
}

/// Blocked entries whose hash is in the selection slice, in list order.
pub fn selected_hashes(state: &AppState) -> Vec<BlockedHash> {
    state
        .blocked_list
        .list
        .entries
        .iter()
        .filter(|e| state.selection.hashes.contains(&e.hash))
        .cloned()
        .collect()
}

/// Busy flag for the blocked list.
pub fn blocked_list_busy(state: &AppState) -> bool {
    state.blocked_list.list.loading
}

/// True while a block/unblock write is in flight.
pub fn blocked_list_saving(state: &AppState) -> bool {
    state.blocked_list.saving
}
