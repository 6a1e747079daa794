// ── Last-read reducer ──
//
// Incremental style area, mostly fed by the comic-list fan-out: page
// loads deliver read markers as batched upserts, push updates patch
// single entries.

use crate::action::LastReadAction;
use crate::model::LastReadEntry;

use super::list::ListState;

pub type LastReadState = ListState<LastReadEntry>;

/// Apply one last-read action. Pure and total: no I/O, no panics.
pub fn reduce(state: &LastReadState, action: &LastReadAction) -> LastReadState {
    match action {
        LastReadAction::LoadRequested => state.load_started(),
        LastReadAction::LoadSucceeded { entries } => {
            let count = entries.len() as u64;
            state.loaded(entries.clone(), count, count)
        }
        LastReadAction::LoadFailed => state.load_failed(),
        LastReadAction::BatchUpdated { entries } => entries
            .iter()
            .fold(state.clone(), |acc, entry| acc.upserted(entry.clone())),
        LastReadAction::Updated { entry } => state.upserted(entry.clone()),
        LastReadAction::Removed { entry } => state.removed(&entry.comic_id),
        LastReadAction::Reset => LastReadState::default(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::model::ComicId;

    fn entry(comic_id: u64, hour: u32) -> LastReadEntry {
        LastReadEntry {
            comic_id: ComicId(comic_id),
            last_read: Utc
                .with_ymd_and_hms(2026, 1, 10, hour, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[test]
    fn batch_update_upserts_without_touching_busy_flag() {
        let state = reduce(
            &LastReadState::default(),
            &LastReadAction::BatchUpdated {
                entries: vec![entry(1, 8), entry(2, 9)],
            },
        );
        assert!(!state.loading);
        assert_eq!(state.entries.len(), 2);

        // Re-reading comic 1 replaces its marker and moves it last.
        let again = reduce(
            &state,
            &LastReadAction::BatchUpdated {
                entries: vec![entry(1, 21)],
            },
        );
        let ids: Vec<u64> = again.entries.iter().map(|e| e.comic_id.0).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(again.entries[1].last_read, entry(1, 21).last_read);
    }

    #[test]
    fn removal_of_unknown_marker_is_a_noop() {
        let state = reduce(
            &LastReadState::default(),
            &LastReadAction::Updated { entry: entry(1, 8) },
        );
        let after = reduce(
            &state,
            &LastReadAction::Removed { entry: entry(9, 0) },
        );
        assert_eq!(after, state);
    }
}
