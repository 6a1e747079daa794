// ── Blocked hash list reducer ──
//
// Incremental style area: loads keep the current list visible, and the
// delta form patches it in place. A `saving` flag tracks the in-flight
// block/unblock write.

use crate::action::BlockedListAction;
use crate::model::BlockedHash;

use super::list::ListState;

/// State slice for the blocked page-hash feature area.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockedListState {
    pub list: ListState<BlockedHash>,
    /// True while a block/unblock write is in flight.
    pub saving: bool,
}

/// Apply one blocked-list action. Pure and total: no I/O, no panics.
pub fn reduce(state: &BlockedListState, action: &BlockedListAction) -> BlockedListState {
    match action {
        BlockedListAction::LoadRequested => BlockedListState {
            list: state.list.load_started(),
            ..state.clone()
        },
        BlockedListAction::LoadSucceeded { hashes } => {
            let count = hashes.len() as u64;
            BlockedListState {
                list: state.list.loaded(hashes.clone(), count, count),
                ..state.clone()
            }
        }
        BlockedListAction::LoadFailed => BlockedListState {
            list: state.list.load_failed(),
            ..state.clone()
        },
        BlockedListAction::DeltaLoaded { coded } => BlockedListState {
            list: apply_delta(&state.list, coded),
            ..state.clone()
        },
        BlockedListAction::SaveRequested { .. } => BlockedListState {
            saving: true,
            ..state.clone()
        },
        BlockedListAction::SaveSucceeded { hash, blocked } => {
            let list = if *blocked {
                state.list.upserted(BlockedHash::bare(hash.clone()))
            } else {
                state.list.removed(hash)
            };
            BlockedListState {
                list,
                saving: false,
            }
        }
        BlockedListAction::SaveFailed => BlockedListState {
            saving: false,
            ..state.clone()
        },
        BlockedListAction::Updated { entry } => BlockedListState {
            list: state.list.upserted(entry.clone()),
            ..state.clone()
        },
        BlockedListAction::Removed { entry } => BlockedListState {
            list: state.list.removed(&entry.hash),
            ..state.clone()
        },
        BlockedListAction::Reset => BlockedListState::default(),
    }
}

/// Apply a coded delta against the current list.
///
/// Entries prefixed `-` remove the matching hash, entries prefixed `+`
/// (or bare) add it. Survivors keep their order, additions append in
/// delta order, and an addition already present collapses into the
/// surviving entry.
fn apply_delta(list: &ListState<BlockedHash>, coded: &[String]) -> ListState<BlockedHash> {
    let mut removals: Vec<&str> = Vec::new();
    let mut additions: Vec<&str> = Vec::new();

    for entry in coded {
        if let Some(hash) = entry.strip_prefix('-') {
            removals.push(hash);
        } else {
            additions.push(entry.strip_prefix('+').unwrap_or(entry));
        }
    }

    let mut entries: Vec<BlockedHash> = list
        .entries
        .iter()
        .filter(|e| !removals.contains(&e.hash.as_str()))
        .cloned()
        .collect();

    for hash in additions {
        if !entries.iter().any(|e| e.hash == hash) {
            entries.push(BlockedHash::bare(hash));
        }
    }

    ListState {
        entries,
        ..list.clone()
    }
}
