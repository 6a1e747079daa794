// ── Hash selection reducer ──
//
// A pure selection set with no remote load of its own. Kept as its own
// slice because several features read it (bulk block/unblock, dedup
// review), and it outlives any one blocked-list reload.

use indexmap::IndexSet;

use crate::action::SelectionAction;

/// State slice for the page-hash selection feature area.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    /// Selected hashes in selection order.
    pub hashes: IndexSet<String>,
}

/// Apply one selection action. Pure and total: no I/O, no panics.
pub fn reduce(state: &SelectionState, action: &SelectionAction) -> SelectionState {
    match action {
        SelectionAction::Selected { hashes } => {
            let mut selected = state.hashes.clone();
            selected.extend(hashes.iter().cloned());
            SelectionState { hashes: selected }
        }
        SelectionAction::Deselected { hashes } => {
            let mut selected = state.hashes.clone();
            for hash in hashes {
                selected.shift_remove(hash);
            }
            SelectionState { hashes: selected }
        }
        SelectionAction::Cleared => SelectionState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(state: &SelectionState, hashes: &[&str]) -> SelectionState {
        reduce(
            state,
            &SelectionAction::Selected {
                hashes: hashes.iter().map(|h| (*h).to_owned()).collect(),
            },
        )
    }

    #[test]
    fn selecting_twice_never_duplicates() {
        let state = select(&SelectionState::default(), &["A"]);
        let again = select(&state, &["A", "B"]);
        assert_eq!(
            again.hashes.iter().cloned().collect::<Vec<_>>(),
            vec!["A", "B"]
        );
    }

    #[test]
    fn deselecting_unselected_is_a_noop() {
        let state = select(&SelectionState::default(), &["A"]);
        let after = reduce(
            &state,
            &SelectionAction::Deselected {
                hashes: vec!["Z".into()],
            },
        );
        assert_eq!(after, state);
    }

    #[test]
    fn deselect_removes_only_named_hashes() {
        let state = select(&SelectionState::default(), &["A", "B", "C"]);
        let after = reduce(
            &state,
            &SelectionAction::Deselected {
                hashes: vec!["B".into()],
            },
        );
        assert_eq!(
            after.hashes.iter().cloned().collect::<Vec<_>>(),
            vec!["A", "C"]
        );
    }

    #[test]
    fn cleared_returns_to_initial() {
        let state = select(&SelectionState::default(), &["A", "B"]);
        assert_eq!(
            reduce(&state, &SelectionAction::Cleared),
            SelectionState::default()
        );
    }
}
