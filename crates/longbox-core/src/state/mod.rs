// ── Composed state tree and root reducer ──
//
// One slice per feature area, each owned by its own pure reducer. The
// store is the only writer; everything else reads snapshots through
// selectors.

pub mod blocked_list;
pub mod comic_list;
pub mod last_read;
pub mod list;
pub mod selection;
pub mod user_list;

pub use blocked_list::BlockedListState;
pub use comic_list::ComicListState;
pub use last_read::LastReadState;
pub use list::ListState;
pub use selection::SelectionState;
pub use user_list::UserListState;

use crate::action::Action;

/// The full application state tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub comic_list: ComicListState,
    pub blocked_list: BlockedListState,
    pub selection: SelectionState,
    pub last_read: LastReadState,
    pub user_list: UserListState,
}

/// Apply one action to the state tree.
///
/// Routes the action to the owning slice's reducer; untouched slices are
/// carried over unchanged. Total and pure, like every slice reducer
/// beneath it.
pub fn reduce(state: &AppState, action: &Action) -> AppState {
    match action {
        Action::ComicList(action) => AppState {
            comic_list: comic_list::reduce(&state.comic_list, action),
            ..state.clone()
        },
        Action::BlockedList(action) => AppState {
            blocked_list: blocked_list::reduce(&state.blocked_list, action),
            ..state.clone()
        },
        Action::Selection(action) => AppState {
            selection: selection::reduce(&state.selection, action),
            ..state.clone()
        },
        Action::LastRead(action) => AppState {
            last_read: last_read::reduce(&state.last_read, action),
            ..state.clone()
        },
        Action::UserList(action) => AppState {
            user_list: user_list::reduce(&state.user_list, action),
            ..state.clone()
        },
        Action::ResetAll => AppState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{BlockedListAction, SelectionAction};
    use crate::model::BlockedHash;

    #[test]
    fn actions_only_touch_their_own_slice() {
        let state = reduce(
            &AppState::default(),
            &Action::BlockedList(BlockedListAction::LoadSucceeded {
                hashes: vec![BlockedHash::bare("A")],
            }),
        );

        assert_eq!(state.blocked_list.list.entries.len(), 1);
        assert_eq!(state.comic_list, AppState::default().comic_list);
        assert_eq!(state.user_list, AppState::default().user_list);
    }

    #[test]
    fn reset_all_restores_every_slice() {
        let mut state = reduce(
            &AppState::default(),
            &Action::Selection(SelectionAction::Selected {
                hashes: vec!["A".into()],
            }),
        );
        state = reduce(
            &state,
            &Action::BlockedList(BlockedListAction::LoadSucceeded {
                hashes: vec![BlockedHash::bare("A")],
            }),
        );

        assert_eq!(reduce(&state, &Action::ResetAll), AppState::default());
    }
}
