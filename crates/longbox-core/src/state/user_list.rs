// ── User list reducer ──
//
// Incremental style area: the account list stays visible while a
// reload is in flight.

use crate::action::UserListAction;
use crate::model::User;

use super::list::ListState;

pub type UserListState = ListState<User>;

/// Apply one user-list action. Pure and total: no I/O, no panics.
pub fn reduce(state: &UserListState, action: &UserListAction) -> UserListState {
    match action {
        UserListAction::LoadRequested => state.load_started(),
        UserListAction::LoadSucceeded { users } => {
            let count = users.len() as u64;
            state.loaded(users.clone(), count, count)
        }
        UserListAction::LoadFailed => state.load_failed(),
        UserListAction::Updated { user } => state.upserted(user.clone()),
        UserListAction::Removed { user } => state.removed(&user.id),
        UserListAction::Reset => UserListState::default(),
    }
}
