// ── Comic list reducer ──
//
// Full-filter style area: a load request clears the visible list, a
// success replaces it wholesale together with the cover-date facets.

use crate::action::ComicListAction;
use crate::model::Comic;

use super::list::ListState;

/// State slice for the comic list feature area.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComicListState {
    pub list: ListState<Comic>,
    /// Distinct cover years available under the current filter.
    pub cover_years: Vec<i32>,
    /// Distinct cover months available under the current filter.
    pub cover_months: Vec<u32>,
}

/// Apply one comic-list action. Pure and total: no I/O, no panics.
pub fn reduce(state: &ComicListState, action: &ComicListAction) -> ComicListState {
    match action {
        ComicListAction::LoadRequested(_) => ComicListState {
            list: state.list.load_started_clearing(),
            ..state.clone()
        },
        ComicListAction::LoadSucceeded(page) => ComicListState {
            list: state
                .list
                .loaded(page.comics.clone(), page.total_count, page.filtered_count),
            cover_years: page.cover_years.clone(),
            cover_months: page.cover_months.clone(),
        },
        ComicListAction::LoadFailed => ComicListState {
            list: state.list.load_failed(),
            ..state.clone()
        },
        ComicListAction::Updated { comic } => ComicListState {
            list: state.list.upserted(comic.clone()),
            ..state.clone()
        },
        ComicListAction::Removed { comic } => ComicListState {
            list: state.list.removed(&comic.id),
            ..state.clone()
        },
        ComicListAction::Selected { ids } => ComicListState {
            list: state.list.with_selected(ids.iter().copied()),
            ..state.clone()
        },
        ComicListAction::Deselected { ids } => ComicListState {
            list: state.list.with_deselected(ids.iter()),
            ..state.clone()
        },
        ComicListAction::Reset => ComicListState::default(),
    }
}
