// ── Selectors ──
//
// Pure projections from state snapshots to view-ready data. The
// memoization contract is performance, not correctness: handed the same
// snapshot reference, a selector returns its cached value instead of
// recomputing.

mod memo;
mod views;

pub use memo::{Memo, Selector};
pub use views::{
    UNKNOWN_LABEL, blocked_hashes, blocked_list_busy, blocked_list_saving, comic_list_busy,
    comics, distinct_publishers, distinct_series, selected_comics, selected_hashes,
};
