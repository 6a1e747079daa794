// ── Action vocabulary ──
//
// The finite set of typed events that can flow through the store, one
// closed enum per feature area. Actions are pure data: no I/O, no side
// effects, payload shapes fixed per variant and checked by the type
// system. The reducers match on these exhaustively, so adding a variant
// is a compile error until every transition handles it.

use crate::model::{BlockedHash, Comic, ComicId, LastReadEntry, User};

// ── Comic list ──────────────────────────────────────────────────────

/// Sortable columns of the comic list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    AddedDate,
    CoverDate,
    IssueNumber,
    Series,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Filter, sort, and paging parameters for a comic page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComicFilter {
    pub page_size: u32,
    pub page_index: u32,
    pub cover_year: Option<i32>,
    pub cover_month: Option<u32>,
    pub archive_type: Option<String>,
    pub publisher: Option<String>,
    pub series: Option<String>,
    pub search_text: Option<String>,
    pub unread_only: bool,
    pub sort_by: Option<SortField>,
    pub sort_direction: SortDirection,
}

impl Default for ComicFilter {
    fn default() -> Self {
        Self {
            page_size: 25,
            page_index: 0,
            cover_year: None,
            cover_month: None,
            archive_type: None,
            publisher: None,
            series: None,
            search_text: None,
            unread_only: false,
            sort_by: None,
            sort_direction: SortDirection::default(),
        }
    }
}

/// One successfully loaded comic page with its counts and facets.
#[derive(Debug, Clone, PartialEq)]
pub struct ComicPage {
    pub comics: Vec<Comic>,
    pub total_count: u64,
    pub filtered_count: u64,
    pub cover_years: Vec<i32>,
    pub cover_months: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComicListAction {
    /// Full-filter load: the reducer clears the list for a clean reload.
    LoadRequested(ComicFilter),
    LoadSucceeded(ComicPage),
    LoadFailed,
    Updated { comic: Comic },
    Removed { comic: Comic },
    Selected { ids: Vec<ComicId> },
    Deselected { ids: Vec<ComicId> },
    Reset,
}

// ── Blocked hash list ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum BlockedListAction {
    /// Incremental load: the current list stays visible while loading.
    LoadRequested,
    LoadSucceeded { hashes: Vec<BlockedHash> },
    LoadFailed,
    /// Delta form: entries coded `"+HASH"` (add) or `"-HASH"` (remove),
    /// applied against the current list.
    DeltaLoaded { coded: Vec<String> },
    SaveRequested { hash: String, blocked: bool },
    SaveSucceeded { hash: String, blocked: bool },
    SaveFailed,
    Updated { entry: BlockedHash },
    Removed { entry: BlockedHash },
    Reset,
}

// ── Hash selection ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionAction {
    Selected { hashes: Vec<String> },
    Deselected { hashes: Vec<String> },
    Cleared,
}

// ── Last read ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastReadAction {
    LoadRequested,
    LoadSucceeded { entries: Vec<LastReadEntry> },
    LoadFailed,
    /// Fan-out from a comic page load: the page's read markers arrive as
    /// a batch of upserts, not a wholesale replace.
    BatchUpdated { entries: Vec<LastReadEntry> },
    Updated { entry: LastReadEntry },
    Removed { entry: LastReadEntry },
    Reset,
}

// ── User list ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserListAction {
    LoadRequested,
    LoadSucceeded { users: Vec<User> },
    LoadFailed,
    Updated { user: User },
    Removed { user: User },
    Reset,
}

// ── Top-level sum ───────────────────────────────────────────────────

/// Every action the store accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ComicList(ComicListAction),
    BlockedList(BlockedListAction),
    Selection(SelectionAction),
    LastRead(LastReadAction),
    UserList(UserListAction),
    /// Session teardown: every slice returns to its initial value.
    ResetAll,
}

impl From<ComicListAction> for Action {
    fn from(action: ComicListAction) -> Self {
        Self::ComicList(action)
    }
}

impl From<BlockedListAction> for Action {
    fn from(action: BlockedListAction) -> Self {
        Self::BlockedList(action)
    }
}

impl From<SelectionAction> for Action {
    fn from(action: SelectionAction) -> Self {
        Self::Selection(action)
    }
}

impl From<LastReadAction> for Action {
    fn from(action: LastReadAction) -> Self {
        Self::LastRead(action)
    }
}

impl From<UserListAction> for Action {
    fn from(action: UserListAction) -> Self {
        Self::UserList(action)
    }
}
