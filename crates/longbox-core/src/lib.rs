// longbox-core: Synchronized library state between longbox-api and consumers (CLI, scripts).

pub mod action;
pub mod alert;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod select;
pub mod session;
pub mod state;
pub mod store;
pub mod sync;

mod effect;

// ── Primary re-exports ──────────────────────────────────────────────
pub use alert::{Alert, AlertChannel};
pub use config::{AuthCredentials, ServerConfig, TlsVerification};
pub use error::{CoreError, FailureTier};
pub use session::{ConnectionState, Session};
pub use store::{StateStream, Store};

// Re-export the action vocabulary and state tree at the crate root for
// ergonomics.
pub use action::{
    Action, BlockedListAction, ComicFilter, ComicListAction, ComicPage, LastReadAction,
    SelectionAction, SortDirection, SortField, UserListAction,
};
pub use model::{BlockedHash, Comic, ComicId, Keyed, LastReadEntry, User, UserId};
pub use state::AppState;
