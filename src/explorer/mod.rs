//! Network exploration: which graph to show and keeping it in step with
//! the user's choices.

mod backend;
mod query;
mod state;

pub use backend::{GraphBackend, execute};
pub use query::{GraphQuery, ViewMode, ViewState, next_query};
pub use state::{CommitOutcome, Explorer, PendingQuery, RequestSeq, RequestTicket};
