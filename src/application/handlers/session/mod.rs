//! Session lifecycle command and query handlers.

mod book_session;
mod cancel_session;
mod complete_session;
mod confirm_session;
mod get_overview;
mod get_session;
mod get_session_feedback;
mod list_sessions;
mod publish;

#[cfg(test)]
mod test_support;

pub use book_session::{BookSessionCommand, BookSessionHandler, BookSessionResult};
pub use cancel_session::{CancelSessionCommand, CancelSessionHandler, CancelSessionResult};
pub use complete_session::{CompleteSessionCommand, CompleteSessionHandler, CompleteSessionResult};
pub use confirm_session::{ConfirmSessionCommand, ConfirmSessionHandler, ConfirmSessionResult};
pub use get_overview::{GetSessionOverviewHandler, GetSessionOverviewQuery};
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use get_session_feedback::{GetSessionFeedbackHandler, GetSessionFeedbackQuery};
pub use list_sessions::{scope_for, ListSessionsHandler, ListSessionsQuery, DEFAULT_PER_PAGE, MAX_PER_PAGE};
