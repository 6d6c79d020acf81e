//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations, plus the
//! event handlers subscribed to the bus.

pub mod notification;
pub mod session;

pub use notification::SessionNotificationHandler;
pub use session::{
    scope_for, BookSessionCommand, BookSessionHandler, BookSessionResult, CancelSessionCommand,
    CancelSessionHandler, CancelSessionResult, CompleteSessionCommand, CompleteSessionHandler,
    CompleteSessionResult, ConfirmSessionCommand, ConfirmSessionHandler, ConfirmSessionResult,
    GetSessionFeedbackHandler, GetSessionFeedbackQuery, GetSessionHandler, GetSessionOverviewHandler,
    GetSessionOverviewQuery, GetSessionQuery, ListSessionsHandler, ListSessionsQuery,
    DEFAULT_PER_PAGE, MAX_PER_PAGE,
};
