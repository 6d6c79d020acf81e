//! HTTP adapters - REST API over the booking handlers.
//!
//! - `session` - booking lifecycle, feedback and overview endpoints
//! - `notification` - the caller's notification inbox
//! - `middleware` - bearer-token authentication
//! - `error` - status mapping and `{code, message}` bodies

pub mod error;
pub mod middleware;
pub mod notification;
pub mod router;
pub mod session;

pub use error::{ApiError, ErrorResponse};
pub use router::{build_app_router, build_cors_layer, AppState, RouterOptions};
pub use session::SessionHandlers;
