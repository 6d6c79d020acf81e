//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence
//!
//! - `SessionRepository` - Guarded writes (slot-exclusive insert, status CAS)
//! - `SessionReader` - Scoped, paginated queries
//! - `FeedbackReader` - Feedback lookups
//!
//! ## Collaborators
//!
//! - `TherapistDirectory` - Therapist rate, modes and availability
//! - `PaymentGateway` - Pre-booking payment authorization and refunds
//! - `MeetingLinkProvider` - Links for confirmed online sessions
//! - `TokenValidator` - Identity provider
//!
//! ## Events and notifications
//!
//! - `EventPublisher` / `EventSubscriber` / `EventHandler`
//! - `NotificationDispatcher` / `NotificationInbox`

mod event_publisher;
mod event_subscriber;
mod feedback_reader;
mod meeting_link_provider;
mod notification_dispatcher;
mod payment_gateway;
mod session_reader;
mod session_repository;
mod therapist_directory;
mod token_validator;

pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use feedback_reader::FeedbackReader;
pub use meeting_link_provider::MeetingLinkProvider;
pub use notification_dispatcher::{NotificationDispatcher, NotificationInbox};
pub use payment_gateway::{
    AuthorizePaymentRequest, PaymentAuthorization, PaymentError, PaymentErrorCode,
    PaymentGateway, PaymentRefund, RefundPaymentRequest,
};
pub use session_reader::{ListOptions, SessionList, SessionReader, SessionScope};
pub use session_repository::{
    session_not_found_error, slot_conflict_error, stale_status_error, SessionRepository,
};
pub use therapist_directory::TherapistDirectory;
pub use token_validator::TokenValidator;
