//! Meeting link adapters.

mod static_links;

pub use static_links::StaticMeetingLinkProvider;
