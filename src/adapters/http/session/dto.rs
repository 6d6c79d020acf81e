//! HTTP DTOs for session endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::feedback::Feedback;
use crate::domain::overview::{SessionOverview, StatusCounts};
use crate::domain::session::{Session, SessionStatus, SessionType};
use crate::ports::SessionList;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to book a session.
#[derive(Debug, Clone, Deserialize)]
pub struct BookSessionRequest {
    pub therapist_id: String,
    /// "YYYY-MM-DD"
    pub date: String,
    /// "HH:MM"; seconds and 12-hour forms are accepted too.
    pub time: String,
    pub session_type: SessionType,
}

/// Request to complete a session with feedback.
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteSessionRequest {
    pub rating: i64,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Query parameters for listing sessions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSessionsParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub status: Option<SessionStatus>,
}

/// Query parameters for the overview.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverviewParams {
    #[serde(default)]
    pub therapist_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Full session view for API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: String,
    pub client_id: String,
    pub therapist_id: String,
    pub therapist_name: String,
    pub date: String,
    pub time: String,
    pub session_type: SessionType,
    pub price_cents: i64,
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meet_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_by: Option<String>,
    pub late_cancellation: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id().to_string(),
            client_id: session.client_id().to_string(),
            therapist_id: session.therapist_id().to_string(),
            therapist_name: session.therapist_name().to_string(),
            date: session.slot().date_string(),
            time: session.slot().time_string(),
            session_type: session.session_type(),
            price_cents: session.price().cents(),
            status: session.status(),
            meet_link: session.meet_link().map(str::to_string),
            payment_transaction_id: session.payment_transaction_id().map(str::to_string),
            cancelled_by: session.cancelled_by().map(|u| u.to_string()),
            late_cancellation: session.is_late_cancellation(),
            created_at: session.created_at().as_datetime().to_rfc3339(),
            updated_at: session.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

/// Paginated list of sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionListResponse {
    pub items: Vec<SessionResponse>,
    pub total: u64,
    pub has_more: bool,
}

impl From<SessionList> for SessionListResponse {
    fn from(list: SessionList) -> Self {
        Self {
            items: list.items.iter().map(SessionResponse::from).collect(),
            total: list.total,
            has_more: list.has_more,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub id: String,
    pub session_id: String,
    pub rating: u8,
    pub rating_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: String,
}

impl From<&Feedback> for FeedbackResponse {
    fn from(feedback: &Feedback) -> Self {
        Self {
            id: feedback.id.to_string(),
            session_id: feedback.session_id.to_string(),
            rating: feedback.rating.stars(),
            rating_label: feedback.rating.label().to_string(),
            comment: feedback.comment.clone(),
            created_at: feedback.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Session plus the feedback that completed it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedSessionResponse {
    pub session: SessionResponse,
    pub feedback: FeedbackResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewResponse {
    pub total_sessions: u64,
    pub pending: u64,
    pub confirmed: u64,
    pub completed: u64,
    pub cancelled: u64,
    pub total_earnings_cents: i64,
    pub unique_clients: u64,
    pub online_sessions: u64,
    pub in_person_sessions: u64,
    pub late_cancellations: u64,
    pub feedback_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
}

impl From<SessionOverview> for OverviewResponse {
    fn from(overview: SessionOverview) -> Self {
        let StatusCounts {
            pending,
            confirmed,
            completed,
            cancelled,
        } = overview.by_status;
        Self {
            total_sessions: overview.total_sessions,
            pending,
            confirmed,
            completed,
            cancelled,
            total_earnings_cents: overview.total_earnings.cents(),
            unique_clients: overview.unique_clients,
            online_sessions: overview.online_sessions,
            in_person_sessions: overview.in_person_sessions,
            late_cancellations: overview.late_cancellations,
            feedback_count: overview.feedback_count,
            average_rating: overview.average_rating,
        }
    }
}
