use serde::Serialize;
use std::collections::HashSet;

use crate::domain::feedback::Feedback;
use crate::domain::foundation::UserId;
use crate::domain::session::{Price, Session, SessionStatus, SessionType};

/// Whose sessions an overview covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverviewScope {
    Platform,
    Therapist(UserId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub pending: u64,
    pub confirmed: u64,
    pub completed: u64,
    pub cancelled: u64,
}

impl StatusCounts {
    pub fn total(&self) -> u64 {
        self.pending + self.confirmed + self.completed + self.cancelled
    }

    fn bump(&mut self, status: SessionStatus) {
        match status {
            SessionStatus::Pending => self.pending += 1,
            SessionStatus::Confirmed => self.confirmed += 1,
            SessionStatus::Completed => self.completed += 1,
            SessionStatus::Cancelled => self.cancelled += 1,
        }
    }
}

/// Dashboard figures over a set of sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOverview {
    pub total_sessions: u64,
    pub by_status: StatusCounts,
    /// Sum of prices of completed sessions.
    pub total_earnings: Price,
    pub unique_clients: u64,
    pub online_sessions: u64,
    pub in_person_sessions: u64,
    pub late_cancellations: u64,
    pub feedback_count: u64,
    /// Mean star rating, `None` until there is any feedback.
    pub average_rating: Option<f64>,
}

impl SessionOverview {
    /// Folds sessions and their feedback into dashboard figures.
    ///
    /// Feedback whose session is not in `sessions` is ignored.
    pub fn compute(sessions: &[Session], feedback: &[Feedback]) -> Self {
        let mut overview = SessionOverview::default();
        let mut clients = HashSet::new();
        let mut ids = HashSet::new();

        for session in sessions {
            overview.by_status.bump(session.status());
            match session.session_type() {
                SessionType::Online => overview.online_sessions += 1,
                SessionType::InPerson => overview.in_person_sessions += 1,
            }
            if session.status() == SessionStatus::Completed {
                overview.total_earnings = overview.total_earnings.saturating_add(session.price());
            }
            if session.is_late_cancellation() {
                overview.late_cancellations += 1;
            }
            clients.insert(session.client_id().clone());
            ids.insert(*session.id());
        }

        let ratings: Vec<u64> = feedback
            .iter()
            .filter(|f| ids.contains(&f.session_id))
            .map(|f| f.rating.stars() as u64)
            .collect();

        overview.total_sessions = sessions.len() as u64;
        overview.unique_clients = clients.len() as u64;
        overview.feedback_count = ratings.len() as u64;
        overview.average_rating = if ratings.is_empty() {
            None
        } else {
            Some(ratings.iter().sum::<u64>() as f64 / ratings.len() as f64)
        };
        overview
    }
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod stats_test;
