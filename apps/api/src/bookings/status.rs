use serde::{Deserialize, Serialize};

use crate::models::consultation::DashboardConsultationRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationStatus {
    /// Confirmed date.
    Scheduled,
    /// Requested by the job-seeker, date still being arranged.
    ScheduledRequest,
    Pending,
    Completed,
    Canceled,
}

impl ConsultationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ConsultationStatus::Scheduled => "scheduled",
            ConsultationStatus::ScheduledRequest => "scheduled_request",
            ConsultationStatus::Pending => "pending",
            ConsultationStatus::Completed => "completed",
            ConsultationStatus::Canceled => "canceled",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "scheduled" => Some(ConsultationStatus::Scheduled),
            "scheduled_request" => Some(ConsultationStatus::ScheduledRequest),
            "pending" => Some(ConsultationStatus::Pending),
            "completed" => Some(ConsultationStatus::Completed),
            "canceled" => Some(ConsultationStatus::Canceled),
            _ => None,
        }
    }

    pub fn is_upcoming(self) -> bool {
        matches!(
            self,
            ConsultationStatus::Scheduled
                | ConsultationStatus::ScheduledRequest
                | ConsultationStatus::Pending
        )
    }

    /// Dashboard toggle: a scheduled consultation is marked completed,
    /// anything else goes back to scheduled.
    pub fn toggled(self) -> Self {
        match self {
            ConsultationStatus::Scheduled => ConsultationStatus::Completed,
            _ => ConsultationStatus::Scheduled,
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ConsultationBoard {
    pub upcoming: Vec<DashboardConsultationRow>,
    pub completed: Vec<DashboardConsultationRow>,
    pub canceled: Vec<DashboardConsultationRow>,
}

/// Splits consultations into dashboard columns, preserving order. Rows with
/// an unrecognized status appear in no column.
pub fn group_consultations(rows: Vec<DashboardConsultationRow>) -> ConsultationBoard {
    let mut board = ConsultationBoard::default();
    for row in rows {
        match ConsultationStatus::parse(&row.status) {
            Some(ConsultationStatus::Completed) => board.completed.push(row),
            Some(ConsultationStatus::Canceled) => board.canceled.push(row),
            Some(status) if status.is_upcoming() => board.upcoming.push(row),
            _ => tracing::debug!(consultation_id = %row.id, status = %row.status, "Unrecognized status"),
        }
    }
    board
}
