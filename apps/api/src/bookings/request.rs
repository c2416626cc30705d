use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::bookings::status::ConsultationStatus;
use crate::errors::AppError;

pub const SCHEDULER_THEME: &str = "Scheduling via external booking link";

/// POST /api/v1/consultants/:id/bookings body.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub preferred_times: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub meeting_method: String,
    pub note: Option<String>,
}

/// POST /api/v1/consultants/:id/bookings/scheduler body.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerBookingRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewConsultation {
    pub user_id: Uuid,
    pub consultant_id: Uuid,
    /// Placeholder until the consultant confirms a date.
    pub scheduled_at: DateTime<Utc>,
    pub status: ConsultationStatus,
    pub theme: Option<String>,
    pub meeting_method: Option<String>,
    pub note: Option<String>,
}

/// Validates a booking form and turns it into a `scheduled_request`
/// consultation.
pub fn booking_from_request(
    consultant_id: Uuid,
    request: &BookingRequest,
    now: DateTime<Utc>,
) -> Result<NewConsultation, AppError> {
    let preferred_times = request.preferred_times.trim();
    let theme = request.theme.trim();
    let meeting_method = request.meeting_method.trim();

    let mut missing = Vec::new();
    if preferred_times.is_empty() {
        missing.push("preferred_times");
    }
    if theme.is_empty() {
        missing.push("theme");
    }
    if meeting_method.is_empty() {
        missing.push("meeting_method");
    }
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    Ok(NewConsultation {
        user_id: request.user_id,
        consultant_id,
        scheduled_at: now,
        status: ConsultationStatus::ScheduledRequest,
        theme: Some(theme.to_string()),
        meeting_method: Some(meeting_method.to_string()),
        note: Some(compose_note(preferred_times, theme, request.note.as_deref())),
    })
}

/// A booking handed off to the consultant's external scheduler.
pub fn scheduler_booking(
    consultant_id: Uuid,
    user_id: Uuid,
    scheduler_url: &str,
    now: DateTime<Utc>,
) -> NewConsultation {
    NewConsultation {
        user_id,
        consultant_id,
        scheduled_at: now,
        status: ConsultationStatus::ScheduledRequest,
        theme: Some(SCHEDULER_THEME.to_string()),
        meeting_method: None,
        note: Some(format!("Scheduler URL: {scheduler_url}")),
    }
}

/// Packs the free-form parts of a booking into the consultation note.
pub fn compose_note(preferred_times: &str, theme: &str, extra: Option<&str>) -> String {
    let mut note = format!("Preferred times:\n{preferred_times}\n\nTheme: {theme}");
    if let Some(extra) = extra.map(str::trim).filter(|s| !s.is_empty()) {
        note.push_str(&format!("\n\nNotes: {extra}"));
    }
    note
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> BookingRequest {
        BookingRequest {
            user_id: Uuid::new_v4(),
            preferred_times: "11/3 午後\n11/5 19時以降".to_string(),
            theme: "エンジニアからPdMへの転職".to_string(),
            meeting_method: "online".to_string(),
            note: None,
        }
    }

    #[test]
    fn test_valid_request_becomes_scheduled_request() {
        let consultant_id = Uuid::new_v4();
        let now = Utc::now();
        let booking = booking_from_request(consultant_id, &request(), now).unwrap();
        assert_eq!(booking.status, ConsultationStatus::ScheduledRequest);
        assert_eq!(booking.consultant_id, consultant_id);
        assert_eq!(booking.scheduled_at, now);
        assert_eq!(booking.meeting_method.as_deref(), Some("online"));
        let note = booking.note.unwrap();
        assert!(note.starts_with("Preferred times:\n11/3 午後"));
        assert!(!note.contains("Notes:"));
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let mut r = request();
        r.theme = "  ".to_string();
        r.meeting_method.clear();
        match booking_from_request(Uuid::new_v4(), &r, Utc::now()) {
            Err(AppError::Validation(msg)) => {
                assert!(msg.contains("theme"));
                assert!(msg.contains("meeting_method"));
                assert!(!msg.contains("preferred_times"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_compose_note_with_extra() {
        let note = compose_note("平日夜", "年収交渉", Some(" 初回です "));
        assert_eq!(note, "Preferred times:\n平日夜\n\nTheme: 年収交渉\n\nNotes: 初回です");
        assert_eq!(
            compose_note("平日夜", "年収交渉", Some("   ")),
            "Preferred times:\n平日夜\n\nTheme: 年収交渉"
        );
    }

    #[test]
    fn test_scheduler_booking_records_url() {
        let booking = scheduler_booking(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "https://timerex.example/miura",
            Utc::now(),
        );
        assert_eq!(booking.status, ConsultationStatus::ScheduledRequest);
        assert_eq!(
            booking.note.as_deref(),
            Some("Scheduler URL: https://timerex.example/miura")
        );
    }
}
