//! Axum route handlers for booking requests and the consultant dashboard.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::bookings::request::{
    booking_from_request, scheduler_booking, BookingRequest, SchedulerBookingRequest,
};
use crate::bookings::status::{group_consultations, ConsultationBoard, ConsultationStatus};
use crate::errors::AppError;
use crate::models::consultant::ConsultantRecord;
use crate::models::consultation::ConsultationRow;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SchedulerBookingResponse {
    pub consultation: ConsultationRow,
    /// Where the client should send the user to pick a slot.
    pub scheduler_url: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub consultant_id: Uuid,
    pub consultant_name: String,
    #[serde(flatten)]
    pub board: ConsultationBoard,
}

async fn require_consultant(state: &AppState, id: Uuid) -> Result<ConsultantRecord, AppError> {
    state
        .store
        .get_consultant(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Consultant {id} not found")))
}

async fn require_user(state: &AppState, id: Uuid) -> Result<(), AppError> {
    if state.store.user_exists(id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("User {id} not found")))
    }
}

/// POST /api/v1/consultants/:id/bookings
pub async fn handle_create_booking(
    State(state): State<AppState>,
    Path(consultant_id): Path<Uuid>,
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<ConsultationRow>), AppError> {
    let booking = booking_from_request(consultant_id, &request, Utc::now())?;
    require_consultant(&state, consultant_id).await?;
    require_user(&state, request.user_id).await?;

    let consultation = state.store.insert_consultation(&booking).await?;
    info!(
        consultation_id = %consultation.id,
        consultant_id = %consultant_id,
        "Booking request created"
    );

    Ok((StatusCode::CREATED, Json(consultation)))
}

/// POST /api/v1/consultants/:id/bookings/scheduler
pub async fn handle_scheduler_booking(
    State(state): State<AppState>,
    Path(consultant_id): Path<Uuid>,
    Json(request): Json<SchedulerBookingRequest>,
) -> Result<(StatusCode, Json<SchedulerBookingResponse>), AppError> {
    let record = require_consultant(&state, consultant_id).await?;
    let scheduler_url = record
        .consultant
        .booking_url()
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::UnprocessableEntity(format!(
                "Consultant {consultant_id} has no scheduler link"
            ))
        })?;
    require_user(&state, request.user_id).await?;

    let booking = scheduler_booking(consultant_id, request.user_id, &scheduler_url, Utc::now());
    let consultation = state.store.insert_consultation(&booking).await?;
    info!(
        consultation_id = %consultation.id,
        consultant_id = %consultant_id,
        "Booking routed to external scheduler"
    );

    Ok((
        StatusCode::CREATED,
        Json(SchedulerBookingResponse {
            consultation,
            scheduler_url,
        }),
    ))
}

/// GET /api/v1/dashboard/:consultant_id/consultations
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Path(consultant_id): Path<Uuid>,
) -> Result<Json<DashboardResponse>, AppError> {
    let record = require_consultant(&state, consultant_id).await?;
    let rows = state.store.dashboard_consultations(consultant_id).await?;

    Ok(Json(DashboardResponse {
        consultant_id,
        consultant_name: record.consultant.name,
        board: group_consultations(rows),
    }))
}

/// PATCH /api/v1/consultations/:id/status/toggle
pub async fn handle_toggle_status(
    State(state): State<AppState>,
    Path(consultation_id): Path<Uuid>,
) -> Result<Json<ConsultationRow>, AppError> {
    let current = state
        .store
        .get_consultation(consultation_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Consultation {consultation_id} not found")))?;

    let next = ConsultationStatus::parse(&current.status)
        .map_or(ConsultationStatus::Scheduled, ConsultationStatus::toggled);

    let updated = state
        .store
        .set_consultation_status(consultation_id, &current.status, next)
        .await?
        .ok_or_else(|| {
            AppError::Conflict(format!(
                "Consultation {consultation_id} changed status concurrently; reload and retry"
            ))
        })?;
    info!(
        consultation_id = %consultation_id,
        from = %current.status,
        to = next.as_str(),
        "Consultation status toggled"
    );

    Ok(Json(updated))
}
