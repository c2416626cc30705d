use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::consultant::ConsultantRow;
use crate::profiles::update::{normalize_update, ProfileUpdateRequest};
use crate::state::AppState;

/// PUT /api/v1/consultants/:id/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Path(consultant_id): Path<Uuid>,
    Json(request): Json<ProfileUpdateRequest>,
) -> Result<Json<ConsultantRow>, AppError> {
    let changes = normalize_update(request)?;

    let updated = state
        .store
        .update_profile(consultant_id, &changes)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Consultant {consultant_id} not found")))?;

    info!(consultant_id = %consultant_id, "Consultant profile updated");
    Ok(Json(updated))
}
