//! Axum route handlers for review submission and moderation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::catalog::profile::ReviewKind;
use crate::errors::AppError;
use crate::models::review::ReviewRow;
use crate::reviews::meta::format_reviewer_meta;
use crate::reviews::submission::{validate_submission, ReviewSubmission};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SubmitReviewResponse {
    pub review_id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ApproveReviewResponse {
    pub message: String,
    pub review: ReviewRow,
}

#[derive(Debug, Serialize)]
pub struct PendingReview {
    pub id: Uuid,
    pub consultant_id: Uuid,
    pub consultant_name: String,
    pub review_type: String,
    pub type_label: Option<&'static str>,
    pub score: i32,
    pub comment: String,
    pub reviewer_summary: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct PendingReviewsResponse {
    pub pending_count: usize,
    pub reviews: Vec<PendingReview>,
}

/// POST /api/v1/reviews
///
/// Stores the review unapproved; it is published only after moderation.
pub async fn handle_submit_review(
    State(state): State<AppState>,
    Json(submission): Json<ReviewSubmission>,
) -> Result<(StatusCode, Json<SubmitReviewResponse>), AppError> {
    let review = validate_submission(submission)?;

    if state.store.get_consultant(review.consultant_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Consultant {} not found",
            review.consultant_id
        )));
    }

    let row = state.store.insert_review(&review).await?;
    info!(
        review_id = %row.id,
        consultant_id = %row.consultant_id,
        "Review submitted for moderation"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitReviewResponse {
            review_id: row.id,
            message: "Review received. It will be published after moderation.".to_string(),
        }),
    ))
}

/// PATCH /api/v1/reviews/:id/approve
///
/// Idempotent: approving an approved review is reported, not an error.
pub async fn handle_approve_review(
    State(state): State<AppState>,
    Path(review_id): Path<Uuid>,
) -> Result<Json<ApproveReviewResponse>, AppError> {
    let existing = state
        .store
        .get_review(review_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Review {review_id} not found")))?;

    if existing.is_approved {
        return Ok(Json(ApproveReviewResponse {
            message: "Review is already approved".to_string(),
            review: existing,
        }));
    }

    let review = state
        .store
        .approve_review(review_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Review {review_id} not found")))?;
    info!(review_id = %review.id, "Review approved");

    Ok(Json(ApproveReviewResponse {
        message: "Review approved".to_string(),
        review,
    }))
}

/// GET /api/v1/admin/reviews
pub async fn handle_pending_reviews(
    State(state): State<AppState>,
) -> Result<Json<PendingReviewsResponse>, AppError> {
    let reviews: Vec<PendingReview> = state
        .store
        .pending_reviews()
        .await?
        .into_iter()
        .map(|row| PendingReview {
            type_label: ReviewKind::parse(&row.review_type).map(ReviewKind::label),
            reviewer_summary: format_reviewer_meta(row.meta.as_ref()),
            id: row.id,
            consultant_id: row.consultant_id,
            consultant_name: row.consultant_name,
            review_type: row.review_type,
            score: row.score,
            comment: row.comment,
            created_at: row.created_at,
        })
        .collect();

    Ok(Json(PendingReviewsResponse {
        pending_count: reviews.len(),
        reviews,
    }))
}
