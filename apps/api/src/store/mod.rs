//! Persistence seam. Handlers only talk to `ConsultantStore`; `AppState`
//! carries it as `Arc<dyn ConsultantStore>` so the Postgres backend can be
//! swapped for the in-memory one in tests.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::bookings::request::NewConsultation;
use crate::bookings::status::ConsultationStatus;
use crate::errors::AppError;
use crate::models::consultant::{ConsultantRecord, ConsultantRow};
use crate::models::consultation::{ConsultationRow, DashboardConsultationRow};
use crate::models::review::{PendingReviewRow, ReviewRow};
use crate::profiles::update::ProfileChanges;
use crate::reviews::submission::NewReview;

#[async_trait]
pub trait ConsultantStore: Send + Sync {
    /// All consultants, newest first, each with every stored review.
    async fn list_consultants(&self) -> Result<Vec<ConsultantRecord>, AppError>;

    async fn get_consultant(&self, id: Uuid) -> Result<Option<ConsultantRecord>, AppError>;

    /// Returns `None` when the consultant does not exist.
    async fn update_profile(
        &self,
        id: Uuid,
        changes: &ProfileChanges,
    ) -> Result<Option<ConsultantRow>, AppError>;

    async fn insert_review(&self, review: &NewReview) -> Result<ReviewRow, AppError>;

    async fn get_review(&self, id: Uuid) -> Result<Option<ReviewRow>, AppError>;

    async fn approve_review(&self, id: Uuid) -> Result<Option<ReviewRow>, AppError>;

    /// Unapproved reviews, newest first.
    async fn pending_reviews(&self) -> Result<Vec<PendingReviewRow>, AppError>;

    async fn user_exists(&self, id: Uuid) -> Result<bool, AppError>;

    async fn insert_consultation(
        &self,
        consultation: &NewConsultation,
    ) -> Result<ConsultationRow, AppError>;

    /// A consultant's consultations, most recently scheduled first.
    async fn dashboard_consultations(
        &self,
        consultant_id: Uuid,
    ) -> Result<Vec<DashboardConsultationRow>, AppError>;

    async fn get_consultation(&self, id: Uuid) -> Result<Option<ConsultationRow>, AppError>;

    /// Compare-and-set: writes `status` only while the stored status is still
    /// `expected`. Returns `None` when the row is missing or has moved on.
    async fn set_consultation_status(
        &self,
        id: Uuid,
        expected: &str,
        status: ConsultationStatus,
    ) -> Result<Option<ConsultationRow>, AppError>;
}
