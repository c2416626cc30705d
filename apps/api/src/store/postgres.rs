use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::bookings::request::NewConsultation;
use crate::bookings::status::ConsultationStatus;
use crate::errors::AppError;
use crate::models::consultant::{ConsultantRecord, ConsultantRow};
use crate::models::consultation::{ConsultationRow, DashboardConsultationRow};
use crate::models::review::{PendingReviewRow, ReviewRow};
use crate::profiles::update::ProfileChanges;
use crate::reviews::submission::NewReview;
use crate::store::ConsultantStore;

pub struct PgConsultantStore {
    pool: PgPool,
}

impl PgConsultantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn reviews_for(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<ReviewRow>>, AppError> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            "SELECT * FROM reviews WHERE consultant_id = ANY($1) ORDER BY created_at DESC",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<ReviewRow>> = HashMap::new();
        for row in rows {
            grouped.entry(row.consultant_id).or_default().push(row);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl ConsultantStore for PgConsultantStore {
    async fn list_consultants(&self) -> Result<Vec<ConsultantRecord>, AppError> {
        let consultants: Vec<ConsultantRow> =
            sqlx::query_as("SELECT * FROM consultants ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        let ids: Vec<Uuid> = consultants.iter().map(|c| c.id).collect();
        let mut reviews = self.reviews_for(&ids).await?;

        Ok(consultants
            .into_iter()
            .map(|consultant| ConsultantRecord {
                reviews: reviews.remove(&consultant.id).unwrap_or_default(),
                consultant,
            })
            .collect())
    }

    async fn get_consultant(&self, id: Uuid) -> Result<Option<ConsultantRecord>, AppError> {
        let consultant: Option<ConsultantRow> =
            sqlx::query_as("SELECT * FROM consultants WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        let Some(consultant) = consultant else {
            return Ok(None);
        };
        let reviews = self
            .reviews_for(&[id])
            .await?
            .remove(&id)
            .unwrap_or_default();
        Ok(Some(ConsultantRecord {
            consultant,
            reviews,
        }))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: &ProfileChanges,
    ) -> Result<Option<ConsultantRow>, AppError> {
        Ok(sqlx::query_as::<_, ConsultantRow>(
            r#"
            UPDATE consultants SET
                name                                = $2,
                email                               = COALESCE($3, email),
                headline                            = $4,
                thumbnail_url                       = $5,
                twitter_url                         = $6,
                linkedin_url                        = $7,
                scheduler_url                       = $8,
                profile_summary                     = $9,
                achievements_summary                = $10,
                expertise_roles                     = COALESCE($11, expertise_roles),
                expertise_company_types             = COALESCE($12, expertise_company_types),
                specialty_industries                = $13,
                specialty_job_functions             = $14,
                age_range                           = COALESCE($15, age_range),
                education                           = COALESCE($16, education),
                previous_industry                   = COALESCE($17, previous_industry),
                previous_job_function               = COALESCE($18, previous_job_function),
                previous_companies                  = COALESCE($19, previous_companies),
                self_reported_career_years          = COALESCE($20, self_reported_career_years),
                experience_years                    = COALESCE($20, experience_years),
                self_reported_total_supports        = COALESCE($21, self_reported_total_supports),
                total_support_count                 = COALESCE($21, total_support_count),
                self_reported_total_placements      = COALESCE($22, self_reported_total_placements),
                self_reported_average_annual_income = COALESCE($23, self_reported_average_annual_income)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(&changes.headline)
        .bind(&changes.thumbnail_url)
        .bind(&changes.twitter_url)
        .bind(&changes.linkedin_url)
        .bind(&changes.scheduler_url)
        .bind(&changes.profile_summary)
        .bind(&changes.achievements_summary)
        .bind(changes.expertise_roles.as_ref().map(|roles| json!(roles)))
        .bind(
            changes
                .expertise_company_types
                .as_ref()
                .map(|types| json!(types)),
        )
        .bind(&changes.specialty_industries)
        .bind(&changes.specialty_job_functions)
        .bind(changes.age_range_code())
        .bind(changes.education_code())
        .bind(changes.previous_industry_code())
        .bind(changes.previous_job_function_code())
        .bind(&changes.previous_companies)
        .bind(changes.self_reported_career_years)
        .bind(changes.self_reported_total_supports)
        .bind(changes.self_reported_total_placements)
        .bind(changes.self_reported_average_annual_income)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn insert_review(&self, review: &NewReview) -> Result<ReviewRow, AppError> {
        Ok(sqlx::query_as::<_, ReviewRow>(
            r#"
            INSERT INTO reviews
                (consultant_id, user_id, consultation_id, review_type, score, comment, meta, is_approved)
            VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE)
            RETURNING *
            "#,
        )
        .bind(review.consultant_id)
        .bind(review.user_id)
        .bind(review.consultation_id)
        .bind(review.kind.as_str())
        .bind(review.score)
        .bind(&review.comment)
        .bind(&review.meta)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn get_review(&self, id: Uuid) -> Result<Option<ReviewRow>, AppError> {
        Ok(sqlx::query_as("SELECT * FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn approve_review(&self, id: Uuid) -> Result<Option<ReviewRow>, AppError> {
        Ok(
            sqlx::query_as("UPDATE reviews SET is_approved = TRUE WHERE id = $1 RETURNING *")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn pending_reviews(&self) -> Result<Vec<PendingReviewRow>, AppError> {
        Ok(sqlx::query_as::<_, PendingReviewRow>(
            r#"
            SELECT r.id, r.consultant_id, c.name AS consultant_name, r.review_type,
                   r.score, r.comment, r.meta, r.created_at
            FROM reviews r
            JOIN consultants c ON c.id = r.consultant_id
            WHERE NOT r.is_approved
            ORDER BY r.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn user_exists(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?,
        )
    }

    async fn insert_consultation(
        &self,
        consultation: &NewConsultation,
    ) -> Result<ConsultationRow, AppError> {
        Ok(sqlx::query_as::<_, ConsultationRow>(
            r#"
            INSERT INTO consultations
                (user_id, consultant_id, scheduled_at, status, theme, meeting_method, note)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(consultation.user_id)
        .bind(consultation.consultant_id)
        .bind(consultation.scheduled_at)
        .bind(consultation.status.as_str())
        .bind(&consultation.theme)
        .bind(&consultation.meeting_method)
        .bind(&consultation.note)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn dashboard_consultations(
        &self,
        consultant_id: Uuid,
    ) -> Result<Vec<DashboardConsultationRow>, AppError> {
        Ok(sqlx::query_as::<_, DashboardConsultationRow>(
            r#"
            SELECT c.id, c.user_id, u.name AS user_name, c.scheduled_at, c.status,
                   c.theme, c.meeting_method, c.note, c.created_at
            FROM consultations c
            JOIN users u ON u.id = c.user_id
            WHERE c.consultant_id = $1
            ORDER BY c.scheduled_at DESC
            "#,
        )
        .bind(consultant_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_consultation(&self, id: Uuid) -> Result<Option<ConsultationRow>, AppError> {
        Ok(sqlx::query_as("SELECT * FROM consultations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn set_consultation_status(
        &self,
        id: Uuid,
        expected: &str,
        status: ConsultationStatus,
    ) -> Result<Option<ConsultationRow>, AppError> {
        Ok(sqlx::query_as(
            "UPDATE consultations SET status = $3 WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(id)
        .bind(expected)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?)
    }
}
