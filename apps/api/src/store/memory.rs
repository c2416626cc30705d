use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
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

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, String>,
    consultants: Vec<ConsultantRow>,
    reviews: Vec<ReviewRow>,
    consultations: Vec<ConsultationRow>,
}

/// `ConsultantStore` over plain vectors, for router tests.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn add_user(&self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.tables.lock().unwrap().users.insert(id, name.to_string());
        id
    }

    pub fn add_consultant(&self, row: ConsultantRow) -> Uuid {
        let id = row.id;
        self.tables.lock().unwrap().consultants.push(row);
        id
    }

    pub fn add_review(&self, row: ReviewRow) -> Uuid {
        let id = row.id;
        self.tables.lock().unwrap().reviews.push(row);
        id
    }

    fn record(tables: &Tables, consultant: &ConsultantRow) -> ConsultantRecord {
        ConsultantRecord {
            consultant: consultant.clone(),
            reviews: tables
                .reviews
                .iter()
                .filter(|r| r.consultant_id == consultant.id)
                .cloned()
                .collect(),
        }
    }
}

#[async_trait]
impl ConsultantStore for MemoryStore {
    async fn list_consultants(&self) -> Result<Vec<ConsultantRecord>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut consultants: Vec<&ConsultantRow> = tables.consultants.iter().collect();
        consultants.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(consultants
            .into_iter()
            .map(|c| Self::record(&tables, c))
            .collect())
    }

    async fn get_consultant(&self, id: Uuid) -> Result<Option<ConsultantRecord>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .consultants
            .iter()
            .find(|c| c.id == id)
            .map(|c| Self::record(&tables, c)))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: &ProfileChanges,
    ) -> Result<Option<ConsultantRow>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(row) = tables.consultants.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        row.name = changes.name.clone();
        row.headline = changes.headline.clone();
        row.thumbnail_url = changes.thumbnail_url.clone();
        row.twitter_url = changes.twitter_url.clone();
        row.linkedin_url = changes.linkedin_url.clone();
        row.scheduler_url = changes.scheduler_url.clone();
        row.profile_summary = changes.profile_summary.clone();
        row.achievements_summary = changes.achievements_summary.clone();
        row.specialty_industries = changes.specialty_industries.clone();
        row.specialty_job_functions = changes.specialty_job_functions.clone();

        if let Some(email) = &changes.email {
            row.email = Some(email.clone());
        }
        if let Some(roles) = &changes.expertise_roles {
            row.expertise_roles = Some(json!(roles));
        }
        if let Some(types) = &changes.expertise_company_types {
            row.expertise_company_types = Some(json!(types));
        }
        if let Some(code) = changes.age_range_code() {
            row.age_range = Some(code.to_string());
        }
        if let Some(code) = changes.education_code() {
            row.education = Some(code.to_string());
        }
        if let Some(code) = changes.previous_industry_code() {
            row.previous_industry = Some(code.to_string());
        }
        if let Some(code) = changes.previous_job_function_code() {
            row.previous_job_function = Some(code.to_string());
        }
        if let Some(companies) = &changes.previous_companies {
            row.previous_companies = companies.clone();
        }
        if let Some(years) = changes.self_reported_career_years {
            row.self_reported_career_years = Some(years);
            row.experience_years = years;
        }
        if let Some(supports) = changes.self_reported_total_supports {
            row.self_reported_total_supports = Some(supports);
            row.total_support_count = Some(supports);
        }
        if let Some(placements) = changes.self_reported_total_placements {
            row.self_reported_total_placements = Some(placements);
        }
        if let Some(income) = changes.self_reported_average_annual_income {
            row.self_reported_average_annual_income = Some(income);
        }

        Ok(Some(row.clone()))
    }

    async fn insert_review(&self, review: &NewReview) -> Result<ReviewRow, AppError> {
        let row = ReviewRow {
            id: Uuid::new_v4(),
            consultant_id: review.consultant_id,
            user_id: review.user_id,
            consultation_id: review.consultation_id,
            review_type: review.kind.as_str().to_string(),
            score: review.score,
            comment: review.comment.clone(),
            meta: Some(review.meta.clone()),
            is_approved: false,
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().reviews.push(row.clone());
        Ok(row)
    }

    async fn get_review(&self, id: Uuid) -> Result<Option<ReviewRow>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.reviews.iter().find(|r| r.id == id).cloned())
    }

    async fn approve_review(&self, id: Uuid) -> Result<Option<ReviewRow>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.reviews.iter_mut().find(|r| r.id == id).map(|r| {
            r.is_approved = true;
            r.clone()
        }))
    }

    async fn pending_reviews(&self) -> Result<Vec<PendingReviewRow>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut pending: Vec<PendingReviewRow> = tables
            .reviews
            .iter()
            .filter(|r| !r.is_approved)
            .filter_map(|r| {
                let consultant = tables.consultants.iter().find(|c| c.id == r.consultant_id)?;
                Some(PendingReviewRow {
                    id: r.id,
                    consultant_id: r.consultant_id,
                    consultant_name: consultant.name.clone(),
                    review_type: r.review_type.clone(),
                    score: r.score,
                    comment: r.comment.clone(),
                    meta: r.meta.clone(),
                    created_at: r.created_at,
                })
            })
            .collect();
        pending.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(pending)
    }

    async fn user_exists(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.tables.lock().unwrap().users.contains_key(&id))
    }

    async fn insert_consultation(
        &self,
        consultation: &NewConsultation,
    ) -> Result<ConsultationRow, AppError> {
        let row = ConsultationRow {
            id: Uuid::new_v4(),
            user_id: consultation.user_id,
            consultant_id: consultation.consultant_id,
            scheduled_at: consultation.scheduled_at,
            status: consultation.status.as_str().to_string(),
            theme: consultation.theme.clone(),
            meeting_method: consultation.meeting_method.clone(),
            note: consultation.note.clone(),
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().consultations.push(row.clone());
        Ok(row)
    }

    async fn dashboard_consultations(
        &self,
        consultant_id: Uuid,
    ) -> Result<Vec<DashboardConsultationRow>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<DashboardConsultationRow> = tables
            .consultations
            .iter()
            .filter(|c| c.consultant_id == consultant_id)
            .filter_map(|c| {
                let user_name = tables.users.get(&c.user_id)?.clone();
                Some(DashboardConsultationRow {
                    id: c.id,
                    user_id: c.user_id,
                    user_name,
                    scheduled_at: c.scheduled_at,
                    status: c.status.clone(),
                    theme: c.theme.clone(),
                    meeting_method: c.meeting_method.clone(),
                    note: c.note.clone(),
                    created_at: c.created_at,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at));
        Ok(rows)
    }

    async fn get_consultation(&self, id: Uuid) -> Result<Option<ConsultationRow>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.consultations.iter().find(|c| c.id == id).cloned())
    }

    async fn set_consultation_status(
        &self,
        id: Uuid,
        expected: &str,
        status: ConsultationStatus,
    ) -> Result<Option<ConsultationRow>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables
            .consultations
            .iter_mut()
            .find(|c| c.id == id && c.status == expected)
            .map(|c| {
                c.status = status.as_str().to_string();
                c.clone()
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::profile::fixtures::consultant_row;

    #[tokio::test]
    async fn test_status_update_requires_expected_status() {
        let store = MemoryStore::default();
        let user_id = store.add_user("鈴木一郎");
        let consultant_id = store.add_consultant(consultant_row("佐藤美咲"));
        let row = store
            .insert_consultation(&NewConsultation {
                user_id,
                consultant_id,
                scheduled_at: Utc::now(),
                status: ConsultationStatus::Scheduled,
                theme: None,
                meeting_method: None,
                note: None,
            })
            .await
            .unwrap();

        let done = store
            .set_consultation_status(row.id, "scheduled", ConsultationStatus::Completed)
            .await
            .unwrap();
        assert_eq!(done.unwrap().status, "completed");

        // A second toggle computed from the same stale read must not apply.
        let stale = store
            .set_consultation_status(row.id, "scheduled", ConsultationStatus::Completed)
            .await
            .unwrap();
        assert!(stale.is_none());
        let current = store.get_consultation(row.id).await.unwrap().unwrap();
        assert_eq!(current.status, "completed");
    }
}
