use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::review::ReviewRow;

/// A consultant row exactly as persisted. Loosely typed columns (JSONB,
/// free-text category codes, nullable counts) are normalized by
/// `catalog::profile` before any scoring or filtering happens.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConsultantRow {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub specialties: Option<String>,
    pub headline: Option<String>,
    pub profile_summary: Option<String>,
    pub achievements_summary: Option<String>,
    pub thumbnail_url: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub scheduler_url: Option<String>,
    pub timelex_url: Option<String>,
    pub experience_years: i32,
    pub total_support_count: Option<i32>,
    pub sns_followers_twitter: Option<i32>,
    pub sns_followers_linkedin: Option<i32>,
    pub sns_followers_instagram: Option<i32>,
    pub external_links: Option<Value>,
    pub expertise_roles: Option<Value>,
    pub expertise_company_types: Option<Value>,
    pub specialty_industries: Vec<String>,
    pub specialty_job_functions: Vec<String>,
    pub age_range: Option<String>,
    pub education: Option<String>,
    pub previous_industry: Option<String>,
    pub previous_job_function: Option<String>,
    pub previous_companies: Vec<String>,
    pub self_reported_career_years: Option<i32>,
    pub self_reported_total_supports: Option<i32>,
    pub self_reported_total_placements: Option<i32>,
    pub self_reported_average_annual_income: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl ConsultantRow {
    /// The external booking URL, preferring the generic scheduler link.
    pub fn booking_url(&self) -> Option<&str> {
        [self.scheduler_url.as_deref(), self.timelex_url.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
    }
}

/// A consultant together with every review stored for it (approved or not).
#[derive(Debug, Clone)]
pub struct ConsultantRecord {
    pub consultant: ConsultantRow,
    pub reviews: Vec<ReviewRow>,
}
