//! Axum route handlers for the public consultant catalog.

use std::collections::BTreeSet;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::filter::FilterCriteria;
use crate::catalog::options::{
    filter_options, AgeRange, Category, EducationCategory, FilterOptions, Industry, JobFunction,
};
use crate::catalog::pipeline::{apply, top_by_expected_score, SortKey};
use crate::catalog::profile::{ConsultantProfile, ReviewKind, ReviewSignal};
use crate::catalog::review_stats::{
    average_score, representative_review, round_one_decimal, RepresentativeReview,
};
use crate::catalog::scoring::{compute_expected_score, is_featured, score_breakdown, ScoreBreakdown};
use crate::errors::AppError;
use crate::models::consultant::ConsultantRecord;
use crate::state::AppState;

const TOP_CONSULTANTS: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Query string of GET /api/v1/consultants. Category values are wire codes;
/// blank values mean "no filter".
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub age_range: Option<String>,
    pub education: Option<String>,
    pub industry: Option<String>,
    pub job_function: Option<String>,
    /// Comma-separated.
    pub expertise_tags: Option<String>,
    #[serde(default)]
    pub online_only: bool,
    pub keyword: Option<String>,
    pub sort: Option<SortKey>,
}

impl ListQuery {
    pub fn into_criteria(self) -> Result<FilterCriteria, AppError> {
        Ok(FilterCriteria {
            age_range: parse_code::<AgeRange>("age_range", self.age_range.as_deref())?,
            education: parse_code::<EducationCategory>("education", self.education.as_deref())?,
            industry: parse_code::<Industry>("industry", self.industry.as_deref())?,
            job_function: parse_code::<JobFunction>("job_function", self.job_function.as_deref())?,
            expertise_tags: self
                .expertise_tags
                .as_deref()
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_else(BTreeSet::new),
            online_only: self.online_only,
            keyword: self.keyword,
            sort: self.sort.unwrap_or_default(),
        })
    }
}

fn parse_code<C: Category>(field: &str, raw: Option<&str>) -> Result<Option<C>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(code) => C::parse(code)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("Unknown {field} '{code}'"))),
    }
}

#[derive(Debug, Serialize)]
pub struct ConsultantListItem {
    pub id: Uuid,
    pub name: String,
    pub headline: Option<String>,
    pub thumbnail_url: Option<String>,
    pub specialties: String,
    pub expertise_tags: Vec<String>,
    pub age_range: Option<AgeRange>,
    pub education: Option<EducationCategory>,
    pub previous_industry: Option<Industry>,
    pub previous_job_function: Option<JobFunction>,
    pub online_available: bool,
    pub expected_score: f64,
    pub featured: bool,
    pub review_count: usize,
    /// Absent when the consultant has no published reviews.
    pub average_score: Option<f64>,
}

impl ConsultantListItem {
    fn from_profile(profile: &ConsultantProfile) -> Self {
        let expected_score = compute_expected_score(profile);
        ConsultantListItem {
            id: profile.id,
            name: profile.name.clone(),
            headline: profile.headline.clone(),
            thumbnail_url: profile.thumbnail_url.clone(),
            specialties: profile.specialties.clone(),
            expertise_tags: profile.expertise_tags.iter().cloned().collect(),
            age_range: profile.age_range,
            education: profile.education,
            previous_industry: profile.previous_industry,
            previous_job_function: profile.previous_job_function,
            online_available: profile.has_scheduler_link,
            expected_score,
            featured: is_featured(expected_score),
            review_count: profile.review_count(),
            average_score: average_score(&profile.reviews, None).map(round_one_decimal),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConsultantListResponse {
    pub total: usize,
    pub consultants: Vec<ConsultantListItem>,
}

#[derive(Debug, Serialize)]
pub struct ReviewSummary {
    pub count: usize,
    pub average: Option<f64>,
    pub consultation_average: Option<f64>,
    pub outcome_average: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct PublishedReview {
    pub id: Uuid,
    pub review_type: String,
    pub score: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ConsultantDetailResponse {
    #[serde(flatten)]
    pub summary: ConsultantListItem,
    pub bio: Option<String>,
    pub profile_summary: Option<String>,
    pub achievements_summary: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub scheduler_url: Option<String>,
    pub company_types: Vec<String>,
    pub specialty_industries: Vec<String>,
    pub specialty_job_functions: Vec<String>,
    pub education_label: Option<&'static str>,
    pub previous_companies: Vec<String>,
    pub external_links: Vec<Value>,
    pub self_reported_career_years: Option<i32>,
    pub self_reported_total_supports: Option<i32>,
    pub self_reported_total_placements: Option<i32>,
    pub self_reported_average_annual_income: Option<i32>,
    pub score_breakdown: ScoreBreakdown,
    pub review_summary: ReviewSummary,
    pub representative_review: Option<RepresentativeReview>,
    pub reviews: Vec<PublishedReview>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

async fn load_profiles(state: &AppState) -> Result<Vec<ConsultantProfile>, AppError> {
    let records = state.store.list_consultants().await?;
    Ok(records.iter().map(ConsultantProfile::from_record).collect())
}

/// GET /api/v1/consultants
///
/// Filters and sorts the full catalog in memory on every request.
pub async fn handle_list_consultants(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ConsultantListResponse>, AppError> {
    let criteria = query.into_criteria()?;
    let profiles = load_profiles(&state).await?;

    let consultants: Vec<ConsultantListItem> = apply(&profiles, &criteria)
        .into_iter()
        .map(ConsultantListItem::from_profile)
        .collect();
    debug!(
        catalog_size = profiles.len(),
        matched = consultants.len(),
        unfiltered = criteria.is_unfiltered(),
        sort = ?criteria.sort,
        "Consultant listing computed"
    );

    Ok(Json(ConsultantListResponse {
        total: consultants.len(),
        consultants,
    }))
}

/// GET /api/v1/consultants/top
pub async fn handle_top_consultants(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConsultantListItem>>, AppError> {
    let profiles = load_profiles(&state).await?;
    Ok(Json(
        top_by_expected_score(&profiles, TOP_CONSULTANTS)
            .into_iter()
            .map(ConsultantListItem::from_profile)
            .collect(),
    ))
}

/// GET /api/v1/consultants/:id
pub async fn handle_get_consultant(
    State(state): State<AppState>,
    Path(consultant_id): Path<Uuid>,
) -> Result<Json<ConsultantDetailResponse>, AppError> {
    let record = state
        .store
        .get_consultant(consultant_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Consultant {consultant_id} not found")))?;

    info!(consultant_id = %consultant_id, "Consultant detail viewed");
    Ok(Json(build_detail(record)))
}

fn build_detail(record: ConsultantRecord) -> ConsultantDetailResponse {
    let profile = ConsultantProfile::from_record(&record);
    let scheduler_url = record.consultant.booking_url().map(str::to_string);

    let ConsultantRecord {
        consultant: row,
        reviews,
    } = record;
    // Same gate as the profile's review signals, so list, counts and excerpt agree.
    let approved: Vec<_> = reviews
        .into_iter()
        .filter(|r| r.is_approved && ReviewSignal::from_row(r).is_some())
        .collect();

    let review_summary = ReviewSummary {
        count: profile.review_count(),
        average: average_score(&profile.reviews, None).map(round_one_decimal),
        consultation_average: average_score(&profile.reviews, Some(ReviewKind::Consultation))
            .map(round_one_decimal),
        outcome_average: average_score(&profile.reviews, Some(ReviewKind::Outcome))
            .map(round_one_decimal),
    };

    let external_links = match row.external_links {
        Some(Value::Array(links)) => links,
        _ => Vec::new(),
    };

    ConsultantDetailResponse {
        summary: ConsultantListItem::from_profile(&profile),
        bio: row.bio,
        profile_summary: row.profile_summary,
        achievements_summary: row.achievements_summary,
        twitter_url: row.twitter_url,
        linkedin_url: row.linkedin_url,
        scheduler_url,
        company_types: profile.company_type_tags.iter().cloned().collect(),
        specialty_industries: row.specialty_industries,
        specialty_job_functions: row.specialty_job_functions,
        education_label: profile.education.and_then(EducationCategory::display_label),
        previous_companies: row.previous_companies,
        external_links,
        self_reported_career_years: row.self_reported_career_years,
        self_reported_total_supports: row.self_reported_total_supports,
        self_reported_total_placements: row.self_reported_total_placements,
        self_reported_average_annual_income: row.self_reported_average_annual_income,
        score_breakdown: score_breakdown(&profile),
        review_summary,
        representative_review: representative_review(&approved),
        reviews: approved
            .into_iter()
            .map(|r| PublishedReview {
                id: r.id,
                review_type: r.review_type,
                score: r.score,
                comment: r.comment,
                created_at: r.created_at,
            })
            .collect(),
    }
}

/// GET /api/v1/filters/options
pub async fn handle_filter_options() -> Json<FilterOptions> {
    Json(filter_options())
}
