use serde::Deserialize;

use crate::catalog::options::{AgeRange, Category, EducationCategory, Industry, JobFunction};
use crate::errors::AppError;

/// PUT /api/v1/consultants/:id/profile body, as posted by the dashboard form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdateRequest {
    #[serde(default)]
    pub name: String,
    pub email: Option<String>,
    pub headline: Option<String>,
    pub thumbnail_url: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub scheduler_url: Option<String>,
    pub profile_summary: Option<String>,
    pub achievements_summary: Option<String>,
    #[serde(default)]
    pub expertise_roles: Vec<String>,
    #[serde(default)]
    pub expertise_company_types: Vec<String>,
    #[serde(default)]
    pub specialty_industries: Vec<String>,
    #[serde(default)]
    pub specialty_job_functions: Vec<String>,
    pub age_range: Option<AgeRange>,
    pub education: Option<EducationCategory>,
    pub previous_industry: Option<Industry>,
    pub previous_job_function: Option<JobFunction>,
    /// Comma-separated company names.
    pub previous_companies: Option<String>,
    pub self_reported_career_years: Option<i32>,
    pub self_reported_total_supports: Option<i32>,
    pub self_reported_total_placements: Option<i32>,
    pub self_reported_average_annual_income: Option<i32>,
}

/// Normalized profile changes.
///
/// Two kinds of fields: free-text display fields are always written (`None`
/// clears them); everything marked "keep" leaves the stored value untouched
/// when `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileChanges {
    pub name: String,
    /// keep
    pub email: Option<String>,
    pub headline: Option<String>,
    pub thumbnail_url: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub scheduler_url: Option<String>,
    pub profile_summary: Option<String>,
    pub achievements_summary: Option<String>,
    /// keep
    pub expertise_roles: Option<Vec<String>>,
    /// keep
    pub expertise_company_types: Option<Vec<String>>,
    pub specialty_industries: Vec<String>,
    pub specialty_job_functions: Vec<String>,
    /// keep
    pub age_range: Option<AgeRange>,
    /// keep
    pub education: Option<EducationCategory>,
    /// keep
    pub previous_industry: Option<Industry>,
    /// keep
    pub previous_job_function: Option<JobFunction>,
    /// keep
    pub previous_companies: Option<Vec<String>>,
    /// keep; also written to `experience_years`
    pub self_reported_career_years: Option<i32>,
    /// keep; also written to `total_support_count`
    pub self_reported_total_supports: Option<i32>,
    /// keep
    pub self_reported_total_placements: Option<i32>,
    /// keep
    pub self_reported_average_annual_income: Option<i32>,
}

impl ProfileChanges {
    pub fn age_range_code(&self) -> Option<&'static str> {
        self.age_range.map(Category::as_str)
    }

    pub fn education_code(&self) -> Option<&'static str> {
        self.education.map(Category::as_str)
    }

    pub fn previous_industry_code(&self) -> Option<&'static str> {
        self.previous_industry.map(Category::as_str)
    }

    pub fn previous_job_function_code(&self) -> Option<&'static str> {
        self.previous_job_function.map(Category::as_str)
    }
}

pub fn normalize_update(request: ProfileUpdateRequest) -> Result<ProfileChanges, AppError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }

    for (field, value) in [
        ("self_reported_career_years", request.self_reported_career_years),
        ("self_reported_total_supports", request.self_reported_total_supports),
        ("self_reported_total_placements", request.self_reported_total_placements),
        (
            "self_reported_average_annual_income",
            request.self_reported_average_annual_income,
        ),
    ] {
        if value.is_some_and(|v| v < 0) {
            return Err(AppError::Validation(format!("{field} cannot be negative")));
        }
    }

    Ok(ProfileChanges {
        name: name.to_string(),
        email: blank_to_none(request.email),
        headline: blank_to_none(request.headline),
        thumbnail_url: blank_to_none(request.thumbnail_url),
        twitter_url: blank_to_none(request.twitter_url),
        linkedin_url: blank_to_none(request.linkedin_url),
        scheduler_url: blank_to_none(request.scheduler_url),
        profile_summary: blank_to_none(request.profile_summary),
        achievements_summary: blank_to_none(request.achievements_summary),
        expertise_roles: non_empty(clean_list(request.expertise_roles)),
        expertise_company_types: non_empty(clean_list(request.expertise_company_types)),
        specialty_industries: clean_list(request.specialty_industries),
        specialty_job_functions: clean_list(request.specialty_job_functions),
        age_range: request.age_range,
        education: request.education,
        previous_industry: request.previous_industry,
        previous_job_function: request.previous_job_function,
        previous_companies: request
            .previous_companies
            .as_deref()
            .map(split_companies)
            .and_then(non_empty),
        self_reported_career_years: request.self_reported_career_years,
        self_reported_total_supports: request.self_reported_total_supports,
        self_reported_total_placements: request.self_reported_total_placements,
        self_reported_average_annual_income: request.self_reported_average_annual_income,
    })
}

/// Splits the comma-separated company field, dropping blanks.
pub fn split_companies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    (!values.is_empty()).then_some(values)
}
