//! Normalized, read-only view of a consultant used by scoring and filtering.
//!
//! All coercion of loosely typed persisted data happens here, once, so that
//! `scoring` and `pipeline` only ever see well-formed values.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::catalog::options::{parse_optional, AgeRange, EducationCategory, Industry, JobFunction};
use crate::models::consultant::ConsultantRecord;
use crate::models::review::ReviewRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewKind {
    /// Feedback on the consultation session itself.
    Consultation,
    /// Feedback on the job-change outcome.
    Outcome,
}

impl ReviewKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewKind::Consultation => "consultation",
            ReviewKind::Outcome => "outcome",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "consultation" => Some(ReviewKind::Consultation),
            "outcome" => Some(ReviewKind::Outcome),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReviewKind::Consultation => "相談レビュー",
            ReviewKind::Outcome => "転職レビュー",
        }
    }
}

/// The part of a review that feeds ranking and averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewSignal {
    pub kind: ReviewKind,
    /// Always within 1..=5.
    pub score: u8,
}

impl ReviewSignal {
    /// Returns `None` for unknown review types or out-of-range scores.
    pub fn from_row(row: &ReviewRow) -> Option<Self> {
        let kind = ReviewKind::parse(&row.review_type)?;
        let score = u8::try_from(row.score).ok().filter(|s| (1..=5).contains(s))?;
        Some(ReviewSignal { kind, score })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnsFollowers {
    pub twitter: u64,
    pub linkedin: u64,
    pub instagram: u64,
}

impl SnsFollowers {
    /// Saturates at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.twitter
            .saturating_add(self.linkedin)
            .saturating_add(self.instagram)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConsultantProfile {
    pub id: Uuid,
    pub name: String,
    pub headline: Option<String>,
    pub thumbnail_url: Option<String>,
    pub bio: String,
    pub specialties: String,
    pub achievements_summary: Option<String>,
    pub experience_years: u32,
    pub sns_followers: SnsFollowers,
    pub external_link_count: usize,
    /// Job-function tags from the profile editor checkboxes.
    pub expertise_tags: BTreeSet<String>,
    /// Search-oriented job-function codes, matched together with `expertise_tags`.
    pub specialty_tags: BTreeSet<String>,
    pub company_type_tags: BTreeSet<String>,
    pub age_range: Option<AgeRange>,
    pub education: Option<EducationCategory>,
    pub previous_industry: Option<Industry>,
    pub previous_job_function: Option<JobFunction>,
    pub has_scheduler_link: bool,
    /// Published (approved) reviews only.
    pub reviews: Vec<ReviewSignal>,
}

impl ConsultantProfile {
    pub fn from_record(record: &ConsultantRecord) -> Self {
        let row = &record.consultant;

        let reviews = record
            .reviews
            .iter()
            .filter(|r| r.is_approved)
            .filter_map(|r| {
                let signal = ReviewSignal::from_row(r);
                if signal.is_none() {
                    warn!(
                        review_id = %r.id,
                        review_type = %r.review_type,
                        score = r.score,
                        "Skipping malformed review"
                    );
                }
                signal
            })
            .collect();

        ConsultantProfile {
            id: row.id,
            name: row.name.clone(),
            headline: non_blank(row.headline.as_deref()),
            thumbnail_url: non_blank(row.thumbnail_url.as_deref()),
            bio: row.bio.clone().unwrap_or_default(),
            specialties: row.specialties.clone().unwrap_or_default(),
            achievements_summary: row.achievements_summary.clone(),
            experience_years: non_negative(Some(row.experience_years)) as u32,
            sns_followers: SnsFollowers {
                twitter: non_negative(row.sns_followers_twitter),
                linkedin: non_negative(row.sns_followers_linkedin),
                instagram: non_negative(row.sns_followers_instagram),
            },
            external_link_count: count_external_links(row.external_links.as_ref()),
            expertise_tags: string_tags(row.expertise_roles.as_ref()),
            specialty_tags: row
                .specialty_job_functions
                .iter()
                .filter(|t| !t.trim().is_empty())
                .cloned()
                .collect(),
            company_type_tags: string_tags(row.expertise_company_types.as_ref()),
            age_range: parse_optional(row.age_range.as_deref()),
            education: parse_optional(row.education.as_deref()),
            previous_industry: parse_optional(row.previous_industry.as_deref()),
            previous_job_function: parse_optional(row.previous_job_function.as_deref()),
            has_scheduler_link: row.booking_url().is_some(),
            reviews,
        }
    }

    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    /// True when the achievements summary carries any non-whitespace text.
    pub fn has_achievements(&self) -> bool {
        self.achievements_summary
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }

    /// Union of both tag sets the expertise filter matches against.
    pub fn all_expertise_tags(&self) -> impl Iterator<Item = &str> {
        self.expertise_tags
            .iter()
            .chain(self.specialty_tags.iter())
            .map(String::as_str)
    }
}

/// Counts stored external links. Anything other than a JSON array counts as
/// zero links.
pub fn count_external_links(links: Option<&Value>) -> usize {
    match links {
        Some(Value::Array(items)) => items.len(),
        _ => 0,
    }
}

/// Reads a JSON array of strings, dropping non-strings and blanks.
pub fn string_tags(value: Option<&Value>) -> BTreeSet<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => BTreeSet::new(),
    }
}

fn non_negative(value: Option<i32>) -> u64 {
    value.map(|v| v.max(0) as u64).unwrap_or(0)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
