use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::catalog::profile::ReviewKind;
use crate::errors::AppError;

/// Satisfaction arrives from the form either as a number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Satisfaction {
    Number(i64),
    Text(String),
}

impl Satisfaction {
    fn as_score(&self) -> Option<i64> {
        match self {
            Satisfaction::Number(n) => Some(*n),
            Satisfaction::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// POST /api/v1/reviews body. Reviewer attributes are optional and only
/// stored as meta for moderators.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewSubmission {
    pub consultant_id: Option<Uuid>,
    pub review_type: Option<String>,
    pub satisfaction: Option<Satisfaction>,
    pub good_points: Option<String>,
    pub user_id: Option<Uuid>,
    pub consultation_id: Option<Uuid>,
    pub age_range: Option<String>,
    pub job_category: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub consultation_situation: Option<String>,
    pub outcome: Option<String>,
    pub improvement_points: Option<String>,
    pub twitter_url: Option<String>,
    pub note_url: Option<String>,
    #[serde(default)]
    pub show_sns_link: bool,
}

/// A validated review ready to be stored (always unapproved).
#[derive(Debug, Clone)]
pub struct NewReview {
    pub consultant_id: Uuid,
    pub user_id: Option<Uuid>,
    pub consultation_id: Option<Uuid>,
    pub kind: ReviewKind,
    pub score: i32,
    pub comment: String,
    pub meta: Value,
}

pub fn validate_submission(submission: ReviewSubmission) -> Result<NewReview, AppError> {
    let comment = trimmed(submission.good_points.as_deref());
    let (Some(consultant_id), Some(review_type), Some(satisfaction), Some(comment)) = (
        submission.consultant_id,
        submission.review_type.as_deref(),
        submission.satisfaction.as_ref(),
        comment,
    ) else {
        return Err(AppError::Validation(
            "consultant_id, review_type, satisfaction and good_points are required".to_string(),
        ));
    };

    let kind = ReviewKind::parse(review_type).ok_or_else(|| {
        AppError::Validation(format!(
            "review_type must be 'consultation' or 'outcome', got '{review_type}'"
        ))
    })?;

    let score = satisfaction
        .as_score()
        .filter(|s| (1..=5).contains(s))
        .ok_or_else(|| AppError::Validation("satisfaction must be between 1 and 5".to_string()))?;

    let meta = json!({
        "age_range": trimmed(submission.age_range.as_deref()),
        "job_category": trimmed(submission.job_category.as_deref()),
        "industry": trimmed(submission.industry.as_deref()),
        "company_size": trimmed(submission.company_size.as_deref()),
        "consultation_situation": trimmed(submission.consultation_situation.as_deref()),
        "outcome": trimmed(submission.outcome.as_deref()),
        "improvement_points": trimmed(submission.improvement_points.as_deref()),
        "twitter_url": trimmed(submission.twitter_url.as_deref()),
        "note_url": trimmed(submission.note_url.as_deref()),
        "show_sns_link": submission.show_sns_link,
    });

    Ok(NewReview {
        consultant_id,
        user_id: submission.user_id,
        consultation_id: submission.consultation_id,
        kind,
        score: score as i32,
        comment: comment.to_string(),
        meta,
    })
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ReviewSubmission {
        ReviewSubmission {
            consultant_id: Some(Uuid::new_v4()),
            review_type: Some("consultation".to_string()),
            satisfaction: Some(Satisfaction::Text("4".to_string())),
            good_points: Some("  具体的な求人提案が良かった ".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_submission() {
        let review = validate_submission(submission()).unwrap();
        assert_eq!(review.kind, ReviewKind::Consultation);
        assert_eq!(review.score, 4);
        assert_eq!(review.comment, "具体的な求人提案が良かった");
        assert_eq!(review.meta["show_sns_link"], json!(false));
        assert!(review.meta["age_range"].is_null());
    }

    #[test]
    fn test_numeric_satisfaction_accepted() {
        let mut s = submission();
        s.satisfaction = Some(Satisfaction::Number(5));
        assert_eq!(validate_submission(s).unwrap().score, 5);
    }

    #[test]
    fn test_missing_required_fields_rejected() {
        let mut s = submission();
        s.good_points = Some("   ".to_string());
        assert!(matches!(validate_submission(s), Err(AppError::Validation(_))));

        let mut s = submission();
        s.consultant_id = None;
        assert!(matches!(validate_submission(s), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_out_of_range_satisfaction_rejected() {
        for bad in ["0", "6", "abc", ""] {
            let mut s = submission();
            s.satisfaction = Some(Satisfaction::Text(bad.to_string()));
            assert!(
                matches!(validate_submission(s), Err(AppError::Validation(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_unknown_review_type_rejected() {
        let mut s = submission();
        s.review_type = Some("rating".to_string());
        assert!(matches!(validate_submission(s), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_meta_keeps_reviewer_attributes() {
        let mut s = submission();
        s.age_range = Some("20s_late".to_string());
        s.industry = Some("it_internet".to_string());
        s.show_sns_link = true;
        let review = validate_submission(s).unwrap();
        assert_eq!(review.meta["age_range"], json!("20s_late"));
        assert_eq!(review.meta["industry"], json!("it_internet"));
        assert_eq!(review.meta["show_sns_link"], json!(true));
    }
}
