use serde::Serialize;
use uuid::Uuid;

use crate::catalog::profile::{ReviewKind, ReviewSignal};
use crate::models::review::ReviewRow;

const EXCERPT_CHARS: usize = 100;

/// Arithmetic mean of review scores, optionally restricted to one review
/// type. `None` when there is nothing to average.
pub fn average_score(reviews: &[ReviewSignal], scope: Option<ReviewKind>) -> Option<f64> {
    let (sum, count) = reviews
        .iter()
        .filter(|r| scope.map_or(true, |kind| r.kind == kind))
        .fold((0_u32, 0_u32), |(sum, count), r| (sum + u32::from(r.score), count + 1));

    (count > 0).then(|| f64::from(sum) / f64::from(count))
}

/// Display rounding used by the listing and detail responses.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Serialize)]
pub struct RepresentativeReview {
    pub review_id: Uuid,
    pub score: i32,
    pub excerpt: String,
}

/// Picks the review that best represents a consultant: highest score among
/// reviews with a comment, ties going to the shorter comment.
pub fn representative_review(reviews: &[ReviewRow]) -> Option<RepresentativeReview> {
    reviews
        .iter()
        .filter(|r| !r.comment.trim().is_empty())
        .min_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.comment.chars().count().cmp(&b.comment.chars().count()))
        })
        .map(|r| RepresentativeReview {
            review_id: r.id,
            score: r.score,
            excerpt: excerpt(&r.comment),
        })
}

/// Collapses whitespace and truncates to 100 characters, appending `...`
/// when anything was cut.
pub fn excerpt(comment: &str) -> String {
    let collapsed = comment.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= EXCERPT_CHARS {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(EXCERPT_CHARS).collect();
    cut.push_str("...");
    cut
}
