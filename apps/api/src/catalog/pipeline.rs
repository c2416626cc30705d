//! Listing pipeline: filter by the active criteria, then stable-sort by the
//! chosen key. Pure and recomputed from the full collection on every request.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::catalog::filter::FilterCriteria;
use crate::catalog::profile::ConsultantProfile;
use crate::catalog::scoring::compute_expected_score;

const RECOMMENDED_SCORE_WEIGHT: f64 = 0.6;
const RECOMMENDED_REVIEW_WEIGHT: f64 = 0.4;

/// Listing order. Legacy front-end names are accepted as aliases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "recommended")]
    Recommended,
    #[serde(rename = "score-desc", alias = "score-high")]
    ScoreDesc,
    #[serde(rename = "score-asc", alias = "score-low")]
    ScoreAsc,
    #[serde(rename = "review-count-desc", alias = "reviews-high")]
    ReviewCountDesc,
}

/// Ranking value for the default order.
///
/// The bounded expected score (1–5) is mixed with the unbounded review count,
/// so once a consultant has more than a handful of reviews the count alone
/// decides the order. Kept as-is: renormalizing would change rankings users
/// already see.
pub fn recommended_rank(profile: &ConsultantProfile) -> f64 {
    RECOMMENDED_SCORE_WEIGHT * compute_expected_score(profile)
        + RECOMMENDED_REVIEW_WEIGHT * profile.review_count() as f64
}

/// Filters and orders `consultants` without touching the input.
pub fn apply<'a>(
    consultants: &'a [ConsultantProfile],
    criteria: &FilterCriteria,
) -> Vec<&'a ConsultantProfile> {
    let matcher = criteria.matcher();
    let retained: Vec<&ConsultantProfile> = consultants.iter().filter(|&c| matcher(c)).collect();
    sort_profiles(retained, criteria.sort)
}

/// Stable sort: equal keys keep their incoming relative order.
pub fn sort_profiles(profiles: Vec<&ConsultantProfile>, key: SortKey) -> Vec<&ConsultantProfile> {
    let mut keyed: Vec<(f64, &ConsultantProfile)> = profiles
        .into_iter()
        .map(|p| {
            let value = match key {
                SortKey::Recommended => recommended_rank(p),
                SortKey::ScoreDesc | SortKey::ScoreAsc => compute_expected_score(p),
                SortKey::ReviewCountDesc => p.review_count() as f64,
            };
            (value, p)
        })
        .collect();

    let ascending = matches!(key, SortKey::ScoreAsc);
    keyed.sort_by(|(a, _), (b, _)| {
        let ord: Ordering = a.total_cmp(b);
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });

    keyed.into_iter().map(|(_, p)| p).collect()
}

/// Landing-page highlights: the `limit` highest expected scores.
pub fn top_by_expected_score(
    consultants: &[ConsultantProfile],
    limit: usize,
) -> Vec<&ConsultantProfile> {
    let mut ranked = sort_profiles(consultants.iter().collect(), SortKey::ScoreDesc);
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::options::AgeRange;
    use crate::catalog::profile::{ReviewKind, ReviewSignal};

    fn consultant(name: &str, years: u32, reviews: usize) -> ConsultantProfile {
        ConsultantProfile {
            name: name.to_string(),
            experience_years: years,
            reviews: vec![
                ReviewSignal {
                    kind: ReviewKind::Consultation,
                    score: 4,
                };
                reviews
            ],
            ..Default::default()
        }
    }

    fn names(list: &[&ConsultantProfile]) -> Vec<String> {
        list.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let criteria = FilterCriteria {
            online_only: true,
            ..Default::default()
        };
        assert!(apply(&[], &criteria).is_empty());
        assert!(apply(&[], &FilterCriteria::default()).is_empty());
    }

    #[test]
    fn test_age_filter_keeps_matches_in_input_order() {
        let mut all: Vec<ConsultantProfile> = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|n| consultant(n, 5, 0))
            .collect();
        all[1].age_range = Some(AgeRange::ThirtiesEarly);
        all[3].age_range = Some(AgeRange::ThirtiesEarly);
        all[4].age_range = Some(AgeRange::FortiesPlus);

        let criteria = FilterCriteria {
            age_range: Some(AgeRange::ThirtiesEarly),
            sort: SortKey::ScoreDesc,
            ..Default::default()
        };
        assert_eq!(names(&apply(&all, &criteria)), vec!["B", "D"]);
    }

    #[test]
    fn test_score_orderings() {
        let all = vec![
            consultant("mid", 5, 0),
            consultant("low", 0, 0),
            consultant("high", 10, 0),
        ];
        let desc = FilterCriteria {
            sort: SortKey::ScoreDesc,
            ..Default::default()
        };
        assert_eq!(names(&apply(&all, &desc)), vec!["high", "mid", "low"]);

        let asc = FilterCriteria {
            sort: SortKey::ScoreAsc,
            ..Default::default()
        };
        assert_eq!(names(&apply(&all, &asc)), vec!["low", "mid", "high"]);
    }

    #[test]
    fn test_review_count_desc() {
        let all = vec![
            consultant("one", 10, 1),
            consultant("three", 0, 3),
            consultant("zero", 10, 0),
        ];
        let criteria = FilterCriteria {
            sort: SortKey::ReviewCountDesc,
            ..Default::default()
        };
        assert_eq!(names(&apply(&all, &criteria)), vec!["three", "one", "zero"]);
    }

    #[test]
    fn test_recommended_is_the_default_sort() {
        assert_eq!(SortKey::default(), SortKey::Recommended);
    }

    #[test]
    fn test_recommended_review_count_dominates_score() {
        // 0.6 * 1.0 + 0.4 * 10 = 4.6 beats 0.6 * 2.5 + 0 = 1.5.
        // Mixed-scale weighting: the count outweighs the bounded score.
        let all = vec![consultant("veteran", 10, 0), consultant("popular", 0, 10)];
        let ranked = apply(&all, &FilterCriteria::default());
        assert_eq!(names(&ranked), vec!["popular", "veteran"]);
        assert!((recommended_rank(ranked[0]) - 4.6).abs() < 1e-9);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let all = vec![
            consultant("first", 3, 2),
            consultant("second", 3, 2),
            consultant("third", 3, 2),
        ];
        for sort in [
            SortKey::Recommended,
            SortKey::ScoreDesc,
            SortKey::ScoreAsc,
            SortKey::ReviewCountDesc,
        ] {
            let criteria = FilterCriteria {
                sort,
                ..Default::default()
            };
            assert_eq!(
                names(&apply(&all, &criteria)),
                vec!["first", "second", "third"],
                "{sort:?}"
            );
        }
    }

    #[test]
    fn test_top_by_expected_score_limits() {
        let all = vec![
            consultant("a", 1, 0),
            consultant("b", 9, 0),
            consultant("c", 5, 0),
            consultant("d", 7, 0),
        ];
        assert_eq!(names(&top_by_expected_score(&all, 3)), vec!["b", "d", "c"]);
        assert_eq!(top_by_expected_score(&all[..1], 3).len(), 1);
    }

    #[test]
    fn test_sort_key_aliases() {
        let parse = |s: &str| serde_json::from_str::<SortKey>(&format!("\"{s}\"")).unwrap();
        assert_eq!(parse("score-high"), SortKey::ScoreDesc);
        assert_eq!(parse("score-desc"), SortKey::ScoreDesc);
        assert_eq!(parse("score-low"), SortKey::ScoreAsc);
        assert_eq!(parse("reviews-high"), SortKey::ReviewCountDesc);
        assert_eq!(parse("review-count-desc"), SortKey::ReviewCountDesc);
        assert!(serde_json::from_str::<SortKey>("\"newest\"").is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;
        use proptest::test_runner::Config;

        fn profiles() -> impl Strategy<Value = Vec<ConsultantProfile>> {
            prop::collection::vec((0_u32..15, 0_usize..6, any::<bool>(), any::<bool>()), 0..20)
                .prop_map(|rows| {
                    rows.into_iter()
                        .enumerate()
                        .map(|(i, (years, reviews, thirties, online))| {
                            let mut c = consultant(&format!("c{i}"), years, reviews);
                            c.age_range = thirties.then_some(AgeRange::ThirtiesEarly);
                            c.has_scheduler_link = online;
                            c
                        })
                        .collect()
                })
        }

        fn sort_key() -> impl Strategy<Value = SortKey> {
            prop_oneof![
                Just(SortKey::Recommended),
                Just(SortKey::ScoreDesc),
                Just(SortKey::ScoreAsc),
                Just(SortKey::ReviewCountDesc),
            ]
        }

        proptest! {
            #![proptest_config(Config::with_cases(128))]

            #[test]
            fn unfiltered_apply_only_reorders(all in profiles(), sort in sort_key()) {
                let criteria = FilterCriteria { sort, ..Default::default() };
                let applied = apply(&all, &criteria);
                let sorted = sort_profiles(all.iter().collect(), sort);
                prop_assert_eq!(names(&applied), names(&sorted));
            }

            #[test]
            fn filtering_is_idempotent(all in profiles(), online in any::<bool>(), sort in sort_key()) {
                let criteria = FilterCriteria {
                    age_range: Some(AgeRange::ThirtiesEarly),
                    online_only: online,
                    sort,
                    ..Default::default()
                };
                let once: Vec<ConsultantProfile> =
                    apply(&all, &criteria).into_iter().cloned().collect();
                let twice = apply(&once, &criteria);
                prop_assert_eq!(names(&once.iter().collect::<Vec<_>>()), names(&twice));
            }

            #[test]
            fn equal_keys_keep_input_order(all in profiles(), sort in sort_key()) {
                let sorted = sort_profiles(all.iter().collect(), sort);
                let position = |c: &ConsultantProfile| all.iter().position(|x| x.name == c.name);
                for pair in sorted.windows(2) {
                    let key = |p: &ConsultantProfile| match sort {
                        SortKey::Recommended => recommended_rank(p),
                        SortKey::ScoreDesc | SortKey::ScoreAsc => compute_expected_score(p),
                        SortKey::ReviewCountDesc => p.review_count() as f64,
                    };
                    if key(pair[0]) == key(pair[1]) {
                        prop_assert!(position(pair[0]) < position(pair[1]));
                    }
                }
            }
        }
    }
}
