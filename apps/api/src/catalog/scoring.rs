//! Expected score: a bounded (1.0–5.0) proxy for profile quality computed
//! purely from profile signals, never from outcome data.
//!
//! Terms are accumulated in integer hundredths. Every contribution is a
//! multiple of 0.05, so the half-up rounding to one decimal is exact instead
//! of depending on binary floating-point representation.

use serde::Serialize;

use crate::catalog::profile::ConsultantProfile;

const BASE: u32 = 100;
const MAX_TOTAL: u32 = 500;

const EXPERIENCE_CAP_YEARS: u32 = 10;
const EXPERIENCE_PER_YEAR: u32 = 15;

const FOLLOWERS_PER_STEP: u64 = 1_000;
const FOLLOWER_STEP_CAP: u64 = 4;
const FOLLOWER_STEP_VALUE: u32 = 25;

const LINK_CAP: usize = 3;
const LINK_VALUE: u32 = 30;

const ACHIEVEMENTS_VALUE: u32 = 60;

/// Scores at or above this are highlighted as featured consultants.
pub const FEATURED_THRESHOLD: f64 = 4.0;

/// Per-term contributions, in score units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub base: f64,
    pub experience: f64,
    pub social_reach: f64,
    pub external_links: f64,
    pub achievements: f64,
    /// Clamped to 5.0 and rounded half-up to one decimal.
    pub total: f64,
}

struct Hundredths {
    experience: u32,
    social_reach: u32,
    external_links: u32,
    achievements: u32,
}

impl Hundredths {
    fn of(profile: &ConsultantProfile) -> Self {
        let years = profile.experience_years.min(EXPERIENCE_CAP_YEARS);
        let follower_steps =
            (profile.sns_followers.total() / FOLLOWERS_PER_STEP).min(FOLLOWER_STEP_CAP) as u32;
        let links = profile.external_link_count.min(LINK_CAP) as u32;

        Hundredths {
            experience: years * EXPERIENCE_PER_YEAR,
            social_reach: follower_steps * FOLLOWER_STEP_VALUE,
            external_links: links * LINK_VALUE,
            achievements: if profile.has_achievements() {
                ACHIEVEMENTS_VALUE
            } else {
                0
            },
        }
    }

    fn rounded_total(&self) -> f64 {
        let raw = BASE + self.experience + self.social_reach + self.external_links + self.achievements;
        let tenths = (raw.min(MAX_TOTAL) + 5) / 10;
        f64::from(tenths) / 10.0
    }
}

fn to_units(hundredths: u32) -> f64 {
    f64::from(hundredths) / 100.0
}

/// Computes the expected score for a consultant. Total over all inputs; the
/// result is always within [1.0, 5.0] with one decimal place.
pub fn compute_expected_score(profile: &ConsultantProfile) -> f64 {
    Hundredths::of(profile).rounded_total()
}

pub fn score_breakdown(profile: &ConsultantProfile) -> ScoreBreakdown {
    let h = Hundredths::of(profile);
    ScoreBreakdown {
        base: to_units(BASE),
        experience: to_units(h.experience),
        social_reach: to_units(h.social_reach),
        external_links: to_units(h.external_links),
        achievements: to_units(h.achievements),
        total: h.rounded_total(),
    }
}

pub fn is_featured(score: f64) -> bool {
    score >= FEATURED_THRESHOLD
}
