use std::collections::BTreeSet;

use serde::Deserialize;

use crate::catalog::options::{AgeRange, EducationCategory, Industry, JobFunction};
use crate::catalog::pipeline::SortKey;
use crate::catalog::profile::ConsultantProfile;

/// The listing controls for one browsing session. `None` / empty / `false`
/// means the corresponding predicate is inactive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterCriteria {
    pub age_range: Option<AgeRange>,
    pub education: Option<EducationCategory>,
    pub industry: Option<Industry>,
    pub job_function: Option<JobFunction>,
    /// Match-if-any against the consultant's expertise and specialty tags.
    #[serde(default)]
    pub expertise_tags: BTreeSet<String>,
    /// Only consultants with an external scheduler link.
    #[serde(default)]
    pub online_only: bool,
    pub keyword: Option<String>,
    #[serde(default)]
    pub sort: SortKey,
}

impl FilterCriteria {
    /// True when no predicate is active, i.e. filtering is a no-op.
    pub fn is_unfiltered(&self) -> bool {
        self.age_range.is_none()
            && self.education.is_none()
            && self.industry.is_none()
            && self.job_function.is_none()
            && self.expertise_tags.is_empty()
            && !self.online_only
            && self.normalized_keyword().is_none()
    }

    fn normalized_keyword(&self) -> Option<String> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_lowercase)
    }

    /// Returns a predicate closure with the keyword lower-cased once.
    pub fn matcher(&self) -> impl Fn(&ConsultantProfile) -> bool + '_ {
        let keyword = self.normalized_keyword();
        move |profile: &ConsultantProfile| {
            self.matches_attributes(profile) && matches_keyword(profile, keyword.as_deref())
        }
    }

    pub fn matches(&self, profile: &ConsultantProfile) -> bool {
        (self.matcher())(profile)
    }

    fn matches_attributes(&self, profile: &ConsultantProfile) -> bool {
        if self.age_range.is_some() && profile.age_range != self.age_range {
            return false;
        }
        if self.education.is_some() && profile.education != self.education {
            return false;
        }
        if self.industry.is_some() && profile.previous_industry != self.industry {
            return false;
        }
        if self.job_function.is_some() && profile.previous_job_function != self.job_function {
            return false;
        }
        if !self.expertise_tags.is_empty()
            && !profile
                .all_expertise_tags()
                .any(|tag| self.expertise_tags.contains(tag))
        {
            return false;
        }
        if self.online_only && !profile.has_scheduler_link {
            return false;
        }
        true
    }
}

/// Case-insensitive substring match over the concatenation of name,
/// specialties, achievements summary and bio. `keyword` must already be
/// trimmed and lower-cased.
fn matches_keyword(profile: &ConsultantProfile, keyword: Option<&str>) -> bool {
    let Some(keyword) = keyword else {
        return true;
    };
    let haystack = [
        profile.name.as_str(),
        profile.specialties.as_str(),
        profile.achievements_summary.as_deref().unwrap_or(""),
        profile.bio.as_str(),
    ]
    .concat()
    .to_lowercase();
    haystack.contains(keyword)
}
