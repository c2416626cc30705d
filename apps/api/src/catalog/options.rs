//! Search-axis taxonomy shared by the dashboard editor and the public listing.
//!
//! Every category has a stable wire code (what is persisted and sent in
//! query strings) and a Japanese display label. Unknown codes parse to `None`
//! rather than failing, so a stale value in the database simply drops out of
//! category filters.

use serde::{Deserialize, Serialize};

/// A closed set of codes with display labels.
pub trait Category: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn label(self) -> &'static str;

    fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL.iter().copied().find(|c| c.as_str() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeRange {
    #[serde(rename = "20s_early")]
    TwentiesEarly,
    #[serde(rename = "20s_late")]
    TwentiesLate,
    #[serde(rename = "30s_early")]
    ThirtiesEarly,
    #[serde(rename = "30s_late")]
    ThirtiesLate,
    #[serde(rename = "40s_plus")]
    FortiesPlus,
}

impl Category for AgeRange {
    const ALL: &'static [Self] = &[
        AgeRange::TwentiesEarly,
        AgeRange::TwentiesLate,
        AgeRange::ThirtiesEarly,
        AgeRange::ThirtiesLate,
        AgeRange::FortiesPlus,
    ];

    fn as_str(self) -> &'static str {
        match self {
            AgeRange::TwentiesEarly => "20s_early",
            AgeRange::TwentiesLate => "20s_late",
            AgeRange::ThirtiesEarly => "30s_early",
            AgeRange::ThirtiesLate => "30s_late",
            AgeRange::FortiesPlus => "40s_plus",
        }
    }

    fn label(self) -> &'static str {
        match self {
            AgeRange::TwentiesEarly => "20代前半",
            AgeRange::TwentiesLate => "20代後半",
            AgeRange::ThirtiesEarly => "30代前半",
            AgeRange::ThirtiesLate => "30代後半",
            AgeRange::FortiesPlus => "40代以上",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationCategory {
    HighSchool,
    Vocational,
    WasedaKeio,
    Kyudai,
    March,
    Kankandoritsu,
    University,
    Graduate,
}

impl EducationCategory {
    /// Label for the profile's first view. The catch-all university and
    /// graduate-school buckets are deliberately not shown there.
    pub fn display_label(self) -> Option<&'static str> {
        match self {
            EducationCategory::University | EducationCategory::Graduate => None,
            other => Some(other.label()),
        }
    }
}

impl Category for EducationCategory {
    const ALL: &'static [Self] = &[
        EducationCategory::HighSchool,
        EducationCategory::Vocational,
        EducationCategory::WasedaKeio,
        EducationCategory::Kyudai,
        EducationCategory::March,
        EducationCategory::Kankandoritsu,
        EducationCategory::University,
        EducationCategory::Graduate,
    ];

    fn as_str(self) -> &'static str {
        match self {
            EducationCategory::HighSchool => "high_school",
            EducationCategory::Vocational => "vocational",
            EducationCategory::WasedaKeio => "waseda_keio",
            EducationCategory::Kyudai => "kyudai",
            EducationCategory::March => "march",
            EducationCategory::Kankandoritsu => "kankandoritsu",
            EducationCategory::University => "university",
            EducationCategory::Graduate => "graduate",
        }
    }

    fn label(self) -> &'static str {
        match self {
            EducationCategory::HighSchool => "高校卒業",
            EducationCategory::Vocational => "専門学校卒業",
            EducationCategory::WasedaKeio => "早慶",
            EducationCategory::Kyudai => "旧帝大",
            EducationCategory::March => "MARCH",
            EducationCategory::Kankandoritsu => "関関同立",
            EducationCategory::University => "大学卒業",
            EducationCategory::Graduate => "大学院卒業",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    ItInternet,
    SaasStartup,
    MegaVenture,
    Manufacturing,
    Finance,
    Consulting,
    Retail,
    Other,
}

impl Category for Industry {
    const ALL: &'static [Self] = &[
        Industry::ItInternet,
        Industry::SaasStartup,
        Industry::MegaVenture,
        Industry::Manufacturing,
        Industry::Finance,
        Industry::Consulting,
        Industry::Retail,
        Industry::Other,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Industry::ItInternet => "it_internet",
            Industry::SaasStartup => "saas_startup",
            Industry::MegaVenture => "mega_venture",
            Industry::Manufacturing => "manufacturing",
            Industry::Finance => "finance",
            Industry::Consulting => "consulting",
            Industry::Retail => "retail",
            Industry::Other => "other",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Industry::ItInternet => "IT・インターネット",
            Industry::SaasStartup => "SaaS / スタートアップ",
            Industry::MegaVenture => "メガベンチャー",
            Industry::Manufacturing => "製造業",
            Industry::Finance => "金融",
            Industry::Consulting => "コンサルティング",
            Industry::Retail => "小売・流通",
            Industry::Other => "その他",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobFunction {
    Engineer,
    PdmPm,
    Designer,
    Sales,
    Marketing,
    Hr,
    Finance,
    Consultant,
    Other,
}

impl Category for JobFunction {
    const ALL: &'static [Self] = &[
        JobFunction::Engineer,
        JobFunction::PdmPm,
        JobFunction::Designer,
        JobFunction::Sales,
        JobFunction::Marketing,
        JobFunction::Hr,
        JobFunction::Finance,
        JobFunction::Consultant,
        JobFunction::Other,
    ];

    fn as_str(self) -> &'static str {
        match self {
            JobFunction::Engineer => "engineer",
            JobFunction::PdmPm => "pdm_pm",
            JobFunction::Designer => "designer",
            JobFunction::Sales => "sales",
            JobFunction::Marketing => "marketing",
            JobFunction::Hr => "hr",
            JobFunction::Finance => "finance",
            JobFunction::Consultant => "consultant",
            JobFunction::Other => "other",
        }
    }

    fn label(self) -> &'static str {
        match self {
            JobFunction::Engineer => "エンジニア",
            JobFunction::PdmPm => "PM / PdM",
            JobFunction::Designer => "デザイナー",
            JobFunction::Sales => "営業",
            JobFunction::Marketing => "マーケティング",
            JobFunction::Hr => "人事",
            JobFunction::Finance => "経理・財務",
            JobFunction::Consultant => "コンサルタント",
            JobFunction::Other => "その他",
        }
    }
}

/// Expertise tags offered in the filter sidebar: every job function except
/// the catch-all.
pub fn expertise_tags() -> impl Iterator<Item = JobFunction> {
    JobFunction::ALL
        .iter()
        .copied()
        .filter(|f| *f != JobFunction::Other)
}

/// Parses an optional stored code, treating blanks and unknown codes as absent.
pub fn parse_optional<C: Category>(code: Option<&str>) -> Option<C> {
    code.and_then(C::parse)
}

/// One selectable value as served to the filter sidebar.
#[derive(Debug, Clone, Serialize)]
pub struct OptionEntry {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterOptions {
    pub age_ranges: Vec<OptionEntry>,
    pub education: Vec<OptionEntry>,
    pub industries: Vec<OptionEntry>,
    pub job_functions: Vec<OptionEntry>,
    pub expertise_tags: Vec<OptionEntry>,
}

fn entries<C: Category>(values: impl IntoIterator<Item = C>) -> Vec<OptionEntry> {
    values
        .into_iter()
        .map(|c| OptionEntry {
            value: c.as_str(),
            label: c.label(),
        })
        .collect()
}

pub fn filter_options() -> FilterOptions {
    FilterOptions {
        age_ranges: entries(AgeRange::ALL.iter().copied()),
        education: entries(EducationCategory::ALL.iter().copied()),
        industries: entries(Industry::ALL.iter().copied()),
        job_functions: entries(JobFunction::ALL.iter().copied()),
        expertise_tags: entries(expertise_tags()),
    }
}
