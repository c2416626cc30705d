use serde_json::Value;

// The review form has its own attribute vocabulary, separate from the
// consultant search axes in `catalog::options`.

const AGE_LABELS: &[(&str, &str)] = &[
    ("20s_early", "20代前半"),
    ("20s_late", "20代後半"),
    ("30s_early", "30代前半"),
    ("30s_late", "30代後半"),
    ("40s_plus", "40代以上"),
];

const INDUSTRY_LABELS: &[(&str, &str)] = &[
    ("it_internet", "IT・インターネット"),
    ("saas_startup", "SaaS・スタートアップ"),
    ("mega_venture", "メガベンチャー"),
    ("manufacturing", "製造業"),
    ("hr_consulting", "人材・コンサル"),
    ("finance", "金融"),
    ("advertising_media", "広告・メディア"),
    ("other_service", "その他サービス"),
];

const JOB_LABELS: &[(&str, &str)] = &[
    ("engineer", "エンジニア"),
    ("designer", "デザイナー"),
    ("pdm_pm", "PdM / PM"),
    ("sales", "営業"),
    ("cs", "カスタマーサクセス"),
    ("hr_recruiting", "人事 / 採用"),
    ("accounting_finance", "経理・財務"),
    ("consultant", "コンサルタント"),
    ("other", "その他"),
];

const COMPANY_SIZE_LABELS: &[(&str, &str)] = &[
    ("large", "大企業"),
    ("mega_venture", "メガベンチャー"),
    ("startup", "スタートアップ"),
    ("foreign", "外資系企業"),
    ("sme", "中小企業"),
];

/// Summarizes reviewer attributes for the moderation queue, e.g.
/// `30代前半 / 金融 / 営業 / 大企業`. Unknown codes are skipped.
pub fn format_reviewer_meta(meta: Option<&Value>) -> String {
    let Some(Value::Object(meta)) = meta else {
        return String::new();
    };

    [
        ("age_range", AGE_LABELS),
        ("industry", INDUSTRY_LABELS),
        ("job_category", JOB_LABELS),
        ("company_size", COMPANY_SIZE_LABELS),
    ]
    .iter()
    .filter_map(|(key, table)| {
        let code = meta.get(*key)?.as_str()?;
        table
            .iter()
            .find(|(value, _)| *value == code)
            .map(|(_, label)| *label)
    })
    .collect::<Vec<_>>()
    .join(" / ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_meta_summary() {
        let meta = json!({
            "age_range": "30s_early",
            "industry": "finance",
            "job_category": "sales",
            "company_size": "large",
        });
        assert_eq!(
            format_reviewer_meta(Some(&meta)),
            "30代前半 / 金融 / 営業 / 大企業"
        );
    }

    #[test]
    fn test_unknown_and_missing_codes_skipped() {
        let meta = json!({ "age_range": "teens", "job_category": "cs", "industry": null });
        assert_eq!(format_reviewer_meta(Some(&meta)), "カスタマーサクセス");
    }

    #[test]
    fn test_non_object_meta_is_empty() {
        assert_eq!(format_reviewer_meta(None), "");
        assert_eq!(format_reviewer_meta(Some(&json!([1, 2]))), "");
    }
}
