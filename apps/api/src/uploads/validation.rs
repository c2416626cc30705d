use chrono::{DateTime, Utc};

use crate::errors::AppError;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/gif",
];

pub fn validate_image(content_type: Option<&str>, size: usize) -> Result<(), AppError> {
    if size == 0 {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(AppError::PayloadTooLarge(
            "Images must be 5MB or smaller".to_string(),
        ));
    }
    match content_type {
        Some(ct) if ALLOWED_CONTENT_TYPES.contains(&ct) => Ok(()),
        _ => Err(AppError::Validation(
            "Only JPEG, PNG, WebP and GIF images can be uploaded".to_string(),
        )),
    }
}

/// Object key for a profile image: `consultants/<unix-millis>-<name>`.
pub fn object_key(file_name: Option<&str>, now: DateTime<Utc>) -> String {
    format!(
        "consultants/{}-{}",
        now.timestamp_millis(),
        sanitize_file_name(file_name.unwrap_or_default())
    )
}

/// Keeps ASCII alphanumerics, `.`, `-` and `_`; everything else becomes `_`.
/// Path components are stripped.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_accepts_allowed_images() {
        for ct in ALLOWED_CONTENT_TYPES {
            assert!(validate_image(Some(*ct), 1024).is_ok());
        }
    }

    #[test]
    fn test_rejects_wrong_type() {
        assert!(matches!(
            validate_image(Some("application/pdf"), 10),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(validate_image(None, 10), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_size_limits() {
        assert!(validate_image(Some("image/png"), MAX_IMAGE_BYTES).is_ok());
        assert!(matches!(
            validate_image(Some("image/png"), MAX_IMAGE_BYTES + 1),
            Err(AppError::PayloadTooLarge(_))
        ));
        assert!(matches!(
            validate_image(Some("image/png"), 0),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_object_key() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(
            object_key(Some("me photo.png"), now),
            "consultants/1700000000123-me_photo.png"
        );
        assert_eq!(object_key(None, now), "consultants/1700000000123-upload");
    }

    #[test]
    fn test_sanitize_strips_paths_and_unicode() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\顔写真.jpg"), "___.jpg");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name(""), "upload");
    }
}
