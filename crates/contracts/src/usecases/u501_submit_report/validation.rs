use thiserror::Error;
use uuid::Uuid;

use super::request::ScreenshotMeta;

/// Upper bound for an attached screenshot (5 MiB, inclusive)
pub const MAX_SCREENSHOT_BYTES: u64 = 5 * 1024 * 1024;

/// Storage bucket receiving uploaded screenshots
pub const SCREENSHOT_BUCKET: &str = "screenshots";

/// Client-side rejection; `Display` is the message shown next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Please provide a description")]
    EmptyDescription,

    #[error("File size must be less than 5MB")]
    ScreenshotTooLarge { size: u64 },

    #[error("Please select an image file")]
    ScreenshotNotImage { mime_type: String },
}

pub fn validate_description(description: &str) -> Result<(), SubmissionError> {
    if description.trim().is_empty() {
        return Err(SubmissionError::EmptyDescription);
    }
    Ok(())
}

/// Runs when a file is selected, before it is kept by the form.
pub fn validate_screenshot(meta: &ScreenshotMeta) -> Result<(), SubmissionError> {
    if meta.size > MAX_SCREENSHOT_BYTES {
        return Err(SubmissionError::ScreenshotTooLarge { size: meta.size });
    }
    if !meta.mime_type.starts_with("image/") {
        return Err(SubmissionError::ScreenshotNotImage {
            mime_type: meta.mime_type.clone(),
        });
    }
    Ok(())
}

/// Random object name keeping the original file extension
pub fn screenshot_object_name(original_name: &str, id: Uuid) -> String {
    let extension = original_name
        .rsplit_once('.')
        .map(|(stem, ext)| (stem, ext.trim()))
        .filter(|(stem, ext)| !stem.is_empty() && !ext.is_empty() && ext.len() <= 10)
        .filter(|(_, ext)| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|(_, ext)| ext);

    match extension {
        Some(ext) => format!("{}.{}", id, ext),
        None => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(mime: &str, size: u64) -> ScreenshotMeta {
        ScreenshotMeta {
            name: "shot.png".into(),
            mime_type: mime.into(),
            size,
        }
    }

    #[test]
    fn blank_description_is_rejected() {
        assert_eq!(validate_description(" \n\t"), Err(SubmissionError::EmptyDescription));
        assert_eq!(validate_description(" ok "), Ok(()));
    }

    #[test]
    fn size_limit_is_inclusive() {
        assert_eq!(validate_screenshot(&meta("image/png", MAX_SCREENSHOT_BYTES)), Ok(()));
        assert_eq!(
            validate_screenshot(&meta("image/png", MAX_SCREENSHOT_BYTES + 1)),
            Err(SubmissionError::ScreenshotTooLarge {
                size: MAX_SCREENSHOT_BYTES + 1
            })
        );
    }

    #[test]
    fn non_image_types_are_rejected() {
        let err = validate_screenshot(&meta("application/pdf", 10)).unwrap_err();
        assert_eq!(err.to_string(), "Please select an image file");
        assert!(validate_screenshot(&meta("", 10)).is_err());
        assert!(validate_screenshot(&meta("image/jpeg", 10)).is_ok());
    }

    #[test]
    fn object_name_keeps_extension() {
        let id = Uuid::nil();
        assert_eq!(
            screenshot_object_name("Screen Shot.PNG", id),
            "00000000-0000-0000-0000-000000000000.PNG"
        );
        assert_eq!(
            screenshot_object_name("README", id),
            "00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            screenshot_object_name(".hidden", id),
            "00000000-0000-0000-0000-000000000000"
        );
    }
}
