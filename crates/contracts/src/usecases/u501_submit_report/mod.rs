pub mod request;
pub mod validation;

pub use request::{NewRecord, ReportFormData, ReportKind, ScreenshotMeta};
pub use validation::{
    screenshot_object_name, validate_description, validate_screenshot, SubmissionError,
    MAX_SCREENSHOT_BYTES, SCREENSHOT_BUCKET,
};
