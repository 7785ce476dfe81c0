use chrono::{DateTime, Utc};

use super::RecordId;

/// Behaviour shared by every record kind shown on the admin dashboard.
pub trait FeedbackRecord {
    fn id(&self) -> &RecordId;

    fn description(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;

    fn screenshot_url(&self) -> Option<&str>;

    /// Only bug reports carry an app version.
    fn app_version(&self) -> Option<&str> {
        None
    }

    /// Human-readable status; records without a status read as "New".
    fn status_label(&self) -> &'static str;

    /// Backend collection holding the records (e.g. "bug_reports")
    fn collection_name() -> &'static str;

    /// Singular UI name (e.g. "Bug Report")
    fn element_name() -> &'static str;

    /// Plural UI name (e.g. "Bug Reports")
    fn list_name() -> &'static str;
}
