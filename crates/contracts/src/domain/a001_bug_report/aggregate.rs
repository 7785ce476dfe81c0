use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::common::{
    deserialize_lenient_status, normalize_status_token, FeedbackRecord, RecordId, UnknownStatus,
};

// ============================================================================
// Status
// ============================================================================

/// Lifecycle status of a bug report.
///
/// Always written in lowercase snake_case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BugStatus {
    New,
    Investigating,
    InProgress,
    Resolved,
    Fixed,
    Spam,
    Closed,
    Read,
    Pending,
}

impl BugStatus {
    pub const ALL: [BugStatus; 9] = [
        BugStatus::New,
        BugStatus::Investigating,
        BugStatus::InProgress,
        BugStatus::Resolved,
        BugStatus::Fixed,
        BugStatus::Spam,
        BugStatus::Closed,
        BugStatus::Read,
        BugStatus::Pending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BugStatus::New => "new",
            BugStatus::Investigating => "investigating",
            BugStatus::InProgress => "in_progress",
            BugStatus::Resolved => "resolved",
            BugStatus::Fixed => "fixed",
            BugStatus::Spam => "spam",
            BugStatus::Closed => "closed",
            BugStatus::Read => "read",
            BugStatus::Pending => "pending",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BugStatus::New => "New",
            BugStatus::Investigating => "Investigating",
            BugStatus::InProgress => "In progress",
            BugStatus::Resolved => "Resolved",
            BugStatus::Fixed => "Fixed",
            BugStatus::Spam => "Spam",
            BugStatus::Closed => "Closed",
            BugStatus::Read => "Read",
            BugStatus::Pending => "Pending",
        }
    }

    /// Fixed and spam reports have left the triage queue.
    pub fn is_closed_out(&self) -> bool {
        matches!(self, BugStatus::Fixed | BugStatus::Spam)
    }
}

impl fmt::Display for BugStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BugStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = normalize_status_token(s);
        BugStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == token)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for BugStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Record
// ============================================================================

/// Bug report as stored in the `bug_reports` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BugReport {
    pub id: RecordId,
    #[serde(default)]
    pub title: Option<String>,
    pub description: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_status")]
    pub status: Option<BugStatus>,
    #[serde(default)]
    pub app_version: Option<String>,
    #[serde(default)]
    pub screenshot_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BugReport {
    /// Column list requested from the backend
    pub const SELECT: &'static str =
        "id,title,description,severity,status,app_version,screenshot_url,created_at";

    /// Status with an absent value read as `New`
    pub fn effective_status(&self) -> BugStatus {
        self.status.unwrap_or(BugStatus::New)
    }

    /// Still waiting for triage (neither fixed nor spam)
    pub fn is_active(&self) -> bool {
        !self.effective_status().is_closed_out()
    }
}

impl FeedbackRecord for BugReport {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn screenshot_url(&self) -> Option<&str> {
        self.screenshot_url.as_deref()
    }

    fn app_version(&self) -> Option<&str> {
        self.app_version.as_deref().filter(|v| !v.trim().is_empty())
    }

    fn status_label(&self) -> &'static str {
        self.effective_status().label()
    }

    fn collection_name() -> &'static str {
        "bug_reports"
    }

    fn element_name() -> &'static str {
        "Bug Report"
    }

    fn list_name() -> &'static str {
        "Bug Reports"
    }
}

// ============================================================================
// DTOs
// ============================================================================

/// Row inserted by the public submission form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBugReport {
    pub description: String,
    pub app_version: Option<String>,
    pub screenshot_url: Option<String>,
    pub status: BugStatus,
}

/// Body of a status-only update
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BugStatusUpdate {
    pub status: BugStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_and_legacy_values() {
        assert_eq!("fixed".parse::<BugStatus>(), Ok(BugStatus::Fixed));
        assert_eq!("Spam".parse::<BugStatus>(), Ok(BugStatus::Spam));
        assert_eq!("In Progress".parse::<BugStatus>(), Ok(BugStatus::InProgress));
        assert!("wontfix".parse::<BugStatus>().is_err());
    }

    #[test]
    fn writes_lowercase_snake_case() {
        let body = serde_json::to_string(&BugStatusUpdate {
            status: BugStatus::InProgress,
        })
        .unwrap();
        assert_eq!(body, r#"{"status":"in_progress"}"#);
    }

    #[test]
    fn decodes_backend_row() {
        let json = r#"{
            "id": "b1",
            "title": null,
            "description": "Crash on save",
            "severity": "high",
            "status": "Fixed",
            "app_version": "1.2.3",
            "screenshot_url": null,
            "created_at": "2024-03-15T14:02:26.123456+00:00"
        }"#;
        let report: BugReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.status, Some(BugStatus::Fixed));
        assert!(!report.is_active());
        assert_eq!(report.app_version(), Some("1.2.3"));
    }

    #[test]
    fn unknown_or_missing_status_reads_as_new() {
        let json = r#"{"id": 7, "description": "x", "status": "archived",
                       "created_at": "2024-03-15T14:02:26Z"}"#;
        let report: BugReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.status, None);
        assert_eq!(report.effective_status(), BugStatus::New);
        assert!(report.is_active());
        assert_eq!(report.status_label(), "New");
    }

    #[test]
    fn new_report_serializes_null_screenshot() {
        let row = NewBugReport {
            description: "Broken".into(),
            app_version: None,
            screenshot_url: None,
            status: BugStatus::New,
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["status"], "new");
        assert!(value["screenshot_url"].is_null());
    }
}
