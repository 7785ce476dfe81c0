use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::a001_bug_report::aggregate::{BugStatus, NewBugReport};
use crate::domain::a002_suggestion::aggregate::{NewSuggestion, SuggestionStatus};

/// What the visitor is submitting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    #[default]
    Bug,
    Suggestion,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Bug => "bug",
            ReportKind::Suggestion => "suggestion",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::Bug => "Bug Report",
            ReportKind::Suggestion => "Suggestion",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bug" => Ok(ReportKind::Bug),
            "suggestion" => Ok(ReportKind::Suggestion),
            other => Err(format!("unknown report kind: {}", other)),
        }
    }
}

/// Values entered on the public form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportFormData {
    pub kind: ReportKind,
    pub description: String,
    /// Only meaningful for bug reports
    pub app_version: String,
}

impl ReportFormData {
    /// Build the row to insert once the optional screenshot is stored.
    pub fn into_record(self, screenshot_url: Option<String>) -> NewRecord {
        match self.kind {
            ReportKind::Bug => {
                let version = self.app_version.trim();
                NewRecord::Bug(NewBugReport {
                    description: self.description,
                    app_version: (!version.is_empty()).then(|| version.to_string()),
                    screenshot_url,
                    status: BugStatus::New,
                })
            }
            ReportKind::Suggestion => NewRecord::Suggestion(NewSuggestion {
                description: self.description,
                screenshot_url,
                status: SuggestionStatus::New,
            }),
        }
    }
}

/// Row destined for one of the two collections
#[derive(Debug, Clone, PartialEq)]
pub enum NewRecord {
    Bug(NewBugReport),
    Suggestion(NewSuggestion),
}

impl NewRecord {
    pub fn collection_name(&self) -> &'static str {
        match self {
            NewRecord::Bug(_) => "bug_reports",
            NewRecord::Suggestion(_) => "suggestions",
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        match self {
            NewRecord::Bug(row) => serde_json::to_string(row),
            NewRecord::Suggestion(row) => serde_json::to_string(row),
        }
    }

    pub fn screenshot_url(&self) -> Option<&str> {
        match self {
            NewRecord::Bug(row) => row.screenshot_url.as_deref(),
            NewRecord::Suggestion(row) => row.screenshot_url.as_deref(),
        }
    }
}

/// File properties checked when a screenshot is picked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotMeta {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}
