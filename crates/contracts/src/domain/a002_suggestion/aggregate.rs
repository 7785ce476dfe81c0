use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::common::{
    deserialize_lenient_status, normalize_status_token, FeedbackRecord, RecordId, UnknownStatus,
};

/// Review status of a suggestion. Suggestions have no fixed/spam end state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStatus {
    New,
    Read,
    Pending,
}

impl SuggestionStatus {
    pub const ALL: [SuggestionStatus; 3] = [
        SuggestionStatus::New,
        SuggestionStatus::Read,
        SuggestionStatus::Pending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionStatus::New => "new",
            SuggestionStatus::Read => "read",
            SuggestionStatus::Pending => "pending",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SuggestionStatus::New => "New",
            SuggestionStatus::Read => "Read",
            SuggestionStatus::Pending => "Pending",
        }
    }
}

impl fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuggestionStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = normalize_status_token(s);
        SuggestionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == token)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for SuggestionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Suggestion as stored in the `suggestions` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: RecordId,
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_lenient_status")]
    pub status: Option<SuggestionStatus>,
    #[serde(default)]
    pub screenshot_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Suggestion {
    pub const SELECT: &'static str = "id,description,status,screenshot_url,created_at";

    pub fn effective_status(&self) -> SuggestionStatus {
        self.status.unwrap_or(SuggestionStatus::New)
    }
}

impl FeedbackRecord for Suggestion {
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

    fn status_label(&self) -> &'static str {
        self.effective_status().label()
    }

    fn collection_name() -> &'static str {
        "suggestions"
    }

    fn element_name() -> &'static str {
        "Suggestion"
    }

    fn list_name() -> &'static str {
        "Suggestions"
    }
}

/// Row inserted by the public submission form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSuggestion {
    pub description: String,
    pub screenshot_url: Option<String>,
    pub status: SuggestionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SuggestionStatusUpdate {
    pub status: SuggestionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bug_only_states_are_rejected() {
        assert_eq!("Read".parse::<SuggestionStatus>(), Ok(SuggestionStatus::Read));
        assert!("fixed".parse::<SuggestionStatus>().is_err());
        assert!("spam".parse::<SuggestionStatus>().is_err());
    }

    #[test]
    fn decodes_row_without_status() {
        let json = r#"{"id": "s1", "description": "Dark mode please",
                       "created_at": "2024-05-01T08:00:00Z"}"#;
        let suggestion: Suggestion = serde_json::from_str(json).unwrap();
        assert_eq!(suggestion.effective_status(), SuggestionStatus::New);
        assert_eq!(suggestion.screenshot_url(), None);
        assert_eq!(Suggestion::collection_name(), "suggestions");
    }
}
