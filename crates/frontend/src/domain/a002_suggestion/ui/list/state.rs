use contracts::domain::a002_suggestion::aggregate::{Suggestion, SuggestionStatus};
use leptos::prelude::*;
use std::cmp::Ordering;

use crate::shared::list_utils::{sort_rows, SortState, TableColumn};
use crate::shared::row_actions::{RecordAction, RowActionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionColumn {
    Description,
    Status,
    CreatedAt,
    Actions,
}

impl SuggestionColumn {
    pub const ALL: [SuggestionColumn; 4] = [
        SuggestionColumn::Description,
        SuggestionColumn::Status,
        SuggestionColumn::CreatedAt,
        SuggestionColumn::Actions,
    ];
}

impl TableColumn for SuggestionColumn {
    type Row = Suggestion;

    fn label(&self) -> &'static str {
        match self {
            SuggestionColumn::Description => "Description",
            SuggestionColumn::Status => "Status",
            SuggestionColumn::CreatedAt => "Date Submitted",
            SuggestionColumn::Actions => "Actions",
        }
    }

    fn sortable(&self) -> bool {
        !matches!(self, SuggestionColumn::Actions)
    }

    fn compare(&self, a: &Suggestion, b: &Suggestion) -> Ordering {
        match self {
            SuggestionColumn::Description => a.description.cmp(&b.description),
            SuggestionColumn::Status => a.status.map(|s| s.as_str()).cmp(&b.status.map(|s| s.as_str())),
            SuggestionColumn::CreatedAt => a.created_at.cmp(&b.created_at),
            SuggestionColumn::Actions => Ordering::Equal,
        }
    }
}

pub const ACTIONS: [RecordAction; 3] = [
    RecordAction::MarkRead,
    RecordAction::MarkPending,
    RecordAction::Delete,
];

pub fn target_status(action: RecordAction) -> Option<SuggestionStatus> {
    match action {
        RecordAction::MarkRead => Some(SuggestionStatus::Read),
        RecordAction::MarkPending => Some(SuggestionStatus::Pending),
        _ => None,
    }
}

pub fn visible_rows(data: &[Suggestion], sort: &SortState<SuggestionColumn>) -> Vec<Suggestion> {
    let mut rows = data.to_vec();
    sort_rows(&mut rows, sort);
    rows
}

/// Owned by the dashboard, like the bug report table state
#[derive(Clone, Copy)]
pub struct SuggestionListState {
    pub sort: RwSignal<SortState<SuggestionColumn>>,
    pub actions: RwSignal<RowActionState>,
}

pub fn create_state() -> SuggestionListState {
    SuggestionListState {
        sort: RwSignal::new(SortState::default()),
        actions: RwSignal::new(RowActionState::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use contracts::domain::common::RecordId;

    fn suggestion(id: &str, description: &str, status: Option<SuggestionStatus>) -> Suggestion {
        Suggestion {
            id: RecordId::new(id),
            description: description.into(),
            status,
            screenshot_url: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn status_sort_puts_missing_first_when_ascending() {
        let data = vec![
            suggestion("1", "b", Some(SuggestionStatus::Read)),
            suggestion("2", "a", None),
            suggestion("3", "c", Some(SuggestionStatus::Pending)),
        ];
        let asc = SortState::default()
            .toggle(SuggestionColumn::Status)
            .toggle(SuggestionColumn::Status);
        let ids: Vec<_> = visible_rows(&data, &asc).into_iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
    }

    #[test]
    fn description_sort_descending_first() {
        let data = vec![
            suggestion("1", "b", None),
            suggestion("2", "a", None),
            suggestion("3", "c", None),
        ];
        let desc = SortState::default().toggle(SuggestionColumn::Description);
        let ids: Vec<_> = visible_rows(&data, &desc).into_iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn only_read_and_pending_change_status() {
        assert_eq!(target_status(RecordAction::MarkRead), Some(SuggestionStatus::Read));
        assert_eq!(target_status(RecordAction::MarkPending), Some(SuggestionStatus::Pending));
        assert_eq!(target_status(RecordAction::Delete), None);
        assert_eq!(target_status(RecordAction::MarkFixed), None);
    }
}
