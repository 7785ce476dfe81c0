use contracts::domain::a001_bug_report::aggregate::{BugReport, BugStatus};
use contracts::domain::common::FeedbackRecord;
use leptos::prelude::*;
use std::cmp::Ordering;

use crate::shared::list_utils::{sort_rows, SortState, TableColumn};
use crate::shared::row_actions::{RecordAction, RowActionState};

/// Status buckets; computed over the fetched set, never refetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BugFilter {
    #[default]
    Active,
    Fixed,
    Spam,
    All,
}

impl BugFilter {
    pub const ALL: [BugFilter; 4] = [BugFilter::Active, BugFilter::Fixed, BugFilter::Spam, BugFilter::All];

    pub fn label(&self) -> &'static str {
        match self {
            BugFilter::Active => "Active",
            BugFilter::Fixed => "Fixed",
            BugFilter::Spam => "Spam",
            BugFilter::All => "All",
        }
    }

    pub fn matches(&self, report: &BugReport) -> bool {
        match self {
            BugFilter::Active => report.is_active(),
            BugFilter::Fixed => report.status == Some(BugStatus::Fixed),
            BugFilter::Spam => report.status == Some(BugStatus::Spam),
            BugFilter::All => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BugColumn {
    Description,
    Severity,
    AppVersion,
    Status,
    CreatedAt,
    Actions,
}

impl BugColumn {
    pub const ALL: [BugColumn; 6] = [
        BugColumn::Description,
        BugColumn::Severity,
        BugColumn::AppVersion,
        BugColumn::Status,
        BugColumn::CreatedAt,
        BugColumn::Actions,
    ];
}

impl TableColumn for BugColumn {
    type Row = BugReport;

    fn label(&self) -> &'static str {
        match self {
            BugColumn::Description => "Description",
            BugColumn::Severity => "Severity",
            BugColumn::AppVersion => "App Version",
            BugColumn::Status => "Status",
            BugColumn::CreatedAt => "Date Submitted",
            BugColumn::Actions => "Actions",
        }
    }

    fn sortable(&self) -> bool {
        !matches!(self, BugColumn::Actions)
    }

    fn compare(&self, a: &BugReport, b: &BugReport) -> Ordering {
        match self {
            BugColumn::Description => a.description.cmp(&b.description),
            BugColumn::Severity => a.severity.cmp(&b.severity),
            BugColumn::AppVersion => a.app_version().cmp(&b.app_version()),
            BugColumn::Status => a.status.map(|s| s.as_str()).cmp(&b.status.map(|s| s.as_str())),
            BugColumn::CreatedAt => a.created_at.cmp(&b.created_at),
            BugColumn::Actions => Ordering::Equal,
        }
    }
}

/// Triage buttons offered for a report; fixed and spam rows only keep
/// the non-terminal actions.
pub fn actions_for(report: &BugReport) -> Vec<RecordAction> {
    let mut actions = Vec::with_capacity(5);
    if !report.effective_status().is_closed_out() {
        actions.push(RecordAction::MarkFixed);
        actions.push(RecordAction::MarkSpam);
    }
    actions.extend([RecordAction::MarkRead, RecordAction::MarkPending, RecordAction::Delete]);
    actions
}

/// Status written by a triage action
pub fn target_status(action: RecordAction) -> Option<BugStatus> {
    match action {
        RecordAction::MarkFixed => Some(BugStatus::Fixed),
        RecordAction::MarkSpam => Some(BugStatus::Spam),
        RecordAction::MarkRead => Some(BugStatus::Read),
        RecordAction::MarkPending => Some(BugStatus::Pending),
        RecordAction::Delete => None,
    }
}

/// Rows to display: filter, then sort (fetch order when unsorted)
pub fn visible_rows(data: &[BugReport], filter: BugFilter, sort: &SortState<BugColumn>) -> Vec<BugReport> {
    let mut rows: Vec<BugReport> = data.iter().filter(|r| filter.matches(r)).cloned().collect();
    sort_rows(&mut rows, sort);
    rows
}

pub fn filter_count(data: &[BugReport], filter: BugFilter) -> usize {
    data.iter().filter(|r| filter.matches(r)).count()
}

/// Table state of the bug report list, owned by the dashboard so it
/// outlives tab switches
#[derive(Clone, Copy)]
pub struct BugListState {
    pub filter: RwSignal<BugFilter>,
    pub sort: RwSignal<SortState<BugColumn>>,
    pub actions: RwSignal<RowActionState>,
}

pub fn create_state() -> BugListState {
    BugListState {
        filter: RwSignal::new(BugFilter::default()),
        sort: RwSignal::new(SortState::default()),
        actions: RwSignal::new(RowActionState::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use contracts::domain::common::RecordId;
    use leptos::reactive::owner::Owner;

    fn report(id: &str, status: Option<BugStatus>, minute: u32) -> BugReport {
        BugReport {
            id: RecordId::new(id),
            title: None,
            description: format!("report {}", id),
            severity: None,
            status,
            app_version: None,
            screenshot_url: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 15, 12, minute, 0).unwrap(),
        }
    }

    fn ids(rows: &[BugReport]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    fn sample() -> Vec<BugReport> {
        // Fetch order: newest first
        vec![
            report("a", None, 50),
            report("b", Some(BugStatus::Fixed), 40),
            report("c", Some(BugStatus::Spam), 30),
            report("d", Some(BugStatus::Pending), 20),
            report("e", Some(BugStatus::Fixed), 10),
        ]
    }

    #[test]
    fn filter_buckets() {
        let data = sample();
        let unsorted = SortState::default();
        assert_eq!(ids(&visible_rows(&data, BugFilter::Fixed, &unsorted)), vec!["b", "e"]);
        assert_eq!(ids(&visible_rows(&data, BugFilter::Spam, &unsorted)), vec!["c"]);
        assert_eq!(ids(&visible_rows(&data, BugFilter::Active, &unsorted)), vec!["a", "d"]);
        assert_eq!(filter_count(&data, BugFilter::All), 5);
    }

    #[test]
    fn marking_fixed_moves_row_out_of_active() {
        let mut data = sample();
        data[0].status = target_status(RecordAction::MarkFixed);
        let active = visible_rows(&data, BugFilter::Active, &SortState::default());
        assert_eq!(ids(&active), vec!["d"]);
        assert_eq!(filter_count(&data, BugFilter::Fixed), 3);
    }

    #[test]
    fn date_sort_cycle_returns_to_fetch_order() {
        let data = sample();
        let sort = SortState::default().toggle(BugColumn::CreatedAt);
        assert_eq!(ids(&visible_rows(&data, BugFilter::All, &sort)), vec!["a", "b", "c", "d", "e"]);
        let sort = sort.toggle(BugColumn::CreatedAt);
        assert_eq!(ids(&visible_rows(&data, BugFilter::All, &sort)), vec!["e", "d", "c", "b", "a"]);
        let sort = sort.toggle(BugColumn::CreatedAt);
        assert_eq!(ids(&visible_rows(&data, BugFilter::All, &sort)), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn closed_out_rows_hide_fixed_and_spam() {
        let open = actions_for(&report("x", None, 0));
        assert_eq!(open.len(), 5);
        let fixed = actions_for(&report("y", Some(BugStatus::Fixed), 0));
        assert!(!fixed.contains(&RecordAction::MarkFixed));
        assert!(!fixed.contains(&RecordAction::MarkSpam));
        assert!(fixed.contains(&RecordAction::Delete));
    }

    #[test]
    fn filter_and_sort_survive_unmounting_the_table() {
        let dashboard = Owner::new();
        dashboard.with(|| {
            let state = create_state();

            let table = dashboard.child();
            table.with(|| {
                state.filter.set(BugFilter::Spam);
                state.sort.update(|s| *s = s.toggle(BugColumn::Severity));
            });
            table.cleanup();

            assert_eq!(state.filter.get_untracked(), BugFilter::Spam);
            assert_eq!(
                state.sort.get_untracked(),
                SortState::default().toggle(BugColumn::Severity)
            );
        });
    }
}
