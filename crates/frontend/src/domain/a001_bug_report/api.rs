use contracts::domain::a001_bug_report::aggregate::{BugReport, BugStatus, BugStatusUpdate};
use contracts::domain::common::{FeedbackRecord, RecordId};
use contracts::shared::database_error::DatabaseError;

use crate::shared::supabase::SupabaseClient;

/// All bug reports, newest first
pub async fn fetch_bug_reports(client: &SupabaseClient) -> Result<Vec<BugReport>, DatabaseError> {
    client
        .select_newest_first(
            BugReport::collection_name(),
            BugReport::SELECT,
            "fetching bug reports",
        )
        .await
        .map_err(|e| e.relabel("Failed to fetch bug reports"))
}

pub async fn update_bug_report_status(
    client: &SupabaseClient,
    id: &RecordId,
    status: BugStatus,
) -> Result<(), DatabaseError> {
    client
        .update_row(
            BugReport::collection_name(),
            id.as_str(),
            &BugStatusUpdate { status },
            "updating bug report status",
        )
        .await
}

pub async fn delete_bug_report(client: &SupabaseClient, id: &RecordId) -> Result<(), DatabaseError> {
    client
        .delete_row(BugReport::collection_name(), id.as_str(), "deleting bug report")
        .await
}
