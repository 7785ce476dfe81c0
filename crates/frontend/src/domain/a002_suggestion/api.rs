use contracts::domain::a002_suggestion::aggregate::{Suggestion, SuggestionStatus, SuggestionStatusUpdate};
use contracts::domain::common::{FeedbackRecord, RecordId};
use contracts::shared::database_error::DatabaseError;

use crate::shared::supabase::SupabaseClient;

/// All suggestions, newest first
pub async fn fetch_suggestions(client: &SupabaseClient) -> Result<Vec<Suggestion>, DatabaseError> {
    client
        .select_newest_first(
            Suggestion::collection_name(),
            Suggestion::SELECT,
            "fetching suggestions",
        )
        .await
        .map_err(|e| e.relabel("Failed to fetch suggestions"))
}

pub async fn update_suggestion_status(
    client: &SupabaseClient,
    id: &RecordId,
    status: SuggestionStatus,
) -> Result<(), DatabaseError> {
    client
        .update_row(
            Suggestion::collection_name(),
            id.as_str(),
            &SuggestionStatusUpdate { status },
            "updating suggestion status",
        )
        .await
}

pub async fn delete_suggestion(client: &SupabaseClient, id: &RecordId) -> Result<(), DatabaseError> {
    client
        .delete_row(Suggestion::collection_name(), id.as_str(), "deleting suggestion")
        .await
}
