use contracts::domain::a001_bug_report::aggregate::BugReport;

use super::api;
use crate::shared::data::resource::ListFuture;
use crate::shared::data::{use_list_resource, ListResource};
use crate::shared::supabase::use_gateway;

/// Bug reports owned by the calling view; fetched on creation
pub fn use_bug_reports() -> ListResource<BugReport> {
    let gateway = use_gateway();
    use_list_resource(move || -> ListFuture<BugReport> {
        let client = gateway.clone();
        Box::pin(async move { api::fetch_bug_reports(&client).await })
    })
}
