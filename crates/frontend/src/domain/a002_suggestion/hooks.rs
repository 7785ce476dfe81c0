use contracts::domain::a002_suggestion::aggregate::Suggestion;

use super::api;
use crate::shared::data::resource::ListFuture;
use crate::shared::data::{use_list_resource, ListResource};
use crate::shared::supabase::use_gateway;

pub fn use_suggestions() -> ListResource<Suggestion> {
    let gateway = use_gateway();
    use_list_resource(move || -> ListFuture<Suggestion> {
        let client = gateway.clone();
        Box::pin(async move { api::fetch_suggestions(&client).await })
    })
}
