pub mod state;

use self::state::{target_status, visible_rows, SuggestionColumn, SuggestionListState, ACTIONS};
use crate::domain::a002_suggestion::api;
use crate::shared::components::entry_details::{EntryDetails, EntryDetailsModal};
use crate::shared::components::states::{EmptyState, ErrorState, LoadingState};
use crate::shared::components::ui::{status_tone, ToneBadge};
use crate::shared::data::ListResource;
use crate::shared::date_utils::format_local_datetime;
use crate::shared::icons::icon;
use crate::shared::list_utils::sort_header_cell;
use crate::shared::row_actions::{run_row_action, window_confirm, RecordAction, RowActionButtons, RowActionState};
use crate::shared::supabase::use_gateway;
use contracts::domain::a002_suggestion::aggregate::Suggestion;
use contracts::domain::common::RecordId;
use leptos::prelude::*;
use thaw::*;

const DELETE_CONFIRMATION: &str =
    "Are you sure you want to delete this suggestion? This action cannot be undone.";

#[component]
#[allow(non_snake_case)]
pub fn SuggestionList(resource: ListResource<Suggestion>, state: SuggestionListState) -> impl IntoView {
    let details = RwSignal::new(None::<Suggestion>);
    let gateway = StoredValue::new(use_gateway());

    let refetch = Callback::new(move |_: ()| resource.refetch());

    let on_action = Callback::new(move |(id, action): (RecordId, RecordAction)| {
        let Some(client) = gateway.try_get_value() else {
            return;
        };
        let target = id.clone();
        match target_status(action) {
            Some(status) => run_row_action(
                state.actions,
                id,
                action,
                "",
                window_confirm,
                async move { api::update_suggestion_status(&client, &target, status).await },
                move || resource.refetch(),
            ),
            None => run_row_action(
                state.actions,
                id,
                action,
                DELETE_CONFIRMATION,
                window_confirm,
                async move { api::delete_suggestion(&client, &target).await },
                move || resource.refetch(),
            ),
        }
    });

    let close_details = Callback::new(move |_: ()| details.set(None));

    view! {
        <div class="record-list">
            {move || {
                if resource.loading() {
                    return view! { <LoadingState text="Loading suggestions..." /> }.into_any();
                }
                if let Some(error) = resource.error() {
                    return view! { <ErrorState message=error.message on_retry=refetch /> }.into_any();
                }
                if resource.count() == 0 {
                    return view! {
                        <EmptyState
                            title="No suggestions found"
                            description="There are currently no suggestions to display."
                            icon_name="message"
                        />
                    }
                    .into_any();
                }

                view! {
                    <Table>
                        <TableHeader>
                            <TableRow>
                                {SuggestionColumn::ALL
                                    .into_iter()
                                    .map(|column| sort_header_cell(column, state.sort))
                                    .collect_view()}
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                resource
                                    .with_data(|d| visible_rows(d, &state.sort.get()))
                                    .into_iter()
                                    .map(|suggestion| {
                                        let cells = SuggestionColumn::ALL
                                            .into_iter()
                                            .map(|column| {
                                                let cell = render_cell(column, suggestion.clone(), state.actions, details, on_action);
                                                view! { <TableCell>{cell}</TableCell> }
                                            })
                                            .collect_view();
                                        view! { <TableRow>{cells}</TableRow> }
                                    })
                                    .collect_view()
                            }}
                        </TableBody>
                    </Table>
                }
                .into_any()
            }}

            {move || {
                details.get().map(|suggestion| {
                    view! {
                        <EntryDetailsModal entry=EntryDetails::from_record(&suggestion) on_close=close_details />
                    }
                })
            }}
        </div>
    }
}

fn render_cell(
    column: SuggestionColumn,
    suggestion: Suggestion,
    actions: RwSignal<RowActionState>,
    details: RwSignal<Option<Suggestion>>,
    on_action: Callback<(RecordId, RecordAction)>,
) -> AnyView {
    match column {
        SuggestionColumn::Description => {
            let description = suggestion.description;
            let tooltip = description.clone();
            let screenshot = suggestion.screenshot_url;
            view! {
                <TableCellLayout truncate=true>
                    <span title=tooltip>{description}</span>
                    {screenshot.map(|url| view! {
                        <a class="screenshot-link" href=url target="_blank" rel="noopener noreferrer">
                            {icon("external")}
                            " Screenshot"
                        </a>
                    })}
                </TableCellLayout>
            }
            .into_any()
        }
        SuggestionColumn::Status => {
            let status = suggestion.effective_status();
            view! { <ToneBadge tone=status_tone(status.as_str()) label=status.label() /> }.into_any()
        }
        SuggestionColumn::CreatedAt => {
            let submitted = format_local_datetime(suggestion.created_at);
            view! { <TableCellLayout>{submitted}</TableCellLayout> }.into_any()
        }
        SuggestionColumn::Actions => {
            let row = suggestion.id.clone();
            view! {
                <RowActionButtons
                    row=row
                    actions=ACTIONS.to_vec()
                    state=actions
                    on_action=on_action
                    on_details=Callback::new(move |_: ()| details.set(Some(suggestion.clone())))
                />
            }
            .into_any()
        }
    }
}
