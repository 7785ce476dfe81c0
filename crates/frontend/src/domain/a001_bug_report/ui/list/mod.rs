pub mod state;

use self::state::{actions_for, filter_count, target_status, visible_rows, BugColumn, BugFilter, BugListState};
use crate::domain::a001_bug_report::api;
use crate::shared::components::entry_details::{EntryDetails, EntryDetailsModal};
use crate::shared::components::states::{EmptyState, ErrorState, LoadingState};
use crate::shared::components::ui::{severity_badge, status_tone, ToneBadge};
use crate::shared::data::ListResource;
use crate::shared::date_utils::format_local_datetime;
use crate::shared::icons::icon;
use crate::shared::list_utils::sort_header_cell;
use crate::shared::row_actions::{run_row_action, window_confirm, RecordAction, RowActionButtons, RowActionState};
use crate::shared::supabase::use_gateway;
use contracts::domain::a001_bug_report::aggregate::BugReport;
use contracts::domain::common::{FeedbackRecord, RecordId};
use leptos::prelude::*;
use thaw::*;

const DELETE_CONFIRMATION: &str =
    "Are you sure you want to delete this bug report? This action cannot be undone.";

#[component]
#[allow(non_snake_case)]
pub fn BugReportList(resource: ListResource<BugReport>, state: BugListState) -> impl IntoView {
    let details = RwSignal::new(None::<BugReport>);
    let gateway = StoredValue::new(use_gateway());

    let refetch = Callback::new(move |_: ()| resource.refetch());

    let on_action = Callback::new(move |(id, action): (RecordId, RecordAction)| {
        let Some(client) = gateway.try_get_value() else {
            return;
        };
        match target_status(action) {
            Some(status) => {
                let target = id.clone();
                run_row_action(
                    state.actions,
                    id,
                    action,
                    "",
                    window_confirm,
                    async move { api::update_bug_report_status(&client, &target, status).await },
                    move || resource.refetch(),
                );
            }
            None => {
                let target = id.clone();
                run_row_action(
                    state.actions,
                    id,
                    action,
                    DELETE_CONFIRMATION,
                    window_confirm,
                    async move { api::delete_bug_report(&client, &target).await },
                    move || resource.refetch(),
                );
            }
        }
    });

    let close_details = Callback::new(move |_: ()| details.set(None));

    view! {
        <div class="record-list">
            <div class="record-list__filters">
                <Flex gap=FlexGap::Small>
                    {BugFilter::ALL
                        .into_iter()
                        .map(|filter| {
                            view! {
                                <Button
                                    appearance=Signal::derive(move || {
                                        if state.filter.get() == filter {
                                            ButtonAppearance::Primary
                                        } else {
                                            ButtonAppearance::Subtle
                                        }
                                    })
                                    on_click=move |_| state.filter.set(filter)
                                >
                                    {move || format!("{} ({})", filter.label(), resource.with_data(|d| filter_count(d, filter)))}
                                </Button>
                            }
                        })
                        .collect_view()}
                </Flex>
            </div>

            {move || {
                if resource.loading() {
                    return view! { <LoadingState text="Loading bug reports..." /> }.into_any();
                }
                if let Some(error) = resource.error() {
                    return view! { <ErrorState message=error.message on_retry=refetch /> }.into_any();
                }

                let filter = state.filter.get();
                if resource.with_data(|d| filter_count(d, filter)) == 0 {
                    return view! {
                        <EmptyState
                            title="No bug reports found"
                            description="There are currently no bug reports to display."
                        />
                    }
                    .into_any();
                }

                view! {
                    <Table>
                        <TableHeader>
                            <TableRow>
                                {BugColumn::ALL
                                    .into_iter()
                                    .map(|column| sort_header_cell(column, state.sort))
                                    .collect_view()}
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                resource
                                    .with_data(|d| visible_rows(d, state.filter.get(), &state.sort.get()))
                                    .into_iter()
                                    .map(|report| render_row(report, state.actions, details, on_action))
                                    .collect_view()
                            }}
                        </TableBody>
                    </Table>
                }
                .into_any()
            }}

            {move || {
                details.get().map(|report| {
                    view! {
                        <EntryDetailsModal entry=EntryDetails::from_record(&report) on_close=close_details />
                    }
                })
            }}
        </div>
    }
}

fn render_row(
    report: BugReport,
    actions: RwSignal<RowActionState>,
    details: RwSignal<Option<BugReport>>,
    on_action: Callback<(RecordId, RecordAction)>,
) -> impl IntoView {
    let cells = BugColumn::ALL
        .into_iter()
        .map(|column| {
            let cell = render_cell(column, report.clone(), actions, details, on_action);
            view! { <TableCell>{cell}</TableCell> }
        })
        .collect_view();

    view! { <TableRow>{cells}</TableRow> }
}

fn render_cell(
    column: BugColumn,
    report: BugReport,
    actions: RwSignal<RowActionState>,
    details: RwSignal<Option<BugReport>>,
    on_action: Callback<(RecordId, RecordAction)>,
) -> AnyView {
    match column {
        BugColumn::Description => {
            let description = report.description;
            let tooltip = description.clone();
            let screenshot = report.screenshot_url;
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
        BugColumn::Severity => match report.severity.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(severity) => {
                let (tone, label) = severity_badge(severity);
                view! { <ToneBadge tone=tone label=label /> }.into_any()
            }
            None => view! { <span class="muted">"-"</span> }.into_any(),
        },
        BugColumn::AppVersion => {
            let version = report.app_version().unwrap_or("-").to_string();
            view! { <TableCellLayout>{version}</TableCellLayout> }.into_any()
        }
        BugColumn::Status => {
            let status = report.effective_status();
            view! { <ToneBadge tone=status_tone(status.as_str()) label=status.label() /> }.into_any()
        }
        BugColumn::CreatedAt => {
            let submitted = format_local_datetime(report.created_at);
            view! { <TableCellLayout>{submitted}</TableCellLayout> }.into_any()
        }
        BugColumn::Actions => {
            let row = report.id.clone();
            let row_actions = actions_for(&report);
            view! {
                <RowActionButtons
                    row=row
                    actions=row_actions
                    state=actions
                    on_action=on_action
                    on_details=Callback::new(move |_: ()| details.set(Some(report.clone())))
                />
            }
            .into_any()
        }
    }
}
