use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use contracts::domain::a001_bug_report::aggregate::BugReport;
use contracts::domain::a002_suggestion::aggregate::Suggestion;
use contracts::domain::common::FeedbackRecord;
use thaw::*;

use crate::domain::a001_bug_report::hooks::use_bug_reports;
use crate::domain::a001_bug_report::ui::{bug_list_state, BugReportList};
use crate::domain::a002_suggestion::hooks::use_suggestions;
use crate::domain::a002_suggestion::ui::{suggestion_list_state, SuggestionList};
use crate::shared::icons::icon;
use crate::system::auth::guard::LOGIN_PATH;
use crate::system::auth::use_auth;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DashboardTab {
    #[default]
    BugReports,
    Suggestions,
}

impl DashboardTab {
    fn value(&self) -> &'static str {
        match self {
            DashboardTab::BugReports => "bugs",
            DashboardTab::Suggestions => "suggestions",
        }
    }

    fn from_value(value: &str) -> Self {
        match value {
            "suggestions" => DashboardTab::Suggestions,
            _ => DashboardTab::BugReports,
        }
    }
}

fn tab_label(name: &str, count: usize) -> String {
    format!("{} ({})", name, count)
}

/// Review area: one tab per record kind. Both lists are fetched on mount;
/// switching tabs never refetches. Table state (filter, sort, running row
/// actions) lives here so it survives tab switches.
#[component]
pub fn AdminDashboard() -> impl IntoView {
    let auth = use_auth();
    let navigate = StoredValue::new_local(use_navigate());

    let bug_reports = use_bug_reports();
    let suggestions = use_suggestions();
    let bug_table = bug_list_state();
    let suggestion_table = suggestion_list_state();

    let selected_tab = RwSignal::new(DashboardTab::default().value().to_string());
    let active_tab = move || DashboardTab::from_value(&selected_tab.get());

    let (signing_out, set_signing_out) = signal(false);

    let on_sign_out = move |_| {
        if signing_out.get_untracked() {
            return;
        }
        set_signing_out.set(true);
        spawn_local(async move {
            auth.sign_out().await;
            set_signing_out.try_set(false);
            // The guard may already have unmounted this view
            navigate.try_with_value(|navigate| {
                navigate(
                    LOGIN_PATH,
                    NavigateOptions {
                        replace: true,
                        ..Default::default()
                    },
                )
            });
        });
    };

    let on_refresh = move |_| match active_tab() {
        DashboardTab::BugReports => bug_reports.refetch(),
        DashboardTab::Suggestions => suggestions.refetch(),
    };

    let refreshing = move || match active_tab() {
        DashboardTab::BugReports => bug_reports.loading(),
        DashboardTab::Suggestions => suggestions.loading(),
    };

    view! {
        <div class="dashboard">
            <header class="dashboard__header">
                <div class="dashboard__title">
                    {icon("shield")}
                    <h1>"Feedback Dashboard"</h1>
                </div>
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <span class="dashboard__user">
                        {icon("user")}
                        {move || auth.user().map(|u| format!(" {}", u.email)).unwrap_or_default()}
                    </span>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(refreshing)
                        on_click=on_refresh
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        disabled=Signal::derive(move || signing_out.get())
                        on_click=on_sign_out
                    >
                        {icon("logout")}
                        " Sign Out"
                    </Button>
                </Flex>
            </header>

            <TabList selected_value=selected_tab>
                <Tab value=DashboardTab::BugReports.value()>
                    {move || tab_label(BugReport::list_name(), bug_reports.count())}
                </Tab>
                <Tab value=DashboardTab::Suggestions.value()>
                    {move || tab_label(Suggestion::list_name(), suggestions.count())}
                </Tab>
            </TabList>

            <div class="dashboard__content">
                {move || match active_tab() {
                    DashboardTab::BugReports => view! { <BugReportList resource=bug_reports state=bug_table /> }.into_any(),
                    DashboardTab::Suggestions => view! { <SuggestionList resource=suggestions state=suggestion_table /> }.into_any(),
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_values_round_trip_and_default_to_bugs() {
        for tab in [DashboardTab::BugReports, DashboardTab::Suggestions] {
            assert_eq!(DashboardTab::from_value(tab.value()), tab);
        }
        assert_eq!(DashboardTab::from_value("unknown"), DashboardTab::BugReports);
    }

    #[test]
    fn tab_labels_carry_counts() {
        assert_eq!(tab_label(BugReport::list_name(), 12), "Bug Reports (12)");
        assert_eq!(tab_label(Suggestion::list_name(), 0), "Suggestions (0)");
    }
}
