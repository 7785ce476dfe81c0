use contracts::domain::common::FeedbackRecord;
use leptos::prelude::*;

use crate::shared::date_utils::format_local_datetime;
use crate::shared::modal::Modal;

/// Read-only view of one submission
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDetails {
    pub kind: &'static str,
    pub description: String,
    pub app_version: Option<String>,
    pub submitted: String,
    pub screenshot_url: Option<String>,
}

impl EntryDetails {
    pub fn from_record<R: FeedbackRecord>(record: &R) -> Self {
        Self {
            kind: R::element_name(),
            description: record.description().to_string(),
            app_version: record.app_version().map(str::to_string),
            submitted: format_local_datetime(record.created_at()),
            screenshot_url: record.screenshot_url().map(str::to_string),
        }
    }
}

#[component]
pub fn EntryDetailsModal(entry: EntryDetails, on_close: Callback<()>) -> impl IntoView {
    let EntryDetails {
        kind,
        description,
        app_version,
        submitted,
        screenshot_url,
    } = entry;

    view! {
        <Modal title=format!("{} Details", kind) on_close=on_close>
            <dl class="entry-details">
                <dt>"Description"</dt>
                <dd class="entry-details__description">{description}</dd>

                {app_version.map(|v| view! {
                    <dt>"App Version"</dt>
                    <dd>{v}</dd>
                })}

                <dt>"Date Submitted"</dt>
                <dd>{submitted}</dd>

                {screenshot_url.map(|url| {
                    let link = url.clone();
                    view! {
                        <dt>"Screenshot"</dt>
                        <dd>
                            <a href=link target="_blank" rel="noopener noreferrer">
                                <img class="entry-details__screenshot" src=url alt="Screenshot" />
                            </a>
                        </dd>
                    }
                })}
            </dl>
        </Modal>
    }
}
