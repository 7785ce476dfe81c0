use super::api;
use contracts::usecases::u501_submit_report::{
    validate_description, validate_screenshot, ReportFormData, ReportKind, ScreenshotMeta,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use web_sys::HtmlInputElement;

use crate::shared::components::ui::{TextAreaField, TextField};
use crate::shared::icons::icon;
use crate::shared::supabase::use_gateway;

fn description_placeholder(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Bug => "Describe the bug: what happened, what you expected, and the steps to reproduce it",
        ReportKind::Suggestion => "Describe your idea and how it would help",
    }
}

fn confirmation_title(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Bug => "Bug Report Submitted!",
        ReportKind::Suggestion => "Suggestion Submitted!",
    }
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.0} KB", (bytes as f64 / 1024.0).ceil())
    }
}

/// Public feedback form
#[component]
pub fn SubmitReportPage() -> impl IntoView {
    let gateway = StoredValue::new(use_gateway());

    let kind = RwSignal::new(ReportKind::default());
    let description = RwSignal::new(String::new());
    let app_version = RwSignal::new(String::new());
    // web_sys::File is not Send
    let screenshot = RwSignal::new_local(None::<web_sys::File>);
    let file_error = RwSignal::new(None::<String>);
    let description_error = RwSignal::new(None::<String>);
    let submit_error = RwSignal::new(None::<String>);
    let is_submitting = RwSignal::new(false);
    let submitted = RwSignal::new(None::<ReportKind>);

    let reset_form = move || {
        kind.set(ReportKind::default());
        description.set(String::new());
        app_version.set(String::new());
        screenshot.set(None);
        file_error.set(None);
        description_error.set(None);
        submit_error.set(None);
    };

    let on_file_change = move |ev: leptos::ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            screenshot.set(None);
            return;
        };

        let meta = ScreenshotMeta {
            name: file.name(),
            mime_type: file.type_(),
            size: file.size() as u64,
        };
        match validate_screenshot(&meta) {
            Ok(()) => {
                file_error.set(None);
                screenshot.set(Some(file));
            }
            Err(e) => {
                log::debug!("screenshot {} rejected: {:?}", meta.name, e);
                file_error.set(Some(e.to_string()));
                screenshot.set(None);
                input.set_value("");
            }
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }

        let form = ReportFormData {
            kind: kind.get_untracked(),
            description: description.get_untracked(),
            app_version: app_version.get_untracked(),
        };
        if let Err(e) = validate_description(&form.description) {
            description_error.set(Some(e.to_string()));
            return;
        }
        let Some(client) = gateway.try_get_value() else {
            return;
        };
        let file = screenshot.get_untracked();

        description_error.set(None);
        submit_error.set(None);
        is_submitting.set(true);

        spawn_local(async move {
            let submitted_kind = form.kind;
            match api::submit_report(&client, form, file.as_ref()).await {
                Ok(record) => {
                    log::info!("report stored in {}", record.collection_name());
                    reset_form();
                    submitted.try_set(Some(submitted_kind));
                }
                Err(e) => {
                    log::warn!("submission failed: {} ({:?})", e.message, e.code);
                    submit_error.try_set(Some(e.message));
                }
            }
            is_submitting.try_set(false);
        });
    };

    let submit_disabled =
        Signal::derive(move || is_submitting.get() || description.with(|d| d.trim().is_empty()));

    view! {
        <div class="submit-page">
            <div class="submit-card">
                {move || match submitted.get() {
                    Some(done) => view! {
                        <div class="submit-success">
                            <div class="submit-success__icon">{icon("check-circle")}</div>
                            <h1>{confirmation_title(done)}</h1>
                            <p>"Thank you for your feedback. We will review it shortly."</p>
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| submitted.set(None)
                            >
                                "Submit Another Report"
                            </Button>
                        </div>
                    }
                    .into_any(),
                    None => view! {
                        <form class="form" on:submit=on_submit novalidate>
                            <h1 class="submit-card__title">"Send Feedback"</h1>
                            <p class="submit-card__subtitle">
                                "Report a bug or suggest an improvement."
                            </p>

                            <div class="form__group">
                                <label class="form__label" for="report-kind">"Type"</label>
                                <select
                                    id="report-kind"
                                    class="form__select"
                                    prop:value=move || kind.get().as_str()
                                    disabled=move || is_submitting.get()
                                    on:change=move |ev| {
                                        if let Ok(value) = event_target_value(&ev).parse::<ReportKind>() {
                                            kind.set(value);
                                        }
                                    }
                                >
                                    <option value=ReportKind::Bug.as_str()>{ReportKind::Bug.label()}</option>
                                    <option value=ReportKind::Suggestion.as_str()>
                                        {ReportKind::Suggestion.label()}
                                    </option>
                                </select>
                            </div>

                            <TextAreaField
                                id="report-description"
                                label="Description *"
                                value=description
                                on_input=Callback::new(move |value: String| {
                                    if !value.trim().is_empty() {
                                        description_error.set(None);
                                    }
                                    description.set(value);
                                })
                                placeholder=Signal::derive(move || Some(description_placeholder(kind.get()).to_string()))
                                disabled=Signal::derive(move || Some(is_submitting.get()))
                                error=description_error
                                rows=6
                            />

                            <Show when=move || kind.get() == ReportKind::Bug>
                                <TextField
                                    id="report-app-version"
                                    label="App Version (optional)"
                                    value=app_version
                                    on_input=Callback::new(move |value: String| app_version.set(value))
                                    placeholder="e.g. 1.4.2"
                                    disabled=Signal::derive(move || Some(is_submitting.get()))
                                />
                            </Show>

                            <div class="form__group">
                                <label class="form__label" for="report-screenshot">
                                    "Screenshot (optional, max 5MB)"
                                </label>
                                <input
                                    id="report-screenshot"
                                    class="form__file"
                                    type="file"
                                    accept="image/*"
                                    disabled=move || is_submitting.get()
                                    on:change=on_file_change
                                />
                                {move || {
                                    screenshot.with(|file| file.as_ref().map(|f| (f.name(), f.size() as u64)))
                                        .map(|(name, size)| view! {
                                            <p class="form__file-info">
                                                {icon("image")}
                                                {format!(" {} ({})", name, format_size(size))}
                                            </p>
                                        })
                                }}
                                {move || file_error.get().map(|e| view! { <p class="form__error">{e}</p> })}
                            </div>

                            {move || submit_error.get().map(|message| view! {
                                <MessageBar intent=MessageBarIntent::Error>
                                    <span>{message}</span>
                                </MessageBar>
                            })}

                            <button
                                type="submit"
                                class="btn-primary submit-card__submit"
                                disabled=move || submit_disabled.get()
                            >
                                {move || {
                                    if is_submitting.get() {
                                        view! { <span class="row-action__spinner"></span>" Submitting..." }.into_any()
                                    } else {
                                        view! { {icon("send")}" Submit" }.into_any()
                                    }
                                }}
                            </button>
                        </form>
                    }
                    .into_any(),
                }}
            </div>
            <p class="submit-page__admin-link">
                <a href="/admin/login">"Admin"</a>
            </p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_follows_the_submitted_kind() {
        assert_eq!(confirmation_title(ReportKind::Bug), "Bug Report Submitted!");
        assert_eq!(confirmation_title(ReportKind::Suggestion), "Suggestion Submitted!");
    }

    #[test]
    fn file_sizes_read_naturally() {
        assert_eq!(format_size(512), "1 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(1536 * 1024), "1.5 MB");
    }
}
