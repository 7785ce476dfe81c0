use leptos::prelude::*;
use thaw::*;

use crate::shared::icons::icon;

#[component]
pub fn LoadingState(#[prop(into)] text: String) -> impl IntoView {
    view! {
        <div class="state state--loading">
            <Spinner label=text />
        </div>
    }
}

/// Replaces the content area after a failed fetch
#[component]
pub fn ErrorState(#[prop(into)] message: String, on_retry: Callback<()>) -> impl IntoView {
    view! {
        <div class="state state--error">
            <MessageBar intent=MessageBarIntent::Error>
                <span>{message}</span>
            </MessageBar>
            <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_retry.run(())>
                {icon("refresh")}
                " Try Again"
            </Button>
        </div>
    }
}

#[component]
pub fn EmptyState(
    #[prop(into)] title: String,
    #[prop(into)] description: String,
    #[prop(default = "file-x")] icon_name: &'static str,
) -> impl IntoView {
    view! {
        <div class="state state--empty">
            <div class="state__icon">{icon(icon_name)}</div>
            <h3 class="state__title">{title}</h3>
            <p class="state__description">{description}</p>
        </div>
    }
}
