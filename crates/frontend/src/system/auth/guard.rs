use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;
use thaw::*;

use super::context::{use_auth, AuthStatus};

pub const LOGIN_PATH: &str = "/admin/login";
pub const DEFAULT_ADMIN_PATH: &str = "/admin/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Wait,
    RedirectToLogin,
    Render,
}

pub fn guard_decision(status: &AuthStatus) -> GuardDecision {
    match status {
        AuthStatus::Loading => GuardDecision::Wait,
        AuthStatus::Unauthenticated => GuardDecision::RedirectToLogin,
        AuthStatus::Authenticated(_) => GuardDecision::Render,
    }
}

/// Login URL remembering the requested path
pub fn login_url_for(requested_path: &str) -> String {
    format!("{}?from={}", LOGIN_PATH, urlencoding::encode(requested_path))
}

/// Where to go after signing in. Only admin pages other than the login
/// routes are accepted.
pub fn login_redirect_target(from: Option<&str>) -> String {
    let Some(path) = from.map(str::trim) else {
        return DEFAULT_ADMIN_PATH.to_string();
    };

    let path_only = path.split(['?', '#']).next().unwrap_or_default();
    let is_login_route = path_only == "/admin" || path_only == "/admin/" || path_only == LOGIN_PATH;
    let is_admin_page = path.starts_with("/admin/") && !path.starts_with("//");

    if is_admin_page && !is_login_route && !path.contains("..") {
        path.to_string()
    } else {
        DEFAULT_ADMIN_PATH.to_string()
    }
}

/// Renders children only for an authenticated administrator
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let status = auth.status();

    move || match guard_decision(&status.get()) {
        GuardDecision::Wait => view! {
            <div class="page-center">
                <Spinner label="Checking session..." />
            </div>
        }
        .into_any(),
        GuardDecision::RedirectToLogin => {
            let requested = format!(
                "{}{}",
                location.pathname.get_untracked(),
                location.search.get_untracked()
            );
            view! { <Redirect path=login_url_for(&requested) /> }.into_any()
        }
        GuardDecision::Render => children().into_any(),
    }
}
