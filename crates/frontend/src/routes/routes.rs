use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::dashboards::AdminDashboard;
use crate::system::auth::RequireAuth;
use crate::system::pages::login::LoginPage;
use crate::usecases::u501_submit_report::SubmitReportPage;

/// `/` is public; everything under `/admin` except the login page sits
/// behind the guard. Unknown paths go back to the form.
#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <main class="app">
                <Routes fallback=|| view! { <Redirect path="/" /> }>
                    <Route path=path!("/") view=SubmitReportPage />
                    <Route path=path!("/admin") view=LoginPage />
                    <Route path=path!("/admin/login") view=LoginPage />
                    <Route
                        path=path!("/admin/dashboard")
                        view=|| view! {
                            <RequireAuth>
                                <AdminDashboard />
                            </RequireAuth>
                        }
                    />
                </Routes>
            </main>
        </Router>
    }
}
