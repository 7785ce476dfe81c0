use contracts::shared::config::ClientConfig;
use gloo_net::http::Request;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::routes::routes::AppRoutes;
use crate::shared::api_utils::CONFIG_PATH;
use crate::shared::supabase::SupabaseClient;
use crate::system::auth::storage::load_session;
use crate::system::auth::AuthProvider;

/// Fetch the runtime configuration from the host and validate it.
async fn load_client_config() -> Result<ClientConfig, String> {
    let response = Request::get(CONFIG_PATH)
        .send()
        .await
        .map_err(|e| format!("Could not reach {}: {}", CONFIG_PATH, e))?;

    if !response.ok() {
        return Err(format!("{} returned HTTP {}", CONFIG_PATH, response.status()));
    }

    let config: ClientConfig = response
        .json()
        .await
        .map_err(|e| format!("Malformed configuration: {}", e))?;

    config.validated().map_err(|e| e.to_string())
}

#[component]
pub fn App() -> impl IntoView {
    let (config, set_config) = signal(None::<Result<ClientConfig, String>>);

    spawn_local(async move {
        let loaded = load_client_config().await;
        if let Err(e) = &loaded {
            log::error!("configuration unavailable: {}", e);
        }
        set_config.try_set(Some(loaded));
    });

    view! {
        <ConfigProvider>
            {move || match config.get() {
                None => view! {
                    <div class="page-center">
                        <Spinner label="Loading..." />
                    </div>
                }
                .into_any(),
                Some(Ok(config)) => view! { <ConfiguredApp config=config /> }.into_any(),
                Some(Err(message)) => view! { <ConfigErrorScreen message=message /> }.into_any(),
            }}
        </ConfigProvider>
    }
}

#[component]
fn ConfiguredApp(config: ClientConfig) -> impl IntoView {
    provide_context(SupabaseClient::new(config, load_session()));

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}

/// Shown instead of any route when the application cannot be configured
#[component]
fn ConfigErrorScreen(message: String) -> impl IntoView {
    view! {
        <div class="page-center">
            <div class="fatal">
                <h1>"Application is not configured"</h1>
                <MessageBar intent=MessageBarIntent::Error>
                    <span>{message}</span>
                </MessageBar>
                <p>"Set SUPABASE_URL and SUPABASE_ANON_KEY for the host and reload the page."</p>
            </div>
        </div>
    }
}
