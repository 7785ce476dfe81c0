use contracts::shared::database_error::DatabaseError;
use contracts::system::auth::User;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use crate::shared::supabase::{use_gateway, SupabaseClient};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthStatus {
    /// A session check or sign-in is in flight
    Loading,
    Unauthenticated,
    Authenticated(User),
}

/// Inputs of the auth state machine
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    CheckStarted,
    CheckFinished(Option<User>),
    SignInStarted,
    SignInFailed,
    /// Notification from the gateway (sign-in, refresh, sign-out)
    SessionChanged(Option<User>),
    SignedOut,
}

impl AuthStatus {
    pub fn apply(&self, event: AuthEvent) -> AuthStatus {
        match event {
            AuthEvent::CheckStarted | AuthEvent::SignInStarted => AuthStatus::Loading,
            AuthEvent::CheckFinished(user) | AuthEvent::SessionChanged(user) => match user {
                Some(user) => AuthStatus::Authenticated(user),
                None => AuthStatus::Unauthenticated,
            },
            AuthEvent::SignInFailed => match self {
                // A notification may already have landed a session
                AuthStatus::Authenticated(user) => AuthStatus::Authenticated(user.clone()),
                _ => AuthStatus::Unauthenticated,
            },
            AuthEvent::SignedOut => AuthStatus::Unauthenticated,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            AuthStatus::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Process-wide auth state. Single writer: `dispatch`.
#[derive(Clone, Copy)]
pub struct AuthStore {
    status: RwSignal<AuthStatus>,
    gateway: StoredValue<SupabaseClient>,
}

impl AuthStore {
    fn new(gateway: SupabaseClient) -> Self {
        Self {
            status: RwSignal::new(AuthStatus::Loading),
            gateway: StoredValue::new(gateway),
        }
    }

    pub fn status(&self) -> Signal<AuthStatus> {
        self.status.into()
    }

    pub fn user(&self) -> Option<User> {
        self.status.with(|s| s.user().cloned())
    }

    fn dispatch(&self, event: AuthEvent) {
        log::debug!("auth event: {:?}", event);
        self.status.try_update(|status| *status = status.apply(event));
    }

    fn client(&self) -> Option<SupabaseClient> {
        self.gateway.try_get_value()
    }

    /// Check the stored session and settle on a definite state
    fn check_session(&self) {
        let store = *self;
        let Some(client) = self.client() else {
            return;
        };
        store.dispatch(AuthEvent::CheckStarted);
        spawn_local(async move {
            let user = match api::get_session(&client).await {
                Ok(session) => session.map(|s| s.user),
                Err(e) => {
                    log::warn!("session check failed: {}", e);
                    None
                }
            };
            store.dispatch(AuthEvent::CheckFinished(user));
        });
    }

    pub async fn sign_in(&self, email: String, password: String) -> Result<User, DatabaseError> {
        let client = self.client().ok_or_else(|| DatabaseError::new("Authentication unavailable"))?;
        self.dispatch(AuthEvent::SignInStarted);
        match api::sign_in(&client, email, password).await {
            Ok(user) => {
                self.dispatch(AuthEvent::SessionChanged(Some(user.clone())));
                Ok(user)
            }
            Err(e) => {
                self.dispatch(AuthEvent::SignInFailed);
                Err(e)
            }
        }
    }

    pub async fn sign_out(&self) {
        if let Some(client) = self.client() {
            // Local state is cleared even when the remote call fails
            let _ = api::sign_out(&client).await;
        }
        self.dispatch(AuthEvent::SignedOut);
    }
}

/// Owns the auth state for the whole application
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let gateway = use_gateway();
    let store = AuthStore::new(gateway.clone());

    let subscription = gateway.subscribe(move |session| {
        store.dispatch(AuthEvent::SessionChanged(session.map(|s| s.user.clone())));
    });
    on_cleanup(move || drop(subscription));

    store.check_session();
    provide_context(store);

    children()
}

/// Hook to access auth state; panics outside `AuthProvider`
pub fn use_auth() -> AuthStore {
    use_context::<AuthStore>().expect("AuthProvider not found in component tree")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> User {
        User {
            id: "u1".into(),
            email: "admin@example.com".into(),
        }
    }

    #[test]
    fn startup_check_settles_on_session_presence() {
        let loading = AuthStatus::Unauthenticated.apply(AuthEvent::CheckStarted);
        assert_eq!(loading, AuthStatus::Loading);
        assert_eq!(
            loading.apply(AuthEvent::CheckFinished(Some(admin()))),
            AuthStatus::Authenticated(admin())
        );
        assert_eq!(loading.apply(AuthEvent::CheckFinished(None)), AuthStatus::Unauthenticated);
    }

    #[test]
    fn failed_sign_in_returns_to_unauthenticated() {
        let status = AuthStatus::Unauthenticated
            .apply(AuthEvent::SignInStarted)
            .apply(AuthEvent::SignInFailed);
        assert_eq!(status, AuthStatus::Unauthenticated);
    }

    #[test]
    fn notifications_drive_state() {
        let status = AuthStatus::Loading.apply(AuthEvent::SessionChanged(Some(admin())));
        assert_eq!(status.user(), Some(&admin()));
        let status = status.apply(AuthEvent::SessionChanged(None));
        assert_eq!(status, AuthStatus::Unauthenticated);
    }

    #[test]
    fn sign_out_always_clears_user() {
        let status = AuthStatus::Authenticated(admin()).apply(AuthEvent::SignedOut);
        assert_eq!(status, AuthStatus::Unauthenticated);
        assert_eq!(status.user(), None);
    }
}
