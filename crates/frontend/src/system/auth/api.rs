use contracts::shared::database_error::DatabaseError;
use contracts::system::auth::{
    PasswordGrantRequest, RefreshGrantRequest, Session, TokenResponse, User,
};

use super::storage;
use crate::shared::supabase::SupabaseClient;

/// Current unix time in seconds
pub fn now_secs() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}

/// Sign in with email and password.
///
/// On success the session is stored and subscribers are notified.
pub async fn sign_in(
    client: &SupabaseClient,
    email: String,
    password: String,
) -> Result<User, DatabaseError> {
    let request = PasswordGrantRequest {
        email: email.trim().to_string(),
        password,
    };
    let response: TokenResponse = client
        .auth_post("token", &[("grant_type", "password")], &request, "signing in")
        .await?;

    let session = response.into_session(now_secs());
    let user = session.user.clone();
    storage::save_session(&session);
    client.set_session(Some(session));
    Ok(user)
}

/// Revoke the session remotely; the local session is cleared regardless.
pub async fn sign_out(client: &SupabaseClient) -> Result<(), DatabaseError> {
    let result = match client.session() {
        Some(session) => client.auth_logout(&session.access_token, "signing out").await,
        None => Ok(()),
    };
    if let Err(e) = &result {
        log::warn!("remote sign-out failed, clearing local session anyway: {}", e);
    }

    storage::clear_session();
    client.set_session(None);
    result
}

/// Resolve the current session: refresh it when close to expiry and
/// verify the access token with the auth service.
///
/// Any failure leaves the client signed out.
pub async fn get_session(client: &SupabaseClient) -> Result<Option<Session>, DatabaseError> {
    let Some(mut session) = client.session().or_else(storage::load_session) else {
        return Ok(None);
    };

    if session.needs_refresh(now_secs()) {
        match refresh_session(client, &session.refresh_token).await {
            Ok(fresh) => session = fresh,
            Err(e) => {
                forget_session(client);
                return Err(e);
            }
        }
    }

    match client.auth_user(&session.access_token, "checking session").await {
        Ok(user) => {
            session.user = user.into();
            storage::save_session(&session);
            client.set_session(Some(session.clone()));
            Ok(Some(session))
        }
        Err(e) => {
            forget_session(client);
            Err(e)
        }
    }
}

async fn refresh_session(client: &SupabaseClient, refresh_token: &str) -> Result<Session, DatabaseError> {
    let request = RefreshGrantRequest {
        refresh_token: refresh_token.to_string(),
    };
    let response: TokenResponse = client
        .auth_post(
            "token",
            &[("grant_type", "refresh_token")],
            &request,
            "refreshing session",
        )
        .await?;
    log::debug!("session refreshed");
    Ok(response.into_session(now_secs()))
}

fn forget_session(client: &SupabaseClient) {
    storage::clear_session();
    if client.session().is_some() {
        client.set_session(None);
    }
}
