use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Signed-in administrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

/// User object as returned by the auth service (`/auth/v1/user`, token grants)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<AuthUser> for User {
    fn from(u: AuthUser) -> Self {
        Self {
            id: u.id,
            email: u.email.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordGrantRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshGrantRequest {
    pub refresh_token: String,
}

/// Response of both token grants
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl TokenResponse {
    /// `now` is the current unix time in seconds
    pub fn into_session(self, now: i64) -> Session {
        Session {
            expires_at: self.expires_at.unwrap_or(now + self.expires_in),
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            user: self.user.into(),
        }
    }
}

/// Persisted session; survives reloads through browser storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp (seconds)
    pub expires_at: i64,
    pub user: User,
}

impl Session {
    /// Refresh margin before the access token actually expires
    pub const EXPIRY_SKEW_SECS: i64 = 60;

    pub fn needs_refresh(&self, now: i64) -> bool {
        now + Self::EXPIRY_SKEW_SECS >= self.expires_at
    }
}

// ============================================================================
// Login form validation
// ============================================================================

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoginValidationError {
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
}

/// Checks run before any sign-in request is sent
pub fn validate_login(email: &str, password: &str) -> Result<(), LoginValidationError> {
    if email.trim().is_empty() {
        return Err(LoginValidationError::EmailRequired);
    }
    if !email.contains('@') {
        return Err(LoginValidationError::InvalidEmail);
    }
    if password.is_empty() {
        return Err(LoginValidationError::PasswordRequired);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(LoginValidationError::PasswordTooShort);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_validation_order() {
        assert_eq!(validate_login("", ""), Err(LoginValidationError::EmailRequired));
        assert_eq!(
            validate_login("admin", "secret1"),
            Err(LoginValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_login("a@b.io", ""),
            Err(LoginValidationError::PasswordRequired)
        );
        assert_eq!(
            validate_login("a@b.io", "12345"),
            Err(LoginValidationError::PasswordTooShort)
        );
        assert_eq!(validate_login("a@b.io", "123456"), Ok(()));
    }

    #[test]
    fn token_response_builds_session() {
        let json = r#"{"access_token":"at","token_type":"bearer","expires_in":3600,
                       "refresh_token":"rt","user":{"id":"u1","email":"admin@example.com"}}"#;
        let resp: TokenResponse = serde_json::from_str(json).unwrap();
        let session = resp.into_session(1_000);
        assert_eq!(session.expires_at, 4_600);
        assert_eq!(session.user.email, "admin@example.com");
        assert!(!session.needs_refresh(1_000));
        assert!(session.needs_refresh(4_550));
    }
}
