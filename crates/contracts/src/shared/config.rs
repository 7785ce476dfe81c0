use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("backend URL is not configured (set supabase.url or SUPABASE_URL)")]
    MissingUrl,

    #[error("anonymous API key is not configured (set supabase.anon_key or SUPABASE_ANON_KEY)")]
    MissingAnonKey,

    #[error("backend URL must start with http:// or https://, got '{0}'")]
    InvalidUrl(String),
}

/// Runtime configuration the browser application needs to reach the
/// backend-as-a-service. Served by the host at `/api/config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl ClientConfig {
    /// Build from optional raw values, failing when either is absent
    pub fn from_parts(url: Option<String>, anon_key: Option<String>) -> Result<Self, ConfigError> {
        Self {
            supabase_url: url.ok_or(ConfigError::MissingUrl)?,
            supabase_anon_key: anon_key.ok_or(ConfigError::MissingAnonKey)?,
        }
        .validated()
    }

    /// Trim values, strip a trailing slash from the URL and reject blanks
    pub fn validated(self) -> Result<Self, ConfigError> {
        let url = self.supabase_url.trim().trim_end_matches('/').to_string();
        let key = self.supabase_anon_key.trim().to_string();

        if url.is_empty() {
            return Err(ConfigError::MissingUrl);
        }
        if key.is_empty() {
            return Err(ConfigError::MissingAnonKey);
        }
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidUrl(url));
        }

        Ok(Self {
            supabase_url: url,
            supabase_anon_key: key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_strips_trailing_slash() {
        let cfg = ClientConfig::from_parts(
            Some(" https://demo.supabase.co/ ".into()),
            Some(" anon ".into()),
        )
        .unwrap();
        assert_eq!(cfg.supabase_url, "https://demo.supabase.co");
        assert_eq!(cfg.supabase_anon_key, "anon");
    }

    #[test]
    fn missing_or_blank_values_are_fatal() {
        assert_eq!(
            ClientConfig::from_parts(None, Some("k".into())),
            Err(ConfigError::MissingUrl)
        );
        assert_eq!(
            ClientConfig::from_parts(Some("https://x.io".into()), Some("   ".into())),
            Err(ConfigError::MissingAnonKey)
        );
    }

    #[test]
    fn rejects_non_http_url() {
        assert!(matches!(
            ClientConfig::from_parts(Some("demo.supabase.co".into()), Some("k".into())),
            Err(ConfigError::InvalidUrl(_))
        ));
    }
}
