use contracts::shared::config::{ClientConfig, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
pub const ENV_SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";
pub const ENV_BIND: &str = "FEEDBACK_BIND";

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub supabase: SupabaseConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Directory holding the compiled frontend bundle
    #[serde(default = "default_dist_dir")]
    pub dist_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            dist_dir: default_dist_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct SupabaseConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
}

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_dist_dir() -> String {
    "dist".to_string()
}

impl Config {
    /// Environment values win over the file
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(ENV_SUPABASE_URL) {
            self.supabase.url = Some(url);
        }
        if let Some(key) = non_empty(ENV_SUPABASE_ANON_KEY) {
            self.supabase.anon_key = Some(key);
        }
        if let Some(bind) = non_empty(ENV_BIND) {
            self.server.bind = bind;
        }
        self
    }

    /// Configuration handed to the browser at `/api/config`
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        ClientConfig::from_parts(self.supabase.url.clone(), self.supabase.anon_key.clone())
    }
}

/// Load `config.toml` and apply environment overrides.
///
/// Search order:
/// 1. Next to the executable
/// 2. The working directory
/// 3. Built-in defaults (no backend credentials)
pub fn load_config() -> anyhow::Result<Config> {
    let config = match find_config_file() {
        Some(path) => {
            tracing::info!("Loading config from: {}", path.display());
            let contents = std::fs::read_to_string(&path)?;
            toml::from_str(&contents)
                .map_err(|e| anyhow::anyhow!("invalid {}: {}", path.display(), e))?
        }
        None => {
            tracing::warn!("config.toml not found, using defaults and environment");
            Config::default()
        }
    };

    Ok(config.with_overrides(|key| std::env::var(key).ok()))
}

fn find_config_file() -> Option<PathBuf> {
    let next_to_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("config.toml")));

    next_to_exe
        .into_iter()
        .chain(std::iter::once(PathBuf::from("config.toml")))
        .find(|path| path.exists())
}

/// Relative paths resolve next to the executable when present there,
/// otherwise against the working directory.
pub fn resolve_dist_dir(config: &Config) -> PathBuf {
    let dist = Path::new(&config.server.dist_dir);
    if dist.is_absolute() {
        return dist.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let candidate = exe_dir.join(dist);
            if candidate.exists() {
                return candidate;
            }
        }
    }

    dist.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[server]
bind = "127.0.0.1:8080"

[supabase]
url = "https://demo.supabase.co/"
anon_key = "anon-key"
"#;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:3000");
        assert_eq!(config.server.dist_dir, "dist");
        assert_eq!(config.supabase, SupabaseConfig::default());
    }

    #[test]
    fn test_file_values_and_normalised_client_config() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        let config = config.with_overrides(no_env);
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.server.dist_dir, "dist");

        let client = config.client_config().unwrap();
        assert_eq!(client.supabase_url, "https://demo.supabase.co");
        assert_eq!(client.supabase_anon_key, "anon-key");
    }

    #[test]
    fn test_environment_overrides_file() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        let config = config.with_overrides(|key| match key {
            ENV_SUPABASE_URL => Some("https://other.supabase.co".into()),
            ENV_BIND => Some("0.0.0.0:9000".into()),
            // blank values are ignored
            ENV_SUPABASE_ANON_KEY => Some("  ".into()),
            _ => None,
        });

        assert_eq!(config.server.bind, "0.0.0.0:9000");
        let client = config.client_config().unwrap();
        assert_eq!(client.supabase_url, "https://other.supabase.co");
        assert_eq!(client.supabase_anon_key, "anon-key");
    }

    #[test]
    fn test_missing_or_invalid_credentials_are_errors() {
        let empty = Config::default().with_overrides(no_env);
        assert_eq!(empty.client_config(), Err(ConfigError::MissingUrl));

        let no_scheme = Config::default().with_overrides(|key| match key {
            ENV_SUPABASE_URL => Some("demo.supabase.co".into()),
            ENV_SUPABASE_ANON_KEY => Some("k".into()),
            _ => None,
        });
        assert!(matches!(no_scheme.client_config(), Err(ConfigError::InvalidUrl(_))));
    }
}
