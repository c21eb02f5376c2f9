//! Configuration loading for the Dida365 tools
//!
//! Configuration is loaded from:
//! 1. Environment variables (`DIDA365_*`, highest priority)
//! 2. Environment variable DIDA365_CONFIG_PATH
//! 3. ~/.dida365/config.toml
//! 4. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::credential::CredentialStore;
use crate::error::{Dida365Error, Result};
use crate::transport::Dida365Client;

/// Directory under the user's home that holds config and credential
pub const CONFIG_DIR_NAME: &str = ".dida365";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API endpoints
    #[serde(default)]
    pub api: ApiConfig,
    /// OAuth application settings
    #[serde(default)]
    pub oauth: OAuthConfig,
    /// Credential file location
    #[serde(default)]
    pub credentials: CredentialConfig,
}

/// Base URLs of the two API surfaces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base of the undocumented web-client API
    #[serde(default = "default_private_base_url")]
    pub private_base_url: String,
    /// Base of the documented open API (paths start with /open/v1)
    #[serde(default = "default_official_base_url")]
    pub official_base_url: String,
}

/// OAuth application registered with Dida365
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
    #[serde(default = "default_authorize_url")]
    pub authorize_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
}

/// Where the credential file lives
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialConfig {
    /// Explicit credential file path (default: ~/.dida365/token.json)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// Default value functions
fn default_private_base_url() -> String {
    "https://api.dida365.com/api/v2".to_string()
}

fn default_official_base_url() -> String {
    "https://api.dida365.com".to_string()
}

fn default_redirect_uri() -> String {
    "http://localhost:8080/callback".to_string()
}

fn default_authorize_url() -> String {
    "https://dida365.com/oauth/authorize".to_string()
}

fn default_token_url() -> String {
    "https://dida365.com/oauth/token".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            private_base_url: default_private_base_url(),
            official_base_url: default_official_base_url(),
        }
    }
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: default_redirect_uri(),
            authorize_url: default_authorize_url(),
            token_url: default_token_url(),
        }
    }
}

impl OAuthConfig {
    /// Both the client id and secret are present
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

impl Config {
    /// Load configuration from file or use defaults, then apply env overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_path() {
            Some(path) if path.exists() => {
                tracing::info!("Loading config from: {}", path.display());
                Self::load_from_path(&path)?
            }
            Some(_) => {
                tracing::debug!("Config file not found, using defaults");
                Self::default()
            }
            None => {
                tracing::debug!("No config path available, using defaults");
                Self::default()
            }
        };

        config.apply_env(|key| std::env::var(key).ok());

        if !config.oauth.is_configured() {
            tracing::warn!(
                "DIDA365_CLIENT_ID and/or DIDA365_CLIENT_SECRET not set; OAuth login is unavailable"
            );
        }

        Ok(config)
    }

    /// Parse a TOML config file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            Dida365Error::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Apply `DIDA365_*` overrides using the given variable lookup
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("DIDA365_CLIENT_ID") {
            self.oauth.client_id = v;
        }
        if let Some(v) = var("DIDA365_CLIENT_SECRET") {
            self.oauth.client_secret = v;
        }
        if let Some(v) = var("DIDA365_REDIRECT_URI") {
            self.oauth.redirect_uri = v;
        }
        if let Some(v) = var("DIDA365_API_URL") {
            self.api.private_base_url = v;
        }
        if let Some(v) = var("DIDA365_OPEN_API_URL") {
            self.api.official_base_url = v;
        }
        if let Some(v) = var("DIDA365_TOKEN_PATH") {
            self.credentials.path = Some(PathBuf::from(v));
        }
    }

    /// Credential store at the configured (or default) location
    pub fn credential_store(&self) -> Result<CredentialStore> {
        match &self.credentials.path {
            Some(path) => Ok(CredentialStore::new(path.clone())),
            None => CredentialStore::at_default_location(),
        }
    }

    /// HTTP client wired to the configured endpoints and credential store
    pub fn client(&self) -> Result<Dida365Client> {
        Dida365Client::new(self.api.clone(), self.credential_store()?)
    }

    /// Find the configuration file path
    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("DIDA365_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.private_base_url, "https://api.dida365.com/api/v2");
        assert_eq!(config.api.official_base_url, "https://api.dida365.com");
        assert_eq!(config.oauth.redirect_uri, "http://localhost:8080/callback");
        assert!(!config.oauth.is_configured());
        assert!(config.credentials.path.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [oauth]
            client_id = "abc"
            client_secret = "def"
            "#,
        )
        .unwrap();
        assert!(config.oauth.is_configured());
        assert_eq!(config.oauth.token_url, "https://dida365.com/oauth/token");
        assert_eq!(config.api.private_base_url, "https://api.dida365.com/api/v2");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("DIDA365_CLIENT_ID", "id"),
            ("DIDA365_API_URL", "http://localhost:9999"),
            ("DIDA365_TOKEN_PATH", "/tmp/token.json"),
        ]);
        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.oauth.client_id, "id");
        assert_eq!(config.api.private_base_url, "http://localhost:9999");
        assert_eq!(config.api.official_base_url, "https://api.dida365.com");
        assert_eq!(
            config.credentials.path,
            Some(PathBuf::from("/tmp/token.json"))
        );
    }

    #[test]
    fn test_load_from_path_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbroken").unwrap();
        assert!(matches!(
            Config::load_from_path(&path),
            Err(Dida365Error::Config(_))
        ));
    }
}
