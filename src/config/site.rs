//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors that callers may want to report specifically
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingEnv(String),
}

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,

    // URL
    pub url: String,

    // Directory
    pub content_dir: String,
    pub static_dir: String,

    // Remote content
    #[serde(default)]
    pub google_docs: GoogleDocsConfig,

    // CMS login
    #[serde(default)]
    pub oauth: OAuthConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Academic Portfolio".to_string(),
            author: String::new(),

            url: "http://localhost:8888".to_string(),

            content_dir: "content/pages".to_string(),
            static_dir: "public".to_string(),

            google_docs: GoogleDocsConfig::default(),
            oauth: OAuthConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Join a base URL and a path without doubling the slash
///
/// # Examples
/// ```ignore
/// join_url("https://example.com/", "/.netlify/functions/auth") // -> "https://example.com/.netlify/functions/auth"
/// ```
fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Google Docs remote content configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleDocsConfig {
    /// Plain-text export URL, `{id}` is replaced by the document id
    pub export_url: String,
    /// Embeddable preview URL, `{id}` is replaced by the document id
    pub embed_url: String,
    pub timeout_secs: u64,
}

impl Default for GoogleDocsConfig {
    fn default() -> Self {
        Self {
            export_url: "https://docs.google.com/document/d/{id}/export?format=txt".to_string(),
            embed_url: "https://docs.google.com/document/d/{id}/preview".to_string(),
            timeout_secs: 10,
        }
    }
}

/// OAuth provider configuration
///
/// Credentials are never read from the file, only the names of the
/// environment variables holding them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthConfig {
    pub provider: String,
    pub authorize_url: String,
    pub token_url: String,
    pub scope: String,
    pub function_path: String,
    pub client_id_env: String,
    pub client_secret_env: String,
    pub base_url_env: String,
    /// Transport timeout for the token exchange
    pub timeout_secs: u64,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            provider: "github".to_string(),
            authorize_url: "https://github.com/login/oauth/authorize".to_string(),
            token_url: "https://github.com/login/oauth/access_token".to_string(),
            scope: "repo,user".to_string(),
            function_path: "/.netlify/functions/auth".to_string(),
            client_id_env: "GITHUB_CLIENT_ID".to_string(),
            client_secret_env: "GITHUB_CLIENT_SECRET".to_string(),
            base_url_env: "URL".to_string(),
            timeout_secs: 10,
        }
    }
}

/// OAuth settings with credentials resolved from the environment
#[derive(Clone)]
pub struct OAuthSettings {
    pub provider: String,
    pub client_id: String,
    pub client_secret: String,
    /// Must match the callback registered with the provider
    pub redirect_uri: String,
    pub authorize_url: String,
    pub token_url: String,
    pub scope: String,
    pub timeout_secs: u64,
}

impl fmt::Debug for OAuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthSettings")
            .field("provider", &self.provider)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("authorize_url", &self.authorize_url)
            .field("token_url", &self.token_url)
            .field("scope", &self.scope)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl OAuthSettings {
    /// Resolve settings from the process environment
    pub fn from_env(config: &SiteConfig) -> Result<Self, ConfigError> {
        Self::resolve(config, |name| std::env::var(name).ok())
    }

    /// Resolve settings using `lookup` for environment variables
    pub fn resolve<F>(config: &SiteConfig, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let oauth = &config.oauth;
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingEnv(name.to_string()))
        };

        let client_id = required(&oauth.client_id_env)?;
        let client_secret = required(&oauth.client_secret_env)?;

        let base_url = lookup(&oauth.base_url_env)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| config.url.clone());

        Ok(Self {
            provider: oauth.provider.clone(),
            client_id,
            client_secret,
            redirect_uri: join_url(&base_url, &oauth.function_path),
            authorize_url: oauth.authorize_url.clone(),
            token_url: oauth.token_url.clone(),
            scope: oauth.scope.clone(),
            timeout_secs: oauth.timeout_secs,
        })
    }
}
