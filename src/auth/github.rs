//! GitHub OAuth exchange handler

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use super::handoff::{handoff_html, TokenPayload};
use crate::config::OAuthSettings;

/// Characters left unescaped in query values (RFC 3986 unreserved)
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("token request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("token endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("token endpoint returned invalid JSON: {0}")]
    Decode(String),

    #[error("provider rejected the code: {error}: {description}")]
    Provider { error: String, description: String },

    #[error("token endpoint response has no access_token")]
    MissingToken,
}

/// Raw JSON response from the token endpoint
///
/// GitHub answers HTTP 200 with an `error` field when the code is bad.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Outcome of one handler invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResponse {
    /// 302 to the provider's authorize page
    Redirect { location: String },
    /// 200 page handing the token to the opener window
    Handoff { html: String },
    /// 500 with a JSON error body
    Failure { error: String, details: String },
}

impl AuthResponse {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthResponse::Redirect { .. } => StatusCode::FOUND,
            AuthResponse::Handoff { .. } => StatusCode::OK,
            AuthResponse::Failure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthResponse {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response = match self {
            AuthResponse::Redirect { location } => match HeaderValue::from_str(&location) {
                Ok(value) => (status, [(header::LOCATION, value)]).into_response(),
                Err(e) => {
                    return AuthResponse::Failure {
                        error: "Invalid authorization URL".to_string(),
                        details: e.to_string(),
                    }
                    .into_response()
                }
            },
            AuthResponse::Handoff { html } => (
                status,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                html,
            )
                .into_response(),
            AuthResponse::Failure { error, details } => (
                status,
                Json(serde_json::json!({ "error": error, "details": details })),
            )
                .into_response(),
        };

        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        response
    }
}

/// GitHub OAuth client for the CMS login pop-up
#[derive(Debug, Clone)]
pub struct GitHubAuth {
    settings: OAuthSettings,
    http: reqwest::Client,
}

impl GitHubAuth {
    pub fn new(settings: OAuthSettings) -> Result<Self, ExchangeError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self { settings, http })
    }

    /// Provider authorize URL with client id, redirect URI and scope
    pub fn authorize_url(&self) -> String {
        let settings = &self.settings;
        let separator = if settings.authorize_url.contains('?') {
            '&'
        } else {
            '?'
        };

        format!(
            "{}{}client_id={}&redirect_uri={}&scope={}",
            settings.authorize_url,
            separator,
            utf8_percent_encode(&settings.client_id, QUERY_VALUE),
            utf8_percent_encode(&settings.redirect_uri, QUERY_VALUE),
            utf8_percent_encode(&settings.scope, QUERY_VALUE),
        )
    }

    /// Exchange an authorization code for an access token
    pub async fn exchange_code(&self, code: &str) -> Result<String, ExchangeError> {
        let settings = &self.settings;
        let body = serde_json::json!({
            "client_id": settings.client_id,
            "client_secret": settings.client_secret,
            "code": code,
            "redirect_uri": settings.redirect_uri,
        });

        let response = self
            .http
            .post(&settings.token_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ExchangeError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: TokenResponse =
            serde_json::from_str(&text).map_err(|e| ExchangeError::Decode(e.to_string()))?;

        if let Some(error) = parsed.error {
            return Err(ExchangeError::Provider {
                error,
                description: parsed.error_description.unwrap_or_default(),
            });
        }

        parsed
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or(ExchangeError::MissingToken)
    }

    /// Handle one request to the auth endpoint
    pub async fn handle(&self, code: Option<&str>) -> AuthResponse {
        let code = code.map(str::trim).filter(|c| !c.is_empty());

        let Some(code) = code else {
            tracing::info!(
                "No authorization code, redirecting to {}",
                self.settings.provider
            );
            return AuthResponse::Redirect {
                location: self.authorize_url(),
            };
        };

        match self.exchange_code(code).await {
            Ok(token) => {
                tracing::info!(
                    "Exchanged authorization code for a {} token",
                    self.settings.provider
                );
                AuthResponse::Handoff {
                    html: handoff_html(&TokenPayload {
                        token,
                        provider: self.settings.provider.clone(),
                    }),
                }
            }
            Err(e) => {
                tracing::error!("OAuth token exchange failed: {}", e);
                AuthResponse::Failure {
                    error: "Failed to exchange authorization code".to_string(),
                    details: e.to_string(),
                }
            }
        }
    }
}

/// The auth route as mounted by the server
///
/// Missing credentials must not take the site down, so the route stays
/// mounted and reports the problem instead.
#[derive(Debug, Clone)]
pub enum AuthEndpoint {
    Ready(GitHubAuth),
    Unconfigured(String),
}

impl AuthEndpoint {
    pub async fn handle(&self, code: Option<&str>) -> AuthResponse {
        match self {
            AuthEndpoint::Ready(auth) => auth.handle(code).await,
            AuthEndpoint::Unconfigured(reason) => AuthResponse::Failure {
                error: "OAuth is not configured".to_string(),
                details: reason.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> OAuthSettings {
        OAuthSettings {
            provider: "github".to_string(),
            client_id: "client-123".to_string(),
            client_secret: "shh".to_string(),
            redirect_uri: "https://site.example/.netlify/functions/auth".to_string(),
            authorize_url: "https://github.com/login/oauth/authorize".to_string(),
            token_url: "https://github.com/login/oauth/access_token".to_string(),
            scope: "repo,user".to_string(),
            timeout_secs: 10,
        }
    }

    #[test]
    fn test_authorize_url() {
        let auth = GitHubAuth::new(settings()).unwrap();
        assert_eq!(
            auth.authorize_url(),
            "https://github.com/login/oauth/authorize?client_id=client-123\
             &redirect_uri=https%3A%2F%2Fsite.example%2F.netlify%2Ffunctions%2Fauth\
             &scope=repo%2Cuser"
        );
    }

    #[tokio::test]
    async fn test_blank_code_redirects() {
        let auth = GitHubAuth::new(settings()).unwrap();
        let response = auth.handle(Some("  ")).await;
        assert!(matches!(response, AuthResponse::Redirect { .. }));
        assert_eq!(response.status(), StatusCode::FOUND);
    }

    #[tokio::test]
    async fn test_unconfigured_endpoint() {
        let endpoint = AuthEndpoint::Unconfigured("GITHUB_CLIENT_ID is not set".to_string());
        let response = endpoint.handle(Some("abc123")).await;
        assert_eq!(
            response,
            AuthResponse::Failure {
                error: "OAuth is not configured".to_string(),
                details: "GITHUB_CLIENT_ID is not set".to_string(),
            }
        );
    }

    #[test]
    fn test_failure_response_is_json() {
        let response = AuthResponse::Failure {
            error: "e".to_string(),
            details: "d".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    }
}
