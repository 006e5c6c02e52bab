//! HTTP server - page API, rendered pages and the CMS login endpoint

pub mod html;

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::auth::{AuthEndpoint, GitHubAuth};
use crate::config::{OAuthSettings, SiteConfig};
use crate::content::{MarkdownRenderer, PageLoader, PageSlug};
use crate::Portfolio;

/// Shared, read-only server state
pub struct AppState {
    pub config: SiteConfig,
    pub loader: PageLoader,
    pub auth: AuthEndpoint,
    pub renderer: MarkdownRenderer,
    pub static_dir: std::path::PathBuf,
}

impl AppState {
    /// Build state from a site, resolving OAuth credentials from the environment
    pub fn from_portfolio(portfolio: &Portfolio) -> Result<Self> {
        let auth = match OAuthSettings::from_env(&portfolio.config) {
            Ok(settings) => {
                tracing::info!("OAuth redirect URI: {}", settings.redirect_uri);
                match GitHubAuth::new(settings) {
                    Ok(auth) => AuthEndpoint::Ready(auth),
                    Err(e) => {
                        tracing::warn!("CMS login disabled: {}", e);
                        AuthEndpoint::Unconfigured(e.to_string())
                    }
                }
            }
            Err(e) => {
                tracing::warn!("CMS login disabled: {}", e);
                AuthEndpoint::Unconfigured(e.to_string())
            }
        };

        Ok(Self {
            config: portfolio.config.clone(),
            loader: portfolio.page_loader()?,
            auth,
            renderer: MarkdownRenderer::new(),
            static_dir: portfolio.static_dir.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
struct PageSummary {
    slug: PageSlug,
    title: &'static str,
    available: bool,
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let auth_path = format!("/{}", state.config.oauth.function_path.trim_start_matches('/'));
    let assets = ServeDir::new(&state.static_dir);

    Router::new()
        .route(&auth_path, any(auth_handler))
        .route("/api/pages", get(list_pages))
        .route("/api/pages/:slug", get(page_json))
        .route("/", get(home_page))
        .route("/:slug", get(html_page))
        .nest_service("/assets", assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(portfolio: &Portfolio, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::from_portfolio(portfolio)?);
    let auth_path = state.config.oauth.function_path.clone();
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("CMS login endpoint: {}", auth_path);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Every request is classified by the first `code` value alone; a query
/// string that fails to decode counts as having no code
async fn auth_handler(
    State(state): State<Arc<AppState>>,
    query: Option<Query<Vec<(String, String)>>>,
) -> Response {
    let params = query.map(|Query(params)| params).unwrap_or_default();
    let code = params
        .iter()
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.as_str());

    state.auth.handle(code).await.into_response()
}

async fn list_pages(State(state): State<Arc<AppState>>) -> Json<Vec<PageSummary>> {
    let index = state.loader.index();
    let pages = PageSlug::ALL
        .into_iter()
        .map(|slug| PageSummary {
            slug,
            title: slug.default_title(),
            available: index.lookup(slug).is_some(),
        })
        .collect();
    Json(pages)
}

fn json_error(status: StatusCode, error: &str, details: String) -> Response {
    (
        status,
        Json(serde_json::json!({ "error": error, "details": details })),
    )
        .into_response()
}

async fn page_json(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    match state.loader.load_page(&slug).await {
        Ok(Some(page)) => Json(page).into_response(),
        Ok(None) => json_error(StatusCode::NOT_FOUND, "not found", slug),
        Err(e) => {
            tracing::error!("Failed to load page {}: {}", slug, e);
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to load page",
                e.to_string(),
            )
        }
    }
}

async fn home_page(State(state): State<Arc<AppState>>) -> Response {
    render(&state, PageSlug::Home).await
}

async fn html_page(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    match slug.parse::<PageSlug>() {
        Ok(page) => render(&state, page).await,
        Err(_) => (StatusCode::NOT_FOUND, Html("<h1>Not found</h1>")).into_response(),
    }
}

async fn render(state: &AppState, page: PageSlug) -> Response {
    match state.loader.load(page).await {
        Ok(Some(loaded)) => Html(html::render_page(
            &state.config,
            &state.renderer,
            page,
            &loaded,
        ))
        .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Html(html::render_missing(&state.config, page)),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to load page {}: {}", page, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}
