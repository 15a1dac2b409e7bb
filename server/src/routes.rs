//! Inbound HTTP surface.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    extract::{ConnectInfo, RawQuery, Request, State},
    http::{StatusCode, Uri},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use common::SearchQuery;
use tracing::{info, warn};
use url::form_urlencoded;

use crate::classify::classify;
use crate::config::Config;
use crate::render::render;
use crate::upstream::UpstreamClient;

const NOT_FOUND_PAGE: &str = "<h1>404 Not Found</h1>";

/// Shared application state
pub struct AppState {
    pub upstream: UpstreamClient,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(config: &Config, upstream: UpstreamClient) -> Self {
        Self {
            upstream,
            static_dir: config.static_dir.clone(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/search", get(search_handler))
        .fallback(fallback_handler)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Handler for GET / (welcome form)
async fn index_handler(State(state): State<Arc<AppState>>) -> Response {
    let path = state.static_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            not_found_handler().await
        }
    }
}

/// Handler for GET /search?keyword=<kw>&location_name=<loc>
async fn search_handler(State(state): State<Arc<AppState>>, RawQuery(raw): RawQuery) -> Response {
    run_search(&state, raw.as_deref()).await
}

/// Any path starting with `/search` is a search; everything else is a 404.
async fn fallback_handler(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    if uri.path().starts_with("/search") {
        run_search(&state, uri.query()).await
    } else {
        not_found_handler().await
    }
}

async fn run_search(state: &AppState, raw_query: Option<&str>) -> Response {
    let query = parse_search_query(raw_query.unwrap_or_default());
    info!(
        keyword = %query.keyword,
        location_name = %query.location_name,
        "Received search"
    );

    let outcome = state.upstream.fetch(&query).await;
    let page = render(&query, &classify(outcome));

    let status = StatusCode::from_u16(page.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Html(page.body)).into_response()
}

/// Reads the search terms from a query string. The first occurrence of a
/// repeated key wins; unknown keys are ignored.
pub fn parse_search_query(raw: &str) -> SearchQuery {
    let mut keyword = None;
    let mut location_name = None;
    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        match key.as_ref() {
            "keyword" if keyword.is_none() => keyword = Some(value.into_owned()),
            "location_name" if location_name.is_none() => {
                location_name = Some(value.into_owned())
            }
            _ => {}
        }
    }
    SearchQuery::new(keyword.unwrap_or_default(), location_name.unwrap_or_default())
}

async fn not_found_handler() -> Response {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response()
}

async fn log_request(request: Request, next: Next) -> Response {
    let remote = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    info!("New Request from {} for {}", remote, request.uri());
    next.run(request).await
}
