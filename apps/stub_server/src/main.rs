//! Local stand-in for the scrape collaborator. Replays canned review pages
//! from a fixtures file so the clients can run without the real backend.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use shared::protocol::{ScrapeRequest, ScrapeResponse, SCRAPE_PATH};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

mod config;
mod fixtures;

use config::load_settings;
use fixtures::FixtureSet;

const MAX_REQUEST_BYTES: usize = 16 * 1024;

struct AppState {
    fixtures: FixtureSet,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let fixtures = FixtureSet::load(&settings.fixtures_path)?;
    info!(
        path = %settings.fixtures_path.display(),
        colleges = fixtures.college_count(),
        "fixtures loaded"
    );

    let app = build_router(Arc::new(AppState { fixtures }));
    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(%addr, "stub scrape server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(SCRAPE_PATH, post(scrape))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BYTES))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn scrape(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScrapeRequest>,
) -> (StatusCode, Json<ScrapeResponse>) {
    let (page, college_id) = match parse_target(&req.url) {
        Ok(target) => target,
        Err(message) => {
            warn!(url = %req.url, %message, "rejecting scrape request");
            return (StatusCode::BAD_REQUEST, Json(ScrapeResponse::failure(message)));
        }
    };

    match state.fixtures.page(&college_id, req.review_type, page) {
        Some(content) => {
            info!(
                %college_id,
                review_type = %req.review_type,
                page,
                items = content.len(),
                "serving fixture page"
            );
            (StatusCode::OK, Json(ScrapeResponse::page(content)))
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(ScrapeResponse::failure(format!("Unknown college {college_id}"))),
        ),
    }
}

/// Pulls `page` and `college_id` out of the review listing url.
fn parse_target(raw: &str) -> Result<(u32, String), String> {
    let url = Url::parse(raw).map_err(|err| format!("Invalid url: {err}"))?;
    let mut page = None;
    let mut college_id = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "page" => page = Some(value.into_owned()),
            "college_id" => college_id = Some(value.into_owned()),
            _ => {}
        }
    }

    let page = page
        .ok_or_else(|| "Missing page parameter".to_string())?
        .parse::<u32>()
        .ok()
        .filter(|page| *page >= 1)
        .ok_or_else(|| "Page must be a positive integer".to_string())?;
    let college_id = college_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| "Missing college_id parameter".to_string())?;
    Ok((page, college_id))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
