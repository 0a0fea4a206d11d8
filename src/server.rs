//! HTTP surface: scrape endpoints, health check, JSON 404 fallback.
//!
//! Every scrape route goes through the single [`serve_scrape`] responder;
//! registering a new source is a one-line route addition. CORS is wide
//! open: the tracker UI calls these endpoints from the browser.

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::extract::{ExtractionResult, SourceProfile};
use crate::fetch::PageFetcher;
use crate::scrape;

/// Shared state for all route handlers. Profiles are immutable and the
/// fetcher keeps no per-request state, so no locking is needed.
pub struct ScraperState {
    pub fetcher: Box<dyn PageFetcher>,
    pub silver: SourceProfile,
    pub gold: SourceProfile,
}

pub type AppState = Arc<ScraperState>;

#[derive(Debug, Clone, Serialize)]
pub struct PriceResponse {
    pub price: u64,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin("*".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/scrape-silver", get(scrape_silver))
        .route("/api/scrape-gold", get(scrape_gold))
        .route("/api/health", get(health))
        .fallback(api_not_found)
        .layer(cors)
        .with_state(state)
}

/// GET /api/scrape-silver
async fn scrape_silver(State(state): State<AppState>) -> Response {
    serve_scrape(&state, &state.silver).await
}

/// GET /api/scrape-gold
async fn scrape_gold(State(state): State<AppState>) -> Response {
    serve_scrape(&state, &state.gold).await
}

/// The shared responder: one scrape, mapped to 200/404/500.
async fn serve_scrape(state: &ScraperState, profile: &SourceProfile) -> Response {
    info!(source = profile.name, "Scraping request received");

    match scrape::scrape(state.fetcher.as_ref(), profile).await {
        ExtractionResult::Found(price) => {
            info!(source = profile.name, price, "Price extracted");
            Json(PriceResponse {
                price,
                success: true,
            })
            .into_response()
        }
        ExtractionResult::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Could not find {} price on page", profile.name),
                success: false,
            }),
        )
            .into_response(),
        ExtractionResult::FetchError(message) => {
            error!(source = profile.name, error = %message, "Scraping error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: message,
                    success: false,
                }),
            )
                .into_response()
        }
    }
}

/// GET /api/health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

async fn api_not_found(uri: Uri) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("API route not found: {uri}"),
            success: false,
        }),
    )
}
