//! Routes and handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::error::ReviewError;
use crate::models::{PageIndex, ReviewAction};
use crate::review::{ReviewService, SAVED_MESSAGE};

/// Query parameters for the page endpoint.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<PageIndex>,
}

/// Build the router.
pub fn create_router(service: ReviewService) -> Router {
    let state = Arc::new(service);

    Router::new()
        .route("/", get(handle_page))
        .route("/welcome", get(handle_welcome))
        .route("/save-doi", get(handle_save_query).post(handle_save_json))
        .route("/verdicts", get(handle_verdicts))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn handle_page(
    State(service): State<Arc<ReviewService>>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    let view = match query.page {
        Some(page) => service.page_view(page).await,
        None => service.landing_view().await,
    };
    Json(view)
}

async fn handle_welcome(State(service): State<Arc<ReviewService>>) -> impl IntoResponse {
    Json(service.landing_view().await)
}

async fn handle_save_query(
    State(service): State<Arc<ReviewService>>,
    Query(action): Query<ReviewAction>,
) -> Response {
    save(&service, action).await
}

async fn handle_save_json(
    State(service): State<Arc<ReviewService>>,
    Json(action): Json<ReviewAction>,
) -> Response {
    save(&service, action).await
}

async fn save(service: &ReviewService, action: ReviewAction) -> Response {
    match service.submit(action).await {
        Ok(saved) => Json(json!({
            "status": "saved",
            "message": SAVED_MESSAGE,
            "partition": saved.partition,
            "publication_id": saved.publication_id,
            "doi": saved.doi
        }))
        .into_response(),
        Err(e) => review_error_response(&e),
    }
}

fn review_error_response(error: &ReviewError) -> Response {
    let status = match error {
        ReviewError::MissingParameters => StatusCode::BAD_REQUEST,
        ReviewError::Store(e) => {
            tracing::error!(error = %e, "Failed to record verdict");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": error.to_user_message() }))).into_response()
}

async fn handle_verdicts(State(service): State<Arc<ReviewService>>) -> impl IntoResponse {
    Json(service.stats().await)
}
