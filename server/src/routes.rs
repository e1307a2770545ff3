//! HTTP routing shell over the reconciler.
//!
//! Three endpoints, no business logic: a health check and the two run
//! triggers. Errors are flattened to a message string here; callers wanting
//! finer-grained handling must do it below this layer.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use megaverse_core::{ReconcileError, Reconciler};

pub type AppState = Arc<Reconciler>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/api/createmegaverse", post(create_megaverse))
        .route("/api/cleanmegaverse", delete(clean_megaverse))
        .with_state(state)
}

async fn ping() -> &'static str {
    "pong!"
}

async fn create_megaverse(State(reconciler): State<AppState>) -> Response {
    match reconciler.create_megaverse().await {
        Ok(data) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "data": data,
                "message": "megaverse created"
            })),
        )
            .into_response(),
        Err(error) => failure_response("failed to create megaverse", &error),
    }
}

async fn clean_megaverse(State(reconciler): State<AppState>) -> Response {
    match reconciler.clean_megaverse().await {
        Ok(data) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "data": data,
                "message": "megaverse cleaned"
            })),
        )
            .into_response(),
        // A failed clean run surfaces as an error status; it is never
        // logged-and-swallowed.
        Err(error) => failure_response("failed to clean megaverse", &error),
    }
}

fn failure_response(message: &'static str, error: &ReconcileError) -> Response {
    tracing::error!(%error, "{message}");
    // Existing tooling keys on the terse `e` field name.
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "message": message,
            "e": error.to_string()
        })),
    )
        .into_response()
}
