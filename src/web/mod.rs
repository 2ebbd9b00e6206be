// src/web/mod.rs
// =============================================================================
// HTTP server: the index page plus health and probe endpoints.
//
// Routes:
//   GET /               index page with the latest questions
//   GET /health         liveness, always "OK"
//   GET /probe?url=     reachability report for one URL (JSON)
//   GET /probe/advice?url=   https vs http advice for one URL (JSON)
//
// Submodules:
// - render: page templates
// - index: the index page handler
// - probe: health and probe handlers
// =============================================================================

mod index;
mod probe;
mod render;

use crate::probe::{ProbeError, Prober};
use crate::questions::QuestionSource;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tokio::net::TcpListener;

pub use render::RenderError;

/// Shared handler state. Cloning is cheap (Arcs only).
#[derive(Clone)]
pub struct AppState {
    pub prober: Arc<Prober>,
    pub questions: Arc<dyn QuestionSource>,
    pub latest_limit: usize,
}

/// Errors a handler can return, mapped to a status and a JSON body.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<ProbeError> for ApiError {
    fn from(error: ProbeError) -> Self {
        if error.is_transport() {
            ApiError::Internal(error.to_string())
        } else {
            ApiError::BadRequest(error.to_string())
        }
    }
}

impl From<RenderError> for ApiError {
    fn from(error: RenderError) -> Self {
        ApiError::Internal(error.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::Internal(error.to_string())
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index))
        .route("/health", get(probe::health))
        .route("/probe", get(probe::probe_url))
        .route("/probe/advice", get(probe::scheme_advice))
        .with_state(state)
}

/// Serves until Ctrl+C.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "HTTP server starting");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "could not listen for Ctrl+C");
        // Without a signal handler there is nothing to wait for
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
