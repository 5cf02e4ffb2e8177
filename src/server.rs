use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{info, warn};
use serde::Serialize;
use serde_json::json;

use crate::error::GenerateError;
use crate::generator::{GenerationRequest, PromptGenerator};
use crate::registry;

const INDEX_HTML: &str = include_str!("static/index.html");

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<PromptGenerator>,
}

impl AppState {
    pub fn new(generator: PromptGenerator) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }
}

/// Successful body of `POST /api/generate`
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub prompt: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/templates", get(templates))
        .route("/api/generate", post(generate))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "provider": state.generator.provider_name(),
    }))
}

async fn templates() -> Json<registry::Catalogue> {
    Json(registry::catalogue())
}

/// Credential check runs before the body is looked at, so a missing key
/// is reported even for a malformed request.
async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Response {
    let provider = match state.generator.provider() {
        Ok(provider) => provider,
        Err(e) => return e.into_response(),
    };

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Rejected generation request body: {}", rejection.body_text());
            let e = match rejection {
                JsonRejection::MissingJsonContentType(_) => GenerateError::UnsupportedContentType,
                other => GenerateError::MalformedBody(other.body_text()),
            };
            return e.into_response();
        }
    };

    match state.generator.generate_with(provider, &request).await {
        Ok(prompt) => Json(GenerateResponse { prompt }).into_response(),
        Err(e) => {
            if !matches!(e, GenerateError::Provider(_)) {
                info!("Generation request refused: {}", e);
            }
            e.into_response()
        }
    }
}

/// Resolve when Ctrl+C is received
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
