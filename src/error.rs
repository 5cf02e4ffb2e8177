use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Message returned when the provider credential is not configured
pub const MISSING_API_KEY_MESSAGE: &str = "APIキーが設定されていません";
/// Message returned when the intent is missing or blank
pub const MISSING_INTENT_MESSAGE: &str = "内容を入力してください";
/// Message returned when the intent exceeds the configured limit
pub const INTENT_TOO_LONG_MESSAGE: &str = "入力内容が長すぎます";
/// Message returned when the body is not a JSON object
pub const MALFORMED_BODY_MESSAGE: &str = "リクエストの形式が正しくありません";
/// Message returned when the body is not sent as JSON
pub const UNSUPPORTED_CONTENT_TYPE_MESSAGE: &str =
    "Content-Typeにapplication/jsonを指定してください";
/// Generic message for any provider or runtime failure
pub const SERVER_ERROR_MESSAGE: &str = "サーバーエラーが発生しました";

/// Errors raised while talking to a chat-completion provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport failure, timeout or undecodable body
    #[error("Request to provider failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("Provider returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// Provider answered with JSON that is not a chat completion
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

/// Errors that can occur while generating a prompt
#[derive(Error, Debug)]
pub enum GenerateError {
    /// No provider credential is configured
    #[error("Provider API key is not configured")]
    MissingApiKey,

    /// Intent is absent, empty or whitespace-only
    #[error("Intent is missing or empty")]
    MissingIntent,

    /// Body is not valid JSON or has the wrong shape
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Body was sent without a JSON content type
    #[error("Request body is not declared as application/json")]
    UnsupportedContentType,

    /// Intent is longer than the configured maximum
    #[error("Intent is {len} characters long, the limit is {max}")]
    IntentTooLong { len: usize, max: usize },

    /// The provider call failed
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl GenerateError {
    /// HTTP status the endpoint answers with for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GenerateError::MissingIntent
            | GenerateError::IntentTooLong { .. }
            | GenerateError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            GenerateError::UnsupportedContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            GenerateError::MissingApiKey | GenerateError::Provider(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// User-facing text. Never includes provider details.
    pub fn user_message(&self) -> &'static str {
        match self {
            GenerateError::MissingApiKey => MISSING_API_KEY_MESSAGE,
            GenerateError::MissingIntent => MISSING_INTENT_MESSAGE,
            GenerateError::IntentTooLong { .. } => INTENT_TOO_LONG_MESSAGE,
            GenerateError::MalformedBody(_) => MALFORMED_BODY_MESSAGE,
            GenerateError::UnsupportedContentType => UNSUPPORTED_CONTENT_TYPE_MESSAGE,
            GenerateError::Provider(_) => SERVER_ERROR_MESSAGE,
        }
    }
}

/// JSON body of every failed endpoint response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for GenerateError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.user_message().to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
