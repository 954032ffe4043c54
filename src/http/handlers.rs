use super::state::AppState;
use crate::languages::LANGUAGES;
use crate::translate::{ErrorResponse, TranslateRequest, TranslateResponse};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info, warn};

fn error_response(status: StatusCode, message: &str) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// POST /api/translate
/// Translate `text` into `target` through the upstream translator
pub async fn translate(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    // Unparseable bodies are treated as empty, which then fails validation
    let req: TranslateRequest = serde_json::from_slice(&body).unwrap_or_else(|e| {
        warn!("Ignoring unparseable translate body: {}", e);
        TranslateRequest::default()
    });

    let (text, target) = match (req.text, req.target) {
        (Some(text), Some(target)) if !text.is_empty() && !target.is_empty() => (text, target),
        _ => {
            return error_response(StatusCode::BAD_REQUEST, "Missing text or target language");
        }
    };

    info!("Translating {} chars to {}", text.len(), target);

    match state.translator.translate(&text, &target).await {
        Ok(translated_text) => (
            StatusCode::OK,
            Json(TranslateResponse { translated_text }),
        )
            .into_response(),
        Err(e) => {
            error!("Translation error: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Translation failed")
        }
    }
}

/// Any other method on /api/translate
pub async fn method_not_allowed() -> impl IntoResponse {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

/// GET /api/languages
/// Selectable recognition/translation languages
pub async fn list_languages() -> impl IntoResponse {
    (StatusCode::OK, Json(LANGUAGES))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
