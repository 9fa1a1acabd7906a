use super::super::dto::{
    ALL_FAILED_MESSAGE, AggregateFailureResponse, AnalyzeRequest, AnalyzeResponse, ErrorResponse,
    InternalErrorResponse, VALIDATION_MESSAGE,
};
use super::super::state::ServerState;
use crate::domain::types::{AggregateResult, GenerationRequest, ValidationError};
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

#[utoipa::path(
    post,
    path = "/analyze",
    tag = "analysis",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "A provider produced an analysis", body = AnalyzeResponse),
        (status = 400, description = "Prompt missing, empty or not a string", body = ErrorResponse),
        (status = 413, description = "Body larger than the accepted limit", body = ErrorResponse),
        (status = 500, description = "Unexpected internal fault", body = InternalErrorResponse),
        (status = 502, description = "Every provider failed", body = AggregateFailureResponse)
    )
)]
pub async fn analyze_handler(
    State(state): State<Arc<ServerState>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(status = %rejection.status(), %rejection, "Could not read request body");
            return (
                rejection.status(),
                Json(ErrorResponse {
                    error: rejection.body_text(),
                }),
            )
                .into_response();
        }
    };

    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(rejection) => {
            error!(%rejection, bytes = body.len(), "Rejecting analyze request");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: VALIDATION_MESSAGE.to_string(),
                }),
            )
                .into_response();
        }
    };

    info!(chars = request.prompt().len(), "Received analyze request");

    match state.sequencer().run(&request).await {
        AggregateResult::Success { provider, text } => {
            (StatusCode::OK, Json(AnalyzeResponse { provider, text })).into_response()
        }
        AggregateResult::AllFailed { attempts } => {
            warn!(attempts = attempts.len(), "Returning aggregate failure");
            (
                StatusCode::BAD_GATEWAY,
                Json(AggregateFailureResponse {
                    error: ALL_FAILED_MESSAGE.to_string(),
                    attempts,
                }),
            )
                .into_response()
        }
    }
}

/// Answers bare `OPTIONS` requests; real CORS preflights are handled by the
/// CORS layer before reaching the router.
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

fn parse_request(body: &[u8]) -> Result<GenerationRequest, ValidationError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ValidationError)?;
    let prompt = value
        .get("prompt")
        .and_then(Value::as_str)
        .ok_or(ValidationError)?;
    GenerationRequest::new(prompt)
}

/// Turns a panic caught below the router into the structured 500 reply.
pub fn panic_response(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let details = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(details = details.as_str(), "Request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(InternalErrorResponse {
            error: super::super::dto::UNEXPECTED_MESSAGE.to_string(),
            details,
        }),
    )
        .into_response()
}
