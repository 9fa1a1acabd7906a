use crate::application::ProviderStatus;
use crate::domain::types::{AttemptFailure, ProviderId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const VALIDATION_MESSAGE: &str = "Missing 'prompt' string in body";
pub const ALL_FAILED_MESSAGE: &str = "All providers failed";
pub const UNEXPECTED_MESSAGE: &str = "Unexpected error";

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Inbound body. Parsed by hand so malformed bodies still get a JSON reply.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    pub provider: ProviderId,
    pub text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AggregateFailureResponse {
    pub error: String,
    pub attempts: Vec<AttemptFailure>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InternalErrorResponse {
    pub error: String,
    pub details: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub providers: Vec<ProviderStatus>,
}
