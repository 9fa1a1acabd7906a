use super::dto::{
    AggregateFailureResponse, AnalyzeRequest, AnalyzeResponse, ErrorResponse, HealthResponse,
    InternalErrorResponse,
};
use super::routes;
use crate::application::ProviderStatus;
use crate::domain::types::{AttemptFailure, ProviderId};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(routes::analyze::analyze_handler, routes::health::health_handler),
    components(schemas(
        AnalyzeRequest,
        AnalyzeResponse,
        ErrorResponse,
        AggregateFailureResponse,
        InternalErrorResponse,
        HealthResponse,
        ProviderStatus,
        AttemptFailure,
        ProviderId
    )),
    tags(
        (name = "analysis", description = "Prompt analysis with provider fallback"),
        (name = "health", description = "Service and provider registry status")
    )
)]
pub(super) struct ApiDoc;
