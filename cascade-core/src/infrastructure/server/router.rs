use super::docs::ApiDoc;
use super::dto::MAX_BODY_BYTES;
use super::error::ServerError;
use super::routes;
use super::state::ServerState;
use crate::application::FallbackSequencer;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method};
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Router with every route, CORS and panic handling installed.
pub fn router(sequencer: Arc<FallbackSequencer>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ]);

    let state = Arc::new(ServerState::new(sequencer));
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .route(
            "/",
            post(routes::analyze::analyze_handler).options(routes::analyze::preflight_handler),
        )
        .route(
            "/analyze",
            post(routes::analyze::analyze_handler).options(routes::analyze::preflight_handler),
        )
        .route("/health", get(routes::health::health_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(routes::analyze::panic_response))
        .layer(cors)
}

pub async fn serve(sequencer: Arc<FallbackSequencer>, addr: SocketAddr) -> Result<(), ServerError> {
    info!(%addr, "Binding REST server");
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    serve_listener(listener, sequencer).await
}

/// Serve on an already bound listener.
pub async fn serve_listener(
    listener: TcpListener,
    sequencer: Arc<FallbackSequencer>,
) -> Result<(), ServerError> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "REST server ready to accept connections");
    }
    axum::serve(listener, router(sequencer).into_make_service())
        .await
        .map_err(ServerError::Serve)
}
