//! HTTP adapter for the inference proxy.
//!
//! Exposes `GET /` as a liveness probe and `POST /analyze` as the single
//! query endpoint. Handlers depend on [`AdviceService`] only, so the router
//! can be driven with any implementation.

pub mod dto;
pub mod error;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use firstaid_core::AdviceService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared server state accessible from all handlers.
pub struct ServerState {
    pub advisor: Arc<dyn AdviceService>,
}

impl ServerState {
    pub fn new(advisor: Arc<dyn AdviceService>) -> Self {
        Self { advisor }
    }
}

/// Builds the application router with CORS and request tracing.
pub fn router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    Router::new()
        .route("/", get(handlers::status))
        .route("/analyze", post(handlers::analyze::analyze))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
