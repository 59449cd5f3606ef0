use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;

use crate::state::AppState;

use super::handlers;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/generate", post(handlers::generate_video));
    with_middleware(routes, state)
}

/// Wraps `routes` in the panic, tracing, timeout, CORS and compression layers.
pub fn with_middleware(routes: Router<AppState>, state: AppState) -> Router {
    let request_timeout = state.config.request_timeout;

    routes
        .layer(CatchPanicLayer::custom(handlers::handle_panic))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(
                            DefaultOnResponse::new()
                                .latency_unit(LatencyUnit::Millis)
                                .level(Level::DEBUG),
                        )
                        .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
                )
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                ))
                .layer(CorsLayer::permissive())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
