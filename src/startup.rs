use axum::{routing::get, Json, Router};
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer, trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{handlers, middleware, openapi::ApiDoc};

pub fn build_router(state: Arc<crate::AppState>) -> Router {
    // Worker routes
    let worker_routes = Router::new().route(
        "/{id}/available_shifts",
        get(handlers::workers_handler::get_available_shifts),
    );

    Router::new()
        .route("/healthcheck", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .nest("/v1/workers", worker_routes)
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        // Applied bottom-up: panics are caught outermost
        .layer(axum::middleware::from_fn(middleware::metrics_middleware))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
