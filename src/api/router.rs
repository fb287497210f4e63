use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/health", get(handlers::health::health_check))
        // Base positions
        .route(
            "/api/base-positions",
            get(handlers::base_positions::list).post(handlers::base_positions::create),
        )
        .route(
            "/api/base-positions/:id",
            get(handlers::base_positions::detail)
                .put(handlers::base_positions::update)
                .delete(handlers::base_positions::remove),
        )
        // Option legs
        .route(
            "/api/options",
            get(handlers::options::list).post(handlers::options::create),
        )
        .route(
            "/api/options/:id",
            get(handlers::options::detail)
                .put(handlers::options::update)
                .delete(handlers::options::remove),
        )
        // Stock legs
        .route(
            "/api/stocks",
            get(handlers::stocks::list).post(handlers::stocks::create),
        )
        .route(
            "/api/stocks/:id",
            get(handlers::stocks::detail)
                .put(handlers::stocks::update)
                .delete(handlers::stocks::remove),
        )
        // Dashboard
        .route("/api/dashboard/overview", get(handlers::dashboard::overview))
        .route("/metrics", get(handlers::metrics::render));

    // The dashboard UI is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api.fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
