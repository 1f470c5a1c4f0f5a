//! # Routes
//!
//! Axum router configuration for the server-driven Terminal API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - API:
///   - GET  /list-readers
///   - POST /create-payment-intent
///   - GET  /retrieve-payment-intent?payment_intent_id=
///   - POST /process-payment-intent
///   - POST /simulate-payment
///   - GET  /retrieve-reader?reader_id=
///   - POST /capture-payment-intent
///   - POST /cancel-reader-action
///
/// - Ambient:
///   - GET /health
///
/// - Static client (from `STATIC_DIR`):
///   - GET /        - index.html
///   - GET /reader  - reader.html
///   - GET /*       - any other file
pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    let static_files = ServeDir::new(&static_dir);
    let reader_page = ServeFile::new(static_dir.join("reader.html"));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    api_routes()
        .route("/health", get(handlers::health))
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .route_service("/reader", reader_page)
        .fallback_service(static_files)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// The JSON routes on their own, without static files or middleware
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/list-readers", get(handlers::list_readers))
        .route("/create-payment-intent", post(handlers::create_payment_intent))
        .route("/retrieve-payment-intent", get(handlers::retrieve_payment_intent))
        .route("/process-payment-intent", post(handlers::process_payment_intent))
        .route("/simulate-payment", post(handlers::simulate_payment))
        .route("/retrieve-reader", get(handlers::retrieve_reader))
        .route("/capture-payment-intent", post(handlers::capture_payment_intent))
        .route("/cancel-reader-action", post(handlers::cancel_reader_action))
}
