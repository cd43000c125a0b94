//! Application router shared by the binary and the integration tests.

use std::any::Any;

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::auth;
use crate::shared::{AppError, AppState, INTERNAL_ERROR_MESSAGE};
use crate::user;

/// Build the full application router.
///
/// Routes needing an identity go in the protected group, which carries the
/// auth middleware as a `route_layer`; nothing is gated by registration order.
pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/users", post(user::create_user))
        .route("/users/login", post(user::login))
        .route("/users/:id", get(user::get_user));

    let protected = Router::new()
        .route("/users/me", get(user::current_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        // Last-resort boundary: a panicking handler still yields a JSON 500
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "message": "Method not allowed" })),
    )
        .into_response()
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    error!(panic = %detail, "Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": INTERNAL_ERROR_MESSAGE })),
    )
        .into_response()
}
