use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument, warn};

use super::types::AuthenticatedUser;
use crate::shared::{AppError, AppState};

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
/// Returns `None` for any other scheme or an empty token segment.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Bearer authentication middleware - verifies the token and adds AuthenticatedUser to the request.
/// Usage: .route_layer(middleware::from_fn_with_state(app_state.clone(), auth::require_auth))
/// Handlers can then extract Extension(user): Extension<AuthenticatedUser>.
///
/// A missing or malformed header is rejected with 403, a token that fails
/// verification with 401.
#[instrument(skip(state, req, next), fields(path = %req.uri().path()))]
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| {
            warn!("Missing or malformed Authorization header");
            AppError::Unauthenticated("No token provided".to_string())
        })?;

    let user_id = state.token_service.verify(token).map_err(|e| {
        warn!(reason = %e, "Bearer token rejected");
        AppError::from(e)
    })?;

    debug!(user_id = %user_id, "Authentication successful, adding identity to request");

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}
