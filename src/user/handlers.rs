use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::{parse_user_id, UserService},
    types::{CreateUserRequest, LoginRequest, LoginResponse, UserResponse},
};
use crate::auth::AuthenticatedUser;
use crate::shared::{AppError, AppState, ValidatedJson};

fn service(state: &AppState) -> UserService {
    UserService::new(
        Arc::clone(&state.user_repository),
        state.token_service.clone(),
    )
}

/// HTTP handler for creating a new account
///
/// POST /users
/// Returns the created record with its store-assigned id
#[instrument(name = "create_user", skip(state, request))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    info!(username = %request.username, "Creating new user");

    let user = service(&state).create_user(request).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// HTTP handler for username/password login
///
/// POST /users/login
/// Returns a bearer token valid for one hour
#[instrument(name = "login", skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    info!(username = %request.username, "Login requested");

    let response = service(&state).login(request).await?;

    Ok(Json(response))
}

/// GET /users/:id
///
/// A path segment axum cannot decode is reported like any other bad id.
#[instrument(name = "get_user", skip(state, path))]
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let Path(id) = path.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let id = parse_user_id(&id)?;
    let user = service(&state).get_user(id).await?;

    Ok(Json(user))
}

/// GET /users/me - requires the auth middleware
#[instrument(name = "current_user", skip(state, user), fields(user_id = %user.user_id))]
pub async fn current_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<UserResponse>, AppError> {
    let user = service(&state).get_user(user.user_id).await?;

    Ok(Json(user))
}
