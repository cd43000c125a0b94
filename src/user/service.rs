use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    models::NewUser,
    repository::UserRepository,
    types::{CreateUserRequest, LoginRequest, LoginResponse, UserResponse},
};
use crate::auth::{password, TokenService};
use crate::shared::AppError;

/// Service for account business logic
pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
    token_service: TokenService,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepository + Send + Sync>,
        token_service: TokenService,
    ) -> Self {
        Self {
            repository,
            token_service,
        }
    }

    /// Hashes the password and persists a new account
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<UserResponse, AppError> {
        let password_hash = password::hash_password(request.password).await?;

        let user = self
            .repository
            .create_user(NewUser {
                username: request.username,
                email: request.email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User account created");
        Ok(UserResponse::from(user))
    }

    /// Checks credentials and issues a bearer token for the account
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = self
            .repository
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| {
                warn!("Login attempted for unknown username");
                AppError::NotFound("User not found".to_string())
            })?;

        if !password::verify_password(request.password, user.password_hash).await? {
            warn!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = self.token_service.issue(user.id)?;

        info!(user_id = %user.id, "Login successful, token issued");
        Ok(LoginResponse { token })
    }

    /// Fetches the public record of one account
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> Result<UserResponse, AppError> {
        self.repository
            .get_user(id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}

/// Parses a path segment into a user id, rejecting malformed values as client errors
pub fn parse_user_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::Validation(format!("Invalid user id: {raw}")))
}
