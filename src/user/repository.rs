use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::models::{NewUser, UserModel};
use crate::shared::AppError;

const USERNAME_CONSTRAINT: &str = "users_username_key";
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Trait for user repository operations
///
/// Uniqueness of username and email is the store's responsibility; a
/// duplicate insert fails with `AppError::Validation` naming the field.
#[async_trait]
pub trait UserRepository {
    async fn create_user(&self, user: NewUser) -> Result<UserModel, AppError>;
    async fn get_user(&self, id: Uuid) -> Result<Option<UserModel>, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<UserModel>, AppError>;
}

/// In-memory implementation of UserRepository for development and testing
///
/// Data is lost when the process exits.
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, UserModel>>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the current number of users in the repository
    pub fn user_count(&self) -> Result<usize, AppError> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, UserModel>>, AppError> {
        self.users
            .lock()
            .map_err(|_| AppError::Internal("user store lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create_user(&self, user: NewUser) -> Result<UserModel, AppError> {
        debug!("Creating user in memory");

        // Check and insert under one lock so concurrent duplicates cannot both land
        let mut users = self.lock()?;
        if users.values().any(|u| u.username == user.username) {
            warn!("Username already exists in memory");
            return Err(AppError::Validation("username already exists".to_string()));
        }
        if users.values().any(|u| u.email == user.email) {
            warn!("Email already exists in memory");
            return Err(AppError::Validation("email already exists".to_string()));
        }

        let model = UserModel::from_new(user);
        users.insert(model.id, model.clone());

        debug!(user_id = %model.id, "User created successfully in memory");
        Ok(model)
    }

    #[instrument(skip(self))]
    async fn get_user(&self, id: Uuid) -> Result<Option<UserModel>, AppError> {
        let user = self.lock()?.get(&id).cloned();

        match &user {
            Some(u) => debug!(username = %u.username, "User found in memory"),
            None => debug!("User not found in memory"),
        }

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> Result<Option<UserModel>, AppError> {
        let user = self
            .lock()?
            .values()
            .find(|u| u.username == username)
            .cloned();

        debug!(found = user.is_some(), "Looked up user by username in memory");
        Ok(user)
    }
}

/// PostgreSQL implementation of user repository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Translates an insert failure, turning unique violations into client errors
fn map_insert_error(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &error {
        if db_err.is_unique_violation() {
            let reason = match db_err.constraint() {
                Some(USERNAME_CONSTRAINT) => "username already exists",
                Some(EMAIL_CONSTRAINT) => "email already exists",
                _ => "user already exists",
            };
            warn!(constraint = ?db_err.constraint(), "Unique constraint violated");
            return AppError::Validation(reason.to_string());
        }
    }

    warn!(error = %error, "Failed to create user in database");
    AppError::DatabaseError(error.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create_user(&self, user: NewUser) -> Result<UserModel, AppError> {
        debug!("Creating user in database");

        let model = sqlx::query_as::<_, UserModel>(
            "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) \
             RETURNING id, username, email, password_hash, created_at, updated_at",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        debug!(user_id = %model.id, "User created successfully in database");
        Ok(model)
    }

    #[instrument(skip(self))]
    async fn get_user(&self, id: Uuid) -> Result<Option<UserModel>, AppError> {
        debug!("Fetching user from database");

        sqlx::query_as::<_, UserModel>(
            "SELECT id, username, email, password_hash, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch user from database");
            AppError::DatabaseError(e.to_string())
        })
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> Result<Option<UserModel>, AppError> {
        debug!("Fetching user by username from database");

        sqlx::query_as::<_, UserModel>(
            "SELECT id, username, email, password_hash, created_at, updated_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch user by username from database");
            AppError::DatabaseError(e.to_string())
        })
    }
}
