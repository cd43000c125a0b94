// Library crate for the account service
// This file exposes the public API for the binary and integration tests

pub mod auth;
pub mod config;
pub mod db;
pub mod router;
pub mod shared;
pub mod user;

// Re-export commonly used types for easier access in tests
pub use auth::{AuthenticatedUser, TokenError, TokenService};
pub use config::{AppConfig, ConfigError, LogFormat};
pub use router::build_router;
pub use shared::{AppError, AppState};
pub use user::repository::{InMemoryUserRepository, PostgresUserRepository, UserRepository};
