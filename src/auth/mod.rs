// Public API - what other modules can use
pub use middleware::require_auth;
pub use token::{TokenError, TokenService};
pub use types::AuthenticatedUser;

// Internal modules
mod middleware;
pub mod password;
mod token;
mod types;
