// Public API - what other modules can use
pub use handlers::{create_user, current_user, get_user, login};
pub use service::UserService;

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
mod service;
pub mod types;
