use axum::{http::StatusCode, Router};
use std::sync::Arc;

use account_service::{build_router, AppState, InMemoryUserRepository, TokenService};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub const TEST_SECRET: &str = "integration-test-secret-long-enough-for-hmac";

pub struct TestSetup {
    pub app: Router,
    pub repository: Arc<InMemoryUserRepository>,
    pub token_service: TokenService,
}

pub struct TestSetupBuilder {
    secret: String,
    users: Vec<(String, String, String)>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            secret: TEST_SECRET.to_string(),
            users: vec![],
        }
    }

    pub fn with_secret(mut self, secret: &str) -> Self {
        self.secret = secret.to_string();
        self
    }

    /// Registers an account through the HTTP surface before the test starts
    pub fn with_user(mut self, username: &str, password: &str, email: &str) -> Self {
        self.users
            .push((username.to_string(), password.to_string(), email.to_string()));
        self
    }

    pub fn with_alice(self) -> Self {
        self.with_user("alice", "p1", "a@x.com")
    }

    pub async fn build(self) -> TestSetup {
        let repository = Arc::new(InMemoryUserRepository::new());
        let token_service = TokenService::new(&self.secret).unwrap();
        let state = AppState::new(repository.clone(), token_service.clone());

        let setup = TestSetup {
            app: build_router(state),
            repository,
            token_service,
        };

        for (username, password, email) in &self.users {
            let response = setup.create_user(username, password, email).await;
            assert_eq!(response.status, StatusCode::CREATED, "seeding user {username} failed");
        }

        setup
    }
}
