use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use super::setup::TestSetup;

/// Status and decoded JSON body of one response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Send a request through the full router
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse { status, body }
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, authorization: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(value) = authorization {
            builder = builder.header("Authorization", value);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    pub async fn create_user(&self, username: &str, password: &str, email: &str) -> TestResponse {
        self.post_json(
            "/users",
            json!({ "username": username, "password": password, "email": email }),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.post_json(
            "/users/login",
            json!({ "username": username, "password": password }),
        )
        .await
    }

    /// Logs in and returns the issued token, failing the test otherwise
    pub async fn token_for(&self, username: &str, password: &str) -> String {
        let response = self.login(username, password).await;
        assert_eq!(response.status, StatusCode::OK, "login for {username} failed");
        response.body["token"].as_str().unwrap().to_string()
    }

    pub async fn get_user(&self, id: &str) -> TestResponse {
        self.get(&format!("/users/{id}"), None).await
    }

    pub async fn get_me(&self, authorization: Option<&str>) -> TestResponse {
        self.get("/users/me", authorization).await
    }
}
