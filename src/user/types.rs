use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::models::UserModel;

/// Request body for account creation
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
}

/// Request body for login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub token: String, // The bearer JWT
}

/// Public view of a user record; the password hash never leaves the service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserModel> for UserResponse {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_wire_format() {
        let model = UserModel::from_new(crate::user::models::NewUser {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$secret-hash".to_string(),
        });
        let id = model.id;

        let json = serde_json::to_value(UserResponse::from(model)).unwrap();

        assert_eq!(json["_id"], id.to_string());
        assert_eq!(json["username"], "alice");
        assert_eq!(json["email"], "a@x.com");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("password_hash").is_none());
        assert!(!json.to_string().contains("secret-hash"));
    }

    #[test]
    fn test_create_user_request_validation() {
        let valid = CreateUserRequest {
            username: "alice".to_string(),
            password: "p1".to_string(),
            email: "a@x.com".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid = CreateUserRequest {
            username: String::new(),
            password: String::new(),
            email: "not-an-email".to_string(),
        };
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("email"));
    }
}
