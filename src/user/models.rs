use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the users table. Not serializable: only `UserResponse` goes on the wire.
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: Uuid, // Assigned by the store on insert
    pub username: String,
    pub email: String,
    pub password_hash: String, // Argon2id PHC string, never the raw password
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Candidate user handed to the store; the store assigns id and timestamps
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl UserModel {
    /// Materializes a stored record from a candidate, as the in-memory store does on insert
    pub fn from_new(user: NewUser) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_new_assigns_identity_and_timestamps() {
        let candidate = NewUser {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
        };

        let first = UserModel::from_new(candidate.clone());
        let second = UserModel::from_new(candidate);

        assert_ne!(first.id, second.id);
        assert_eq!(first.username, "alice");
        assert_eq!(first.email, "a@x.com");
        assert_eq!(first.created_at, first.updated_at);
    }
}
