//! Argon2id password hashing and verification.
//!
//! Hashes are stored as PHC strings, so the salt and parameters travel with
//! the hash. Both operations are CPU-bound and run on tokio's blocking pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::instrument;

use crate::shared::AppError;

/// Hash a plaintext password with a fresh random salt.
#[instrument(skip_all)]
pub async fn hash_password(password: String) -> Result<String, AppError> {
    let phc = tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
    })
    .await
    .map_err(|e| AppError::Internal(format!("password hashing task failed: {e}")))?;

    phc.map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))
}

/// Check a plaintext password against a stored PHC hash.
///
/// The digest comparison inside `argon2` is constant-time. A hash that cannot
/// be parsed is a server-side fault, not a credential mismatch.
#[instrument(skip_all)]
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    let outcome = tokio::task::spawn_blocking(move || {
        let stored = PasswordHash::new(&hash)?;
        let checked = Argon2::default().verify_password(password.as_bytes(), &stored);
        Ok::<_, password_hash::Error>(checked)
    })
    .await
    .map_err(|e| AppError::Internal(format!("password verification task failed: {e}")))?
    .map_err(|e| AppError::Internal(format!("stored password hash is unusable: {e}")))?;

    match outcome {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Internal(format!("password verification failed: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = hash_password("correct-horse-battery-staple".to_string())
            .await
            .unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("correct-horse-battery-staple"));

        let verified = verify_password("correct-horse-battery-staple".to_string(), hash)
            .await
            .unwrap();
        assert!(verified);
    }

    #[tokio::test]
    async fn test_wrong_password_fails() {
        let hash = hash_password("real-password".to_string()).await.unwrap();
        let verified = verify_password("wrong-password".to_string(), hash)
            .await
            .unwrap();
        assert!(!verified);
    }

    #[tokio::test]
    async fn test_same_password_gets_distinct_salts() {
        let first = hash_password("p1".to_string()).await.unwrap();
        let second = hash_password("p1".to_string()).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_unparseable_hash_is_internal_error() {
        let result = verify_password("p1".to_string(), "p1".to_string()).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
