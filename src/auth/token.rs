use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::types::TokenClaims;
use crate::shared::AppError;

/// Lifetime of every issued token
pub const TOKEN_TTL_HOURS: i64 = 1;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("signing secret is missing")]
    MissingSecret,

    /// Signature, structure or subject could not be verified.
    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl From<TokenError> for AppError {
    fn from(error: TokenError) -> Self {
        match error {
            // Callers must not learn which verification step failed.
            TokenError::InvalidSignature | TokenError::Expired => {
                AppError::Unauthorized("Unauthorized".to_string())
            }
            TokenError::MissingSecret | TokenError::Signing(_) => {
                AppError::Internal(error.to_string())
            }
        }
    }
}

/// Issues and verifies HS256 bearer tokens bound to a user id
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Builds the service from the server secret. An empty secret is refused
    /// so a misconfigured process fails at startup instead of per request.
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        })
    }

    /// Creates a token for `subject` that expires one hour from now
    #[instrument(skip(self))]
    pub fn issue(&self, subject: Uuid) -> Result<String, TokenError> {
        let now = Utc::now();
        let exp = (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize;

        debug!(exp_timestamp = exp, "Creating JWT token with expiration");

        let claims = TokenClaims {
            sub: subject.to_string(),
            exp,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            debug!(error = %e, "Failed to encode JWT token");
            TokenError::Signing(e.to_string())
        })
    }

    /// Verifies signature and expiry and returns the token's subject
    #[instrument(skip(self, token))]
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        debug!("Decoding and validating JWT token");

        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    debug!("JWT token has expired");
                    TokenError::Expired
                }
                _ => {
                    debug!(error = %e, "Failed to decode JWT token");
                    TokenError::InvalidSignature
                }
            },
        )?;

        let subject = Uuid::parse_str(&data.claims.sub).map_err(|_| {
            debug!("JWT subject is not a user id");
            TokenError::InvalidSignature
        })?;

        debug!(user_id = %subject, exp = data.claims.exp, "JWT token decoded successfully");
        Ok(subject)
    }
}
