use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims carried by every bearer token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    pub sub: String, // User id
    pub exp: usize,  // Expiration timestamp (standard JWT claim)
    pub iat: usize,  // Issued at timestamp (standard JWT claim)
}

/// Identity the auth middleware attaches to an authorized request.
/// Handlers extract it with `Extension(user): Extension<AuthenticatedUser>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_claims_use_registered_claim_names() {
        let claims = TokenClaims {
            sub: "0b7e6b36-5f0c-4f3e-9a57-2f1f3c4b5d6e".to_string(),
            exp: 1234567890,
            iat: 1234564290,
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["sub"], "0b7e6b36-5f0c-4f3e-9a57-2f1f3c4b5d6e");
        assert_eq!(json["exp"], 1234567890);
        assert_eq!(json["iat"], 1234564290);

        let deserialized: TokenClaims = serde_json::from_value(json).unwrap();
        assert_eq!(deserialized, claims);
    }
}
