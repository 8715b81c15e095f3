use actix_web::{dev::Payload, http::StatusCode, web, FromRequest, HttpRequest, HttpResponse, ResponseError};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use thiserror::Error;
use crate::models::ErrorResponse;

/// Errors verifying a caller's bearer token
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid subject claim: {0}")]
    InvalidSubject(String),

    #[error("Token verifier is not configured")]
    NotConfigured,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse::new(
            "Unauthorized",
            self.to_string(),
            status.as_u16(),
        ))
    }
}

/// Claims issued by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub admin: bool,
    pub exp: usize,
}

/// Verifies HS256 tokens signed with the shared secret
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("leeway", &self.validation.leeway)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    pub fn new(secret: &str, leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_secs;

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)?;
        let user_id = data
            .claims
            .sub
            .parse::<i32>()
            .map_err(|_| AuthError::InvalidSubject(data.claims.sub.clone()))?;

        Ok(AuthenticatedUser {
            user_id,
            is_admin: data.claims.admin,
        })
    }
}

/// Caller identity taken from a verified bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub is_admin: bool,
}

impl AuthenticatedUser {
    /// Owners and administrators may modify a listing
    pub fn can_modify(&self, owner_id: i32) -> bool {
        self.is_admin || self.user_id == owner_id
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AuthError> {
    let verifier = req
        .app_data::<web::Data<TokenVerifier>>()
        .ok_or(AuthError::NotConfigured)?;
    let token = bearer_token(req).ok_or(AuthError::MissingToken)?;

    verifier.verify(token).map_err(|e| {
        tracing::info!("Rejected token on {}: {}", req.path(), e);
        e
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn token(sub: &str, admin: bool, exp_offset: i64, secret: &str) -> String {
        let exp = (chrono::Utc::now().timestamp() + exp_offset) as usize;
        let claims = Claims {
            sub: sub.to_string(),
            admin,
            exp,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn test_verify_valid_token() {
        let verifier = TokenVerifier::new(SECRET, 0);
        let user = verifier.verify(&token("17", true, 3600, SECRET)).unwrap();

        assert_eq!(user, AuthenticatedUser { user_id: 17, is_admin: true });
    }

    #[test]
    fn test_reject_expired_token() {
        let verifier = TokenVerifier::new(SECRET, 0);
        let result = verifier.verify(&token("17", false, -3600, SECRET));

        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_reject_wrong_signature() {
        let verifier = TokenVerifier::new(SECRET, 0);
        assert!(verifier.verify(&token("17", false, 3600, "other")).is_err());
    }

    #[test]
    fn test_reject_non_numeric_subject() {
        let verifier = TokenVerifier::new(SECRET, 0);
        let result = verifier.verify(&token("alice", false, 3600, SECRET));

        assert!(matches!(result, Err(AuthError::InvalidSubject(_))));
    }

    #[test]
    fn test_can_modify() {
        let owner = AuthenticatedUser { user_id: 1, is_admin: false };
        let admin = AuthenticatedUser { user_id: 2, is_admin: true };

        assert!(owner.can_modify(1));
        assert!(!owner.can_modify(3));
        assert!(admin.can_modify(3));
    }
}
