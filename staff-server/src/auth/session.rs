//! Session tokens
//!
//! HS256 JWTs carrying the identity id, username and role. The token is only
//! a pointer: every request reloads the identity from the store before it is
//! trusted (see [`super::middleware::resolve_session`]).

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shared::models::{Identity, Role};
use thiserror::Error;

use crate::config::MAX_SESSION_HOURS;

const ISSUER: &str = "staff-server";

/// Claims stored in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Identity id
    pub sub: String,
    pub username: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("Session expired")]
    Expired,

    #[error("Failed to issue session token: {0}")]
    IssueFailed(String),
}

/// Issues and validates session tokens
#[derive(Clone)]
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

impl SessionService {
    /// `session_hours` is clamped to 1..=[`MAX_SESSION_HOURS`]
    pub fn new(secret: &str, session_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime: Duration::hours(session_hours.clamp(1, MAX_SESSION_HOURS)),
        }
    }

    /// Session lifetime in seconds, used as the cookie Max-Age
    pub fn max_age_secs(&self) -> i64 {
        self.lifetime.num_seconds()
    }

    /// Issue a token for an authenticated identity
    pub fn issue(&self, identity: &Identity) -> Result<String, SessionError> {
        let now = Utc::now();
        let claims = Claims {
            sub: identity.id.to_string(),
            username: identity.username.clone(),
            role: identity.role,
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
            iss: ISSUER.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| SessionError::IssueFailed(e.to_string()))
    }

    /// Validate a token and return its claims
    pub fn validate(&self, token: &str) -> Result<Claims, SessionError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => SessionError::Expired,
                _ => SessionError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(data.claims)
    }

    /// Extract the token from an `Authorization: Bearer` header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ").filter(|t| !t.is_empty())
    }
}

/// Identity of the requester, reloaded from the store for this request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub display_name: String,
}

impl From<&Identity> for CurrentUser {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username.clone(),
            role: identity.role,
            display_name: identity.display_name(),
        }
    }
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
