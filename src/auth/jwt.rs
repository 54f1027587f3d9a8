use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::jwks::JwksCache;
use crate::supabase::auth::SignupMetadata;

/// Claims carried by access tokens from the auth service.
///
/// `sub` is the identity's UUID; `user_metadata` holds what the user
/// entered at sign-up.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: Option<usize>,
    pub iss: Option<String>,
    pub email: Option<String>,
    /// Auth-service role such as "authenticated". Not the marketplace role.
    pub role: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<SignupMetadata>,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::InvalidSubject(self.sub.clone()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("{0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
    #[error("No 'kid' in token header")]
    MissingKid,
    #[error("{0}")]
    Jwks(String),
    #[error("Invalid UUID in sub claim: {0}")]
    InvalidSubject(String),
}

/// How access tokens are checked: with the project's shared HS256 secret,
/// or against the published signing keys.
#[derive(Clone)]
pub enum TokenVerifier {
    Secret(String),
    Jwks(JwksCache),
}

/// Validate an access token and return its claims.
pub async fn validate_token(token: &str, verifier: &TokenVerifier) -> Result<Claims, TokenError> {
    match verifier {
        TokenVerifier::Secret(secret) => validate_with_secret(token, secret),
        TokenVerifier::Jwks(cache) => cache.validate_token(token).await.map(|td| td.claims),
    }
}

pub fn validate_with_secret(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|td| td.claims)
    .map_err(TokenError::Invalid)
}
