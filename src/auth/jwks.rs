use jsonwebtoken::{Algorithm, DecodingKey, TokenData, Validation, decode, decode_header};
use moka::future::Cache;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::jwt::{Claims, TokenError};

const JWKS_PATH: &str = "/auth/v1/.well-known/jwks.json";

/// Public key material for one `kid`.
#[derive(Clone)]
enum KeyMaterial {
    Ec { x: String, y: String },
    Rsa { n: String, e: String },
}

#[derive(Clone)]
struct CachedKey {
    material: KeyMaterial,
    algorithm: Algorithm,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    kid: Option<String>,
    kty: String,
    alg: Option<String>,
    x: Option<String>,
    y: Option<String>,
    n: Option<String>,
    e: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

impl TryFrom<&Jwk> for CachedKey {
    type Error = TokenError;

    fn try_from(jwk: &Jwk) -> Result<Self, Self::Error> {
        let missing = |field: &str| TokenError::Jwks(format!("Missing '{field}' in JWK"));
        match jwk.kty.as_str() {
            "EC" => Ok(CachedKey {
                material: KeyMaterial::Ec {
                    x: jwk.x.clone().ok_or_else(|| missing("x"))?,
                    y: jwk.y.clone().ok_or_else(|| missing("y"))?,
                },
                algorithm: match jwk.alg.as_deref() {
                    Some("ES384") => Algorithm::ES384,
                    _ => Algorithm::ES256,
                },
            }),
            "RSA" => Ok(CachedKey {
                material: KeyMaterial::Rsa {
                    n: jwk.n.clone().ok_or_else(|| missing("n"))?,
                    e: jwk.e.clone().ok_or_else(|| missing("e"))?,
                },
                algorithm: Algorithm::RS256,
            }),
            other => Err(TokenError::Jwks(format!("Unsupported key type {other}"))),
        }
    }
}

/// Signing keys published by the auth service, cached per `kid` for an hour.
#[derive(Clone)]
pub struct JwksCache {
    cache: Arc<Cache<String, CachedKey>>,
    jwks_url: String,
    client: reqwest::Client,
    anon_key: String,
}

impl JwksCache {
    pub fn new(supabase_url: &str, anon_key: &str) -> Self {
        let cache = Arc::new(
            Cache::builder()
                .time_to_live(Duration::from_secs(3600))
                .max_capacity(10)
                .build(),
        );

        Self {
            cache,
            jwks_url: format!("{}{JWKS_PATH}", supabase_url.trim_end_matches('/')),
            client: reqwest::Client::new(),
            anon_key: anon_key.to_string(),
        }
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, TokenError> {
        debug!("Fetching JWKS from {}", self.jwks_url);

        let response = self
            .client
            .get(&self.jwks_url)
            .header("apikey", &self.anon_key)
            .send()
            .await
            .map_err(|e| TokenError::Jwks(format!("Failed to fetch JWKS: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TokenError::Jwks(format!("Failed to fetch JWKS: HTTP {status}")));
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| TokenError::Jwks(format!("Failed to parse JWKS JSON: {e}")))
    }

    async fn get_key(&self, kid: &str) -> Result<CachedKey, TokenError> {
        if let Some(cached) = self.cache.get(kid).await {
            return Ok(cached);
        }

        let jwks = self.fetch_jwks().await?;
        let jwk = jwks
            .keys
            .iter()
            .find(|k| k.kid.as_deref() == Some(kid))
            .ok_or_else(|| TokenError::Jwks(format!("Key with kid={kid} not found in JWKS")))?;

        let key = CachedKey::try_from(jwk)?;
        self.cache.insert(kid.to_string(), key.clone()).await;
        Ok(key)
    }

    pub async fn validate_token(&self, token: &str) -> Result<TokenData<Claims>, TokenError> {
        let header = decode_header(token).map_err(TokenError::Invalid)?;
        let kid = header.kid.ok_or(TokenError::MissingKid)?;

        let key = self.get_key(&kid).await?;
        let decoding_key = match &key.material {
            KeyMaterial::Ec { x, y } => DecodingKey::from_ec_components(x, y),
            KeyMaterial::Rsa { n, e } => DecodingKey::from_rsa_components(n, e),
        }
        .map_err(TokenError::Invalid)?;

        let mut validation = Validation::new(key.algorithm);
        validation.validate_aud = false;

        decode::<Claims>(token, &decoding_key, &validation).map_err(TokenError::Invalid)
    }
}
