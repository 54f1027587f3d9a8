//! Fixtures shared by the integration tests: profile rows, locally minted
//! tokens, and in-memory stand-ins for the auth, storage and screenshot
//! services.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use std::sync::Mutex;
use uuid::Uuid;

use freelink_backend::auth::jwt::Claims;
use freelink_backend::models::{portfolio, profiles, requests};
use freelink_backend::screenshot::ScreenshotService;
use freelink_backend::supabase::RemoteError;
use freelink_backend::supabase::auth::{AuthProvider, AuthSession, AuthUser, SignupMetadata};
use freelink_backend::supabase::storage::BlobStore;

/// A fake secret for testing, never a real project's.
pub const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

pub fn mint_token(user_id: Uuid) -> String {
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + 3600,
        iat: Some(now),
        iss: Some("https://example.supabase.co/auth/v1".to_string()),
        email: Some("someone@example.com".to_string()),
        role: Some("authenticated".to_string()),
        user_metadata: None,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to encode test JWT")
}

pub fn profile(
    id: Uuid,
    first: &str,
    last: &str,
    role: &str,
    job: Option<&str>,
) -> profiles::Model {
    profiles::Model {
        id,
        email: Some(format!("{}@example.com", first.to_lowercase())),
        first_name: first.to_string(),
        last_name: last.to_string(),
        role: role.to_string(),
        job: job.map(str::to_string),
        country: "Ghana".to_string(),
        mobile: "+233 20 000 0000".to_string(),
        description: None,
        rate: None,
        profile_image: None,
        created_at: Utc::now(),
    }
}

pub fn portfolio_item(freelancer_id: Uuid, screenshot_url: Option<&str>) -> portfolio::Model {
    portfolio::Model {
        id: Uuid::new_v4(),
        freelancer_id,
        project_name: "Bakery site".to_string(),
        project_description: "Landing page for a bakery".to_string(),
        project_url: "https://bakery.example.com".to_string(),
        screenshot_url: screenshot_url.map(str::to_string),
        created_at: Utc::now(),
    }
}

pub fn request_row(
    client_id: Uuid,
    freelancer_id: Uuid,
    status: requests::Status,
) -> requests::Model {
    requests::Model {
        id: Uuid::new_v4(),
        client_id,
        freelancer_id,
        name: "Cara Client".to_string(),
        email: "cara@example.com".to_string(),
        project_name: "Shop redesign".to_string(),
        description: "Refresh the storefront".to_string(),
        status,
        created_at: Utc::now(),
    }
}

// ── Auth service ──

/// Answers sign-in with a fixed result and records sign-ups.
pub struct FakeAuth {
    pub sign_in: Result<AuthSession, (u16, String)>,
    pub sign_up_error: Option<(u16, String)>,
    pub sign_ups: Mutex<Vec<(String, String, SignupMetadata)>>,
    pub sign_outs: Mutex<Vec<String>>,
}

impl FakeAuth {
    pub fn signing_in(user: AuthUser) -> Self {
        Self {
            sign_in: Ok(AuthSession {
                access_token: "access".to_string(),
                refresh_token: "refresh".to_string(),
                expires_in: 3600,
                user,
            }),
            sign_up_error: None,
            sign_ups: Mutex::new(Vec::new()),
            sign_outs: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting(status: u16, message: &str) -> Self {
        Self {
            sign_in: Err((status, message.to_string())),
            sign_up_error: Some((status, message.to_string())),
            sign_ups: Mutex::new(Vec::new()),
            sign_outs: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AuthProvider for FakeAuth {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: SignupMetadata,
    ) -> Result<AuthUser, RemoteError> {
        if let Some((status, message)) = &self.sign_up_error {
            return Err(RemoteError::Rejected {
                status: *status,
                message: message.clone(),
            });
        }
        self.sign_ups.lock().unwrap().push((
            email.to_string(),
            password.to_string(),
            metadata.clone(),
        ));
        Ok(AuthUser {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
            user_metadata: metadata,
        })
    }

    async fn sign_in_with_password(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<AuthSession, RemoteError> {
        self.sign_in
            .clone()
            .map_err(|(status, message)| RemoteError::Rejected { status, message })
    }

    async fn get_user(&self, _access_token: &str) -> Result<AuthUser, RemoteError> {
        self.sign_in
            .clone()
            .map(|s| s.user)
            .map_err(|(status, message)| RemoteError::Rejected { status, message })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), RemoteError> {
        self.sign_outs.lock().unwrap().push(access_token.to_string());
        Ok(())
    }
}

// ── Storage ──

/// Keeps uploads in memory. With `fail` set every upload is refused.
#[derive(Default)]
pub struct FakeStorage {
    pub fail: bool,
    pub uploads: Mutex<Vec<(String, String, usize, String, bool)>>,
}

#[async_trait]
impl BlobStore for FakeStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<(), RemoteError> {
        if self.fail {
            return Err(RemoteError::Rejected {
                status: 403,
                message: "new row violates row-level security policy".to_string(),
            });
        }
        self.uploads.lock().unwrap().push((
            bucket.to_string(),
            path.to_string(),
            bytes.len(),
            content_type.to_string(),
            upsert,
        ));
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("https://storage.example.com/public/{bucket}/{path}")
    }
}

// ── Screenshots ──

pub enum FakeScreenshots {
    Image(Vec<u8>),
    Disabled,
    Failing,
}

#[async_trait]
impl ScreenshotService for FakeScreenshots {
    async fn capture(&self, url: &str) -> Result<Option<Vec<u8>>, RemoteError> {
        match self {
            FakeScreenshots::Image(bytes) => Ok(Some(bytes.clone())),
            FakeScreenshots::Disabled => Ok(None),
            FakeScreenshots::Failing => Err(RemoteError::Transport(
                url.to_string(),
                "connection reset".to_string(),
            )),
        }
    }
}
