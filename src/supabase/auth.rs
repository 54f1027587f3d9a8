use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use super::{RemoteError, rejection};

/// Profile details captured at sign-up and stored in the identity's
/// `user_metadata`. Every field is optional; provisioning fills the gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,
}

/// An authenticated identity as the auth service reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: SignupMetadata,
}

/// Tokens issued by a successful password sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: u64,
    pub user: AuthUser,
}

/// Sign-up answers with a full session when e-mail confirmation is off and
/// with the bare user otherwise.
#[derive(Deserialize)]
#[serde(untagged)]
enum SignupResponse {
    Session(AuthSession),
    User(AuthUser),
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: SignupMetadata,
    ) -> Result<AuthUser, RemoteError>;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, RemoteError>;

    /// Resolve an access token back to its identity.
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, RemoteError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), RemoteError>;
}

/// GoTrue REST client.
#[derive(Clone)]
pub struct SupabaseAuth {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseAuth {
    pub fn new(supabase_url: &str, anon_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: format!("{}/auth/v1", supabase_url.trim_end_matches('/')),
            anon_key: anon_key.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<reqwest::Response, RemoteError> {
        let response = request
            .header("apikey", &self.anon_key)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(url.to_string(), e.to_string()))?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        Ok(response)
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: SignupMetadata,
    ) -> Result<AuthUser, RemoteError> {
        let url = self.url("/signup");
        debug!("Signing up {email}");

        let request = self.client.post(&url).json(&json!({
            "email": email,
            "password": password,
            "data": metadata,
        }));
        let response = self.send(request, &url).await?;

        match response
            .json::<SignupResponse>()
            .await
            .map_err(|e| RemoteError::Decode(url.clone(), e.to_string()))?
        {
            SignupResponse::Session(session) => Ok(session.user),
            SignupResponse::User(user) => Ok(user),
        }
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, RemoteError> {
        let url = self.url("/token?grant_type=password");

        let request = self.client.post(&url).json(&json!({
            "email": email,
            "password": password,
        }));
        let response = self.send(request, &url).await?;

        response
            .json::<AuthSession>()
            .await
            .map_err(|e| RemoteError::Decode(url, e.to_string()))
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, RemoteError> {
        let url = self.url("/user");

        let request = self.client.get(&url).bearer_auth(access_token);
        let response = self.send(request, &url).await?;

        response
            .json::<AuthUser>()
            .await
            .map_err(|e| RemoteError::Decode(url, e.to_string()))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), RemoteError> {
        let url = self.url("/logout");

        let request = self.client.post(&url).bearer_auth(access_token);
        self.send(request, &url).await?;
        Ok(())
    }
}
