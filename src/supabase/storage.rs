use async_trait::async_trait;
use tracing::debug;

use super::{RemoteError, rejection};

/// Object storage with public URLs.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<(), RemoteError>;

    fn public_url(&self, bucket: &str, path: &str) -> String;
}

/// Supabase Storage REST client.
#[derive(Clone)]
pub struct SupabaseStorage {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SupabaseStorage {
    /// `api_key` should be the service key when bucket policies require it.
    pub fn new(supabase_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: format!("{}/storage/v1", supabase_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl BlobStore for SupabaseStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<(), RemoteError> {
        let url = format!("{}/object/{bucket}/{path}", self.base_url);
        debug!("Uploading {} bytes to {bucket}/{path}", bytes.len());

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(reqwest::header::CACHE_CONTROL, "max-age=3600")
            .header("x-upsert", if upsert { "true" } else { "false" })
            .body(bytes)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(url.clone(), e.to_string()))?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/object/public/{bucket}/{path}", self.base_url)
    }
}
