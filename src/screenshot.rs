use async_trait::async_trait;
use tracing::debug;

use crate::supabase::{RemoteError, rejection};

pub const DEFAULT_ENDPOINT: &str = "https://api.apiflash.com/v1/urltoimage";

/// Renders a web page to an image.
#[async_trait]
pub trait ScreenshotService: Send + Sync {
    /// PNG bytes of the rendered page, or `None` when capture is disabled.
    async fn capture(&self, url: &str) -> Result<Option<Vec<u8>>, RemoteError>;
}

/// Client for an ApiFlash-style `urltoimage` endpoint.
#[derive(Clone)]
pub struct ApiFlash {
    client: reqwest::Client,
    endpoint: String,
    access_key: Option<String>,
}

impl ApiFlash {
    pub fn new(endpoint: &str, access_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
            access_key,
        }
    }
}

#[async_trait]
impl ScreenshotService for ApiFlash {
    async fn capture(&self, url: &str) -> Result<Option<Vec<u8>>, RemoteError> {
        let Some(access_key) = &self.access_key else {
            debug!("Screenshot capture disabled, skipping {url}");
            return Ok(None);
        };

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("access_key", access_key.as_str()), ("url", url)])
            .send()
            .await
            .map_err(|e| RemoteError::Transport(self.endpoint.clone(), e.to_string()))?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RemoteError::Decode(self.endpoint.clone(), e.to_string()))?;
        Ok(Some(bytes.to_vec()))
    }
}
