//! Supabase Storage implementation of MediaStorage.
//!
//! Objects are uploaded into a single public bucket; the returned reference
//! is the bucket's public URL for the object path.

use async_trait::async_trait;
use std::sync::Arc;
use storygen_core::auth::AuthProvider;
use storygen_core::config::SupabaseConfig;
use storygen_core::error::{Result, StorygenError};
use storygen_core::storage::MediaStorage;

/// Media storage backed by a Supabase Storage bucket.
pub struct SupabaseStorage {
    client: reqwest::Client,
    config: SupabaseConfig,
    auth: Arc<dyn AuthProvider>,
}

impl SupabaseStorage {
    pub fn new(config: SupabaseConfig, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            auth,
        }
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.config.project_url.trim_end_matches('/'),
            self.config.bucket,
            path
        )
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.project_url.trim_end_matches('/'),
            self.config.bucket,
            path
        )
    }
}

#[async_trait]
impl MediaStorage for SupabaseStorage {
    async fn upload(&self, bytes: Vec<u8>, mime_type: &str, path: &str) -> Result<String> {
        let token = self.auth.access_token().await?;
        tracing::debug!(path, size = bytes.len(), "uploading media object");
        let response = self
            .client
            .post(self.object_url(path))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, mime_type)
            .header(reqwest::header::CACHE_CONTROL, "3600")
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await
            .map_err(|e| StorygenError::storage(format!("Media upload failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => StorygenError::auth(format!("Storage rejected the credential: {status}")),
                _ => StorygenError::storage(format!("Media upload failed {status}: {body}")),
            });
        }
        Ok(self.public_url(path))
    }
}
