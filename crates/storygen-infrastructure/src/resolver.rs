//! HTTP-backed reference resolver.
//!
//! Data URIs are decoded in place without touching the network; remote URLs
//! cost exactly one fetch attempt with no retry. Callers skip references
//! that fail to resolve.

use async_trait::async_trait;
use storygen_core::error::{Result, StorygenError};
use storygen_core::genai::{EncodedImage, ImageRef, ReferenceResolver, decode_data_uri};

/// Resolver that fetches remote references over HTTP.
pub struct HttpReferenceResolver {
    client: reqwest::Client,
}

impl HttpReferenceResolver {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpReferenceResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReferenceResolver for HttpReferenceResolver {
    async fn resolve(&self, reference: &str) -> Result<EncodedImage> {
        match ImageRef::parse(reference) {
            ImageRef::DataUri(uri) => decode_data_uri(&uri),
            ImageRef::Remote(url) => {
                let response = self
                    .client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|e| StorygenError::provider(format!("Reference fetch failed: {e}")))?;
                if !response.status().is_success() {
                    return Err(StorygenError::provider(format!(
                        "Reference fetch failed: {}",
                        response.status()
                    )));
                }
                let mime_type = response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
                    .unwrap_or_else(|| "image/png".to_string());
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| StorygenError::provider(format!("Reference fetch failed: {e}")))?;
                Ok(EncodedImage::from_bytes(&bytes, mime_type))
            }
        }
    }
}
