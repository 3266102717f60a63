//! Reference image resolution.
//!
//! Image references are heterogeneous: either inline-encoded data URIs or
//! remote URLs. Generation calls need them in the uniform
//! base64-plus-mime-type form, so [`ReferenceResolver`] converts both kinds.
//! Data URIs are decoded in place without any network call; remote URLs cost
//! exactly one fetch attempt with no retry.

use crate::error::{Result, StorygenError};
use crate::genai::EncodedImage;
use async_trait::async_trait;

/// A classified image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// Inline-encoded `data:` URI
    DataUri(String),
    /// Remote URL to fetch
    Remote(String),
}

impl ImageRef {
    pub fn parse(reference: &str) -> ImageRef {
        if reference.starts_with("data:") {
            ImageRef::DataUri(reference.to_string())
        } else {
            ImageRef::Remote(reference.to_string())
        }
    }
}

/// Splits a data URI into its mime type and base64 payload.
///
/// The mime type defaults to `image/png` when the header does not carry one.
pub fn decode_data_uri(uri: &str) -> Result<EncodedImage> {
    let Some((header, payload)) = uri.split_once(',') else {
        return Err(StorygenError::invalid_input(
            "data URI is missing its payload separator",
        ));
    };
    let mime_type = header
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .filter(|m| !m.is_empty())
        .unwrap_or("image/png");
    Ok(EncodedImage::new(payload, mime_type))
}

/// Resolves a heterogeneous image reference into the uniform encoded form.
///
/// Callers treat resolution failures as non-fatal: a reference that cannot
/// be resolved is skipped and the generation call proceeds with whatever
/// subset resolved successfully, including the empty set.
#[async_trait]
pub trait ReferenceResolver: Send + Sync {
    async fn resolve(&self, reference: &str) -> Result<EncodedImage>;
}
