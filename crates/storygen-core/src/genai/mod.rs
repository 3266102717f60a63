//! Generative content service interface.
//!
//! The generative backend is consumed as a black box through
//! [`GenerativeClient`]: request/response calls for shotlist synthesis,
//! image generation, and video generation. Failures are mapped to
//! user-facing messages by the orchestrator; there is no automatic retry.

mod prompt;
mod reference;

pub use prompt::{
    compose_asset_prompt, compose_bridge_prompt, compose_frame_prompt, compose_shotlist_prompt,
    compose_video_prompt,
};
pub use reference::{ImageRef, ReferenceResolver, decode_data_uri};

use crate::error::Result;
use crate::session::AspectRatio;
use async_trait::async_trait;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Image generation model tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageModel {
    #[default]
    Flash,
    Pro,
}

impl ImageModel {
    pub fn model_id(&self) -> &'static str {
        match self {
            ImageModel::Flash => "gemini-2.5-flash-image",
            ImageModel::Pro => "gemini-3-pro-image-preview",
        }
    }
}

/// Video generation model tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoModel {
    #[default]
    Fast,
    Pro,
}

impl VideoModel {
    pub fn model_id(&self) -> &'static str {
        match self {
            VideoModel::Fast => "veo-3.1-fast-generate-preview",
            VideoModel::Pro => "veo-3.1-generate-preview",
        }
    }

    /// The fast tier substitutes a default prompt when none is given; the
    /// pro tier requires one.
    pub fn requires_prompt(&self) -> bool {
        matches!(self, VideoModel::Pro)
    }
}

/// Output resolution for video generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    #[default]
    P720,
    P1080,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::P720 => "720p",
            Resolution::P1080 => "1080p",
        }
    }
}

/// An image in the uniform encoded-bytes-plus-mime-type form required by
/// the generation calls: base64 payload and its mime type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Base64-encoded payload (no data-URI prefix)
    pub data: String,
    /// Mime type of the payload, e.g. `image/png`
    pub mime_type: String,
}

impl EncodedImage {
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Wraps raw bytes into the encoded form.
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            mime_type: mime_type.into(),
        }
    }

    /// Decodes the base64 payload back into raw bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(base64::engine::general_purpose::STANDARD.decode(&self.data)?)
    }

    /// Extension to use when storing this image, derived from the mime type.
    pub fn extension(&self) -> &str {
        match self.mime_type.as_str() {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        }
    }
}

/// One entry of a synthesized shotlist, before it becomes a `Shot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotDraft {
    pub scene_description: String,
    pub frame_description: String,
    pub voice_text: String,
    pub duration: f64,
}

/// Request/response interface to the generative content service.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Generates a single image for the given prompt.
    ///
    /// `references` are supplied as visual context the generator should stay
    /// consistent with. Returns `Ok(None)` when the model responds without
    /// image data.
    async fn generate_image(
        &self,
        prompt: &str,
        model: ImageModel,
        aspect_ratio: AspectRatio,
        references: &[EncodedImage],
    ) -> Result<Option<EncodedImage>>;

    /// Generates a video clip, optionally seeded with an image, and returns
    /// the raw clip bytes once the remote job completes.
    ///
    /// The remote job is polled until completion; there is no client-side
    /// timeout.
    async fn generate_video(
        &self,
        prompt: &str,
        model: VideoModel,
        seed_image: Option<&EncodedImage>,
        aspect_ratio: AspectRatio,
        resolution: Resolution,
    ) -> Result<Vec<u8>>;

    /// Synthesizes an ordered shotlist from a story concept.
    ///
    /// When `target_duration` is given the total shot duration must not
    /// exceed it; when `num_shots` is given exactly that many entries must
    /// be produced.
    async fn generate_shotlist(
        &self,
        concept: &str,
        asset_names: &str,
        target_duration: Option<u32>,
        num_shots: Option<u32>,
    ) -> Result<Vec<ShotDraft>>;

    /// Generates a single bridge shot connecting the scene flow before and
    /// after a position in the shotlist.
    async fn generate_bridge_shot(
        &self,
        concept: &str,
        asset_names: &str,
        flow_before: &str,
        flow_after: &str,
    ) -> Result<ShotDraft>;
}
