//! Gemini-backed implementation of the generative content service.
//!
//! All calls go through the REST `generateContent` / `predictLongRunning`
//! surfaces. Video generation is a long-running remote job polled at a fixed
//! interval until completion; there is no client-side timeout, so a stalled
//! remote job is only escaped through the orchestrator's cooperative
//! cancellation.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use storygen_core::config::GeminiConfig;
use storygen_core::error::{Result, StorygenError};
use storygen_core::genai::{
    EncodedImage, GenerativeClient, ImageModel, Resolution, ShotDraft, VideoModel,
    compose_bridge_prompt, compose_shotlist_prompt,
};
use storygen_core::session::AspectRatio;

/// Text model used for shotlist and bridge-shot synthesis.
const TEXT_MODEL: &str = "gemini-3-flash-preview";

/// Fixed interval between long-running operation polls.
const VIDEO_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Default prompt substituted by the fast video tier when none is given.
const DEFAULT_FAST_VIDEO_PROMPT: &str = "Cinematic high-quality video";

/// Generative client backed by the Gemini REST API.
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(StorygenError::invalid_input("Gemini API key is required."));
        }
        Ok(Self {
            config,
            client: reqwest::Client::new(),
        })
    }

    fn model_url(&self, model: &str, verb: &str) -> String {
        format!(
            "{}/v1beta/models/{}:{}",
            self.config.base_url.trim_end_matches('/'),
            model,
            verb
        )
    }

    async fn post_json(&self, url: &str, payload: &Value) -> Result<Value> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", self.config.api_key.trim())
            .json(payload)
            .send()
            .await
            .map_err(|e| StorygenError::provider(format!("Gemini request failed: {e}")))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StorygenError::provider(format!("Read Gemini response failed: {e}")))?;
        if !status.is_success() {
            return Err(map_provider_status(status, &body));
        }
        serde_json::from_str(&body).map_err(|e| {
            StorygenError::provider(format!("Invalid Gemini response JSON: {e}; raw: {body}"))
        })
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .header("x-goog-api-key", self.config.api_key.trim())
            .send()
            .await
            .map_err(|e| StorygenError::provider(format!("Gemini request failed: {e}")))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StorygenError::provider(format!("Read Gemini response failed: {e}")))?;
        if !status.is_success() {
            return Err(map_provider_status(status, &body));
        }
        serde_json::from_str(&body).map_err(|e| {
            StorygenError::provider(format!("Invalid Gemini response JSON: {e}; raw: {body}"))
        })
    }

    /// Runs a text-model `generateContent` call with a JSON response schema
    /// and returns the raw candidate text.
    async fn generate_structured_text(&self, prompt: &str, schema: Value) -> Result<String> {
        let payload = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema,
            }
        });
        let url = self.model_url(TEXT_MODEL, "generateContent");
        let raw = self.post_json(&url, &payload).await?;
        let parsed: GenerateContentResponse = serde_json::from_value(raw)
            .map_err(|e| StorygenError::provider(format!("Invalid Gemini response shape: {e}")))?;
        parsed
            .first_text()
            .ok_or_else(|| StorygenError::provider("Gemini response had no candidates."))
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate_image(
        &self,
        prompt: &str,
        model: ImageModel,
        aspect_ratio: AspectRatio,
        references: &[EncodedImage],
    ) -> Result<Option<EncodedImage>> {
        let mut parts: Vec<Value> = references
            .iter()
            .map(|r| {
                json!({
                    "inlineData": { "data": r.data, "mimeType": r.mime_type }
                })
            })
            .collect();
        parts.push(json!({ "text": prompt }));

        let mut image_config = json!({ "aspectRatio": aspect_ratio.as_str() });
        if model == ImageModel::Pro {
            image_config["imageSize"] = json!("1K");
        }
        let payload = json!({
            "contents": { "parts": parts },
            "generationConfig": { "imageConfig": image_config }
        });

        let url = self.model_url(model.model_id(), "generateContent");
        tracing::debug!(model = model.model_id(), refs = references.len(), "generating image");
        let raw = self.post_json(&url, &payload).await?;
        let parsed: GenerateContentResponse = serde_json::from_value(raw)
            .map_err(|e| StorygenError::provider(format!("Invalid Gemini response shape: {e}")))?;
        Ok(parsed.first_inline_image())
    }

    async fn generate_video(
        &self,
        prompt: &str,
        model: VideoModel,
        seed_image: Option<&EncodedImage>,
        aspect_ratio: AspectRatio,
        resolution: Resolution,
    ) -> Result<Vec<u8>> {
        let final_prompt = effective_video_prompt(prompt, model)?;

        let mut instance = json!({ "prompt": final_prompt });
        if let Some(seed) = seed_image {
            instance["image"] = json!({
                "bytesBase64Encoded": seed.data,
                "mimeType": seed.mime_type,
            });
        }
        let payload = json!({
            "instances": [instance],
            "parameters": {
                "sampleCount": 1,
                "resolution": resolution.as_str(),
                "aspectRatio": aspect_ratio.as_str(),
            }
        });

        let url = self.model_url(model.model_id(), "predictLongRunning");
        tracing::debug!(model = model.model_id(), seeded = seed_image.is_some(), "starting video job");
        let raw = self.post_json(&url, &payload).await?;
        let mut operation: Operation = serde_json::from_value(raw)
            .map_err(|e| StorygenError::provider(format!("Invalid Gemini operation: {e}")))?;

        // Fixed-interval polling until the remote job settles.
        while !operation.done {
            tokio::time::sleep(VIDEO_POLL_INTERVAL).await;
            let poll_url = format!(
                "{}/v1beta/{}",
                self.config.base_url.trim_end_matches('/'),
                operation.name
            );
            let raw = self.get_json(&poll_url).await?;
            operation = serde_json::from_value(raw)
                .map_err(|e| StorygenError::provider(format!("Invalid Gemini operation: {e}")))?;
        }

        if let Some(err) = operation.error {
            return Err(StorygenError::provider(format!(
                "Video generation failed: {}",
                err.message
            )));
        }

        let uri = operation
            .response
            .and_then(|r| r.generated_videos.into_iter().next())
            .and_then(|v| v.video)
            .map(|v| v.uri)
            .ok_or_else(|| StorygenError::provider("Video URI not found in completed operation."))?;

        // The download link requires the API key appended as a query param.
        let sep = if uri.contains('?') { '&' } else { '?' };
        let download_url = format!("{}{}key={}", uri, sep, self.config.api_key.trim());
        let response = self
            .client
            .get(&download_url)
            .send()
            .await
            .map_err(|e| StorygenError::provider(format!("Video download failed: {e}")))?;
        if !response.status().is_success() {
            return Err(StorygenError::provider(format!(
                "Video download failed: {}",
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorygenError::provider(format!("Video download failed: {e}")))?;
        Ok(bytes.to_vec())
    }

    async fn generate_shotlist(
        &self,
        concept: &str,
        asset_names: &str,
        target_duration: Option<u32>,
        num_shots: Option<u32>,
    ) -> Result<Vec<ShotDraft>> {
        let prompt = compose_shotlist_prompt(concept, asset_names, target_duration, num_shots);
        let text = self
            .generate_structured_text(&prompt, json!({ "type": "ARRAY", "items": shot_schema() }))
            .await?;
        serde_json::from_str(&text)
            .map_err(|e| StorygenError::provider(format!("Invalid shotlist JSON: {e}")))
    }

    async fn generate_bridge_shot(
        &self,
        concept: &str,
        asset_names: &str,
        flow_before: &str,
        flow_after: &str,
    ) -> Result<ShotDraft> {
        let prompt = compose_bridge_prompt(concept, asset_names, flow_before, flow_after);
        let text = self.generate_structured_text(&prompt, shot_schema()).await?;
        serde_json::from_str(&text)
            .map_err(|e| StorygenError::provider(format!("Invalid bridge shot JSON: {e}")))
    }
}

/// Resolves the prompt actually sent to the video model: the fast tier
/// substitutes a default when empty, the pro tier requires one.
fn effective_video_prompt(prompt: &str, model: VideoModel) -> Result<String> {
    if !prompt.trim().is_empty() {
        return Ok(prompt.to_string());
    }
    if model.requires_prompt() {
        Err(StorygenError::invalid_input(
            "The pro video tier requires a prompt.",
        ))
    } else {
        Ok(DEFAULT_FAST_VIDEO_PROMPT.to_string())
    }
}

/// The JSON response schema for one shot entry.
fn shot_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "sceneDescription": { "type": "STRING" },
            "frameDescription": { "type": "STRING" },
            "voiceText": { "type": "STRING" },
            "duration": { "type": "NUMBER" }
        },
        "required": ["sceneDescription", "frameDescription", "voiceText", "duration"]
    })
}

/// Maps an HTTP error status from the provider onto the error taxonomy.
fn map_provider_status(status: reqwest::StatusCode, body: &str) -> StorygenError {
    match status.as_u16() {
        401 | 403 => StorygenError::auth(format!("Gemini rejected the credential: {status}")),
        404 => StorygenError::provider("Requested entity was not found."),
        429 => StorygenError::provider("The model is rate limited. Try again shortly."),
        _ => StorygenError::provider(format!("Gemini error {status}: {body}")),
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        let parts = self.candidates.into_iter().next()?.content?.parts?;
        let text: String = parts.into_iter().filter_map(|p| p.text).collect();
        if text.is_empty() { None } else { Some(text) }
    }

    fn first_inline_image(self) -> Option<EncodedImage> {
        let parts = self.candidates.into_iter().next()?.content?.parts?;
        parts
            .into_iter()
            .filter_map(|p| p.inline_data)
            .map(|d| EncodedImage::new(d.data, d.mime_type))
            .next()
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
    #[serde(default, rename = "inlineData")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: String,
    #[serde(rename = "mimeType")]
    mime_type: String,
}

#[derive(Debug, Deserialize)]
struct Operation {
    #[serde(default)]
    name: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    response: Option<OperationResponse>,
    #[serde(default)]
    error: Option<OperationError>,
}

#[derive(Debug, Deserialize)]
struct OperationResponse {
    #[serde(default, rename = "generatedVideos")]
    generated_videos: Vec<GeneratedVideo>,
}

#[derive(Debug, Deserialize)]
struct GeneratedVideo {
    #[serde(default)]
    video: Option<VideoFile>,
}

#[derive(Debug, Deserialize)]
struct VideoFile {
    uri: String,
}

#[derive(Debug, Deserialize)]
struct OperationError {
    #[serde(default)]
    message: String,
}
