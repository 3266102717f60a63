//! Storyboard orchestration use case.
//!
//! `StoryboardOrchestrator` owns the active [`Session`] exclusively and
//! drives the whole workflow: shotlist synthesis, per-entity image/video
//! generation with reference resolution, reordering, session switching, and
//! debounced persistence. The remote store is a one-way mirror of the
//! in-memory session and is treated as source of truth only at load time.
//!
//! Mutations are applied atomically between await points behind a `RwLock`;
//! no lock is held across an external call. Generation completions go
//! through two guards before committing media: the per-shot cancellation
//! marker and the per-entity request token (a superseded response neither
//! writes media nor touches the transient flag, which now belongs to the
//! newer request).

use crate::autosave::{AUTOSAVE_DELAY, Autosaver};
use crate::cancel::{CancellationRegistry, RequestTokens};
use crate::export;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;
use storygen_core::auth::AuthProvider;
use storygen_core::error::{Result, StorygenError};
use storygen_core::genai::{
    EncodedImage, GenerativeClient, ImageModel, ReferenceResolver, Resolution, ShotDraft,
    VideoModel, compose_asset_prompt, compose_frame_prompt,
    compose_video_prompt,
};
use storygen_core::session::{AspectRatio, Session, SessionRepository, Shot, style_by_id};
use storygen_core::storage::{MediaStorage, media_path};
use tokio::sync::RwLock;

/// Orchestrator lifecycle. Autosave scheduling is guarded by `Ready`, which
/// is set once after the initial load completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Uninitialized,
    Ready,
}

/// Direction for the adjacent-swap reordering primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Owns the active session and drives the storyboard workflow.
pub struct StoryboardOrchestrator {
    genai: Arc<dyn GenerativeClient>,
    storage: Arc<dyn MediaStorage>,
    resolver: Arc<dyn ReferenceResolver>,
    repository: Arc<dyn SessionRepository>,
    auth: Arc<dyn AuthProvider>,
    /// The active session, the only shared mutable state.
    session: Arc<RwLock<Session>>,
    /// Persisted session history, most recent first. Kept in sync by every
    /// successful save and refreshed from the store on deletion.
    sessions: Arc<RwLock<Vec<Session>>>,
    lifecycle: RwLock<Lifecycle>,
    cancelled: CancellationRegistry,
    tokens: RequestTokens,
    autosaver: Autosaver,
    last_error: Arc<RwLock<Option<String>>>,
    image_model: RwLock<ImageModel>,
}

impl StoryboardOrchestrator {
    pub fn new(
        genai: Arc<dyn GenerativeClient>,
        storage: Arc<dyn MediaStorage>,
        resolver: Arc<dyn ReferenceResolver>,
        repository: Arc<dyn SessionRepository>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        Self::with_autosave_delay(genai, storage, resolver, repository, auth, AUTOSAVE_DELAY)
    }

    /// Like [`new`](Self::new) with an explicit debounce delay.
    pub fn with_autosave_delay(
        genai: Arc<dyn GenerativeClient>,
        storage: Arc<dyn MediaStorage>,
        resolver: Arc<dyn ReferenceResolver>,
        repository: Arc<dyn SessionRepository>,
        auth: Arc<dyn AuthProvider>,
        autosave_delay: Duration,
    ) -> Self {
        let session = Arc::new(RwLock::new(Session::new()));
        let sessions = Arc::new(RwLock::new(Vec::<Session>::new()));
        let last_error = Arc::new(RwLock::new(None));
        let autosaver = Autosaver::new(autosave_delay, {
            let session = session.clone();
            let sessions = sessions.clone();
            let repository = repository.clone();
            let auth = auth.clone();
            let last_error = last_error.clone();
            move || -> BoxFuture<'static, ()> {
                let session = session.clone();
                let sessions = sessions.clone();
                let repository = repository.clone();
                let auth = auth.clone();
                let last_error = last_error.clone();
                Box::pin(async move {
                    // The snapshot is read fresh at fire time, so the next
                    // cycle retries implicitly after a generic failure.
                    let snapshot = session.read().await.clone();
                    tracing::debug!(session_id = %snapshot.id, "[Autosave] Persisting session");
                    match repository.save(&snapshot).await {
                        Ok(()) => {
                            let mut sessions = sessions.write().await;
                            match sessions.iter().position(|s| s.id == snapshot.id) {
                                Some(i) => sessions[i] = snapshot,
                                None => sessions.insert(0, snapshot),
                            }
                            sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
                        }
                        Err(e) if e.is_auth() => {
                            tracing::warn!("[Autosave] Credential rejected, signing out");
                            auth.sign_out().await;
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "[Autosave] Session save failed");
                            *last_error.write().await = Some(e.to_string());
                        }
                    }
                })
            }
        });
        Self {
            genai,
            storage,
            resolver,
            repository,
            auth,
            session,
            sessions,
            lifecycle: RwLock::new(Lifecycle::default()),
            cancelled: CancellationRegistry::new(),
            tokens: RequestTokens::new(),
            autosaver,
            last_error,
            image_model: RwLock::new(ImageModel::default()),
        }
    }

    // ---- lifecycle and session management ----

    /// Loads the session history and activates the most recent session, or
    /// starts a fresh project when none exist. Marks the orchestrator ready.
    ///
    /// A generic load failure surfaces a persistence error and falls back to
    /// a fresh project so the user can keep working; an auth-class failure
    /// forces sign-out instead.
    pub async fn init(&self) -> Result<()> {
        let sessions = match self.repository.list_all().await {
            Ok(sessions) => sessions,
            Err(e) if e.is_auth() => {
                tracing::warn!("[Orchestrator] Session load rejected, signing out");
                self.auth.sign_out().await;
                return Err(e);
            }
            Err(e) => {
                self.set_error(&e).await;
                Vec::new()
            }
        };
        tracing::info!(count = sessions.len(), "[Orchestrator] Loaded session history");
        let active = sessions.first().cloned().unwrap_or_default();
        *self.session.write().await = active;
        *self.sessions.write().await = sessions;
        *self.lifecycle.write().await = Lifecycle::Ready;
        Ok(())
    }

    /// Persists any pending edits and activates a fresh empty project.
    pub async fn start_new_project(&self) {
        self.autosaver.flush().await;
        *self.session.write().await = Session::new();
    }

    /// Persists any pending edits, then activates the given session from the
    /// store (falling back to the cached history copy).
    pub async fn select_session(&self, session_id: &str) -> Result<()> {
        self.autosaver.flush().await;
        let loaded = match self.repository.find_by_id(session_id).await {
            Ok(Some(session)) => session,
            Ok(None) => {
                let sessions = self.sessions.read().await;
                sessions
                    .iter()
                    .find(|s| s.id == session_id)
                    .cloned()
                    .ok_or_else(|| StorygenError::not_found("session", session_id))?
            }
            Err(e) if e.is_auth() => {
                self.auth.sign_out().await;
                return Err(e);
            }
            Err(e) => {
                self.set_error(&e).await;
                return Err(e);
            }
        };
        *self.session.write().await = loaded;
        Ok(())
    }

    /// Deletes a session. When the active session is deleted, the next most
    /// recent takes over, or a fresh project is started when none remain.
    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        match self.repository.delete(session_id).await {
            Ok(()) => {}
            Err(e) if e.is_auth() => {
                self.auth.sign_out().await;
                return Err(e);
            }
            Err(e) => {
                self.set_error(&e).await;
                return Err(e);
            }
        }
        // The store is the source of truth for what remains; the cached
        // history is only a fallback when the refresh itself fails.
        let remaining = match self.repository.list_all().await {
            Ok(sessions) => sessions,
            Err(e) => {
                tracing::warn!(error = %e, "[Orchestrator] History refresh failed after delete");
                let mut cached = self.sessions.read().await.clone();
                cached.retain(|s| s.id != session_id);
                cached
            }
        };
        let was_active = self.session.read().await.id == session_id;
        *self.sessions.write().await = remaining.clone();
        if was_active {
            // Never let a pending autosave resurrect the deleted session.
            self.autosaver.cancel();
            let next = remaining.into_iter().next().unwrap_or_default();
            *self.session.write().await = next;
        }
        Ok(())
    }

    // ---- shotlist synthesis ----

    /// Synthesizes a fresh shotlist from the concept, replacing the entire
    /// shot array. On failure the array is left untouched.
    pub async fn build_shotlist(&self) -> Result<()> {
        let (concept, asset_names, target_duration, num_shots) = {
            let session = self.session.read().await;
            if session.concept.trim().is_empty() {
                return Err(StorygenError::invalid_input(
                    "Cannot build a shotlist without a story concept",
                ));
            }
            (
                session.concept.clone(),
                selected_asset_names(&session),
                session.target_duration,
                session.num_shots,
            )
        };
        let drafts = match self
            .genai
            .generate_shotlist(&concept, &asset_names, target_duration, num_shots)
            .await
        {
            Ok(drafts) => drafts,
            Err(e) => {
                self.set_error(&e).await;
                return Err(e);
            }
        };
        tracing::info!(shots = drafts.len(), "[Orchestrator] Shotlist synthesized");
        {
            let mut session = self.session.write().await;
            session.shots = drafts.into_iter().map(shot_from_draft).collect();
            session.touch();
        }
        self.schedule_save().await;
        Ok(())
    }

    /// Fills the shot at `index` with a generated bridge connecting the
    /// scene flow before and after it. The shot's id and media are kept.
    pub async fn autocomplete_shot(&self, index: usize) -> Result<()> {
        let (concept, asset_names, flow_before, flow_after, shot_id) = {
            let session = self.session.read().await;
            let shot = session
                .shots
                .get(index)
                .ok_or_else(|| StorygenError::invalid_input(format!("No shot at index {index}")))?;
            let flow_before = scene_flow(&session.shots[..index]);
            let flow_after = scene_flow(&session.shots[index + 1..]);
            (
                session.concept.clone(),
                selected_asset_names(&session),
                flow_before,
                flow_after,
                shot.id.clone(),
            )
        };
        let draft = match self
            .genai
            .generate_bridge_shot(&concept, &asset_names, &flow_before, &flow_after)
            .await
        {
            Ok(draft) => draft,
            Err(e) => {
                self.set_error(&e).await;
                return Err(e);
            }
        };
        self.update_shot(&shot_id, move |shot| {
            shot.scene_description = draft.scene_description;
            shot.frame_description = draft.frame_description;
            shot.voice_text = draft.voice_text;
            shot.duration = draft.duration;
        })
        .await
    }

    // ---- generation ----

    /// Generates a square reference image for a cast asset and stores its
    /// public URL on the asset.
    pub async fn generate_asset_image(&self, asset_id: &str) -> Result<()> {
        let token_key = format!("asset:{asset_id}");
        let token = self.tokens.issue(&token_key);

        let prompt = {
            let mut session = self.session.write().await;
            let style = style_by_id(&session.config.style);
            let asset = session
                .assets
                .iter_mut()
                .find(|a| a.id == asset_id)
                .ok_or_else(|| StorygenError::not_found("asset", asset_id))?;
            asset.is_generating = true;
            compose_asset_prompt(asset, style)
        };

        let model = *self.image_model.read().await;
        let result = self
            .genai
            .generate_image(&prompt, model, AspectRatio::Square, &[])
            .await;
        let latest = self.tokens.is_latest(&token_key, token);

        let outcome = match result {
            Ok(Some(image)) if latest => self.upload_image(&image, "assets").await.map(Some),
            Ok(_) => Ok(None),
            Err(e) => Err(e),
        };

        {
            let mut session = self.session.write().await;
            if let Some(asset) = session.assets.iter_mut().find(|a| a.id == asset_id) {
                if latest {
                    asset.is_generating = false;
                    if let Ok(Some(url)) = &outcome {
                        asset.image_url = Some(url.clone());
                    }
                }
            }
            if matches!(outcome, Ok(Some(_))) {
                session.touch();
            }
        }
        if matches!(outcome, Ok(Some(_))) {
            self.schedule_save().await;
        }
        match outcome {
            Ok(_) => Ok(()),
            Err(e) => {
                self.set_error(&e).await;
                Err(e)
            }
        }
    }

    /// Uploads caller-supplied image bytes (picked file or capture) and
    /// attaches the public URL to the asset.
    pub async fn attach_asset_image(
        &self,
        asset_id: &str,
        bytes: Vec<u8>,
        mime_type: &str,
    ) -> Result<()> {
        {
            let session = self.session.read().await;
            if !session.assets.iter().any(|a| a.id == asset_id) {
                return Err(StorygenError::not_found("asset", asset_id));
            }
        }
        let path = media_path("uploads", extension_for(mime_type));
        let url = match self.storage.upload(bytes, mime_type, &path).await {
            Ok(url) => url,
            Err(e) => {
                self.set_error(&e).await;
                return Err(e);
            }
        };
        {
            let mut session = self.session.write().await;
            if let Some(asset) = session.assets.iter_mut().find(|a| a.id == asset_id) {
                asset.image_url = Some(url);
            }
            session.touch();
        }
        self.schedule_save().await;
        Ok(())
    }

    /// Generates the storyboard frame for a shot, using every selected asset
    /// that carries an image as visual reference.
    pub async fn generate_frame(&self, shot_id: &str) -> Result<()> {
        self.cancelled.clear(shot_id);
        let token_key = format!("frame:{shot_id}");
        let token = self.tokens.issue(&token_key);

        let (prompt, aspect_ratio, reference_urls) = {
            let mut session = self.session.write().await;
            let style = style_by_id(&session.config.style);
            let aspect_ratio = session.config.aspect_ratio;
            let reference_urls: Vec<String> = session
                .assets
                .iter()
                .filter(|a| a.is_selected)
                .filter_map(|a| a.image_url.clone())
                .collect();
            let shot = session
                .shots
                .iter_mut()
                .find(|s| s.id == shot_id)
                .ok_or_else(|| StorygenError::not_found("shot", shot_id))?;
            shot.is_generating = true;
            (compose_frame_prompt(shot, style), aspect_ratio, reference_urls)
        };

        let references = self.resolve_references(&reference_urls).await;
        let model = *self.image_model.read().await;
        let result = self
            .genai
            .generate_image(&prompt, model, aspect_ratio, &references)
            .await;

        let was_cancelled = self.cancelled.take(shot_id);
        let latest = self.tokens.is_latest(&token_key, token);
        if was_cancelled {
            tracing::info!(shot_id, "[Orchestrator] Frame result discarded after stop");
        }

        let outcome = match result {
            Ok(Some(image)) if latest && !was_cancelled => {
                self.upload_image(&image, "frames").await.map(Some)
            }
            Ok(_) => Ok(None),
            Err(e) => Err(e),
        };

        {
            let mut session = self.session.write().await;
            if let Some(shot) = session.shots.iter_mut().find(|s| s.id == shot_id) {
                if latest {
                    shot.is_generating = false;
                    if let Ok(Some(url)) = &outcome {
                        shot.image_url = Some(url.clone());
                    }
                }
            }
            if matches!(outcome, Ok(Some(_))) {
                session.touch();
            }
        }
        if matches!(outcome, Ok(Some(_))) {
            self.schedule_save().await;
        }
        match outcome {
            Ok(_) => Ok(()),
            Err(e) => {
                self.set_error(&e).await;
                Err(e)
            }
        }
    }

    /// Generates a video clip for a shot at the fast tier, seeded with its
    /// frame when one exists. Proceeds without a seed otherwise.
    pub async fn generate_clip_for_shot(&self, shot_id: &str) -> Result<()> {
        self.cancelled.clear(shot_id);
        let token_key = format!("clip:{shot_id}");
        let token = self.tokens.issue(&token_key);

        let (prompt, aspect_ratio, frame_url) = {
            let mut session = self.session.write().await;
            let style = style_by_id(&session.config.style);
            let aspect_ratio = session.config.aspect_ratio;
            let shot = session
                .shots
                .iter_mut()
                .find(|s| s.id == shot_id)
                .ok_or_else(|| StorygenError::not_found("shot", shot_id))?;
            shot.is_generating_video = true;
            // A committed clip stays in place until the replacement succeeds.
            (compose_video_prompt(shot, style), aspect_ratio, shot.image_url.clone())
        };

        let seed = match &frame_url {
            Some(url) => match self.resolver.resolve(url).await {
                Ok(image) => Some(image),
                Err(e) => {
                    tracing::warn!(shot_id, error = %e, "[Orchestrator] Seed frame unresolved, generating without it");
                    None
                }
            },
            None => None,
        };

        let result = self
            .genai
            .generate_video(
                &prompt,
                VideoModel::Fast,
                seed.as_ref(),
                aspect_ratio,
                Resolution::P720,
            )
            .await;

        let was_cancelled = self.cancelled.take(shot_id);
        let latest = self.tokens.is_latest(&token_key, token);
        if was_cancelled {
            tracing::info!(shot_id, "[Orchestrator] Clip result discarded after stop");
        }

        let outcome = match result {
            Ok(bytes) if latest && !was_cancelled => {
                let path = media_path("clips", "mp4");
                self.storage.upload(bytes, "video/mp4", &path).await.map(Some)
            }
            Ok(_) => Ok(None),
            Err(e) => Err(e),
        };

        {
            let mut session = self.session.write().await;
            if let Some(shot) = session.shots.iter_mut().find(|s| s.id == shot_id) {
                if latest {
                    shot.is_generating_video = false;
                    if let Ok(Some(url)) = &outcome {
                        shot.video_url = Some(url.clone());
                    }
                }
            }
            if matches!(outcome, Ok(Some(_))) {
                session.touch();
            }
        }
        if matches!(outcome, Ok(Some(_))) {
            self.schedule_save().await;
        }
        match outcome {
            Ok(_) => Ok(()),
            Err(e) => {
                self.set_error(&e).await;
                Err(e)
            }
        }
    }

    /// Requests cooperative cancellation for a shot's in-flight generation.
    /// The remote call is not interrupted; its result is discarded.
    pub fn stop_generation(&self, shot_id: &str) {
        self.cancelled.request(shot_id);
    }

    // ---- shot list editing ----

    /// Appends a blank shot and returns its id.
    pub async fn add_shot(&self) -> String {
        let id = {
            let mut session = self.session.write().await;
            let shot = Shot::blank();
            let id = shot.id.clone();
            session.shots.push(shot);
            session.touch();
            id
        };
        self.schedule_save().await;
        id
    }

    /// Removes a shot by id. Removing an unknown id is a no-op.
    pub async fn remove_shot(&self, shot_id: &str) {
        let removed = {
            let mut session = self.session.write().await;
            let before = session.shots.len();
            session.shots.retain(|s| s.id != shot_id);
            let removed = session.shots.len() != before;
            if removed {
                session.touch();
            }
            removed
        };
        if removed {
            self.schedule_save().await;
        }
    }

    /// Swaps the shot at `index` with its immediate neighbor. Out-of-bounds
    /// targets are a no-op.
    pub async fn move_shot(&self, index: usize, direction: MoveDirection) {
        let swapped = {
            let mut session = self.session.write().await;
            let target = match direction {
                MoveDirection::Up => index.checked_sub(1),
                MoveDirection::Down => index.checked_add(1),
            };
            match target {
                Some(target) if index < session.shots.len() && target < session.shots.len() => {
                    session.shots.swap(index, target);
                    session.touch();
                    true
                }
                _ => false,
            }
        };
        if swapped {
            self.schedule_save().await;
        }
    }

    pub async fn set_shot_scene_description(&self, shot_id: &str, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        self.update_shot(shot_id, move |shot| shot.scene_description = text).await
    }

    pub async fn set_shot_frame_description(&self, shot_id: &str, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        self.update_shot(shot_id, move |shot| shot.frame_description = text).await
    }

    pub async fn set_shot_voice_text(&self, shot_id: &str, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        self.update_shot(shot_id, move |shot| shot.voice_text = text).await
    }

    pub async fn set_shot_duration(&self, shot_id: &str, duration: f64) -> Result<()> {
        if duration <= 0.0 {
            return Err(StorygenError::invalid_input(
                "Shot duration must be a positive number of seconds",
            ));
        }
        self.update_shot(shot_id, move |shot| shot.duration = duration).await
    }

    // ---- project and asset editing ----

    pub async fn set_concept(&self, concept: impl Into<String>) {
        {
            let mut session = self.session.write().await;
            session.concept = concept.into();
            session.touch();
        }
        self.schedule_save().await;
    }

    pub async fn set_target_duration(&self, target_duration: Option<u32>) {
        {
            let mut session = self.session.write().await;
            session.target_duration = target_duration;
            session.touch();
        }
        self.schedule_save().await;
    }

    pub async fn set_num_shots(&self, num_shots: Option<u32>) {
        {
            let mut session = self.session.write().await;
            session.num_shots = num_shots;
            session.touch();
        }
        self.schedule_save().await;
    }

    /// Selects a catalog style. Unknown ids resolve to the default style.
    pub async fn set_style(&self, style_id: &str) {
        {
            let mut session = self.session.write().await;
            session.config.style = style_by_id(style_id).id.to_string();
            session.touch();
        }
        self.schedule_save().await;
    }

    pub async fn set_aspect_ratio(&self, aspect_ratio: AspectRatio) {
        {
            let mut session = self.session.write().await;
            session.config.aspect_ratio = aspect_ratio;
            session.touch();
        }
        self.schedule_save().await;
    }

    /// Selects the image model tier for subsequent generations. Not part of
    /// the persisted session.
    pub async fn set_image_model(&self, model: ImageModel) {
        *self.image_model.write().await = model;
    }

    pub async fn set_asset_name(&self, asset_id: &str, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.update_asset(asset_id, move |asset| asset.name = name).await
    }

    pub async fn set_asset_prompt(&self, asset_id: &str, prompt: impl Into<String>) -> Result<()> {
        let prompt = prompt.into();
        self.update_asset(asset_id, move |asset| asset.prompt = prompt).await
    }

    pub async fn set_asset_selected(&self, asset_id: &str, is_selected: bool) -> Result<()> {
        self.update_asset(asset_id, move |asset| asset.is_selected = is_selected).await
    }

    // ---- accessors ----

    /// Snapshot of the active session.
    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Snapshot of the session history, most recent first.
    pub async fn sessions(&self) -> Vec<Session> {
        self.sessions.read().await.clone()
    }

    pub async fn lifecycle(&self) -> Lifecycle {
        *self.lifecycle.read().await
    }

    pub async fn image_model(&self) -> ImageModel {
        *self.image_model.read().await
    }

    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }

    pub async fn clear_error(&self) {
        *self.last_error.write().await = None;
    }

    /// Renders the active session as a downloadable production sheet.
    pub async fn production_sheet(&self) -> String {
        export::production_sheet(&*self.session.read().await)
    }

    /// Forces any pending autosave to run now.
    pub async fn flush_save(&self) {
        self.autosaver.flush().await;
    }

    // ---- internals ----

    async fn update_shot(&self, shot_id: &str, apply: impl FnOnce(&mut Shot)) -> Result<()> {
        {
            let mut session = self.session.write().await;
            let shot = session
                .shots
                .iter_mut()
                .find(|s| s.id == shot_id)
                .ok_or_else(|| StorygenError::not_found("shot", shot_id))?;
            apply(shot);
            session.touch();
        }
        self.schedule_save().await;
        Ok(())
    }

    async fn update_asset(
        &self,
        asset_id: &str,
        apply: impl FnOnce(&mut storygen_core::session::Asset),
    ) -> Result<()> {
        {
            let mut session = self.session.write().await;
            let asset = session
                .assets
                .iter_mut()
                .find(|a| a.id == asset_id)
                .ok_or_else(|| StorygenError::not_found("asset", asset_id))?;
            apply(asset);
            session.touch();
        }
        self.schedule_save().await;
        Ok(())
    }

    /// Resolves reference URLs to encoded images, skipping failures.
    async fn resolve_references(&self, urls: &[String]) -> Vec<EncodedImage> {
        let mut references = Vec::with_capacity(urls.len());
        for url in urls {
            match self.resolver.resolve(url).await {
                Ok(image) => references.push(image),
                Err(e) => {
                    tracing::warn!(error = %e, "[Orchestrator] Skipping unresolved reference");
                }
            }
        }
        references
    }

    async fn upload_image(&self, image: &EncodedImage, prefix: &str) -> Result<String> {
        let bytes = image.to_bytes()?;
        let path = media_path(prefix, image.extension());
        self.storage.upload(bytes, &image.mime_type, &path).await
    }

    async fn schedule_save(&self) {
        if *self.lifecycle.read().await == Lifecycle::Ready {
            self.autosaver.schedule();
        }
    }

    async fn set_error(&self, error: &StorygenError) {
        tracing::error!(error = %error, "[Orchestrator] Operation failed");
        *self.last_error.write().await = Some(error.to_string());
    }
}

fn shot_from_draft(draft: ShotDraft) -> Shot {
    Shot {
        id: Shot::generate_id(),
        scene_description: draft.scene_description,
        frame_description: draft.frame_description,
        voice_text: draft.voice_text,
        duration: draft.duration,
        image_url: None,
        video_url: None,
        is_generating: false,
        is_generating_video: false,
    }
}

fn selected_asset_names(session: &Session) -> String {
    session
        .assets
        .iter()
        .filter(|a| a.is_selected)
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn scene_flow(shots: &[Shot]) -> String {
    shots
        .iter()
        .map(|s| s.scene_description.as_str())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn extension_for(mime_type: &str) -> &str {
    match mime_type {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        _ => "png",
    }
}
