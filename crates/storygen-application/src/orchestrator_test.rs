use crate::orchestrator::{Lifecycle, MoveDirection, StoryboardOrchestrator};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storygen_core::auth::AuthProvider;
use storygen_core::error::{Result, StorygenError};
use storygen_core::genai::{
    EncodedImage, GenerativeClient, ImageModel, ReferenceResolver, Resolution, ShotDraft,
    VideoModel,
};
use storygen_core::session::{AspectRatio, Session, SessionRepository, UNTITLED_TITLE};
use storygen_core::storage::MediaStorage;
use tokio::sync::Notify;

// Mock generative client with scriptable responses
struct MockGenai {
    shotlist: Mutex<Result<Vec<ShotDraft>>>,
    bridge: Mutex<Result<ShotDraft>>,
    fail_image: AtomicBool,
    fail_video: AtomicBool,
    /// When set, generate_image blocks until notified
    image_gate: Mutex<Option<Arc<Notify>>>,
    image_calls: AtomicUsize,
    reference_counts: Mutex<Vec<usize>>,
    bridge_flows: Mutex<Vec<(String, String)>>,
}

impl MockGenai {
    fn new() -> Self {
        Self {
            shotlist: Mutex::new(Ok(drafts(3))),
            bridge: Mutex::new(Ok(draft("bridge"))),
            fail_image: AtomicBool::new(false),
            fail_video: AtomicBool::new(false),
            image_gate: Mutex::new(None),
            image_calls: AtomicUsize::new(0),
            reference_counts: Mutex::new(Vec::new()),
            bridge_flows: Mutex::new(Vec::new()),
        }
    }

    fn set_shotlist(&self, result: Result<Vec<ShotDraft>>) {
        *self.shotlist.lock().unwrap() = result;
    }

    fn gate_images(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.image_gate.lock().unwrap() = Some(gate.clone());
        gate
    }
}

#[async_trait]
impl GenerativeClient for MockGenai {
    async fn generate_image(
        &self,
        _prompt: &str,
        _model: ImageModel,
        _aspect_ratio: AspectRatio,
        references: &[EncodedImage],
    ) -> Result<Option<EncodedImage>> {
        self.reference_counts.lock().unwrap().push(references.len());
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.image_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.fail_image.load(Ordering::SeqCst) {
            return Err(StorygenError::provider("image generation failed"));
        }
        Ok(Some(EncodedImage::from_bytes(b"generated", "image/png")))
    }

    async fn generate_video(
        &self,
        _prompt: &str,
        _model: VideoModel,
        _seed_image: Option<&EncodedImage>,
        _aspect_ratio: AspectRatio,
        _resolution: Resolution,
    ) -> Result<Vec<u8>> {
        if self.fail_video.load(Ordering::SeqCst) {
            return Err(StorygenError::provider("video generation failed"));
        }
        Ok(b"clip-bytes".to_vec())
    }

    async fn generate_shotlist(
        &self,
        _concept: &str,
        _asset_names: &str,
        _target_duration: Option<u32>,
        _num_shots: Option<u32>,
    ) -> Result<Vec<ShotDraft>> {
        self.shotlist.lock().unwrap().clone()
    }

    async fn generate_bridge_shot(
        &self,
        _concept: &str,
        _asset_names: &str,
        flow_before: &str,
        flow_after: &str,
    ) -> Result<ShotDraft> {
        self.bridge_flows
            .lock()
            .unwrap()
            .push((flow_before.to_string(), flow_after.to_string()));
        self.bridge.lock().unwrap().clone()
    }
}

struct MockStorage {
    uploads: Mutex<Vec<String>>,
}

impl MockStorage {
    fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
        }
    }

    fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl MediaStorage for MockStorage {
    async fn upload(&self, _bytes: Vec<u8>, _mime_type: &str, path: &str) -> Result<String> {
        self.uploads.lock().unwrap().push(path.to_string());
        Ok(format!("https://cdn.test/{path}"))
    }
}

struct MockResolver {
    resolutions: AtomicUsize,
    failing: Mutex<HashSet<String>>,
}

impl MockResolver {
    fn new() -> Self {
        Self {
            resolutions: AtomicUsize::new(0),
            failing: Mutex::new(HashSet::new()),
        }
    }
}

#[async_trait]
impl ReferenceResolver for MockResolver {
    async fn resolve(&self, reference: &str) -> Result<EncodedImage> {
        self.resolutions.fetch_add(1, Ordering::SeqCst);
        if self.failing.lock().unwrap().contains(reference) {
            return Err(StorygenError::provider("fetch failed"));
        }
        Ok(EncodedImage::from_bytes(b"reference", "image/png"))
    }
}

struct MockRepository {
    sessions: Mutex<HashMap<String, Session>>,
    save_count: AtomicUsize,
    fail_save_with_auth: AtomicBool,
    fail_list_all: AtomicBool,
}

impl MockRepository {
    fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            save_count: AtomicUsize::new(0),
            fail_save_with_auth: AtomicBool::new(false),
            fail_list_all: AtomicBool::new(false),
        }
    }

    fn insert(&self, session: Session) {
        self.sessions.lock().unwrap().insert(session.id.clone(), session);
    }

    fn saved(&self, id: &str) -> Option<Session> {
        self.sessions.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl SessionRepository for MockRepository {
    async fn save(&self, session: &Session) -> Result<()> {
        if self.fail_save_with_auth.load(Ordering::SeqCst) {
            return Err(StorygenError::auth("JWT expired"));
        }
        self.save_count.fetch_add(1, Ordering::SeqCst);
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Session>> {
        if self.fail_list_all.load(Ordering::SeqCst) {
            return Err(StorygenError::data_access("session listing failed"));
        }
        let mut sessions: Vec<Session> = self.sessions.lock().unwrap().values().cloned().collect();
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions)
    }

    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.lock().unwrap().get(session_id).cloned())
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        self.sessions.lock().unwrap().remove(session_id);
        Ok(())
    }
}

struct MockAuth {
    signed_out: AtomicBool,
}

impl MockAuth {
    fn new() -> Self {
        Self {
            signed_out: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl AuthProvider for MockAuth {
    async fn user_id(&self) -> Result<String> {
        Ok("user-1".to_string())
    }

    async fn access_token(&self) -> Result<String> {
        Ok("token".to_string())
    }

    async fn sign_out(&self) {
        self.signed_out.store(true, Ordering::SeqCst);
    }
}

fn draft(label: &str) -> ShotDraft {
    ShotDraft {
        scene_description: format!("{label} action"),
        frame_description: format!("{label} framing"),
        voice_text: format!("{label} line"),
        duration: 3.0,
    }
}

fn drafts(count: usize) -> Vec<ShotDraft> {
    (1..=count).map(|n| draft(&format!("shot {n}"))).collect()
}

struct Harness {
    orchestrator: Arc<StoryboardOrchestrator>,
    genai: Arc<MockGenai>,
    storage: Arc<MockStorage>,
    resolver: Arc<MockResolver>,
    repository: Arc<MockRepository>,
    auth: Arc<MockAuth>,
}

fn harness() -> Harness {
    let genai = Arc::new(MockGenai::new());
    let storage = Arc::new(MockStorage::new());
    let resolver = Arc::new(MockResolver::new());
    let repository = Arc::new(MockRepository::new());
    let auth = Arc::new(MockAuth::new());
    let orchestrator = Arc::new(StoryboardOrchestrator::with_autosave_delay(
        genai.clone(),
        storage.clone(),
        resolver.clone(),
        repository.clone(),
        auth.clone(),
        Duration::from_millis(1000),
    ));
    Harness {
        orchestrator,
        genai,
        storage,
        resolver,
        repository,
        auth,
    }
}

#[tokio::test]
async fn init_starts_fresh_when_no_sessions_exist() {
    let h = harness();
    h.orchestrator.init().await.unwrap();
    assert_eq!(h.orchestrator.lifecycle().await, Lifecycle::Ready);
    let session = h.orchestrator.session().await;
    assert_eq!(session.title, UNTITLED_TITLE);
    assert!(session.shots.is_empty());
    assert_eq!(session.assets.len(), 3);
}

#[tokio::test]
async fn init_activates_the_most_recent_session() {
    let h = harness();
    let mut old = Session::new();
    old.concept = "old story".to_string();
    old.updated_at = "2026-01-01T00:00:00Z".to_string();
    let mut recent = Session::new();
    recent.concept = "recent story".to_string();
    recent.updated_at = "2026-02-01T00:00:00Z".to_string();
    h.repository.insert(old);
    h.repository.insert(recent.clone());

    h.orchestrator.init().await.unwrap();
    assert_eq!(h.orchestrator.session().await.id, recent.id);
    assert_eq!(h.orchestrator.sessions().await.len(), 2);
}

#[tokio::test]
async fn build_shotlist_requires_a_concept() {
    let h = harness();
    h.orchestrator.init().await.unwrap();
    let err = h.orchestrator.build_shotlist().await.unwrap_err();
    assert!(matches!(err, StorygenError::InvalidInput(_)));
    assert!(h.orchestrator.session().await.shots.is_empty());
}

#[tokio::test]
async fn build_shotlist_replaces_the_whole_shot_array() {
    let h = harness();
    h.orchestrator.init().await.unwrap();
    h.orchestrator.set_concept("A robot explores a ruined city").await;
    h.orchestrator.set_num_shots(Some(3)).await;

    h.orchestrator.build_shotlist().await.unwrap();

    let session = h.orchestrator.session().await;
    assert_eq!(session.shots.len(), 3);
    for shot in &session.shots {
        assert_eq!(shot.id.len(), 9);
        assert!(!shot.scene_description.is_empty());
        assert!(!shot.frame_description.is_empty());
        assert!(shot.duration > 0.0);
        assert!(!shot.is_generating);
        assert!(shot.image_url.is_none());
    }
    let ids: HashSet<_> = session.shots.iter().map(|s| s.id.clone()).collect();
    assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn failed_shotlist_leaves_existing_shots_untouched() {
    let h = harness();
    h.orchestrator.init().await.unwrap();
    h.orchestrator.set_concept("A robot explores a ruined city").await;
    h.orchestrator.build_shotlist().await.unwrap();
    let before = h.orchestrator.session().await.shots;

    h.genai.set_shotlist(Err(StorygenError::provider("model unavailable")));
    assert!(h.orchestrator.build_shotlist().await.is_err());

    let after = h.orchestrator.session().await.shots;
    assert_eq!(before, after);
    assert!(h.orchestrator.last_error().await.unwrap().contains("model unavailable"));
}

#[tokio::test]
async fn frame_generation_clears_the_flag_in_every_outcome() {
    let h = harness();
    h.orchestrator.init().await.unwrap();
    let shot_id = h.orchestrator.add_shot().await;

    h.orchestrator.generate_frame(&shot_id).await.unwrap();
    let session = h.orchestrator.session().await;
    let shot = session.shots.iter().find(|s| s.id == shot_id).unwrap();
    assert!(!shot.is_generating);
    let frame_url = shot.image_url.clone().unwrap();
    assert!(frame_url.starts_with("https://cdn.test/frames/"));

    h.genai.fail_image.store(true, Ordering::SeqCst);
    assert!(h.orchestrator.generate_frame(&shot_id).await.is_err());
    let session = h.orchestrator.session().await;
    let shot = session.shots.iter().find(|s| s.id == shot_id).unwrap();
    assert!(!shot.is_generating);
    // prior committed media survives the failure
    assert_eq!(shot.image_url.as_deref(), Some(frame_url.as_str()));
}

#[tokio::test]
async fn cancelled_frame_generation_writes_no_media() {
    let h = harness();
    h.orchestrator.init().await.unwrap();
    let shot_id = h.orchestrator.add_shot().await;
    let gate = h.genai.gate_images();

    let task = tokio::spawn({
        let orchestrator = h.orchestrator.clone();
        let shot_id = shot_id.clone();
        async move { orchestrator.generate_frame(&shot_id).await }
    });
    // wait until the generation call is actually in flight
    while h.genai.image_calls.load(Ordering::SeqCst) == 0 {
        tokio::task::yield_now().await;
    }
    h.orchestrator.stop_generation(&shot_id);
    gate.notify_one();
    task.await.unwrap().unwrap();

    let session = h.orchestrator.session().await;
    let shot = session.shots.iter().find(|s| s.id == shot_id).unwrap();
    assert!(shot.image_url.is_none());
    assert!(!shot.is_generating);
    assert_eq!(h.storage.upload_count(), 0);
}

#[tokio::test]
async fn frame_generation_passes_every_resolved_reference() {
    let h = harness();
    h.orchestrator.init().await.unwrap();
    // two selected assets with images, one unselected asset with an image
    h.orchestrator
        .attach_asset_image("c1", b"a".to_vec(), "image/png")
        .await
        .unwrap();
    h.orchestrator.set_asset_selected("c2", true).await.unwrap();
    h.orchestrator
        .attach_asset_image("c2", b"b".to_vec(), "image/png")
        .await
        .unwrap();
    h.orchestrator
        .attach_asset_image("o1", b"c".to_vec(), "image/png")
        .await
        .unwrap();

    let shot_id = h.orchestrator.add_shot().await;
    h.orchestrator.generate_frame(&shot_id).await.unwrap();

    assert_eq!(h.resolver.resolutions.load(Ordering::SeqCst), 2);
    assert_eq!(h.genai.reference_counts.lock().unwrap().last(), Some(&2));
}

#[tokio::test]
async fn unresolvable_references_are_skipped_not_fatal() {
    let h = harness();
    h.orchestrator.init().await.unwrap();
    h.orchestrator
        .attach_asset_image("c1", b"a".to_vec(), "image/png")
        .await
        .unwrap();
    let bad_url = h.orchestrator.session().await.assets[0]
        .image_url
        .clone()
        .unwrap();
    h.resolver.failing.lock().unwrap().insert(bad_url);

    let shot_id = h.orchestrator.add_shot().await;
    h.orchestrator.generate_frame(&shot_id).await.unwrap();

    assert_eq!(h.genai.reference_counts.lock().unwrap().last(), Some(&0));
}

#[tokio::test]
async fn clip_generation_stores_the_video_url() {
    let h = harness();
    h.orchestrator.init().await.unwrap();
    let shot_id = h.orchestrator.add_shot().await;
    h.orchestrator.generate_frame(&shot_id).await.unwrap();

    h.orchestrator.generate_clip_for_shot(&shot_id).await.unwrap();

    let session = h.orchestrator.session().await;
    let shot = session.shots.iter().find(|s| s.id == shot_id).unwrap();
    assert!(!shot.is_generating_video);
    assert!(shot.video_url.as_deref().unwrap().starts_with("https://cdn.test/clips/"));
}

#[tokio::test]
async fn failed_clip_regeneration_keeps_the_committed_video() {
    let h = harness();
    h.orchestrator.init().await.unwrap();
    let shot_id = h.orchestrator.add_shot().await;
    h.orchestrator.generate_clip_for_shot(&shot_id).await.unwrap();
    let committed = h.orchestrator.session().await.shots[0].video_url.clone().unwrap();

    h.genai.fail_video.store(true, Ordering::SeqCst);
    assert!(h.orchestrator.generate_clip_for_shot(&shot_id).await.is_err());

    let session = h.orchestrator.session().await;
    let shot = session.shots.iter().find(|s| s.id == shot_id).unwrap();
    assert_eq!(shot.video_url.as_deref(), Some(committed.as_str()));
    assert!(!shot.is_generating_video);
}

#[tokio::test]
async fn asset_generation_uploads_a_square_image() {
    let h = harness();
    h.orchestrator.init().await.unwrap();
    h.orchestrator.generate_asset_image("c1").await.unwrap();

    let session = h.orchestrator.session().await;
    let asset = session.assets.iter().find(|a| a.id == "c1").unwrap();
    assert!(!asset.is_generating);
    assert!(asset.image_url.as_deref().unwrap().starts_with("https://cdn.test/assets/"));
}

#[tokio::test]
async fn moving_past_the_edges_is_a_no_op() {
    let h = harness();
    h.orchestrator.init().await.unwrap();
    h.orchestrator.set_concept("edges").await;
    h.orchestrator.build_shotlist().await.unwrap();
    let before: Vec<String> = h.orchestrator.session().await.shots.iter().map(|s| s.id.clone()).collect();

    h.orchestrator.move_shot(0, MoveDirection::Up).await;
    h.orchestrator.move_shot(before.len() - 1, MoveDirection::Down).await;
    let after: Vec<String> = h.orchestrator.session().await.shots.iter().map(|s| s.id.clone()).collect();
    assert_eq!(before, after);

    h.orchestrator.move_shot(0, MoveDirection::Down).await;
    let swapped: Vec<String> = h.orchestrator.session().await.shots.iter().map(|s| s.id.clone()).collect();
    assert_eq!(swapped[0], before[1]);
    assert_eq!(swapped[1], before[0]);
}

#[tokio::test]
async fn autocomplete_fills_the_shot_in_place() {
    let h = harness();
    h.orchestrator.init().await.unwrap();
    h.orchestrator.set_concept("bridging").await;
    h.orchestrator.build_shotlist().await.unwrap();
    let middle_id = h.orchestrator.session().await.shots[1].id.clone();

    h.orchestrator.autocomplete_shot(1).await.unwrap();

    let session = h.orchestrator.session().await;
    assert_eq!(session.shots[1].id, middle_id);
    assert_eq!(session.shots[1].scene_description, "bridge action");

    let flows = h.genai.bridge_flows.lock().unwrap();
    let (before, after) = flows.last().unwrap();
    assert_eq!(before, "shot 1 action");
    assert_eq!(after, "shot 3 action");
}

#[tokio::test(start_paused = true)]
async fn rapid_mutations_coalesce_into_one_save() {
    let h = harness();
    h.orchestrator.init().await.unwrap();
    let session_id = h.orchestrator.session().await.id;

    for n in 0..5 {
        h.orchestrator.set_concept(format!("concept {n}")).await;
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(h.repository.save_count.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert_eq!(h.repository.save_count.load(Ordering::SeqCst), 1);
    let saved = h.repository.saved(&session_id).unwrap();
    assert_eq!(saved.concept, "concept 4");
}

#[tokio::test]
async fn mutations_before_init_are_not_persisted() {
    let h = harness();
    h.orchestrator.set_concept("too early").await;
    h.orchestrator.flush_save().await;
    assert_eq!(h.repository.save_count.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn auth_failure_during_save_forces_sign_out() {
    let h = harness();
    h.orchestrator.init().await.unwrap();
    h.repository.fail_save_with_auth.store(true, Ordering::SeqCst);

    h.orchestrator.set_concept("expired").await;
    h.orchestrator.flush_save().await;

    assert!(h.auth.signed_out.load(Ordering::SeqCst));
}

#[tokio::test]
async fn deleting_the_only_session_starts_a_fresh_project() {
    let h = harness();
    let mut existing = Session::new();
    existing.concept = "sole project".to_string();
    existing.touch();
    let existing_id = existing.id.clone();
    h.repository.insert(existing);

    h.orchestrator.init().await.unwrap();
    assert_eq!(h.orchestrator.session().await.id, existing_id);

    h.orchestrator.delete_session(&existing_id).await.unwrap();

    let session = h.orchestrator.session().await;
    assert_ne!(session.id, existing_id);
    assert_eq!(session.title, UNTITLED_TITLE);
    assert!(session.shots.is_empty());
    assert_eq!(session.assets.len(), 3);
    assert!(h.repository.saved(&existing_id).is_none());
}

#[tokio::test]
async fn deleting_an_inactive_session_keeps_the_active_one() {
    let h = harness();
    let mut old = Session::new();
    old.updated_at = "2026-01-01T00:00:00Z".to_string();
    let mut recent = Session::new();
    recent.updated_at = "2026-02-01T00:00:00Z".to_string();
    let old_id = old.id.clone();
    let recent_id = recent.id.clone();
    h.repository.insert(old);
    h.repository.insert(recent);

    h.orchestrator.init().await.unwrap();
    h.orchestrator.delete_session(&old_id).await.unwrap();

    assert_eq!(h.orchestrator.session().await.id, recent_id);
    assert_eq!(h.orchestrator.sessions().await.len(), 1);
}

#[tokio::test]
async fn deleting_the_active_session_activates_the_stored_copy() {
    let h = harness();
    let mut a = Session::new();
    a.concept = "original A concept".to_string();
    a.updated_at = "2026-01-01T00:00:00Z".to_string();
    let mut b = Session::new();
    b.updated_at = "2026-02-01T00:00:00Z".to_string();
    let a_id = a.id.clone();
    let b_id = b.id.clone();
    h.repository.insert(a);
    h.repository.insert(b);

    h.orchestrator.init().await.unwrap();
    h.orchestrator.select_session(&a_id).await.unwrap();
    h.orchestrator.set_concept("edited A concept").await;
    h.orchestrator.flush_save().await;
    h.orchestrator.select_session(&b_id).await.unwrap();

    h.orchestrator.delete_session(&b_id).await.unwrap();

    // the fallback must carry the persisted edit, not the load-time snapshot
    let session = h.orchestrator.session().await;
    assert_eq!(session.id, a_id);
    assert_eq!(session.concept, "edited A concept");
}

#[tokio::test]
async fn saved_new_sessions_appear_in_the_history() {
    let h = harness();
    h.orchestrator.init().await.unwrap();
    assert!(h.orchestrator.sessions().await.is_empty());

    h.orchestrator.set_concept("brand new project").await;
    h.orchestrator.flush_save().await;

    let history = h.orchestrator.sessions().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].concept, "brand new project");
}

#[tokio::test]
async fn generic_load_failure_falls_back_to_a_fresh_project() {
    let h = harness();
    h.repository.fail_list_all.store(true, Ordering::SeqCst);

    h.orchestrator.init().await.unwrap();

    assert_eq!(h.orchestrator.lifecycle().await, Lifecycle::Ready);
    let session = h.orchestrator.session().await;
    assert_eq!(session.title, UNTITLED_TITLE);
    assert!(h.orchestrator.last_error().await.unwrap().contains("session listing failed"));
    assert!(!h.auth.signed_out.load(Ordering::SeqCst));
}

#[tokio::test]
async fn select_session_loads_from_the_store() {
    let h = harness();
    h.orchestrator.init().await.unwrap();
    let mut other = Session::new();
    other.concept = "other project".to_string();
    let other_id = other.id.clone();
    h.repository.insert(other);

    h.orchestrator.select_session(&other_id).await.unwrap();
    assert_eq!(h.orchestrator.session().await.concept, "other project");

    let err = h.orchestrator.select_session("missing").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn editing_an_unknown_entity_is_reported() {
    let h = harness();
    h.orchestrator.init().await.unwrap();
    assert!(h.orchestrator.generate_asset_image("nope").await.unwrap_err().is_not_found());
    assert!(h.orchestrator.generate_frame("nope").await.unwrap_err().is_not_found());
    assert!(h.orchestrator.set_shot_voice_text("nope", "hi").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn shot_duration_must_be_positive() {
    let h = harness();
    h.orchestrator.init().await.unwrap();
    let shot_id = h.orchestrator.add_shot().await;
    assert!(h.orchestrator.set_shot_duration(&shot_id, 0.0).await.is_err());
    h.orchestrator.set_shot_duration(&shot_id, 4.5).await.unwrap();
    assert_eq!(h.orchestrator.session().await.shots[0].duration, 4.5);
}
