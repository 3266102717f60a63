//! Storyboard session domain model.
//!
//! This module contains the core entities the orchestration layer operates
//! on: `Session` (the unit of persistence), its cast `Asset`s, the ordered
//! `Shot` list, and the project-level `ProjectConfig`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of concept characters used for the derived session title.
const TITLE_PREFIX_LEN: usize = 30;

/// Fallback title for sessions without a concept.
pub const UNTITLED_TITLE: &str = "Untitled Project";

/// Kind of a cast asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Character,
    Object,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Character => "character",
            AssetKind::Object => "object",
        }
    }
}

/// A reusable character/object definition used as generation context.
///
/// Assets are created with defaults at project start and mutated by user
/// edits and by generation completion. They are never deleted individually,
/// only as part of a project reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique asset identifier
    pub id: String,
    /// Display name, also fed into prompts
    pub name: String,
    /// Asset kind (character or object)
    pub kind: AssetKind,
    /// Free-text visual prompt
    #[serde(default)]
    pub prompt: String,
    /// Generated or uploaded image reference (public URL or data URI)
    #[serde(default)]
    pub image_url: Option<String>,
    /// Whether this asset is included as shotlist/generation context
    pub is_selected: bool,
    /// Transient generation flag, never persisted
    #[serde(skip)]
    pub is_generating: bool,
}

impl Asset {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: AssetKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            prompt: String::new(),
            image_url: None,
            is_selected: false,
            is_generating: false,
        }
    }

    /// The default asset trio every new project starts with.
    pub fn default_cast() -> Vec<Asset> {
        vec![
            Asset {
                is_selected: true,
                ..Asset::new("c1", "Protagonist", AssetKind::Character)
            },
            Asset::new("c2", "Sidekick", AssetKind::Character),
            Asset::new("o1", "Hero Item", AssetKind::Object),
        ]
    }
}

/// One storyboard beat: narrative description, visual direction, dialogue,
/// duration, and optional generated frame/video references.
///
/// Shot order is the array index and is semantically meaningful: it is the
/// playback/export order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    /// Unique shot identifier, generated client-side
    pub id: String,
    /// Narrative action
    pub scene_description: String,
    /// Visual direction
    pub frame_description: String,
    /// Dialogue lines
    pub voice_text: String,
    /// Duration in seconds (positive)
    pub duration: f64,
    /// Generated frame reference (public URL)
    #[serde(default)]
    pub image_url: Option<String>,
    /// Generated video reference (public URL)
    #[serde(default)]
    pub video_url: Option<String>,
    /// Transient frame-generation flag, never persisted
    #[serde(skip)]
    pub is_generating: bool,
    /// Transient video-generation flag, never persisted
    #[serde(skip)]
    pub is_generating_video: bool,
}

impl Shot {
    /// Generates a fresh random shot id (9 lowercase alphanumeric chars).
    pub fn generate_id() -> String {
        const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
        let mut rng = rand::thread_rng();
        (0..9)
            .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
            .collect()
    }

    /// Creates an empty shot with the default 3-second duration.
    pub fn blank() -> Self {
        Self {
            id: Self::generate_id(),
            scene_description: String::new(),
            frame_description: String::new(),
            voice_text: String::new(),
            duration: 3.0,
            image_url: None,
            video_url: None,
            is_generating: false,
            is_generating_video: false,
        }
    }
}

/// Aspect ratio identifier, driving both generation parameters and layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "9:16")]
    Tall,
    #[serde(rename = "1:1")]
    Square,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Wide => "16:9",
            AspectRatio::Tall => "9:16",
            AspectRatio::Square => "1:1",
        }
    }
}

/// Project-level generation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Style identifier, selecting a fixed style-prompt string
    pub style: String,
    /// Aspect ratio for frame and clip generation
    pub aspect_ratio: AspectRatio,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            style: crate::session::style::STORY_STYLES[0].id.to_string(),
            aspect_ratio: AspectRatio::Wide,
        }
    }
}

/// A storyboard project session: the full unit of persistence.
///
/// Exactly one session is active at a time. The in-memory session is owned
/// by the orchestrator; the remote store is a one-way mirror that is treated
/// as source of truth only at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Human-readable session title, derived from the concept prefix
    pub title: String,
    /// Story concept the shotlist is synthesized from
    #[serde(default)]
    pub concept: String,
    /// Target total duration in seconds; `None` lets the generator estimate
    #[serde(default)]
    pub target_duration: Option<u32>,
    /// Exact shot count; `None` lets the generator choose
    #[serde(default)]
    pub num_shots: Option<u32>,
    /// Cast assets
    pub assets: Vec<Asset>,
    /// Ordered shot list
    #[serde(default)]
    pub shots: Vec<Shot>,
    /// Style/ratio configuration
    pub config: ProjectConfig,
    /// Timestamp when the session was last modified (ISO 8601 format)
    pub updated_at: String,
}

impl Session {
    /// Creates a fresh empty session with the default asset trio.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: UNTITLED_TITLE.to_string(),
            concept: String::new(),
            target_duration: None,
            num_shots: None,
            assets: Asset::default_cast(),
            shots: Vec::new(),
            config: ProjectConfig::default(),
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Derives the session title from the concept prefix, falling back to
    /// "Untitled Project" for an empty concept.
    pub fn derive_title(concept: &str) -> String {
        let prefix: String = concept.chars().take(TITLE_PREFIX_LEN).collect();
        if prefix.is_empty() {
            UNTITLED_TITLE.to_string()
        } else {
            prefix
        }
    }

    /// Refreshes the derived title and last-modified timestamp.
    pub fn touch(&mut self) {
        self.title = Self::derive_title(&self.concept);
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
