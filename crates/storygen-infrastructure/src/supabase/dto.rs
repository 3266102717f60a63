//! Wire representation of the storyboard session row.
//!
//! The document store keeps sessions in a `storyboard_sessions` table with
//! snake_case columns and JSON columns for the nested collections. This DTO
//! isolates that shape from the domain model.

use serde::{Deserialize, Serialize};
use storygen_core::session::{Asset, ProjectConfig, Session, Shot};

/// One row of the `storyboard_sessions` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRow {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub concept: Option<String>,
    #[serde(default)]
    pub target_duration: Option<u32>,
    #[serde(default)]
    pub num_shots: Option<u32>,
    #[serde(default)]
    pub config: Option<ProjectConfig>,
    #[serde(default)]
    pub assets: Option<Vec<Asset>>,
    #[serde(default)]
    pub shots: Option<Vec<Shot>>,
    pub updated_at: String,
}

impl SessionRow {
    /// Builds the upsert payload for a session, stamped with the owning
    /// account id.
    pub fn from_domain(session: &Session, user_id: &str) -> Self {
        Self {
            id: session.id.clone(),
            user_id: Some(user_id.to_string()),
            title: session.title.clone(),
            concept: Some(session.concept.clone()),
            target_duration: session.target_duration,
            num_shots: session.num_shots,
            config: Some(session.config.clone()),
            assets: Some(session.assets.clone()),
            shots: Some(session.shots.clone()),
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Converts a fetched row back into the domain model, defaulting any
    /// columns a legacy row may be missing.
    pub fn into_domain(self) -> Session {
        Session {
            id: self.id,
            title: self.title,
            concept: self.concept.unwrap_or_default(),
            target_duration: self.target_duration,
            num_shots: self.num_shots,
            assets: self.assets.unwrap_or_default(),
            shots: self.shots.unwrap_or_default(),
            config: self.config.unwrap_or_default(),
            updated_at: self.updated_at,
        }
    }
}
