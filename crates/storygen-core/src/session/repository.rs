//! Session repository trait.
//!
//! Defines the interface for session persistence operations.

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for managing session persistence.
///
/// This trait defines the contract for persisting and retrieving storyboard
/// sessions, decoupling the orchestration logic from the specific storage
/// mechanism (e.g., a hosted document store).
///
/// The full session is the unit of persistence: `save` is a whole-document
/// upsert keyed by session id, never a field-level patch. All operations are
/// scoped to the authenticated account; writes to another account's sessions
/// are rejected by the backend's access policy, not by this component.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Upserts a session document keyed by its id.
    ///
    /// # Errors
    ///
    /// Auth-class failures are returned as `StorygenError::Auth` so callers
    /// can distinguish an expired credential from a transient fault.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Lists all sessions for the current account, most recently modified
    /// first.
    async fn list_all(&self) -> Result<Vec<Session>>;

    /// Finds a session by its id.
    ///
    /// Returns `Ok(None)` if the session does not exist.
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>>;

    /// Deletes a session by id.
    ///
    /// Deletion is idempotent: deleting an absent session is not an error.
    async fn delete(&self, session_id: &str) -> Result<()>;
}
