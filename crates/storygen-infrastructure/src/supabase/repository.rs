//! PostgREST-backed SessionRepository implementation.
//!
//! Sessions are whole-document rows in the `storyboard_sessions` table.
//! Row-level security on the backend scopes every query to the calling
//! account; this component never filters by user id itself for reads, it
//! only stamps the owning account on writes.

use super::dto::SessionRow;
use async_trait::async_trait;
use std::sync::Arc;
use storygen_core::auth::AuthProvider;
use storygen_core::config::SupabaseConfig;
use storygen_core::error::{Result, StorygenError};
use storygen_core::session::{Session, SessionRepository};

const SESSIONS_TABLE: &str = "storyboard_sessions";

/// Session repository backed by the Supabase REST surface.
pub struct SupabaseSessionRepository {
    client: reqwest::Client,
    config: SupabaseConfig,
    auth: Arc<dyn AuthProvider>,
}

impl SupabaseSessionRepository {
    pub fn new(config: SupabaseConfig, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            auth,
        }
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.project_url.trim_end_matches('/'),
            SESSIONS_TABLE
        )
    }

    async fn authed(&self, request: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
        let token = self.auth.access_token().await?;
        Ok(request
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token))
    }

    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(map_store_status(status, &body))
    }
}

#[async_trait]
impl SessionRepository for SupabaseSessionRepository {
    async fn save(&self, session: &Session) -> Result<()> {
        let user_id = self.auth.user_id().await?;
        let row = SessionRow::from_domain(session, &user_id);
        tracing::debug!(session_id = %session.id, "upserting session");
        let request = self
            .authed(self.client.post(self.table_url()))
            .await?
            .header("Prefer", "resolution=merge-duplicates")
            .json(&row);
        let response = request
            .send()
            .await
            .map_err(|e| StorygenError::data_access(format!("Session upsert failed: {e}")))?;
        self.check(response).await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Session>> {
        let request = self
            .authed(self.client.get(self.table_url()))
            .await?
            .query(&[("select", "*"), ("order", "updated_at.desc")]);
        let response = request
            .send()
            .await
            .map_err(|e| StorygenError::data_access(format!("Session list failed: {e}")))?;
        let rows: Vec<SessionRow> = self
            .check(response)
            .await?
            .json()
            .await
            .map_err(|e| StorygenError::data_access(format!("Invalid session list: {e}")))?;
        Ok(rows.into_iter().map(SessionRow::into_domain).collect())
    }

    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>> {
        let request = self
            .authed(self.client.get(self.table_url()))
            .await?
            .query(&[("select", "*"), ("id", &format!("eq.{session_id}"))]);
        let response = request
            .send()
            .await
            .map_err(|e| StorygenError::data_access(format!("Session fetch failed: {e}")))?;
        let mut rows: Vec<SessionRow> = self
            .check(response)
            .await?
            .json()
            .await
            .map_err(|e| StorygenError::data_access(format!("Invalid session row: {e}")))?;
        Ok(rows.pop().map(SessionRow::into_domain))
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        let request = self
            .authed(self.client.delete(self.table_url()))
            .await?
            .query(&[("id", &format!("eq.{session_id}"))]);
        let response = request
            .send()
            .await
            .map_err(|e| StorygenError::data_access(format!("Session delete failed: {e}")))?;
        // A delete that matched no rows still returns success, which keeps
        // deletion idempotent.
        self.check(response).await?;
        Ok(())
    }
}

/// Maps an HTTP error status from the document store onto the taxonomy.
/// 401/403 indicate a broken credential and trigger forced sign-out upstream.
fn map_store_status(status: reqwest::StatusCode, body: &str) -> StorygenError {
    match status.as_u16() {
        401 | 403 => StorygenError::auth(format!("Store rejected the credential: {status}")),
        _ => StorygenError::data_access(format!("Store error {status}: {body}")),
    }
}
