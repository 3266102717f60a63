//! Supabase account session holder.
//!
//! The actual sign-in flows (password, OAuth) happen outside the core; this
//! component only holds the resulting account identity and token, and clears
//! them on sign-out.

use async_trait::async_trait;
use storygen_core::auth::AuthProvider;
use storygen_core::error::{Result, StorygenError};
use tokio::sync::RwLock;

/// An authenticated account session.
#[derive(Debug, Clone)]
pub struct AccountSession {
    pub user_id: String,
    pub access_token: String,
}

/// Auth provider backed by a held Supabase account session.
pub struct SupabaseAuth {
    session: RwLock<Option<AccountSession>>,
}

impl SupabaseAuth {
    /// Creates a provider with no account signed in.
    pub fn new() -> Self {
        Self {
            session: RwLock::new(None),
        }
    }

    /// Creates a provider holding an already-authenticated session.
    pub fn signed_in(user_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            session: RwLock::new(Some(AccountSession {
                user_id: user_id.into(),
                access_token: access_token.into(),
            })),
        }
    }

    /// Replaces the held account session (e.g. after a token refresh).
    pub async fn set_session(&self, session: AccountSession) {
        *self.session.write().await = Some(session);
    }
}

impl Default for SupabaseAuth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn user_id(&self) -> Result<String> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.user_id.clone())
            .ok_or_else(|| StorygenError::auth("Not authenticated"))
    }

    async fn access_token(&self) -> Result<String> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
            .ok_or_else(|| StorygenError::auth("Not authenticated"))
    }

    async fn sign_out(&self) {
        tracing::info!("[SupabaseAuth] Clearing account session");
        *self.session.write().await = None;
    }
}
