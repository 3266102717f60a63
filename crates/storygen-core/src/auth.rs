//! Auth provider interface.
//!
//! The core consumes account identity as a black box. Sign-out is invoked
//! as a reaction to authorization failures, not as a primary flow.

use crate::error::Result;
use async_trait::async_trait;

/// Current-account identity and credential access.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Returns the authenticated account id.
    ///
    /// # Errors
    ///
    /// Returns `StorygenError::Auth` when no account is signed in.
    async fn user_id(&self) -> Result<String>;

    /// Returns the access token for backend calls.
    async fn access_token(&self) -> Result<String>;

    /// Clears the account session locally.
    async fn sign_out(&self);
}
